//! Scenario tests for the diff engine.
//!
//! Each test lays out baseline and new report directories on disk and runs
//! the full pairing, comparison and writing workflow.

use super::*;
use crate::report::create_file_pairs;
use crate::utils::config::DEFAULT_COLUMNS;
use crate::utils::error::ReportError;
use log::{Level, Log, Metadata, Record};
use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use std::fs;
use std::path::Path;
use std::sync::Mutex;
use tempfile::{tempdir, TempDir};

/// Logger that keeps every record it is handed
#[derive(Default)]
struct CapturingLogger {
    records: Mutex<Vec<(Level, String)>>,
}

impl CapturingLogger {
    fn messages(&self, level: Level) -> Vec<String> {
        self.records
            .lock()
            .unwrap()
            .iter()
            .filter(|(record_level, _)| *record_level == level)
            .map(|(_, message)| message.clone())
            .collect()
    }
}

impl Log for CapturingLogger {
    fn enabled(&self, _metadata: &Metadata<'_>) -> bool {
        true
    }

    fn log(&self, record: &Record<'_>) {
        self.records
            .lock()
            .unwrap()
            .push((record.level(), record.args().to_string()));
    }

    fn flush(&self) {}
}

/// Baseline and new report directories plus a place for the diff file
struct Workspace {
    root: TempDir,
}

impl Workspace {
    fn new() -> Self {
        let root = tempdir().unwrap();
        fs::create_dir(root.path().join("base")).unwrap();
        fs::create_dir(root.path().join("new")).unwrap();
        Self { root }
    }

    fn base_dir(&self) -> std::path::PathBuf {
        self.root.path().join("base")
    }

    fn new_dir(&self) -> std::path::PathBuf {
        self.root.path().join("new")
    }

    fn output_path(&self) -> std::path::PathBuf {
        self.root.path().join("out").join("DiffReport.csv")
    }

    fn add_report(&self, name: &str, base: &str, new: &str) {
        fs::write(self.base_dir().join(name), base).unwrap();
        fs::write(self.new_dir().join(name), new).unwrap();
    }

    fn pairs(&self) -> Vec<crate::report::FilePair> {
        create_file_pairs(self.base_dir(), self.new_dir()).unwrap()
    }

    fn read_output(&self) -> String {
        fs::read_to_string(self.output_path()).unwrap()
    }
}

fn columns(list: &str) -> Vec<String> {
    list.split(',').map(|c| c.trim().to_string()).collect()
}

fn run<P: ComparisonPolicy>(workspace: &Workspace, policy: P, cols: &str) -> Result<(), DiffError> {
    let logger = CapturingLogger::default();
    DiffEngine::new(policy, &logger).compare_and_write(
        &columns(cols),
        &workspace.pairs(),
        workspace.output_path(),
    )
}

#[test]
fn test_plain_diff_end_to_end() {
    let workspace = Workspace::new();
    workspace.add_report(
        "Sorting-report.csv",
        "Method,Mean\nFoo,907.4 ms\n",
        "Method,Mean\nFoo,500 ms\n",
    );

    run(&workspace, PlainDiff, "Method,Mean,Median").unwrap();

    assert_eq!(
        workspace.read_output(),
        "Method, Mean Diff, Median Diff\nFoo, -407400000\n"
    );
}

#[test]
fn test_single_column_scenario() {
    let workspace = Workspace::new();
    workspace.add_report(
        "Sorting-report.csv",
        "Method,Mean\nFoo,907.4 ms\n",
        "Method,Mean\nFoo,500 ms\n",
    );

    run(&workspace, PlainDiff, "Method,Mean").unwrap();

    assert_eq!(workspace.read_output(), "Method, Mean Diff\nFoo, -407400000\n");
}

#[test]
fn test_value_overflowing_its_unit_is_absent() {
    let workspace = Workspace::new();
    workspace.add_report(
        "Sorting-report.csv",
        "Method,Mean,Max\nFoo,79228162514264337593543950335 s,1 s\n",
        "Method,Mean,Max\nFoo,1 s,2 s\n",
    );

    run(&workspace, PlainDiff, "Method,Mean,Max").unwrap();

    assert_eq!(
        workspace.read_output(),
        "Method, Mean Diff, Max Diff\nFoo, , 1000000000\n"
    );
}

#[test]
fn test_default_columns_with_benchmark_report() {
    let workspace = Workspace::new();
    workspace.add_report(
        "Parsing-report.csv",
        "Method,Mean,Error,StdDev,Median,Max,Gen 0,Gen 1,Gen 2,Allocated\n\
         Parse,1024.5 ns,3 ns,2 ns,1 us,2 us,0.1,-,-,1 KB\n",
        "Method,Mean,Error,StdDev,Median,Max,Gen 0,Gen 1,Gen 2,Allocated\n\
         Parse,1000.5 ns,3 ns,2 ns,2 us,2 us,0.3,-,-,2 KB\n",
    );

    run(&workspace, PlainDiff, DEFAULT_COLUMNS).unwrap();

    assert_eq!(
        workspace.read_output(),
        "Method, Mean Diff, Median Diff, Max Diff, Gen 0 Diff, Gen 1 Diff, Gen 2 Diff, Allocated Diff\n\
         Parse, -24, 1000, 0, 0.2, , , 1000\n"
    );
}

#[test]
fn test_threshold_diff_end_to_end() {
    let workspace = Workspace::new();
    workspace.add_report(
        "Sorting-report.csv",
        "Method,Mean,Max\nFoo,100 ns,10 ns\nBar,1 ns,1 ns\n",
        "Method,Mean,Max\nFoo,150 ns,30 ns\nBar,2 ns,2 ns\n",
    );

    let thresholds = vec![MethodThreshold::new("Foo")
        .with_limit("Mean", Some(Decimal::from(50)))
        .with_limit("Max", Some(Decimal::from(5)))]
    .into_iter()
    .collect();

    run(&workspace, ThresholdDiff::new(thresholds), "Method,Mean,Max").unwrap();

    assert_eq!(
        workspace.read_output(),
        "Method, Mean Diff, Mean W/I ThresH, Max Diff, Max W/I ThresH\n\
         Foo, 50, True, 20, False\n\
         Bar, 1, True, 1, True\n"
    );
}

#[test]
fn test_column_missing_from_new_report_is_omitted() {
    let workspace = Workspace::new();
    workspace.add_report(
        "A-report.csv",
        "Method,Mean,Allocated\nFoo,2 ns,1 KB\n",
        "Method,Mean\nFoo,3 ns\n",
    );

    run(&workspace, PlainDiff, "Method,Allocated,Mean").unwrap();

    assert_eq!(
        workspace.read_output(),
        "Method, Allocated Diff, Mean Diff\nFoo, 1\n"
    );
}

#[test]
fn test_duplicate_method_fails_by_default() {
    let workspace = Workspace::new();
    workspace.add_report("A-report.csv", "Method,Mean\nFoo,1 ns\n", "Method,Mean\nFoo,2 ns\n");
    workspace.add_report("B-report.csv", "Method,Mean\nFoo,1 ns\n", "Method,Mean\nFoo,2 ns\n");

    let result = run(&workspace, PlainDiff, "Method,Mean");

    match result {
        Err(DiffError::DuplicateMethod { method, file }) => {
            assert_eq!(method, "Foo");
            assert_eq!(file, workspace.base_dir().join("B-report.csv"));
        }
        other => panic!("expected DuplicateMethod, got {:?}", other),
    }
    assert!(!workspace.output_path().exists());
}

#[test]
fn test_duplicate_methods_qualified_by_report() {
    let workspace = Workspace::new();
    workspace.add_report("A-report.csv", "Method,Mean\nFoo,1 ns\n", "Method,Mean\nFoo,2 ns\n");
    workspace.add_report("B-report.csv", "Method,Mean\nFoo,1 ns\n", "Method,Mean\nFoo,4 ns\n");

    let logger = CapturingLogger::default();
    let options = EngineOptions {
        duplicates: DuplicateMethodPolicy::QualifyByReport,
    };
    DiffEngine::new(PlainDiff, &logger)
        .with_options(options)
        .compare_and_write(
            &columns("Method,Mean"),
            &workspace.pairs(),
            workspace.output_path(),
        )
        .unwrap();

    assert_eq!(
        workspace.read_output(),
        "Method, Mean Diff\nA/Foo, 1\nB/Foo, 3\n"
    );
}

#[test]
fn test_qualified_names_still_use_plain_thresholds() {
    let workspace = Workspace::new();
    workspace.add_report("A-report.csv", "Method,Mean\nFoo,1 ns\n", "Method,Mean\nFoo,9 ns\n");

    let thresholds = vec![MethodThreshold::new("Foo").with_limit("Mean", Some(Decimal::from(2)))]
        .into_iter()
        .collect();
    let logger = CapturingLogger::default();
    let engine = DiffEngine::new(ThresholdDiff::new(thresholds), &logger).with_options(
        EngineOptions {
            duplicates: DuplicateMethodPolicy::QualifyByReport,
        },
    );

    let comparisons = engine
        .compare(&columns("Method,Mean"), &workspace.pairs())
        .unwrap();

    let record = comparisons.get("A/Foo").unwrap();
    assert!(!record.metric("Mean").unwrap().within_threshold());
    assert_eq!(engine.policy().thresholds().limit("Foo", "Mean"), Some(Decimal::from(2)));
    assert!(comparisons.get("Foo").is_none());
}

#[test]
fn test_repeated_method_within_one_report_fails_even_when_qualified() {
    let workspace = Workspace::new();
    workspace.add_report(
        "A-report.csv",
        "Method,Mean\nFoo,1 ns\nFoo,2 ns\n",
        "Method,Mean\nFoo,2 ns\nFoo,3 ns\n",
    );

    let logger = CapturingLogger::default();
    let result = DiffEngine::new(PlainDiff, &logger)
        .with_options(EngineOptions {
            duplicates: DuplicateMethodPolicy::QualifyByReport,
        })
        .compare_and_write(
            &columns("Method,Mean"),
            &workspace.pairs(),
            workspace.output_path(),
        );

    match result {
        Err(DiffError::DuplicateMethod { method, file }) => {
            assert_eq!(method, "A/Foo");
            assert_eq!(file, workspace.base_dir().join("A-report.csv"));
        }
        other => panic!("expected DuplicateMethod, got {:?}", other),
    }
    assert!(!workspace.output_path().exists());
}

#[test]
fn test_malformed_line_writes_nothing() {
    let workspace = Workspace::new();
    workspace.add_report(
        "A-report.csv",
        "Method,Mean\nFoo,\"1 ns\n",
        "Method,Mean\nFoo,2 ns\n",
    );

    let result = run(&workspace, PlainDiff, "Method,Mean");

    assert!(matches!(
        result,
        Err(DiffError::Report(ReportError::MalformedLine { .. }))
    ));
    assert!(!workspace.output_path().exists());
}

#[test]
fn test_missing_method_column() {
    let workspace = Workspace::new();
    workspace.add_report("A-report.csv", "Name,Mean\nFoo,1 ns\n", "Method,Mean\nFoo,2 ns\n");

    let result = run(&workspace, PlainDiff, "Method,Mean");

    assert!(matches!(result, Err(DiffError::MissingMethodColumn { .. })));
}

#[test]
fn test_empty_report_contributes_no_rows() {
    let workspace = Workspace::new();
    workspace.add_report("A-report.csv", "", "");
    workspace.add_report("B-report.csv", "Method,Mean\nFoo,1 ns\n", "Method,Mean\nFoo,2 ns\n");

    run(&workspace, PlainDiff, "Method,Mean").unwrap();

    assert_eq!(workspace.read_output(), "Method, Mean Diff\nFoo, 1\n");
}

#[test]
fn test_no_pairs_writes_header_only() {
    let workspace = Workspace::new();

    let logger = CapturingLogger::default();
    let engine = DiffEngine::new(PlainDiff, &logger);
    let comparisons = engine.compare(&columns("Method,Mean"), &workspace.pairs()).unwrap();
    assert!(comparisons.is_empty());

    run(&workspace, PlainDiff, "Method,Mean").unwrap();

    assert_eq!(workspace.read_output(), "Method, Mean Diff\n");
}

#[test]
fn test_extra_rows_are_ignored_and_logged() {
    let workspace = Workspace::new();
    workspace.add_report(
        "A-report.csv",
        "Method,Mean\nFoo,1 ns\nBar,1 ns\n",
        "Method,Mean\nFoo,2 ns\n",
    );

    let logger = CapturingLogger::default();
    DiffEngine::new(PlainDiff, &logger)
        .compare_and_write(
            &columns("Method,Mean"),
            &workspace.pairs(),
            workspace.output_path(),
        )
        .unwrap();

    assert_eq!(workspace.read_output(), "Method, Mean Diff\nFoo, 1\n");
    assert!(logger
        .messages(Level::Debug)
        .iter()
        .any(|message| message.contains("extra rows in baseline")));
}

#[test]
fn test_byte_order_mark_is_stripped() {
    let workspace = Workspace::new();
    workspace.add_report(
        "A-report.csv",
        "\u{feff}Method,Mean\nFoo,1 ns\n",
        "\u{feff}Method,Mean\r\nFoo,3 ns\r\n",
    );

    run(&workspace, PlainDiff, "Method,Mean").unwrap();

    assert_eq!(workspace.read_output(), "Method, Mean Diff\nFoo, 2\n");
}

#[test]
fn test_rows_without_method_name_are_skipped() {
    let workspace = Workspace::new();
    workspace.add_report(
        "A-report.csv",
        "Method,Mean\n,1 ns\nFoo,1 ns\n",
        "Method,Mean\n,2 ns\nFoo,5 ns\n",
    );

    run(&workspace, PlainDiff, "Method,Mean").unwrap();

    assert_eq!(workspace.read_output(), "Method, Mean Diff\nFoo, 4\n");
}

#[test]
fn test_output_is_idempotent() {
    let workspace = Workspace::new();
    workspace.add_report("B-report.csv", "Method,Mean\nB1,1 us\n", "Method,Mean\nB1,2 us\n");
    workspace.add_report("A-report.csv", "Method,Mean\nA1,1 ms\n", "Method,Mean\nA1,1 ms\n");

    run(&workspace, PlainDiff, "Method,Mean").unwrap();
    let first = fs::read(workspace.output_path()).unwrap();
    run(&workspace, PlainDiff, "Method,Mean").unwrap();
    let second = fs::read(workspace.output_path()).unwrap();

    assert_eq!(first, second);
    assert_eq!(
        String::from_utf8(first).unwrap(),
        "Method, Mean Diff\nA1, 0\nB1, 1000\n"
    );
}

#[test]
fn test_progress_is_logged_to_injected_logger() {
    let workspace = Workspace::new();
    workspace.add_report("A-report.csv", "Method,Mean\nFoo,1 ns\n", "Method,Mean\nFoo,2 ns\n");

    let logger = CapturingLogger::default();
    DiffEngine::new(PlainDiff, &logger)
        .compare_and_write(
            &columns("Method,Mean"),
            &workspace.pairs(),
            workspace.output_path(),
        )
        .unwrap();

    let info = logger.messages(Level::Info);
    assert!(info.iter().any(|m| m == "Comparing file-pair:A-report.csv"));
    assert!(info
        .iter()
        .any(|m| m == "Completed file-pair comparisons for 1 benchmark operations"));
}

#[test]
fn test_comparisons_lookup() {
    let workspace = Workspace::new();
    workspace.add_report(
        "A-report.csv",
        "Method,Mean\nFoo,1 ns\nBar,4 ns\n",
        "Method,Mean\nFoo,2 ns\nBar,2 ns\n",
    );
    let logger = CapturingLogger::default();

    let comparisons = DiffEngine::new(PlainDiff, &logger)
        .compare(&columns("Method,Mean"), &workspace.pairs())
        .unwrap();

    assert_eq!(comparisons.len(), 2);
    assert_eq!(
        comparisons.get("Bar").unwrap().metric("Mean").unwrap().difference(),
        Some(Decimal::from(-2))
    );
    let order: Vec<&str> = comparisons.iter().map(|r| r.method_name()).collect();
    assert_eq!(order, vec!["Foo", "Bar"]);
    assert!(!comparisons.is_empty());

    let foo_metrics: Vec<&str> = comparisons
        .get("Foo")
        .unwrap()
        .metrics()
        .map(|metric| metric.metric_name.as_str())
        .collect();
    assert_eq!(foo_metrics, vec!["Mean"]);
}

#[test]
fn test_unreadable_report_path() {
    let logger = CapturingLogger::default();
    let dir = tempdir().unwrap();
    let pair = crate::report::FilePair::new(
        dir.path().join("missing-report.csv"),
        Path::new("also-missing-report.csv"),
    );

    let result = DiffEngine::new(PlainDiff, &logger).compare(&columns("Method"), &[pair]);

    assert!(matches!(result, Err(DiffError::Report(ReportError::Io(_)))));
}
