//! Compare command implementation.
//!
//! The compare command:
//! 1. Validates the directories and column list
//! 2. Pairs baseline and new reports by file name
//! 3. Loads thresholds (if a threshold directory is given)
//! 4. Diffs every pair and writes `DiffReport.csv`

use super::models::CompareArgs;
use crate::diff::{
    load_thresholds, ComparisonPolicy, DiffEngine, DuplicateMethodPolicy, EngineOptions,
    PlainDiff, ThresholdDiff,
};
use crate::report::{create_file_pairs, FilePair};
use crate::utils::config::{DIFF_REPORT_FILE_NAME, METHOD_COLUMN};
use anyhow::{Context, Result};
use log::{debug, info};
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Execute the compare command
///
/// **Public** - main entry point called from main.rs
///
/// # Returns
/// Path of the written diff file
///
/// # Errors
/// * Invalid arguments (see [`validate_args`])
/// * Unreadable reports or threshold files
/// * Malformed report lines, missing `Method` column, duplicate methods
/// * File write errors
///
/// # Example
/// ```ignore
/// let args = CompareArgs {
///     base_dir: PathBuf::from("baseline"),
///     new_dir: PathBuf::from("latest"),
///     ..Default::default()
/// };
///
/// let written = execute_compare(args)?;
/// ```
pub fn execute_compare(args: CompareArgs) -> Result<PathBuf> {
    let start_time = Instant::now();

    validate_args(&args)?;

    let columns = parse_columns(&args.columns);
    let output_path = resolve_output_path(args.output_dir.as_deref())?;

    info!("Baseline reports: {}", args.base_dir.display());
    info!("New reports: {}", args.new_dir.display());
    debug!("Columns: {}", columns.join(","));

    let file_pairs = create_file_pairs(&args.base_dir, &args.new_dir)
        .context("Failed to pair report files")?;

    let options = EngineOptions {
        duplicates: if args.qualify_duplicates {
            DuplicateMethodPolicy::QualifyByReport
        } else {
            DuplicateMethodPolicy::Fail
        },
    };

    match &args.threshold_dir {
        Some(threshold_dir) => {
            let thresholds = load_thresholds(threshold_dir).with_context(|| {
                format!("Failed to load thresholds from {}", threshold_dir.display())
            })?;
            info!("Loaded thresholds for {} methods", thresholds.len());

            run_engine(ThresholdDiff::new(thresholds), options, &columns, &file_pairs, &output_path)?;
        }
        None => {
            run_engine(PlainDiff, options, &columns, &file_pairs, &output_path)?;
        }
    }

    let elapsed = start_time.elapsed();
    info!("Compare completed in {:.2}s", elapsed.as_secs_f64());

    Ok(output_path)
}

/// Run one engine over all pairs
///
/// **Private** - internal helper for execute_compare
fn run_engine<P: ComparisonPolicy>(
    policy: P,
    options: EngineOptions,
    columns: &[String],
    file_pairs: &[FilePair],
    output_path: &Path,
) -> Result<()> {
    DiffEngine::new(policy, log::logger())
        .with_options(options)
        .compare_and_write(columns, file_pairs, output_path)
        .context("Failed to diff benchmark reports")
}

/// Validate compare arguments
///
/// **Public** - can be called before execute_compare for early validation
pub fn validate_args(args: &CompareArgs) -> Result<()> {
    if !args.base_dir.is_dir() {
        anyhow::bail!(
            "Baseline directory does not exist: {}",
            args.base_dir.display()
        );
    }

    if !args.new_dir.is_dir() {
        anyhow::bail!("New directory does not exist: {}", args.new_dir.display());
    }

    if let Some(threshold_dir) = &args.threshold_dir {
        if !threshold_dir.is_dir() {
            anyhow::bail!(
                "Threshold directory does not exist: {}",
                threshold_dir.display()
            );
        }
    }

    let columns = parse_columns(&args.columns);
    if columns.is_empty() {
        anyhow::bail!("Column list cannot be empty");
    }

    if !columns.iter().any(|column| column == METHOD_COLUMN) {
        anyhow::bail!("Column list must include {}", METHOD_COLUMN);
    }

    Ok(())
}

/// Split a comma-separated column list
///
/// Entries are trimmed; empty entries are dropped.
pub fn parse_columns(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|column| !column.is_empty())
        .map(str::to_string)
        .collect()
}

/// Location of the diff file for an optional output directory
pub fn resolve_output_path(output_dir: Option<&Path>) -> Result<PathBuf> {
    let dir = match output_dir {
        Some(dir) => dir.to_path_buf(),
        None => std::env::current_dir().context("Failed to resolve current directory")?,
    };

    Ok(dir.join(DIFF_REPORT_FILE_NAME))
}
