//! Core diff engine implementation.
//! Compares paired reports row by row and writes the diff file.

use log::{Level, Log, Metadata, Record};
use std::collections::HashMap;
use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader, Lines};
use std::path::Path;

use crate::output::write_diff_file;
use crate::report::{parse_line, FilePair, HeaderMap};
use crate::utils::config::METHOD_COLUMN;
use crate::utils::error::{DiffError, ReportError};

use super::policy::{ComparisonPolicy, LinePair};
use super::schema::{MethodComparison, Metric};

/// What to do when a method name shows up twice in one run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DuplicateMethodPolicy {
    /// Abort the run with `DiffError::DuplicateMethod`
    #[default]
    Fail,

    /// Key every method as `<report name>/<method>`
    ///
    /// Only separates methods from different reports; a method repeated
    /// within one report still fails with `DiffError::DuplicateMethod`.
    QualifyByReport,
}

/// Knobs for a single engine run
#[derive(Debug, Clone, Copy, Default)]
pub struct EngineOptions {
    pub duplicates: DuplicateMethodPolicy,
}

/// Method records of a run, in insertion order
#[derive(Debug, Clone)]
pub struct Comparisons<M> {
    records: Vec<MethodComparison<M>>,
    index: HashMap<String, usize>,
}

impl<M: Metric> Comparisons<M> {
    fn new() -> Self {
        Self {
            records: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Add a record; its method name must not be taken yet
    fn insert(&mut self, record: MethodComparison<M>, source: &Path) -> Result<(), DiffError> {
        let method = record.method_name().to_string();
        if self.index.contains_key(&method) {
            return Err(DiffError::DuplicateMethod {
                method,
                file: source.to_path_buf(),
            });
        }

        self.index.insert(method, self.records.len());
        self.records.push(record);
        Ok(())
    }

    pub fn get(&self, method_name: &str) -> Option<&MethodComparison<M>> {
        self.index
            .get(method_name)
            .map(|&position| &self.records[position])
    }

    pub fn iter(&self) -> impl Iterator<Item = &MethodComparison<M>> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Generic report comparer
///
/// The policy decides the record shape and rendering; the engine owns file
/// handling, row pairing and aggregation. Log output goes to the logger given
/// at construction.
pub struct DiffEngine<'a, P> {
    policy: P,
    logger: &'a dyn Log,
    options: EngineOptions,
}

impl<'a, P: ComparisonPolicy> DiffEngine<'a, P> {
    pub fn new(policy: P, logger: &'a dyn Log) -> Self {
        Self {
            policy,
            logger,
            options: EngineOptions::default(),
        }
    }

    pub fn with_options(mut self, options: EngineOptions) -> Self {
        self.options = options;
        self
    }

    pub fn policy(&self) -> &P {
        &self.policy
    }

    /// Compare all file pairs and write the diff file
    ///
    /// Nothing is written if any pair fails to compare.
    ///
    /// # Errors
    /// * `DiffError::Report` - a report cannot be read or has a malformed line
    /// * `DiffError::MissingMethodColumn` - a baseline report has no `Method` column
    /// * `DiffError::DuplicateMethod` - a method name repeats (default policy)
    /// * `DiffError::Output` - the diff file cannot be written
    ///
    /// # Example
    /// ```ignore
    /// let engine = DiffEngine::new(PlainDiff, log::logger());
    /// engine.compare_and_write(&columns, &pairs, "DiffReport.csv")?;
    /// ```
    pub fn compare_and_write(
        &self,
        columns: &[String],
        file_pairs: &[FilePair],
        output_path: impl AsRef<Path>,
    ) -> Result<(), DiffError> {
        let output_path = output_path.as_ref();

        self.log(
            Level::Info,
            format_args!("Beginning file-pair comparisons for benchmark operations"),
        );
        let comparisons = self.compare(columns, file_pairs)?;
        self.log(
            Level::Info,
            format_args!(
                "Completed file-pair comparisons for {} benchmark operations",
                comparisons.len()
            ),
        );

        self.log(
            Level::Info,
            format_args!("Writing diffed results to {}", output_path.display()),
        );
        let (header, rows) = self.render(columns, &comparisons);
        write_diff_file(output_path, &header, &rows)?;
        self.log(
            Level::Info,
            format_args!("Diff results successfully written to {}", output_path.display()),
        );

        Ok(())
    }

    /// Build the method records for all file pairs
    pub fn compare(
        &self,
        columns: &[String],
        file_pairs: &[FilePair],
    ) -> Result<Comparisons<P::Metric>, DiffError> {
        let mut comparisons = Comparisons::new();

        for pair in file_pairs {
            self.log(
                Level::Info,
                format_args!("Comparing file-pair:{}", pair.file_name()),
            );

            for mut record in self.compare_file_pair(columns, pair)? {
                if record.method_name().is_empty() {
                    continue;
                }

                if self.options.duplicates == DuplicateMethodPolicy::QualifyByReport {
                    let qualified = format!("{}/{}", pair.report_name(), record.method_name());
                    record.rename(qualified);
                }

                comparisons.insert(record, pair.base_file())?;
            }
        }

        Ok(comparisons)
    }

    /// Render the header line and one row per method
    pub fn render(
        &self,
        columns: &[String],
        comparisons: &Comparisons<P::Metric>,
    ) -> (String, Vec<String>) {
        let header = self.policy.render_header(columns);
        let rows = comparisons
            .iter()
            .map(|record| self.policy.render_row(columns, record))
            .collect();

        (header, rows)
    }

    /// Compare one pair of reports row by row
    ///
    /// Rows are paired by position; once either report runs out the
    /// remaining rows of the other are ignored.
    fn compare_file_pair(
        &self,
        columns: &[String],
        pair: &FilePair,
    ) -> Result<Vec<MethodComparison<P::Metric>>, DiffError> {
        let mut base_lines = open_lines(pair.base_file())?;
        let mut new_lines = open_lines(pair.new_file())?;

        let (Some(base_header), Some(new_header)) =
            (next_line(&mut base_lines)?, next_line(&mut new_lines)?)
        else {
            self.log(
                Level::Debug,
                format_args!("Skipping {}: empty report", pair.file_name()),
            );
            return Ok(Vec::new());
        };

        let base_header = HeaderMap::parse(strip_bom(&base_header));
        let new_header = HeaderMap::parse(strip_bom(&new_header));

        if !base_header.contains(METHOD_COLUMN) {
            return Err(DiffError::MissingMethodColumn {
                file: pair.base_file().to_path_buf(),
            });
        }

        let mut records = Vec::new();

        loop {
            let Some(base_line) = next_line(&mut base_lines)? else {
                if new_lines.next().is_some() {
                    self.log(
                        Level::Debug,
                        format_args!("Ignoring extra rows in new {}", pair.file_name()),
                    );
                }
                break;
            };
            let Some(new_line) = next_line(&mut new_lines)? else {
                self.log(
                    Level::Debug,
                    format_args!("Ignoring extra rows in baseline {}", pair.file_name()),
                );
                break;
            };

            let base_fields = parse_line(&base_line)?;
            let new_fields = parse_line(&new_line)?;

            let line = LinePair {
                base_header: &base_header,
                new_header: &new_header,
                base_fields: &base_fields,
                new_fields: &new_fields,
            };

            records.push(self.policy.compare_line(columns, &line));
        }

        Ok(records)
    }

    fn log(&self, level: Level, args: fmt::Arguments<'_>) {
        let metadata = Metadata::builder()
            .level(level)
            .target(module_path!())
            .build();

        if self.logger.enabled(&metadata) {
            self.logger.log(
                &Record::builder()
                    .metadata(metadata)
                    .args(args)
                    .module_path_static(Some(module_path!()))
                    .file_static(Some(file!()))
                    .build(),
            );
        }
    }
}

fn open_lines(path: &Path) -> Result<Lines<BufReader<File>>, ReportError> {
    Ok(BufReader::new(File::open(path)?).lines())
}

fn next_line(lines: &mut Lines<BufReader<File>>) -> Result<Option<String>, ReportError> {
    Ok(lines.next().transpose()?)
}

fn strip_bom(line: &str) -> &str {
    line.strip_prefix('\u{feff}').unwrap_or(line)
}
