//! Comparison policies plugged into the diff engine.
//!
//! A policy decides what a method record looks like, how one pair of report
//! rows becomes a record, and how a record is rendered as a diff-file row.

use crate::report::HeaderMap;
use crate::units::convert_value;
use crate::utils::config::{
    DIFF_LABEL_SUFFIX, METHOD_COLUMN, OUTPUT_DELIMITER, THRESHOLD_LABEL_SUFFIX,
};

use super::schema::{
    format_difference, format_flag, MethodComparison, MethodThresholdComparison, Metric,
    MetricComparison, MetricThresholdComparison,
};
use super::threshold::ThresholdSet;

/// One baseline row and the new row at the same position
#[derive(Debug, Clone, Copy)]
pub struct LinePair<'a> {
    pub base_header: &'a HeaderMap,
    pub new_header: &'a HeaderMap,
    pub base_fields: &'a [String],
    pub new_fields: &'a [String],
}

impl<'a> LinePair<'a> {
    /// Method name from the baseline row, empty when the cell is missing
    pub fn method_name(&self) -> &'a str {
        self.base_header
            .index_of(METHOD_COLUMN)
            .and_then(|index| self.base_fields.get(index))
            .map(String::as_str)
            .unwrap_or_default()
    }

    /// Raw cells for `column`, or `None` if either header lacks it
    ///
    /// A row too short to reach the column yields `None` for that side.
    pub fn cells(&self, column: &str) -> Option<(Option<&'a str>, Option<&'a str>)> {
        let base_index = self.base_header.index_of(column)?;
        let new_index = self.new_header.index_of(column)?;

        Some((
            self.base_fields.get(base_index).map(String::as_str),
            self.new_fields.get(new_index).map(String::as_str),
        ))
    }

    /// Normalized comparison of `column`, or `None` if either header lacks it
    pub fn compare(&self, column: &str) -> Option<MetricComparison> {
        let (base, new) = self.cells(column)?;
        Some(MetricComparison::new(
            column,
            convert_value(base),
            convert_value(new),
        ))
    }
}

/// Record shape and rendering used by [`DiffEngine`](super::DiffEngine)
pub trait ComparisonPolicy {
    type Metric: Metric;

    /// Header labels for a compared (non-method) column
    fn diff_labels(&self, column: &str) -> Vec<String>;

    /// Diff-file cells for one metric
    fn metric_cells(&self, metric: &Self::Metric) -> Vec<String>;

    /// Build the method record for one pair of rows
    fn compare_line(&self, columns: &[String], line: &LinePair<'_>) -> MethodComparison<Self::Metric>;

    /// Render the full header line
    fn render_header(&self, columns: &[String]) -> String {
        columns
            .iter()
            .flat_map(|column| {
                if column == METHOD_COLUMN {
                    vec![column.clone()]
                } else {
                    self.diff_labels(column)
                }
            })
            .collect::<Vec<_>>()
            .join(OUTPUT_DELIMITER)
    }

    /// Render one method record as a row
    ///
    /// Columns missing from the record produce no cells.
    fn render_row(&self, columns: &[String], record: &MethodComparison<Self::Metric>) -> String {
        let mut cells = vec![record.method_name().to_string()];

        for column in columns.iter().filter(|column| *column != METHOD_COLUMN) {
            if let Some(metric) = record.metric(column) {
                cells.extend(self.metric_cells(metric));
            }
        }

        cells.join(OUTPUT_DELIMITER)
    }
}

/// Difference-only diff
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainDiff;

impl ComparisonPolicy for PlainDiff {
    type Metric = MetricComparison;

    fn diff_labels(&self, column: &str) -> Vec<String> {
        vec![format!("{}{}", column, DIFF_LABEL_SUFFIX)]
    }

    fn metric_cells(&self, metric: &MetricComparison) -> Vec<String> {
        vec![format_difference(metric.difference())]
    }

    fn compare_line(&self, columns: &[String], line: &LinePair<'_>) -> MethodComparison {
        let mut record = MethodComparison::new(line.method_name());

        for column in columns.iter().filter(|column| *column != METHOD_COLUMN) {
            if let Some(metric) = line.compare(column) {
                record.insert(metric);
            }
        }

        record
    }
}

/// Diff that also checks each difference against the method's thresholds
#[derive(Debug, Clone, Default)]
pub struct ThresholdDiff {
    thresholds: ThresholdSet,
}

impl ThresholdDiff {
    pub fn new(thresholds: ThresholdSet) -> Self {
        Self { thresholds }
    }

    pub fn thresholds(&self) -> &ThresholdSet {
        &self.thresholds
    }
}

impl ComparisonPolicy for ThresholdDiff {
    type Metric = MetricThresholdComparison;

    fn diff_labels(&self, column: &str) -> Vec<String> {
        vec![
            format!("{}{}", column, DIFF_LABEL_SUFFIX),
            format!("{}{}", column, THRESHOLD_LABEL_SUFFIX),
        ]
    }

    fn metric_cells(&self, metric: &MetricThresholdComparison) -> Vec<String> {
        vec![
            format_difference(metric.difference()),
            format_flag(metric.within_threshold()).to_string(),
        ]
    }

    fn compare_line(&self, columns: &[String], line: &LinePair<'_>) -> MethodThresholdComparison {
        let method_name = line.method_name();
        let threshold = self.thresholds.get(method_name);
        let mut record = MethodThresholdComparison::new(method_name);

        for column in columns.iter().filter(|column| *column != METHOD_COLUMN) {
            if let Some(metric) = line.compare(column) {
                let limit = threshold.and_then(|t| t.limit(column));
                record.insert(MetricThresholdComparison::new(metric, limit));
            }
        }

        record
    }
}
