//! Report diff generation and threshold checking.
//!
//! This module compares paired baseline/new benchmark reports column by
//! column and writes one diff file, optionally flagging differences that
//! exceed per-method thresholds.
//!
//! # Example
//! ```ignore
//! use bench_report_diff::diff::{load_thresholds, DiffEngine, ThresholdDiff};
//! use bench_report_diff::report::create_file_pairs;
//!
//! let pairs = create_file_pairs("baseline/", "latest/")?;
//! let thresholds = load_thresholds("thresholds/")?;
//! let engine = DiffEngine::new(ThresholdDiff::new(thresholds), log::logger());
//! engine.compare_and_write(&columns, &pairs, "DiffReport.csv")?;
//! ```

mod engine;
mod policy;
mod schema;
mod threshold;

// Public API exports
pub use engine::{Comparisons, DiffEngine, DuplicateMethodPolicy, EngineOptions};
pub use policy::{ComparisonPolicy, LinePair, PlainDiff, ThresholdDiff};
pub use schema::{
    format_difference, format_flag, MethodComparison, MethodThresholdComparison, Metric,
    MetricComparison, MetricThresholdComparison,
};
pub use threshold::{load_thresholds, read_threshold_file, MethodThreshold, ThresholdSet};

pub use crate::utils::error::{DiffError, ThresholdError};

#[cfg(test)]
mod tests;
