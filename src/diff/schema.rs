//! Comparison records produced by the diff engine.
//!
//! One method record per benchmarked method, holding one metric record per
//! compared column.

use rust_decimal::Decimal;
use std::collections::HashMap;

/// Comparison of a single metric between baseline and new report
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricComparison {
    /// Column name of this comparison
    pub metric_name: String,

    /// Baseline value in base units
    pub base_value: Option<Decimal>,

    /// New value in base units
    pub new_value: Option<Decimal>,
}

impl MetricComparison {
    pub fn new(
        metric_name: impl Into<String>,
        base_value: Option<Decimal>,
        new_value: Option<Decimal>,
    ) -> Self {
        Self {
            metric_name: metric_name.into(),
            base_value,
            new_value,
        }
    }

    /// `new - base`, absent if either side is absent
    pub fn difference(&self) -> Option<Decimal> {
        self.new_value?.checked_sub(self.base_value?)
    }
}

/// A metric comparison checked against a threshold
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricThresholdComparison {
    pub comparison: MetricComparison,

    /// Maximum accepted difference, if one is defined
    pub threshold: Option<Decimal>,
}

impl MetricThresholdComparison {
    pub fn new(comparison: MetricComparison, threshold: Option<Decimal>) -> Self {
        Self {
            comparison,
            threshold,
        }
    }

    pub fn difference(&self) -> Option<Decimal> {
        self.comparison.difference()
    }

    /// True when no threshold is defined, otherwise `difference <= threshold`
    ///
    /// A missing difference never satisfies a defined threshold.
    pub fn within_threshold(&self) -> bool {
        match self.threshold {
            None => true,
            Some(limit) => matches!(self.difference(), Some(difference) if difference <= limit),
        }
    }
}

/// Access to the metric name of any metric record
pub trait Metric {
    fn metric_name(&self) -> &str;
}

impl Metric for MetricComparison {
    fn metric_name(&self) -> &str {
        &self.metric_name
    }
}

impl Metric for MetricThresholdComparison {
    fn metric_name(&self) -> &str {
        &self.comparison.metric_name
    }
}

/// Comparison of all requested metrics for one method
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodComparison<M = MetricComparison> {
    method_name: String,
    metrics: HashMap<String, M>,
}

/// Method comparison whose metrics carry thresholds
pub type MethodThresholdComparison = MethodComparison<MetricThresholdComparison>;

impl<M: Metric> MethodComparison<M> {
    pub fn new(method_name: impl Into<String>) -> Self {
        Self {
            method_name: method_name.into(),
            metrics: HashMap::new(),
        }
    }

    pub fn method_name(&self) -> &str {
        &self.method_name
    }

    pub fn rename(&mut self, method_name: impl Into<String>) {
        self.method_name = method_name.into();
    }

    /// Add a metric, replacing any earlier metric with the same name
    pub fn insert(&mut self, metric: M) {
        self.metrics.insert(metric.metric_name().to_string(), metric);
    }

    pub fn metric(&self, name: &str) -> Option<&M> {
        self.metrics.get(name)
    }

    pub fn metric_count(&self) -> usize {
        self.metrics.len()
    }

    pub fn metrics(&self) -> impl Iterator<Item = &M> {
        self.metrics.values()
    }
}

/// Render an optional difference as a diff-file cell
///
/// Trailing zeros are dropped so `-407400000.0` prints as `-407400000`;
/// an absent value prints as an empty cell.
pub fn format_difference(value: Option<Decimal>) -> String {
    value
        .map(|difference| difference.normalize().to_string())
        .unwrap_or_default()
}

/// Render a pass/fail flag as a diff-file cell
pub fn format_flag(flag: bool) -> &'static str {
    if flag {
        "True"
    } else {
        "False"
    }
}
