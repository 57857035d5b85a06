//! Per-method thresholds and their JSON loader.
//!
//! A threshold file is a JSON array of objects:
//!
//! ```json
//! [
//!   { "MethodName": "Sort", "Mean": "2 ms", "Allocated": "1 KB" },
//!   { "MethodName": "Parse", "Gen 0": 5 }
//! ]
//! ```
//!
//! Every field other than `MethodName` is a limit for the column of that
//! name, written with the same units as the reports.

use log::{debug, info, warn};
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

use crate::units::convert_value;
use crate::utils::config::THRESHOLD_FILE_EXTENSION;
use crate::utils::error::ThresholdError;

/// Limits for a single benchmark method, keyed by column name
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MethodThreshold {
    pub method_name: String,

    /// A `None` limit was present in the source but did not parse
    pub limits: HashMap<String, Option<Decimal>>,
}

impl MethodThreshold {
    pub fn new(method_name: impl Into<String>) -> Self {
        Self {
            method_name: method_name.into(),
            limits: HashMap::new(),
        }
    }

    pub fn with_limit(mut self, metric: impl Into<String>, limit: Option<Decimal>) -> Self {
        self.limits.insert(metric.into(), limit);
        self
    }

    /// Limit for `metric`, `None` if it is not defined
    pub fn limit(&self, metric: &str) -> Option<Decimal> {
        self.limits.get(metric).copied().flatten()
    }
}

/// All thresholds of a run, keyed by method name
#[derive(Debug, Clone, Default)]
pub struct ThresholdSet {
    by_method: HashMap<String, MethodThreshold>,
}

impl ThresholdSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a threshold, replacing any earlier one for the same method
    pub fn insert(&mut self, threshold: MethodThreshold) -> Option<MethodThreshold> {
        self.by_method
            .insert(threshold.method_name.clone(), threshold)
    }

    pub fn get(&self, method_name: &str) -> Option<&MethodThreshold> {
        self.by_method.get(method_name)
    }

    /// Limit for one method and metric, `None` if either is unknown
    pub fn limit(&self, method_name: &str, metric: &str) -> Option<Decimal> {
        self.get(method_name)?.limit(metric)
    }

    pub fn len(&self) -> usize {
        self.by_method.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_method.is_empty()
    }
}

impl FromIterator<MethodThreshold> for ThresholdSet {
    fn from_iter<I: IntoIterator<Item = MethodThreshold>>(iter: I) -> Self {
        let mut set = Self::new();
        for threshold in iter {
            set.insert(threshold);
        }
        set
    }
}

/// Raw threshold entry as it appears in JSON
#[derive(Debug, Deserialize)]
struct ThresholdEntry {
    #[serde(rename = "MethodName")]
    method_name: String,

    #[serde(flatten)]
    limits: Map<String, Value>,
}

impl From<ThresholdEntry> for MethodThreshold {
    fn from(entry: ThresholdEntry) -> Self {
        let limits = entry
            .limits
            .iter()
            .map(|(metric, value)| (metric.clone(), limit_value(value)))
            .collect();

        Self {
            method_name: entry.method_name,
            limits,
        }
    }
}

/// Normalize a JSON limit the same way report cells are normalized
fn limit_value(value: &Value) -> Option<Decimal> {
    match value {
        Value::String(text) => convert_value(Some(text.as_str())),
        Value::Number(number) => convert_value(Some(number.to_string().as_str())),
        _ => None,
    }
}

/// Load every `*.json` threshold file directly inside `dir`
///
/// Files are read in name order; a method defined again later replaces the
/// earlier definition entirely.
///
/// # Errors
/// * `ThresholdError::Io` / `ThresholdError::Walk` - a file or `dir` cannot be read
/// * `ThresholdError::Json` - a file is not valid JSON, or an entry has no `MethodName`
///
/// # Example
/// ```ignore
/// let thresholds = load_thresholds("thresholds/")?;
/// ```
pub fn load_thresholds(dir: impl AsRef<Path>) -> Result<ThresholdSet, ThresholdError> {
    let dir = dir.as_ref();
    info!("Parsing threshold data from {}", dir.display());

    let mut thresholds = ThresholdSet::new();

    for entry in WalkDir::new(dir).min_depth(1).max_depth(1).sort_by_file_name() {
        let entry = entry?;
        let path = entry.path();

        let is_threshold_file = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext == THRESHOLD_FILE_EXTENSION);

        if !path.is_file() || !is_threshold_file {
            continue;
        }

        for threshold in read_threshold_file(path)? {
            if thresholds.insert(threshold).is_some() {
                debug!("Threshold redefined in {}", path.display());
            }
        }
    }

    info!("Parsed {} thresholds", thresholds.len());
    Ok(thresholds)
}

/// Read the thresholds defined in one JSON file
pub fn read_threshold_file(path: impl AsRef<Path>) -> Result<Vec<MethodThreshold>, ThresholdError> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)?;

    let document: Value = serde_json::from_str(&contents).map_err(|source| ThresholdError::Json {
        file: path.to_path_buf(),
        source,
    })?;

    let Value::Array(entries) = document else {
        warn!("Skipping {}: expected a JSON array", path.display());
        return Ok(Vec::new());
    };

    entries
        .into_iter()
        .map(|entry| {
            serde_json::from_value::<ThresholdEntry>(entry)
                .map(MethodThreshold::from)
                .map_err(|source| ThresholdError::Json {
                    file: path.to_path_buf(),
                    source,
                })
        })
        .collect()
}
