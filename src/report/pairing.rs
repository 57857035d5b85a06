//! Matching baseline and new reports by file name.

use crate::utils::config::REPORT_FILE_SUFFIX;
use crate::utils::error::ReportError;
use log::{debug, info};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// A baseline report and the new report with the same file name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilePair {
    base_file: PathBuf,
    new_file: PathBuf,
}

impl FilePair {
    pub fn new(base_file: impl Into<PathBuf>, new_file: impl Into<PathBuf>) -> Self {
        Self {
            base_file: base_file.into(),
            new_file: new_file.into(),
        }
    }

    pub fn base_file(&self) -> &Path {
        &self.base_file
    }

    pub fn new_file(&self) -> &Path {
        &self.new_file
    }

    /// File name shared by both reports
    pub fn file_name(&self) -> String {
        self.base_file
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    /// File name without the report suffix, e.g. `Sorting` for `Sorting-report.csv`
    pub fn report_name(&self) -> String {
        let file_name = self.file_name();
        match file_name.strip_suffix(REPORT_FILE_SUFFIX) {
            Some(stem) => stem.to_string(),
            None => file_name,
        }
    }
}

/// Pair every report in `base_dir` with its namesake in `new_dir`
///
/// Only files directly inside `base_dir` whose names end in `-report.csv`
/// are considered. Baseline reports without a counterpart are skipped.
/// Pairs come back sorted by file name.
///
/// # Errors
/// * `ReportError::Walk` - `base_dir` cannot be listed
pub fn create_file_pairs(
    base_dir: impl AsRef<Path>,
    new_dir: impl AsRef<Path>,
) -> Result<Vec<FilePair>, ReportError> {
    let base_dir = base_dir.as_ref();
    let new_dir = new_dir.as_ref();

    info!("Creating file-pairs");
    let mut pairs = Vec::new();

    for entry in WalkDir::new(base_dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry?;
        let Some(name) = entry.file_name().to_str() else {
            continue;
        };

        if !entry.path().is_file() || !is_report_file(name) {
            continue;
        }

        let new_file = new_dir.join(name);
        if new_file.is_file() {
            pairs.push(FilePair::new(entry.path(), new_file));
        } else {
            debug!("Skipping {}: no counterpart in {}", name, new_dir.display());
        }
    }

    info!("Created {} file-pairs", pairs.len());
    Ok(pairs)
}

/// Whether a file name follows the report naming convention
pub fn is_report_file(name: &str) -> bool {
    name.ends_with(REPORT_FILE_SUFFIX)
}
