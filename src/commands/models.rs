use std::path::PathBuf;

use crate::utils::config::DEFAULT_COLUMNS;

/// Arguments for the compare command
///
/// **Public** - used by main.rs to construct from CLI args
#[derive(Debug, Clone)]
pub struct CompareArgs {
    /// Directory holding the baseline `*-report.csv` files
    pub base_dir: PathBuf,

    /// Directory holding the new `*-report.csv` files
    pub new_dir: PathBuf,

    /// Directory for `DiffReport.csv` (current directory if omitted)
    pub output_dir: Option<PathBuf>,

    /// Directory of JSON threshold files (plain diff if omitted)
    pub threshold_dir: Option<PathBuf>,

    /// Comma-separated list of columns to compare
    pub columns: String,

    /// Prefix each method with its report name instead of failing on duplicates
    pub qualify_duplicates: bool,
}

impl Default for CompareArgs {
    fn default() -> Self {
        Self {
            base_dir: PathBuf::new(),
            new_dir: PathBuf::new(),
            output_dir: None,
            threshold_dir: None,
            columns: DEFAULT_COLUMNS.to_string(),
            qualify_duplicates: false,
        }
    }
}
