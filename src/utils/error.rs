//! Error types for the entire application.
//!
//! We use `thiserror` for library-style errors with custom types,
//! and `anyhow` for application-level error propagation in main.rs and commands.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while reading benchmark reports
#[derive(Error, Debug)]
pub enum ReportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Directory walk failed: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("Malformed line `{line}`: {reason}")]
    MalformedLine { line: String, reason: String },
}

/// Errors that abort a diff run
#[derive(Error, Debug)]
pub enum DiffError {
    #[error(transparent)]
    Report(#[from] ReportError),

    #[error("Report {file} has no `Method` column")]
    MissingMethodColumn { file: PathBuf },

    #[error("Method `{method}` in {file} was already compared in this run")]
    DuplicateMethod { method: String, file: PathBuf },

    #[error(transparent)]
    Output(#[from] OutputError),
}

/// Errors that can occur while loading threshold files
#[derive(Error, Debug)]
pub enum ThresholdError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Directory walk failed: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("Invalid threshold JSON in {file}: {source}")]
    Json {
        file: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Errors that can occur during file output
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Failed to write file: {0}")]
    WriteFailed(#[from] std::io::Error),

    #[error("Invalid output path: {0}")]
    InvalidPath(String),
}
