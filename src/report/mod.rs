//! Benchmark report input.
//!
//! This module handles:
//! - Pairing baseline and new report files
//! - Mapping header names to column positions
//! - Splitting quoted data lines into fields

pub mod header;
pub mod line;
pub mod pairing;

// Re-export main types
pub use header::HeaderMap;
pub use line::parse_line;
pub use pairing::{create_file_pairs, is_report_file, FilePair};
