//! Diff file writer.
//!
//! Writes the rendered header and rows, one per line, so that the same input
//! always produces a byte-identical file.

use crate::utils::error::OutputError;
use log::debug;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Write a diff file
///
/// # Arguments
/// * `output_path` - Path of the diff file, replaced if it exists
/// * `header` - Rendered header line
/// * `rows` - Rendered rows, one per method
///
/// # Errors
/// * `OutputError::InvalidPath` - Path is empty, a directory, or its parent cannot be created
/// * `OutputError::WriteFailed` - I/O error during write
pub fn write_diff_file(
    output_path: impl AsRef<Path>,
    header: &str,
    rows: &[String],
) -> Result<(), OutputError> {
    let output_path = output_path.as_ref();

    super::validate_path(output_path)?;

    // Create parent directories if needed
    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            debug!("Creating parent directories: {}", parent.display());
            std::fs::create_dir_all(parent).map_err(|e| {
                OutputError::InvalidPath(format!(
                    "Cannot create directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }
    }

    let file = File::create(output_path)?;
    let mut writer = BufWriter::new(file);

    writeln!(writer, "{}", header)?;
    for row in rows {
        writeln!(writer, "{}", row)?;
    }
    writer.flush()?;

    debug!("Wrote {} rows to {}", rows.len(), output_path.display());
    Ok(())
}
