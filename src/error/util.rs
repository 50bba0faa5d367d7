//! Utility functions for error handling
//!
//! Helpers for opening source files with errors that name the table involved.

use std::fs;
use std::io;
use std::path::Path;

use crate::error::{Result, SignalError};

/// Open a source table file, reporting a missing file as `MissingSource`
///
/// # Arguments
/// * `path` - The path to the file to open
/// * `table` - Logical table name used in error messages
pub fn safe_open_file(path: &Path, table: &'static str) -> Result<fs::File> {
    if !path.exists() {
        return Err(SignalError::MissingSource {
            table,
            path: path.to_path_buf(),
        });
    }

    if !path.is_file() {
        return Err(SignalError::IoError(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("Expected a file for table '{table}': {}", path.display()),
        )));
    }

    fs::File::open(path).map_err(|e| {
        let context = match e.kind() {
            io::ErrorKind::PermissionDenied => "Permission denied - check file permissions",
            _ => "Failed to open file",
        };
        SignalError::IoError(io::Error::new(
            e.kind(),
            format!("{context} for table '{table}' ({}): {e}", path.display()),
        ))
    })
}
