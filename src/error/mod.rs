//! Error handling for the ICU signal store.
//!
//! Only load-time structural faults are represented here. Query operations
//! recover locally and never surface a `SignalError`.

pub mod util;

use std::io;
use std::path::PathBuf;

use arrow::error::ArrowError;
use parquet::errors::ParquetError;

/// Specialized error type for loading clinical source tables
#[derive(Debug, thiserror::Error)]
pub enum SignalError {
    /// Error opening or reading a file
    #[error("IO error: {0}")]
    IoError(#[from] io::Error),

    /// Error decoding CSV or building record batches
    #[error("Arrow error: {0}")]
    ArrowError(#[from] ArrowError),

    /// Error processing Parquet data
    #[error("Parquet error: {0}")]
    ParquetError(#[from] ParquetError),

    /// A required source file does not exist
    #[error("Source table '{table}' not found at {}", path.display())]
    MissingSource { table: &'static str, path: PathBuf },

    /// A required column is absent from a source table
    #[error("Column '{column}' missing from table '{table}' ({})", path.display())]
    MissingColumn {
        table: &'static str,
        column: String,
        path: PathBuf,
    },

    /// Record batch rows could not be converted into typed rows
    #[error("Failed to deserialize rows of table '{table}': {message}")]
    Deserialize { table: &'static str, message: String },

    /// A timestamp cell could not be parsed
    #[error("Unparsable timestamp '{value}' in {table}.{column} at row {row}")]
    Timestamp {
        table: &'static str,
        column: &'static str,
        row: usize,
        value: String,
    },

    /// A numeric cell could not be parsed
    #[error("Unparsable number '{value}' in {table}.{column} at row {row}")]
    Numeric {
        table: &'static str,
        column: &'static str,
        row: usize,
        value: String,
    },

    /// The loader thread pool could not be created
    #[error("Thread pool error: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    /// A background loading task panicked or was cancelled
    #[error("Background load task failed: {0}")]
    TaskJoin(String),
}

impl SignalError {
    /// Build a deserialization error for a table
    pub fn deserialize(table: &'static str, error: impl std::fmt::Display) -> Self {
        Self::Deserialize {
            table,
            message: error.to_string(),
        }
    }
}

/// Result type for store operations
pub type Result<T> = std::result::Result<T, SignalError>;
