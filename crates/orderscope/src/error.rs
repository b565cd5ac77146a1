//! Error types for the Orderscope library.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for Orderscope operations.
#[derive(Debug, Error)]
pub enum OrderscopeError {
    /// Error reading or accessing a file.
    #[error("IO error for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A cell could not be converted to the type its column requires.
    #[error("Parse error at row {row}, column '{column}': {message}")]
    Parse {
        row: usize,
        column: String,
        message: String,
    },

    /// Error from the CSV library.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Error from the Parquet reader.
    #[cfg(feature = "parquet")]
    #[error("Parquet error: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),

    /// File format not supported.
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// Empty file or no rows to read.
    #[error("Empty data: {0}")]
    EmptyData(String),

    /// A column the loader needs is not in the table.
    #[error("Missing column: {0}")]
    MissingColumn(String),

    /// No values to derive a percentile from.
    #[error("Empty input: {0}")]
    EmptyInput(String),

    /// A record lacks a numeric field needed for classification.
    #[error("Order '{order_id}' is missing required field '{field}'")]
    MissingField {
        order_id: String,
        field: &'static str,
    },

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for Orderscope operations.
pub type Result<T> = std::result::Result<T, OrderscopeError>;
