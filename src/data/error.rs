//! Error types for dataset splitting and loading

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur when splitting or loading a dataset
#[derive(Error, Debug)]
pub enum DataError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("missing required column: {0}")]
    MissingColumn(String),

    #[error("row {row}, column {column}: cannot parse {value:?} as a number")]
    ParseValue {
        column: String,
        row: usize,
        value: String,
    },

    #[error("class {class} has {count} row(s), too few to stratify")]
    ClassTooSmall { class: i64, count: usize },

    #[error("test_size must lie in (0, 1), got {0}")]
    InvalidTestSize(f64),

    #[error("table {0:?} has no data rows")]
    EmptyTable(PathBuf),
}

/// Result type alias for dataset operations
pub type DataResult<T> = Result<T, DataError>;
