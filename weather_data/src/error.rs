//! Error types for the weather_data crate

use polars::prelude::PolarsError;
use thiserror::Error;

/// Failures while loading or validating an input table.
///
/// Every variant is fatal for the load in progress: a dataset is either
/// fully parsed or not constructed at all.
#[derive(Debug, Error)]
pub enum DataError {
    /// A required column is absent from the input table
    #[error("missing required column `{0}`")]
    MissingColumn(String),

    /// A required column carries a type this crate cannot read
    #[error("column `{column}` has unsupported type {dtype}")]
    ColumnType { column: String, dtype: String },

    /// A timestamp cell could not be parsed
    #[error("row {row}: unparsable timestamp `{value}`")]
    InvalidTimestamp { row: usize, value: String },

    /// A required cell is null
    #[error("row {row}: missing value in column `{column}`")]
    MissingValue { row: usize, column: String },

    /// Error from IO operations
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Error from Polars operations
    #[error("Polars error: {0}")]
    Polars(String),
}

/// Result type with our custom error
pub type Result<T> = std::result::Result<T, DataError>;

impl From<PolarsError> for DataError {
    fn from(err: PolarsError) -> Self {
        DataError::Polars(err.to_string())
    }
}
