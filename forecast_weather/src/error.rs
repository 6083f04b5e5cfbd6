//! Error types for the forecast_weather crate

use thiserror::Error;
use weather_data::DataError;

/// Custom error types for the forecast_weather crate
#[derive(Debug, Error)]
pub enum ForecastError {
    /// The selected series is too short to fit a model. Recoverable: pick
    /// another country or wait for more data.
    #[error("insufficient data for {country}: {observed} observations, need at least {required}")]
    InsufficientData {
        country: String,
        observed: usize,
        required: usize,
    },

    /// Numerical failure during fitting or forecasting. Fatal for this
    /// request only; the caller may retry with other parameters.
    #[error("model fit error: {0}")]
    ModelFit(String),

    /// The input table could not be loaded
    #[error("data load error: {0}")]
    DataLoad(#[from] DataError),

    /// Requested horizon outside the supported range
    #[error("horizon {value} outside supported range [{min}, {max}]")]
    InvalidHorizon {
        value: usize,
        min: usize,
        max: usize,
    },

    /// Error from invalid parameters
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// A persisted model artifact could not be read or written
    #[error("model artifact error: {0}")]
    Artifact(String),

    /// Error from CSV serialization
    #[error("CSV error: {0}")]
    Csv(String),

    /// Error from IO operations
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type with our custom error
pub type Result<T> = std::result::Result<T, ForecastError>;

impl From<csv::Error> for ForecastError {
    fn from(err: csv::Error) -> Self {
        ForecastError::Csv(err.to_string())
    }
}
