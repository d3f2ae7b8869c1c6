//! Error types for the forecast_bridge crate

use polars::prelude::PolarsError;
use thiserror::Error;
use time_index::IndexError;

/// Custom error types for the forecast_bridge crate
#[derive(Debug, Error)]
pub enum ForecastError {
    /// Inputs cannot be placed on a common time frame
    #[error("Ambiguous alignment: {0}")]
    AmbiguousAlignment(String),

    /// The resolved horizon has gaps the wrapped model cannot represent
    #[error("Unsupported horizon: {0}")]
    UnsupportedHorizon(String),

    /// Predict called before fit
    #[error("Not fitted: {0}")]
    NotFitted(String),

    /// Feature that is deliberately not available
    #[error("Not implemented: {0}")]
    NotImplemented(String),

    /// Neither fit nor predict received a forecasting horizon
    #[error("Missing horizon: {0}")]
    MissingHorizon(String),

    /// The cutoff frequency cannot be determined
    #[error("Missing frequency: {0}")]
    MissingFrequency(String),

    /// Error from invalid parameters
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Error related to data validation or processing
    #[error("Data error: {0}")]
    DataError(String),

    /// Error raised by a wrapped regression model
    #[error("Model error: {0}")]
    ModelError(String),

    /// Error from index construction or calendar arithmetic
    #[error("Index error: {0}")]
    Index(#[from] IndexError),

    /// Error from configuration parsing or validation
    #[error("Config error: {0}")]
    ConfigError(String),

    /// Error from IO operations
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Error from Polars operations
    #[error("Polars error: {0}")]
    PolarsError(String),
}

/// Result type with our custom error
pub type Result<T> = std::result::Result<T, ForecastError>;

impl From<PolarsError> for ForecastError {
    fn from(err: PolarsError) -> Self {
        ForecastError::PolarsError(err.to_string())
    }
}

impl From<serde_json::Error> for ForecastError {
    fn from(err: serde_json::Error) -> Self {
        ForecastError::ConfigError(err.to_string())
    }
}
