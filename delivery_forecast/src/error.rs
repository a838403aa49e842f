//! Error types for the delivery_forecast crate

use thiserror::Error;

/// Custom error types for the delivery_forecast crate
#[derive(Debug, Error)]
pub enum ForecastError {
    /// The input series has no points
    #[error("Empty input: {0}")]
    EmptyInput(String),

    /// The input series is shorter than the operation's minimum sample size
    #[error("Insufficient data: need at least {required} points, got {actual}")]
    InsufficientData { required: usize, actual: usize },

    /// A parameter is outside its valid range
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Error related to data validation or processing
    #[error("Data error: {0}")]
    DataError(String),

    /// Error from the numerical kernels
    #[error("Math error: {0}")]
    MathError(String),

    /// Error loading or validating configuration
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Error from CSV parsing
    #[error("CSV error: {0}")]
    CsvError(String),

    /// Error from IO operations
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Result type with our custom error
pub type Result<T> = std::result::Result<T, ForecastError>;

impl From<series_math::MathError> for ForecastError {
    fn from(err: series_math::MathError) -> Self {
        match err {
            series_math::MathError::InvalidInput(msg) => ForecastError::InvalidParameter(msg),
            other => ForecastError::MathError(other.to_string()),
        }
    }
}

impl From<csv::Error> for ForecastError {
    fn from(err: csv::Error) -> Self {
        ForecastError::CsvError(err.to_string())
    }
}

impl From<serde_json::Error> for ForecastError {
    fn from(err: serde_json::Error) -> Self {
        ForecastError::ConfigError(err.to_string())
    }
}

/// Fail with `EmptyInput` when `len` is zero
pub(crate) fn ensure_not_empty(len: usize, what: &str) -> Result<()> {
    if len == 0 {
        return Err(ForecastError::EmptyInput(format!("{} has no points", what)));
    }
    Ok(())
}

/// Fail with `InsufficientData` when fewer than `required` points are present
pub(crate) fn ensure_min_len(actual: usize, required: usize) -> Result<()> {
    if actual < required {
        return Err(ForecastError::InsufficientData { required, actual });
    }
    Ok(())
}
