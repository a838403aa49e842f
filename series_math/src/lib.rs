//! # Series Math
//!
//! Numerical kernels used by the delivery-metrics engine.
//! Everything here works on plain `&[f64]` slices; timestamps and calendar
//! handling live one layer up in `delivery_forecast`.

use thiserror::Error;

pub mod forecasting;
pub mod moving_averages;
pub mod scaling;
pub mod statistics;
pub mod volatility;

pub use forecasting::{smooth_series, ExponentialSmoothing, LinearFit};
pub use moving_averages::{tail_mean, trailing_means, TrailingMovingAverage};
pub use scaling::min_max_scale;
pub use statistics::{coefficient_of_variation, mean, population_std_dev};
pub use volatility::{trailing_std_devs, TrailingStdDev};

/// Errors that can occur in series calculations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MathError {
    #[error("Insufficient data for calculation: {0}")]
    InsufficientData(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Calculation error: {0}")]
    CalculationError(String),
}

/// Result type for series math operations
pub type Result<T> = std::result::Result<T, MathError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_messages_carry_context() {
        let err = MathError::InvalidInput("window must be positive".to_string());
        assert_eq!(err.to_string(), "Invalid input: window must be positive");
    }
}
