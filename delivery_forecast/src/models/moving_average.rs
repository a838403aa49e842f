//! Moving average model for time series forecasting

use crate::data::SeriesPoint;
use crate::error::{ensure_not_empty, ForecastError, Result};
use crate::models::{ForecastModel, ModelParameters, TrainedForecastModel};
use series_math::moving_averages::tail_mean;
use series_math::trailing_means;

/// Default window size in days
pub const DEFAULT_WINDOW_SIZE: usize = 7;

/// Simple Moving Average model
#[derive(Debug, Clone)]
pub struct MovingAverage {
    /// Name of the model
    name: String,
    /// Window size
    window: usize,
}

/// Trained Simple Moving Average model
#[derive(Debug, Clone)]
pub struct TrainedMovingAverage {
    /// Trailing partial-window averages over the training data
    fitted: Vec<f64>,
    /// Mean of the last `window` training values
    last_average: f64,
}

/// `1 <= window_size <= len`
pub(crate) fn validate_window_size(window_size: usize, len: usize) -> Result<()> {
    if window_size == 0 || window_size > len {
        return Err(ForecastError::InvalidParameter(format!(
            "window size must be between 1 and {} (series length), got {}",
            len, window_size
        )));
    }
    Ok(())
}

impl MovingAverage {
    /// Create a new Simple Moving Average model
    pub fn new(window: usize) -> Result<Self> {
        if window == 0 {
            return Err(ForecastError::InvalidParameter(
                "Window size must be positive".to_string(),
            ));
        }

        Ok(Self {
            name: format!("Simple Moving Average (window={})", window),
            window,
        })
    }

    pub fn window(&self) -> usize {
        self.window
    }
}

impl ForecastModel for MovingAverage {
    type Trained = TrainedMovingAverage;

    fn train(&self, data: &[SeriesPoint]) -> Result<Self::Trained> {
        ensure_not_empty(data.len(), "training data")?;
        validate_window_size(self.window, data.len())?;

        let values: Vec<f64> = data.iter().map(|p| p.value).collect();

        Ok(TrainedMovingAverage {
            fitted: trailing_means(&values, self.window)?,
            last_average: tail_mean(&values, self.window)?,
        })
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn parameters(&self) -> ModelParameters {
        ModelParameters::MovingAverage {
            window_size: self.window,
        }
    }
}

impl TrainedMovingAverage {
    pub fn last_average(&self) -> f64 {
        self.last_average
    }
}

impl TrainedForecastModel for TrainedMovingAverage {
    fn fitted_values(&self) -> &[f64] {
        &self.fitted
    }

    fn forecast(&self, horizon: usize) -> Vec<f64> {
        // For simple MA, the forecast is constant at the last average
        vec![self.last_average; horizon]
    }
}
