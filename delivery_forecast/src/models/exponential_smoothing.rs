//! Single exponential smoothing for time series forecasting

use crate::data::SeriesPoint;
use crate::error::{ensure_not_empty, ForecastError, Result};
use crate::models::{ForecastModel, ModelParameters, TrainedForecastModel};
use series_math::smooth_series;

/// Default smoothing factor
pub const DEFAULT_ALPHA: f64 = 0.3;

/// Simple exponential smoothing model
#[derive(Debug, Clone)]
pub struct ExponentialSmoothing {
    /// Name of the model
    name: String,
    /// Smoothing parameter
    alpha: f64,
}

/// Trained exponential smoothing model
#[derive(Debug, Clone)]
pub struct TrainedExponentialSmoothing {
    /// Smoothed series, `s_0 = v_0`
    smoothed: Vec<f64>,
    /// Final level, repeated for every future day
    level: f64,
}

pub(crate) fn validate_alpha(alpha: f64) -> Result<()> {
    if !(0.0..=1.0).contains(&alpha) {
        return Err(ForecastError::InvalidParameter(format!(
            "alpha must be between 0 and 1, got {}",
            alpha
        )));
    }
    Ok(())
}

impl ExponentialSmoothing {
    /// Create a new exponential smoothing model
    pub fn new(alpha: f64) -> Result<Self> {
        validate_alpha(alpha)?;

        Ok(Self {
            name: format!("Exponential Smoothing (alpha={})", alpha),
            alpha,
        })
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }
}

impl Default for ExponentialSmoothing {
    fn default() -> Self {
        Self {
            name: format!("Exponential Smoothing (alpha={})", DEFAULT_ALPHA),
            alpha: DEFAULT_ALPHA,
        }
    }
}

impl ForecastModel for ExponentialSmoothing {
    type Trained = TrainedExponentialSmoothing;

    fn train(&self, data: &[SeriesPoint]) -> Result<Self::Trained> {
        ensure_not_empty(data.len(), "training data")?;

        let values: Vec<f64> = data.iter().map(|p| p.value).collect();
        let smoothed = smooth_series(&values, self.alpha)?;
        let level = smoothed[smoothed.len() - 1];

        Ok(TrainedExponentialSmoothing { smoothed, level })
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn parameters(&self) -> ModelParameters {
        ModelParameters::ExponentialSmoothing { alpha: self.alpha }
    }
}

impl TrainedExponentialSmoothing {
    pub fn level(&self) -> f64 {
        self.level
    }
}

impl TrainedForecastModel for TrainedExponentialSmoothing {
    fn fitted_values(&self) -> &[f64] {
        &self.smoothed
    }

    fn forecast(&self, horizon: usize) -> Vec<f64> {
        // Flat line at the final level
        vec![self.level; horizon]
    }
}
