//! Linear-regression forecaster built on the trend line fit

use crate::data::{elapsed_days, SeriesPoint};
use crate::error::{ensure_not_empty, Result};
use crate::models::{ForecastModel, ModelParameters, TrainedForecastModel};
use crate::trend::fit_trend;
use series_math::LinearFit;

/// OLS trend extrapolation
#[derive(Debug, Clone)]
pub struct LinearRegression {
    name: String,
}

/// Trained linear regression model
#[derive(Debug, Clone)]
pub struct TrainedLinearRegression {
    fit: LinearFit,
    /// Days from the first to the last training point
    last_x: f64,
    fitted: Vec<f64>,
}

impl LinearRegression {
    pub fn new() -> Self {
        Self {
            name: "Linear Regression".to_string(),
        }
    }
}

impl Default for LinearRegression {
    fn default() -> Self {
        Self::new()
    }
}

impl ForecastModel for LinearRegression {
    type Trained = TrainedLinearRegression;

    fn train(&self, data: &[SeriesPoint]) -> Result<Self::Trained> {
        ensure_not_empty(data.len(), "training data")?;

        let (fit, xs) = fit_trend(data)?;
        let fitted = xs.iter().map(|&x| fit.predict(x)).collect();
        let last_x = elapsed_days(data[0].timestamp, data[data.len() - 1].timestamp);

        Ok(TrainedLinearRegression {
            fit,
            last_x,
            fitted,
        })
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn parameters(&self) -> ModelParameters {
        ModelParameters::LinearRegression
    }
}

impl TrainedLinearRegression {
    pub fn slope(&self) -> f64 {
        self.fit.slope
    }

    pub fn intercept(&self) -> f64 {
        self.fit.intercept
    }
}

impl TrainedForecastModel for TrainedLinearRegression {
    fn fitted_values(&self) -> &[f64] {
        &self.fitted
    }

    fn forecast(&self, horizon: usize) -> Vec<f64> {
        (1..=horizon)
            .map(|i| self.fit.predict(self.last_x + i as f64))
            .collect()
    }
}
