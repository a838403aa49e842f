//! Fitting primitives for time series prediction
//!
//! Contains:
//! - Ordinary least squares over arbitrary `x` positions
//! - Single-parameter exponential smoothing

use crate::statistics::mean;
use crate::{MathError, Result};
use serde::{Deserialize, Serialize};

/// Ordinary least squares line `y = intercept + slope * x`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearFit {
    pub slope: f64,
    pub intercept: f64,
}

impl LinearFit {
    /// Fit a line through `(xs[i], ys[i])`.
    ///
    /// When every `x` is identical the slope is undefined; the fit degrades
    /// to a horizontal line through the mean of `ys`.
    pub fn fit(xs: &[f64], ys: &[f64]) -> Result<Self> {
        if xs.len() != ys.len() {
            return Err(MathError::InvalidInput(format!(
                "x length ({}) doesn't match y length ({})",
                xs.len(),
                ys.len()
            )));
        }
        if xs.is_empty() {
            return Err(MathError::InsufficientData(
                "Need at least 1 point for a linear fit".to_string(),
            ));
        }

        let x_mean = mean(xs);
        let y_mean = mean(ys);

        let mut numerator = 0.0;
        let mut denominator = 0.0;

        for (&x, &y) in xs.iter().zip(ys.iter()) {
            numerator += (x - x_mean) * (y - y_mean);
            denominator += (x - x_mean) * (x - x_mean);
        }

        let slope = if denominator == 0.0 {
            0.0
        } else {
            numerator / denominator
        };

        Ok(Self {
            slope,
            intercept: y_mean - slope * x_mean,
        })
    }

    /// Evaluate the line at `x`
    pub fn predict(&self, x: f64) -> f64 {
        self.intercept + self.slope * x
    }

    /// Get the R-squared value (coefficient of determination)
    pub fn r_squared(&self, xs: &[f64], ys: &[f64]) -> Result<f64> {
        if xs.len() != ys.len() || xs.is_empty() {
            return Err(MathError::InvalidInput(
                "x and y must have the same non-zero length".to_string(),
            ));
        }

        let y_mean = mean(ys);
        let mut ss_total = 0.0;
        let mut ss_residual = 0.0;

        for (&x, &y) in xs.iter().zip(ys.iter()) {
            ss_total += (y - y_mean).powi(2);
            ss_residual += (y - self.predict(x)).powi(2);
        }

        if ss_total.abs() < 1e-10 {
            return Err(MathError::CalculationError(
                "Cannot calculate R-squared: total sum of squares is too small".to_string(),
            ));
        }

        Ok(1.0 - (ss_residual / ss_total))
    }
}

/// Simple exponential smoothing state, no trend or seasonal term
#[derive(Debug, Clone)]
pub struct ExponentialSmoothing {
    alpha: f64,
    level: Option<f64>,
}

impl ExponentialSmoothing {
    /// Create a new smoother. `alpha` must lie in `[0, 1]`.
    pub fn new(alpha: f64) -> Result<Self> {
        if !(0.0..=1.0).contains(&alpha) {
            return Err(MathError::InvalidInput(format!(
                "Alpha must be between 0 and 1 (inclusive), got {}",
                alpha
            )));
        }

        Ok(Self {
            alpha,
            level: None,
        })
    }

    /// Fold the next observation into the level
    pub fn update(&mut self, value: f64) {
        self.level = Some(match self.level {
            None => value,
            Some(level) => self.alpha * value + (1.0 - self.alpha) * level,
        });
    }

    /// Get the current smoothed value
    pub fn value(&self) -> Result<f64> {
        self.level.ok_or_else(|| {
            MathError::InsufficientData("No data available for exponential smoothing".to_string())
        })
    }
}

/// Smoothed series `s_0 = v_0`, `s_i = alpha * v_i + (1 - alpha) * s_{i-1}`.
pub fn smooth_series(values: &[f64], alpha: f64) -> Result<Vec<f64>> {
    let mut smoother = ExponentialSmoothing::new(alpha)?;
    let mut out = Vec::with_capacity(values.len());

    for &value in values {
        smoother.update(value);
        out.push(smoother.value()?);
    }

    Ok(out)
}
