//! Error metrics and confidence intervals for forecast evaluation

use crate::data::SeriesPoint;
use crate::error::{ForecastError, Result};
use serde::{Deserialize, Serialize};
use series_math::population_std_dev;

/// Default confidence level of forecast bands
pub const DEFAULT_CONFIDENCE_LEVEL: f64 = 0.95;

/// `(minimum confidence level, z-score)`, checked top to bottom
const Z_TABLE: [(f64, f64); 6] = [
    (0.99, 2.576),
    (0.98, 2.326),
    (0.95, 1.96),
    (0.90, 1.645),
    (0.85, 1.44),
    (0.80, 1.28),
];
const FALLBACK_Z: f64 = 1.0;

/// Forecast accuracy metrics. A metric is `None` when it is undefined for the
/// paired points (no pairs at all, or only zero actuals for MAPE).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ErrorMetrics {
    /// Mean Absolute Percentage Error, in percent
    pub mape: Option<f64>,
    /// Mean Squared Error
    pub mse: Option<f64>,
    /// Mean Absolute Error
    pub mae: Option<f64>,
    /// Root Mean Squared Error
    pub rmse: Option<f64>,
}

impl std::fmt::Display for ErrorMetrics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        fn show(v: Option<f64>) -> String {
            v.map(|v| format!("{:.4}", v))
                .unwrap_or_else(|| "n/a".to_string())
        }

        writeln!(f, "Forecast Accuracy Metrics:")?;
        writeln!(f, "  MAPE:  {}%", show(self.mape))?;
        writeln!(f, "  MSE:   {}", show(self.mse))?;
        writeln!(f, "  MAE:   {}", show(self.mae))?;
        writeln!(f, "  RMSE:  {}", show(self.rmse))?;
        Ok(())
    }
}

/// Mean of `|actual - predicted| / |actual| * 100` over points with a non-zero actual.
pub fn mean_absolute_percentage_error(actual: &[f64], predicted: &[f64]) -> Option<f64> {
    let ratios: Vec<f64> = actual
        .iter()
        .zip(predicted.iter())
        .filter(|(&a, _)| a != 0.0)
        .map(|(&a, &p)| (a - p).abs() / a.abs())
        .collect();

    if ratios.is_empty() {
        return None;
    }
    Some(ratios.iter().sum::<f64>() / ratios.len() as f64 * 100.0)
}

/// Mean of squared errors over all paired points
pub fn mean_squared_error(actual: &[f64], predicted: &[f64]) -> Option<f64> {
    let n = actual.len().min(predicted.len());
    if n == 0 {
        return None;
    }

    let sum: f64 = actual
        .iter()
        .zip(predicted.iter())
        .map(|(a, p)| (a - p).powi(2))
        .sum();
    Some(sum / n as f64)
}

/// Mean of absolute errors over all paired points
pub fn mean_absolute_error(actual: &[f64], predicted: &[f64]) -> Option<f64> {
    let n = actual.len().min(predicted.len());
    if n == 0 {
        return None;
    }

    let sum: f64 = actual
        .iter()
        .zip(predicted.iter())
        .map(|(a, p)| (a - p).abs())
        .sum();
    Some(sum / n as f64)
}

/// All metrics for values paired by index (extra values on either side are ignored)
pub fn calculate_error_metrics(actual: &[f64], predicted: &[f64]) -> ErrorMetrics {
    let mse = mean_squared_error(actual, predicted);
    let mape = mean_absolute_percentage_error(actual, predicted);
    if mse.is_some() && mape.is_none() {
        log::warn!("MAPE undefined: every actual value is zero");
    }

    ErrorMetrics {
        mape,
        mse,
        mae: mean_absolute_error(actual, predicted),
        rmse: mse.map(f64::sqrt),
    }
}

/// z-score for a confidence level from the fixed lookup table.
///
/// Levels between table entries use the next lower entry; anything below 0.80
/// gets `1.0`.
pub fn z_score_for(confidence_level: f64) -> f64 {
    Z_TABLE
        .iter()
        .find(|(level, _)| confidence_level >= *level)
        .map(|(_, z)| *z)
        .unwrap_or(FALLBACK_Z)
}

pub(crate) fn validate_confidence_level(confidence_level: f64) -> Result<()> {
    // Every finite level maps onto the z-table, including 1.0 and values below 0.80.
    if !confidence_level.is_finite() {
        return Err(ForecastError::InvalidParameter(format!(
            "confidence level must be a finite number, got {}",
            confidence_level
        )));
    }
    Ok(())
}

/// Upper and lower forecast bands
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfidenceIntervals {
    pub upper: Vec<SeriesPoint>,
    pub lower: Vec<SeriesPoint>,
    pub confidence_level: f64,
}

impl ConfidenceIntervals {
    /// Half-width of the band, identical at every horizon
    pub fn margin(&self) -> f64 {
        match (self.upper.first(), self.lower.first()) {
            (Some(u), Some(l)) => (u.value - l.value) / 2.0,
            _ => 0.0,
        }
    }
}

/// Population standard deviation of `actual[i] - fitted[i]`
pub fn residual_std_error(actual: &[f64], fitted: &[f64]) -> f64 {
    let residuals: Vec<f64> = actual
        .iter()
        .zip(fitted.iter())
        .map(|(a, f)| a - f)
        .collect();
    population_std_dev(&residuals)
}

/// Constant-width band `prediction ± z * std_error` around every forecast point.
///
/// The width does not grow with the horizon.
pub fn confidence_intervals(
    predictions: &[SeriesPoint],
    actual: &[f64],
    fitted: &[f64],
    confidence_level: f64,
) -> ConfidenceIntervals {
    let margin = z_score_for(confidence_level) * residual_std_error(actual, fitted);

    let (upper, lower): (Vec<SeriesPoint>, Vec<SeriesPoint>) = predictions
        .iter()
        .map(|p| {
            (
                SeriesPoint::new(p.timestamp, p.value + margin),
                SeriesPoint::new(p.timestamp, p.value - margin),
            )
        })
        .unzip();

    ConfidenceIntervals {
        upper,
        lower,
        confidence_level,
    }
}
