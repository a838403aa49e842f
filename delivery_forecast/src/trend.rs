//! Trend detection over delivery metrics
//!
//! Fits an ordinary-least-squares line against elapsed days (irregular spacing
//! is kept, nothing is resampled), classifies the slope and attaches the
//! points flagged by [`crate::anomaly`].

use crate::anomaly::{detect_anomalies, DEFAULT_THRESHOLD_FACTOR};
use crate::config::AnalysisConfig;
use crate::data::{elapsed_days, sorted_copy, SeriesPoint};
use crate::error::{ensure_not_empty, Result};
use serde::{Deserialize, Serialize};
use series_math::{population_std_dev, LinearFit};

/// Default trailing window used for anomaly flagging
pub const DEFAULT_TREND_WINDOW: usize = 7;

/// `|slope|` below this is classified as stable
const STABLE_SLOPE: f64 = 0.001;
const STRONG_SLOPE: f64 = 0.1;
const MODERATE_SLOPE: f64 = 0.05;
const WEAK_SLOPE: f64 = 0.01;

/// Direction of a fitted trend.
///
/// `Fluctuating` is part of the public vocabulary for exhaustive matching but
/// the slope classification never yields it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    Increasing,
    Decreasing,
    Stable,
    Fluctuating,
}

impl TrendDirection {
    pub fn from_slope(slope: f64) -> Self {
        if slope.abs() < STABLE_SLOPE {
            TrendDirection::Stable
        } else if slope > 0.0 {
            TrendDirection::Increasing
        } else {
            TrendDirection::Decreasing
        }
    }
}

/// Strength bucket of `|slope|`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendStrength {
    Strong,
    Moderate,
    Weak,
    None,
}

impl TrendStrength {
    pub fn from_slope(slope: f64) -> Self {
        let magnitude = slope.abs();
        if magnitude > STRONG_SLOPE {
            TrendStrength::Strong
        } else if magnitude > MODERATE_SLOPE {
            TrendStrength::Moderate
        } else if magnitude > WEAK_SLOPE {
            TrendStrength::Weak
        } else {
            TrendStrength::None
        }
    }
}

/// Result of [`detect_trend`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendResult {
    pub direction: TrendDirection,
    pub strength: TrendStrength,
    /// Value units per day
    pub slope: f64,
    pub intercept: f64,
    /// One fitted value per input point, same order as `data`
    pub trend_line: Vec<SeriesPoint>,
    /// Share of the variance explained by the trend line. `None` when the
    /// values do not vary.
    pub r_squared: Option<f64>,
    /// Population standard deviation of the raw values
    pub standard_deviation: f64,
    /// Percentage change from the first to the last value
    pub change_rate: f64,
    /// The input, sorted by timestamp
    pub data: Vec<SeriesPoint>,
    pub anomalies: Vec<SeriesPoint>,
}

/// OLS fit of sorted points against days elapsed since the first point.
///
/// Returns the fit together with the `x` position of every point.
pub(crate) fn fit_trend(sorted: &[SeriesPoint]) -> Result<(LinearFit, Vec<f64>)> {
    ensure_not_empty(sorted.len(), "trend input")?;

    let origin = sorted[0].timestamp;
    let xs: Vec<f64> = sorted
        .iter()
        .map(|p| elapsed_days(origin, p.timestamp))
        .collect();
    let ys: Vec<f64> = sorted.iter().map(|p| p.value).collect();

    let fit = LinearFit::fit(&xs, &ys)?;
    Ok((fit, xs))
}

/// `(last - first) / |first| * 100`, zero when the first value is zero
pub fn change_rate(first: f64, last: f64) -> f64 {
    if first == 0.0 {
        return 0.0;
    }
    (last - first) / first.abs() * 100.0
}

/// Detect the trend of a series, flagging anomalies with the default threshold.
pub fn detect_trend(data: &[SeriesPoint], window_size: usize) -> Result<TrendResult> {
    detect_trend_with_threshold(data, window_size, DEFAULT_THRESHOLD_FACTOR)
}

/// [`detect_trend`] with window and threshold taken from configuration
pub fn detect_trend_with_config(
    data: &[SeriesPoint],
    config: &AnalysisConfig,
) -> Result<TrendResult> {
    config.validate()?;
    detect_trend_with_threshold(data, config.trend_window, config.anomaly_threshold)
}

/// Detect the trend of a series with an explicit anomaly threshold factor.
pub fn detect_trend_with_threshold(
    data: &[SeriesPoint],
    window_size: usize,
    threshold_factor: f64,
) -> Result<TrendResult> {
    ensure_not_empty(data.len(), "trend input")?;

    let sorted = sorted_copy(data);
    let anomalies = detect_anomalies(&sorted, window_size, threshold_factor)?;
    let (fit, xs) = fit_trend(&sorted)?;

    let trend_line = sorted
        .iter()
        .zip(xs.iter())
        .map(|(p, &x)| SeriesPoint::new(p.timestamp, fit.predict(x)))
        .collect();

    let values: Vec<f64> = sorted.iter().map(|p| p.value).collect();
    let r_squared = fit.r_squared(&xs, &values).ok();
    let first = values[0];
    let last = values[values.len() - 1];

    let result = TrendResult {
        direction: TrendDirection::from_slope(fit.slope),
        strength: TrendStrength::from_slope(fit.slope),
        slope: fit.slope,
        intercept: fit.intercept,
        trend_line,
        r_squared,
        standard_deviation: population_std_dev(&values),
        change_rate: change_rate(first, last),
        anomalies: anomalies.iter().map(|a| a.point()).collect(),
        data: sorted,
    };

    log::debug!(
        "trend over {} points: slope {:.4}/day ({:?}, {:?}), {} anomalies",
        result.data.len(),
        result.slope,
        result.direction,
        result.strength,
        result.anomalies.len()
    );

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_thresholds() {
        assert_eq!(TrendDirection::from_slope(0.0), TrendDirection::Stable);
        assert_eq!(TrendDirection::from_slope(0.0009), TrendDirection::Stable);
        assert_eq!(TrendDirection::from_slope(-0.0009), TrendDirection::Stable);
        assert_eq!(TrendDirection::from_slope(0.002), TrendDirection::Increasing);
        assert_eq!(TrendDirection::from_slope(-0.002), TrendDirection::Decreasing);
    }

    #[test]
    fn test_strength_thresholds() {
        assert_eq!(TrendStrength::from_slope(0.2), TrendStrength::Strong);
        assert_eq!(TrendStrength::from_slope(-0.07), TrendStrength::Moderate);
        assert_eq!(TrendStrength::from_slope(0.05), TrendStrength::Weak);
        assert_eq!(TrendStrength::from_slope(0.01), TrendStrength::None);
    }

    #[test]
    fn test_change_rate() {
        assert_eq!(change_rate(0.0, 50.0), 0.0);
        assert_eq!(change_rate(50.0, 75.0), 50.0);
        assert_eq!(change_rate(-50.0, -25.0), 50.0);
    }
}
