//! Local-variability anomaly detection
//!
//! A point is flagged when its trailing window has non-zero spread and
//! `|value - std_dev| > threshold_factor * std_dev`. The comparison is against
//! the window's standard deviation itself, not its mean.

use crate::data::{sorted_copy, SeriesPoint};
use crate::error::{ensure_not_empty, ForecastError, Result};
use crate::series::{moving_average, standard_deviation};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Default multiplier applied to the local standard deviation
pub const DEFAULT_THRESHOLD_FACTOR: f64 = 2.0;

/// A flagged observation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Anomaly {
    pub timestamp: DateTime<Utc>,
    pub value: f64,
    /// Trailing moving average over the same window
    pub expected_value: f64,
    /// `(value - expected) / expected * 100`, absent when `expected` is zero
    pub deviation_percent: Option<f64>,
    /// Population standard deviation of the trailing window
    pub local_std_dev: f64,
}

impl Anomaly {
    /// Project to a plain series point
    pub fn point(&self) -> SeriesPoint {
        SeriesPoint::new(self.timestamp, self.value)
    }
}

/// Flag points whose local variability exceeds the threshold.
pub fn detect_anomalies(
    data: &[SeriesPoint],
    window_size: usize,
    threshold_factor: f64,
) -> Result<Vec<Anomaly>> {
    ensure_not_empty(data.len(), "anomaly input")?;
    if !threshold_factor.is_finite() || threshold_factor < 0.0 {
        return Err(ForecastError::InvalidParameter(format!(
            "threshold factor must be a non-negative number, got {}",
            threshold_factor
        )));
    }

    let sorted = sorted_copy(data);
    let deviations = standard_deviation(&sorted, window_size)?;
    let averages = moving_average(&sorted, window_size)?;

    let anomalies: Vec<Anomaly> = deviations
        .iter()
        .zip(averages.iter())
        .filter(|(dev, _)| {
            let std_dev = dev.window_value;
            std_dev > 0.0 && (dev.value - std_dev).abs() > threshold_factor * std_dev
        })
        .map(|(dev, avg)| {
            let expected_value = avg.window_value;
            let deviation_percent = if expected_value != 0.0 {
                Some((dev.value - expected_value) / expected_value * 100.0)
            } else {
                None
            };

            Anomaly {
                timestamp: dev.timestamp,
                value: dev.value,
                expected_value,
                deviation_percent,
                local_std_dev: dev.window_value,
            }
        })
        .collect();

    log::debug!(
        "anomaly scan over {} points (window {}): {} flagged",
        sorted.len(),
        window_size,
        anomalies.len()
    );

    Ok(anomalies)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn daily(values: &[f64]) -> Vec<SeriesPoint> {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        values
            .iter()
            .enumerate()
            .map(|(i, &v)| SeriesPoint::new(start + Duration::days(i as i64), v))
            .collect()
    }

    #[test]
    fn test_flat_series_has_no_anomalies() {
        let data = daily(&[5.0; 10]);
        assert!(detect_anomalies(&data, 3, 2.0).unwrap().is_empty());
    }

    #[test]
    fn test_large_values_with_small_spread_are_flagged() {
        // Window [100, 102]: std-dev 1, |102 - 1| > 2
        let data = daily(&[100.0, 102.0]);
        let anomalies = detect_anomalies(&data, 2, 2.0).unwrap();

        assert_eq!(anomalies.len(), 1);
        let flagged = anomalies[0];
        assert_eq!(flagged.value, 102.0);
        assert_eq!(flagged.expected_value, 101.0);
        assert_eq!(flagged.local_std_dev, 1.0);
        let pct = flagged.deviation_percent.unwrap();
        assert!((pct - 100.0 / 101.0).abs() < 1e-9);
    }

    #[test]
    fn test_value_close_to_spread_is_not_flagged() {
        // Window [0, 2]: std-dev 1, |2 - 1| = 1 is not above 2
        let data = daily(&[0.0, 2.0]);
        assert!(detect_anomalies(&data, 2, 2.0).unwrap().is_empty());
    }

    #[test]
    fn test_zero_expected_value_has_no_percentage() {
        // Window [10, -10]: mean 0, std-dev 10, |-10 - 10| > 0.5 * 10
        let data = daily(&[10.0, -10.0]);
        let anomalies = detect_anomalies(&data, 2, 0.5).unwrap();

        assert_eq!(anomalies.len(), 1);
        assert_eq!(anomalies[0].expected_value, 0.0);
        assert!(anomalies[0].deviation_percent.is_none());
    }

    #[test]
    fn test_invalid_inputs() {
        assert!(matches!(
            detect_anomalies(&[], 3, 2.0),
            Err(ForecastError::EmptyInput(_))
        ));
        let data = daily(&[1.0, 2.0]);
        assert!(detect_anomalies(&data, 0, 2.0).is_err());
        assert!(detect_anomalies(&data, 2, -1.0).is_err());
    }
}
