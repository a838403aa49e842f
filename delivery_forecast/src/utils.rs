//! Utility functions for the delivery_forecast crate

use crate::data::{start_of_day, SeriesPoint};
use crate::error::{ForecastError, Result};
use chrono::{DateTime, Duration, NaiveDate, Utc};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};

/// Split sorted points chronologically into training and validation sets.
///
/// The validation set is always the most recent `validation_ratio` share.
/// Both sides keep at least one point, so `points` needs two or more.
pub fn train_test_split(
    points: &[SeriesPoint],
    validation_ratio: f64,
) -> Result<(Vec<SeriesPoint>, Vec<SeriesPoint>)> {
    if !(validation_ratio > 0.0 && validation_ratio < 1.0) {
        return Err(ForecastError::InvalidParameter(format!(
            "validation ratio must be in (0, 1), got {}",
            validation_ratio
        )));
    }
    if points.len() < 2 {
        return Err(ForecastError::InsufficientData {
            required: 2,
            actual: points.len(),
        });
    }

    let n = points.len();
    let train_len = ((n as f64 * (1.0 - validation_ratio)).floor() as usize).clamp(1, n - 1);

    Ok((points[..train_len].to_vec(), points[train_len..].to_vec()))
}

/// One timestamp per day after `last_timestamp`
pub fn future_timestamps(last_timestamp: DateTime<Utc>, horizon: usize) -> Vec<DateTime<Utc>> {
    (1..=horizon as i64)
        .map(|i| last_timestamp + Duration::days(i))
        .collect()
}

/// Deterministic daily series `base + slope * day + noise` starting at `start`.
///
/// Noise is Gaussian with standard deviation `noise_std`; zero gives an exact line.
pub fn generate_synthetic_series(
    start: NaiveDate,
    days: usize,
    base: f64,
    slope: f64,
    noise_std: f64,
    seed: u64,
) -> Result<Vec<SeriesPoint>> {
    let noise = Normal::new(0.0, noise_std).map_err(|e| {
        ForecastError::InvalidParameter(format!("invalid noise standard deviation: {}", e))
    })?;
    let mut rng = StdRng::seed_from_u64(seed);
    let origin = start_of_day(start);

    let points = (0..days)
        .map(|day| {
            let value = base + slope * day as f64 + noise.sample(&mut rng);
            SeriesPoint::new(origin + Duration::days(day as i64), value)
        })
        .collect();

    Ok(points)
}
