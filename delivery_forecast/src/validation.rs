//! K-fold cross-validation of a forecaster and parameter combination
//!
//! Folds are contiguous blocks of the sorted series. Each fold is forecast from
//! all remaining points; only forecast values are compared, positionally, with
//! the fold's actual points.

use crate::config::AnalysisConfig;
use crate::data::{sorted_copy, SeriesPoint};
use crate::error::{ensure_min_len, ensure_not_empty, ForecastError, Result};
use crate::metrics::calculate_error_metrics;
use crate::models::{predict, ModelParameters};
use serde::{Deserialize, Serialize};
use std::ops::Range;

/// Outcome of one fold
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FoldResult {
    /// Positions of the test points in the sorted series
    pub test_indices: Vec<usize>,
    /// Forecast values carrying the test points' timestamps
    pub predictions: Vec<SeriesPoint>,
    pub actual: Vec<SeriesPoint>,
    pub mape: Option<f64>,
    pub mse: Option<f64>,
}

/// Per-fold results and their aggregates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    pub folds: Vec<FoldResult>,
    /// MAPE of every fold where it is defined
    pub mape: Vec<f64>,
    pub mape_avg: Option<f64>,
    /// MSE of every fold where it is defined
    pub mse: Vec<f64>,
    pub mse_avg: Option<f64>,
}

/// `k` contiguous ranges of `n / k` points; the last one takes the remainder.
pub fn fold_ranges(n: usize, k: usize) -> Vec<Range<usize>> {
    let fold_size = n / k;
    (0..k)
        .map(|i| {
            let start = i * fold_size;
            let end = if i == k - 1 { n } else { start + fold_size };
            start..end
        })
        .collect()
}

fn average(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}

/// Cross-validate with `k` folds and the default confidence level.
pub fn cross_validate(
    data: &[SeriesPoint],
    parameters: &ModelParameters,
    k: usize,
) -> Result<ValidationResult> {
    let config = AnalysisConfig {
        cv_folds: k,
        ..AnalysisConfig::default()
    };
    cross_validate_with_config(data, parameters, &config)
}

/// [`cross_validate`] with fold count and confidence level from configuration
pub fn cross_validate_with_config(
    data: &[SeriesPoint],
    parameters: &ModelParameters,
    config: &AnalysisConfig,
) -> Result<ValidationResult> {
    let k = config.cv_folds;
    ensure_not_empty(data.len(), "cross-validation input")?;
    if k < 2 {
        return Err(ForecastError::InvalidParameter(format!(
            "cross-validation needs at least 2 folds, got {}",
            k
        )));
    }
    ensure_min_len(data.len(), k)?;
    config.validate()?;

    let sorted = sorted_copy(data);
    let n = sorted.len();
    let ranges = fold_ranges(n, k);

    // The last fold is the largest, so its training set is the smallest
    let smallest_train = ranges
        .last()
        .map(|last| n - last.len())
        .unwrap_or(n);
    parameters.validate(smallest_train)?;

    log::debug!(
        "cross-validating {} over {} points in {} folds",
        parameters.model_type(),
        n,
        k
    );

    let mut folds = Vec::with_capacity(k);
    for range in ranges {
        let actual = sorted[range.clone()].to_vec();
        let train: Vec<SeriesPoint> = sorted[..range.start]
            .iter()
            .chain(sorted[range.end..].iter())
            .copied()
            .collect();

        let forecast = predict(&train, parameters, actual.len(), config.confidence_level)?;
        let predictions: Vec<SeriesPoint> = actual
            .iter()
            .zip(forecast.predictions.iter())
            .map(|(a, p)| SeriesPoint::new(a.timestamp, p.value))
            .collect();

        let actual_values: Vec<f64> = actual.iter().map(|p| p.value).collect();
        let metrics = calculate_error_metrics(&actual_values, &forecast.values());

        log::trace!(
            "fold {:?}: mape {:?}, mse {:?}",
            range,
            metrics.mape,
            metrics.mse
        );

        folds.push(FoldResult {
            test_indices: range.collect(),
            predictions,
            actual,
            mape: metrics.mape,
            mse: metrics.mse,
        });
    }

    let mape: Vec<f64> = folds.iter().filter_map(|f| f.mape).collect();
    let mse: Vec<f64> = folds.iter().filter_map(|f| f.mse).collect();

    Ok(ValidationResult {
        mape_avg: average(&mape),
        mse_avg: average(&mse),
        mape,
        mse,
        folds,
    })
}
