//! Grid search over forecaster parameters
//!
//! Candidates are scored by MSE of a forecast from the chronological training
//! split against the held-out most recent points.

use crate::config::{AnalysisConfig, OptimizerConfig};
use crate::data::{sorted_copy, SeriesPoint};
use crate::error::{ensure_min_len, ensure_not_empty, ForecastError, Result};
use crate::metrics::{calculate_error_metrics, ErrorMetrics};
use crate::models::{predict, ModelParameters, ModelType};
use crate::utils::train_test_split;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// Minimum series length the optimizer accepts
pub const MIN_OPTIMIZATION_POINTS: usize = 14;

/// Validation score of one parameter candidate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateScore {
    pub model_type: ModelType,
    pub parameters: ModelParameters,
    pub error_metrics: ErrorMetrics,
}

impl CandidateScore {
    fn mse(&self) -> f64 {
        self.error_metrics.mse.unwrap_or(f64::INFINITY)
    }
}

/// Best parameters found by the grid search
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimizedParameters {
    pub model_type: ModelType,
    pub parameters: ModelParameters,
    /// Scored against the validation split
    pub error_metrics: ErrorMetrics,
    /// Winning candidate of every model type that had one, in enumeration order
    pub best_per_model: Vec<CandidateScore>,
}

/// Parameter candidates of one model type, in enumeration order
fn candidate_grid(
    model_type: ModelType,
    config: &OptimizerConfig,
    train_len: usize,
) -> Vec<ModelParameters> {
    match model_type {
        ModelType::LinearRegression => vec![ModelParameters::LinearRegression],
        ModelType::ExponentialSmoothing => config
            .alpha_grid
            .iter()
            .map(|&alpha| ModelParameters::ExponentialSmoothing { alpha })
            .collect(),
        ModelType::MovingAverage => config
            .window_grid
            .iter()
            .filter(|&&window_size| window_size < train_len)
            .map(|&window_size| ModelParameters::MovingAverage { window_size })
            .collect(),
    }
}

fn score_candidate(
    train: &[SeriesPoint],
    validation: &[SeriesPoint],
    parameters: &ModelParameters,
    confidence_level: f64,
) -> Result<CandidateScore> {
    let forecast = predict(train, parameters, validation.len(), confidence_level)?;

    let actual: Vec<f64> = validation.iter().map(|p| p.value).collect();
    let error_metrics = calculate_error_metrics(&actual, &forecast.values());

    log::trace!("candidate {:?}: mse {:?}", parameters, error_metrics.mse);

    Ok(CandidateScore {
        model_type: parameters.model_type(),
        parameters: *parameters,
        error_metrics,
    })
}

/// First lowest-MSE score; later candidates must be strictly better to win
fn lowest_mse<'a, I>(scores: I) -> Option<&'a CandidateScore>
where
    I: IntoIterator<Item = &'a CandidateScore>,
{
    scores.into_iter().fold(None, |best, score| match best {
        Some(current) if score.mse() >= current.mse() => Some(current),
        _ => Some(score),
    })
}

/// Search every model type, or only `target_model_type`, with default settings.
pub fn optimize_parameters(
    data: &[SeriesPoint],
    target_model_type: Option<ModelType>,
) -> Result<OptimizedParameters> {
    optimize_parameters_with_config(data, target_model_type, &AnalysisConfig::default())
}

/// [`optimize_parameters`] with grids, split and parallelism from configuration
pub fn optimize_parameters_with_config(
    data: &[SeriesPoint],
    target_model_type: Option<ModelType>,
    config: &AnalysisConfig,
) -> Result<OptimizedParameters> {
    ensure_not_empty(data.len(), "optimizer input")?;
    ensure_min_len(data.len(), MIN_OPTIMIZATION_POINTS)?;
    config.validate()?;

    let sorted = sorted_copy(data);
    let optimizer = &config.optimizer;
    let (train, validation) = train_test_split(&sorted, optimizer.validation_ratio)?;

    let model_types: Vec<ModelType> = match target_model_type {
        Some(model_type) => vec![model_type],
        None => ModelType::ALL.to_vec(),
    };

    let candidates: Vec<ModelParameters> = model_types
        .iter()
        .flat_map(|&model_type| candidate_grid(model_type, optimizer, train.len()))
        .collect();

    log::debug!(
        "optimizing {} candidates over {} training / {} validation points",
        candidates.len(),
        train.len(),
        validation.len()
    );

    // Collect keeps enumeration order in both modes
    let scores: Vec<CandidateScore> = if optimizer.parallel {
        candidates
            .par_iter()
            .map(|params| score_candidate(&train, &validation, params, config.confidence_level))
            .collect::<Result<Vec<_>>>()?
    } else {
        candidates
            .iter()
            .map(|params| score_candidate(&train, &validation, params, config.confidence_level))
            .collect::<Result<Vec<_>>>()?
    };

    let best_per_model: Vec<CandidateScore> = model_types
        .iter()
        .filter_map(|&model_type| {
            lowest_mse(scores.iter().filter(|s| s.model_type == model_type)).cloned()
        })
        .collect();

    let best = lowest_mse(&best_per_model).cloned().ok_or_else(|| {
        ForecastError::InvalidParameter(format!(
            "no parameter candidates fit a training set of {} points",
            train.len()
        ))
    })?;

    log::debug!(
        "best model {} with {:?} (mse {:?})",
        best.model_type,
        best.parameters,
        best.error_metrics.mse
    );

    Ok(OptimizedParameters {
        model_type: best.model_type,
        parameters: best.parameters,
        error_metrics: best.error_metrics,
        best_per_model,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn score(mse: f64, window_size: usize) -> CandidateScore {
        CandidateScore {
            model_type: ModelType::MovingAverage,
            parameters: ModelParameters::MovingAverage { window_size },
            error_metrics: ErrorMetrics {
                mse: Some(mse),
                ..ErrorMetrics::default()
            },
        }
    }

    #[test]
    fn test_ties_keep_first_candidate() {
        let scores = vec![score(2.0, 3), score(1.0, 5), score(1.0, 7)];
        let best = lowest_mse(&scores).unwrap();
        assert_eq!(
            best.parameters,
            ModelParameters::MovingAverage { window_size: 5 }
        );
    }

    #[test]
    fn test_window_grid_skips_long_windows() {
        let grid = candidate_grid(ModelType::MovingAverage, &OptimizerConfig::default(), 11);
        assert_eq!(
            grid,
            vec![
                ModelParameters::MovingAverage { window_size: 3 },
                ModelParameters::MovingAverage { window_size: 5 },
                ModelParameters::MovingAverage { window_size: 7 },
                ModelParameters::MovingAverage { window_size: 10 },
            ]
        );
    }

    #[test]
    fn test_linear_regression_has_single_candidate() {
        let grid = candidate_grid(ModelType::LinearRegression, &OptimizerConfig::default(), 40);
        assert_eq!(grid, vec![ModelParameters::LinearRegression]);
    }
}
