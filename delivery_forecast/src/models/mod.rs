//! Forecasting models for delivery-metric time series
//!
//! Three interchangeable strategies share one contract: train on a sorted
//! series, expose the in-sample fitted curve, and extend it `horizon` days
//! past the last observation.

use crate::data::{sorted_copy, SeriesPoint};
use crate::error::{ensure_not_empty, ForecastError, Result};
use crate::metrics::{
    calculate_error_metrics, confidence_intervals, validate_confidence_level, ConfidenceIntervals,
    ErrorMetrics,
};
use crate::utils::future_timestamps;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

pub mod exponential_smoothing;
pub mod linear_regression;
pub mod moving_average;

pub use exponential_smoothing::{ExponentialSmoothing, DEFAULT_ALPHA};
pub use linear_regression::LinearRegression;
pub use moving_average::{MovingAverage, DEFAULT_WINDOW_SIZE};

/// Kind of forecasting model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelType {
    LinearRegression,
    ExponentialSmoothing,
    MovingAverage,
}

impl ModelType {
    /// Every model type, in grid-search enumeration order
    pub const ALL: [ModelType; 3] = [
        ModelType::LinearRegression,
        ModelType::ExponentialSmoothing,
        ModelType::MovingAverage,
    ];
}

impl std::fmt::Display for ModelType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ModelType::LinearRegression => "linear_regression",
            ModelType::ExponentialSmoothing => "exponential_smoothing",
            ModelType::MovingAverage => "moving_average",
        };
        f.write_str(name)
    }
}

/// Model parameters, tagged by model type
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "modelType", rename_all = "snake_case")]
pub enum ModelParameters {
    LinearRegression,
    ExponentialSmoothing {
        alpha: f64,
    },
    MovingAverage {
        #[serde(rename = "windowSize")]
        window_size: usize,
    },
}

impl ModelParameters {
    pub fn model_type(&self) -> ModelType {
        match self {
            ModelParameters::LinearRegression => ModelType::LinearRegression,
            ModelParameters::ExponentialSmoothing { .. } => ModelType::ExponentialSmoothing,
            ModelParameters::MovingAverage { .. } => ModelType::MovingAverage,
        }
    }

    /// Default parameters of a model type (`alpha = 0.3`, `windowSize = 7`)
    pub fn default_for(model_type: ModelType) -> Self {
        match model_type {
            ModelType::LinearRegression => ModelParameters::LinearRegression,
            ModelType::ExponentialSmoothing => ModelParameters::ExponentialSmoothing {
                alpha: DEFAULT_ALPHA,
            },
            ModelType::MovingAverage => ModelParameters::MovingAverage {
                window_size: DEFAULT_WINDOW_SIZE,
            },
        }
    }

    /// Check the parameters against a training series of `len` points
    pub fn validate(&self, len: usize) -> Result<()> {
        match *self {
            ModelParameters::LinearRegression => Ok(()),
            ModelParameters::ExponentialSmoothing { alpha } => {
                exponential_smoothing::validate_alpha(alpha)
            }
            ModelParameters::MovingAverage { window_size } => {
                moving_average::validate_window_size(window_size, len)
            }
        }
    }
}

/// Output of every forecaster
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictionResult {
    /// One point per future day
    pub predictions: Vec<SeriesPoint>,
    pub confidence_intervals: ConfidenceIntervals,
    pub model_type: ModelType,
    pub parameters: ModelParameters,
    /// Training values against the model's own fitted curve
    pub error_metrics: ErrorMetrics,
    /// The training input, sorted by timestamp
    pub training_data: Vec<SeriesPoint>,
    /// In-sample fitted curve, aligned with `training_data`
    pub fitted_data: Vec<SeriesPoint>,
}

impl PredictionResult {
    /// Forecasted values without timestamps
    pub fn values(&self) -> Vec<f64> {
        self.predictions.iter().map(|p| p.value).collect()
    }
}

/// Trained forecast model
pub trait TrainedForecastModel: Debug {
    /// In-sample fitted value for every training point
    fn fitted_values(&self) -> &[f64];

    /// Forecast the next `horizon` days
    fn forecast(&self, horizon: usize) -> Vec<f64>;
}

/// Forecast model that can be trained on a sorted, non-empty series
pub trait ForecastModel: Debug + Clone {
    /// The type of trained model produced
    type Trained: TrainedForecastModel;

    /// Train the model on time series data
    fn train(&self, data: &[SeriesPoint]) -> Result<Self::Trained>;

    /// Get the name of the model
    fn name(&self) -> &str;

    /// Parameters this model was built with
    fn parameters(&self) -> ModelParameters;
}

pub(crate) fn validate_forecast_period(forecast_period: usize) -> Result<()> {
    if forecast_period < 1 {
        return Err(ForecastError::InvalidParameter(
            "forecast period must be at least 1 day".to_string(),
        ));
    }
    Ok(())
}

/// Train `model` on `data` and forecast `forecast_period` days past the last point.
pub fn forecast_with<M: ForecastModel>(
    model: &M,
    data: &[SeriesPoint],
    forecast_period: usize,
    confidence_level: f64,
) -> Result<PredictionResult> {
    ensure_not_empty(data.len(), "training data")?;
    validate_forecast_period(forecast_period)?;
    validate_confidence_level(confidence_level)?;

    let sorted = sorted_copy(data);
    let trained = model.train(&sorted)?;

    let actual: Vec<f64> = sorted.iter().map(|p| p.value).collect();
    let fitted = trained.fitted_values();
    let error_metrics = calculate_error_metrics(&actual, fitted);

    let last_timestamp = sorted[sorted.len() - 1].timestamp;
    let predictions: Vec<SeriesPoint> = future_timestamps(last_timestamp, forecast_period)
        .into_iter()
        .zip(trained.forecast(forecast_period))
        .map(|(timestamp, value)| SeriesPoint::new(timestamp, value))
        .collect();

    let confidence_intervals =
        confidence_intervals(&predictions, &actual, fitted, confidence_level);

    let fitted_data = sorted
        .iter()
        .zip(fitted.iter())
        .map(|(p, &value)| SeriesPoint::new(p.timestamp, value))
        .collect();

    let parameters = model.parameters();
    log::debug!(
        "{} trained on {} points, forecasting {} days (mse {:?})",
        model.name(),
        sorted.len(),
        forecast_period,
        error_metrics.mse
    );

    Ok(PredictionResult {
        predictions,
        confidence_intervals,
        model_type: parameters.model_type(),
        parameters,
        error_metrics,
        training_data: sorted,
        fitted_data,
    })
}

/// Run the forecaster described by `parameters`
pub fn predict(
    data: &[SeriesPoint],
    parameters: &ModelParameters,
    forecast_period: usize,
    confidence_level: f64,
) -> Result<PredictionResult> {
    match *parameters {
        ModelParameters::LinearRegression => forecast_with(
            &LinearRegression::new(),
            data,
            forecast_period,
            confidence_level,
        ),
        ModelParameters::ExponentialSmoothing { alpha } => forecast_with(
            &ExponentialSmoothing::new(alpha)?,
            data,
            forecast_period,
            confidence_level,
        ),
        ModelParameters::MovingAverage { window_size } => forecast_with(
            &MovingAverage::new(window_size)?,
            data,
            forecast_period,
            confidence_level,
        ),
    }
}

/// Linear-regression forecast
pub fn predict_linear_regression(
    data: &[SeriesPoint],
    forecast_period: usize,
    confidence_level: f64,
) -> Result<PredictionResult> {
    forecast_with(
        &LinearRegression::new(),
        data,
        forecast_period,
        confidence_level,
    )
}

/// Flat-line exponential-smoothing forecast
pub fn predict_exponential_smoothing(
    data: &[SeriesPoint],
    alpha: f64,
    forecast_period: usize,
    confidence_level: f64,
) -> Result<PredictionResult> {
    forecast_with(
        &ExponentialSmoothing::new(alpha)?,
        data,
        forecast_period,
        confidence_level,
    )
}

/// Flat-line moving-average forecast
pub fn predict_moving_average(
    data: &[SeriesPoint],
    window_size: usize,
    forecast_period: usize,
    confidence_level: f64,
) -> Result<PredictionResult> {
    forecast_with(
        &MovingAverage::new(window_size)?,
        data,
        forecast_period,
        confidence_level,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parameters_serialize_with_model_tag() {
        let params = ModelParameters::MovingAverage { window_size: 5 };
        let json = serde_json::to_string(&params).unwrap();
        assert_eq!(json, r#"{"modelType":"moving_average","windowSize":5}"#);

        let back: ModelParameters = serde_json::from_str(&json).unwrap();
        assert_eq!(back, params);
    }

    #[test]
    fn test_default_parameters() {
        assert_eq!(
            ModelParameters::default_for(ModelType::ExponentialSmoothing),
            ModelParameters::ExponentialSmoothing { alpha: 0.3 }
        );
        assert_eq!(
            ModelParameters::default_for(ModelType::MovingAverage).model_type(),
            ModelType::MovingAverage
        );
    }

    #[test]
    fn test_parameter_validation() {
        assert!(ModelParameters::LinearRegression.validate(1).is_ok());
        assert!(ModelParameters::ExponentialSmoothing { alpha: 1.2 }
            .validate(10)
            .is_err());
        assert!(ModelParameters::MovingAverage { window_size: 11 }
            .validate(10)
            .is_err());
        assert!(ModelParameters::MovingAverage { window_size: 10 }
            .validate(10)
            .is_ok());
    }
}
