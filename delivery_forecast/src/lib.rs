//! # Delivery Forecast
//!
//! Trend, seasonality and short-horizon forecasting for software-delivery
//! metrics such as daily commit counts, pull requests or changed lines.
//!
//! ## Features
//!
//! - Series utilities (calendar aggregation, gap filling, trailing windows, normalization)
//! - Trend detection with anomaly flags
//! - Weekly and monthly seasonality analysis
//! - Forecasting models (Linear Regression, Exponential Smoothing, Moving Average)
//!   with constant-width confidence bands
//! - Grid-search parameter optimization and k-fold cross-validation
//!
//! Every operation is a pure function over a private, timestamp-sorted copy of
//! its input; nothing is cached between calls.
//!
//! ## Quick Start
//!
//! ```rust
//! use chrono::NaiveDate;
//! use delivery_forecast::models::{predict_exponential_smoothing, ModelType};
//! use delivery_forecast::optimizer::optimize_parameters;
//! use delivery_forecast::trend::{detect_trend, TrendDirection};
//! use delivery_forecast::utils::generate_synthetic_series;
//!
//! let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
//! let commits = generate_synthetic_series(start, 60, 20.0, 0.5, 1.0, 7)?;
//!
//! let trend = detect_trend(&commits, 7)?;
//! assert_eq!(trend.direction, TrendDirection::Increasing);
//!
//! let forecast = predict_exponential_smoothing(&commits, 0.3, 7, 0.95)?;
//! assert_eq!(forecast.predictions.len(), 7);
//!
//! let best = optimize_parameters(&commits, Some(ModelType::MovingAverage))?;
//! assert_eq!(best.model_type, ModelType::MovingAverage);
//! # Ok::<(), delivery_forecast::ForecastError>(())
//! ```

pub mod anomaly;
pub mod config;
pub mod data;
pub mod error;
pub mod metrics;
pub mod models;
pub mod optimizer;
pub mod seasonality;
pub mod series;
pub mod trend;
pub mod utils;
pub mod validation;

// Re-export commonly used types
pub use crate::anomaly::{detect_anomalies, Anomaly};
pub use crate::config::{AnalysisConfig, OptimizerConfig};
pub use crate::data::{DataLoader, SeriesPoint, TimeSeriesData};
pub use crate::error::{ForecastError, Result};
pub use crate::metrics::{calculate_error_metrics, ConfidenceIntervals, ErrorMetrics};
pub use crate::models::{
    predict, predict_exponential_smoothing, predict_linear_regression, predict_moving_average,
    ForecastModel, ModelParameters, ModelType, PredictionResult, TrainedForecastModel,
};
pub use crate::optimizer::{optimize_parameters, OptimizedParameters};
pub use crate::seasonality::{analyze_seasonality, SeasonalityResult, SeasonalityType};
pub use crate::series::{
    aggregate, fill_missing_dates, moving_average, normalize, standard_deviation, Period,
};
pub use crate::trend::{detect_trend, TrendDirection, TrendResult, TrendStrength};
pub use crate::validation::{cross_validate, ValidationResult};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
