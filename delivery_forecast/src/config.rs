//! Tunable analysis settings
//!
//! Every field has the default the analysis functions use when called without
//! configuration. Settings load from JSON; missing fields keep their defaults.

use crate::anomaly::DEFAULT_THRESHOLD_FACTOR;
use crate::error::{ForecastError, Result};
use crate::metrics::{validate_confidence_level, DEFAULT_CONFIDENCE_LEVEL};
use crate::models::validate_forecast_period;
use crate::trend::DEFAULT_TREND_WINDOW;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Default number of cross-validation folds
pub const DEFAULT_CV_FOLDS: usize = 5;

/// Default forecast horizon in days
pub const DEFAULT_FORECAST_PERIOD: usize = 7;

/// Parameter grids and split used by the model optimizer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OptimizerConfig {
    /// Exponential-smoothing candidates
    pub alpha_grid: Vec<f64>,
    /// Moving-average candidates; windows not shorter than the training set are skipped
    pub window_grid: Vec<usize>,
    /// Share of the most recent points held out for scoring
    pub validation_ratio: f64,
    /// Score candidates on the rayon pool
    pub parallel: bool,
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            alpha_grid: (1..=9).map(|i| i as f64 / 10.0).collect(),
            window_grid: vec![3, 5, 7, 10, 14, 21, 28],
            validation_ratio: 0.2,
            parallel: true,
        }
    }
}

impl OptimizerConfig {
    pub fn validate(&self) -> Result<()> {
        if let Some(alpha) = self.alpha_grid.iter().find(|a| !(0.0..=1.0).contains(*a)) {
            return Err(ForecastError::InvalidParameter(format!(
                "alpha grid value {} outside [0, 1]",
                alpha
            )));
        }
        if self.window_grid.contains(&0) {
            return Err(ForecastError::InvalidParameter(
                "window grid must not contain 0".to_string(),
            ));
        }
        if !(self.validation_ratio > 0.0 && self.validation_ratio < 1.0) {
            return Err(ForecastError::InvalidParameter(format!(
                "validation ratio must be in (0, 1), got {}",
                self.validation_ratio
            )));
        }
        Ok(())
    }
}

/// Settings shared by trend detection, forecasting, optimization and validation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Trailing window for anomaly flagging in trend detection
    pub trend_window: usize,
    /// Anomaly threshold factor
    pub anomaly_threshold: f64,
    pub confidence_level: f64,
    /// Forecast horizon in days
    pub forecast_period: usize,
    /// Number of cross-validation folds
    pub cv_folds: usize,
    pub optimizer: OptimizerConfig,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            trend_window: DEFAULT_TREND_WINDOW,
            anomaly_threshold: DEFAULT_THRESHOLD_FACTOR,
            confidence_level: DEFAULT_CONFIDENCE_LEVEL,
            forecast_period: DEFAULT_FORECAST_PERIOD,
            cv_folds: DEFAULT_CV_FOLDS,
            optimizer: OptimizerConfig::default(),
        }
    }
}

impl AnalysisConfig {
    /// Parse a JSON document and validate it
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: AnalysisConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read a JSON file and validate it
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)?;
        log::debug!("loading analysis config from {}", path.display());
        Self::from_json_str(&contents)
    }

    /// Reject out-of-range settings with `InvalidParameter`
    pub fn validate(&self) -> Result<()> {
        if self.trend_window == 0 {
            return Err(ForecastError::InvalidParameter(
                "trend window must be at least 1".to_string(),
            ));
        }
        if !self.anomaly_threshold.is_finite() || self.anomaly_threshold < 0.0 {
            return Err(ForecastError::InvalidParameter(format!(
                "anomaly threshold must be a non-negative number, got {}",
                self.anomaly_threshold
            )));
        }
        validate_confidence_level(self.confidence_level)?;
        validate_forecast_period(self.forecast_period)?;
        if self.cv_folds < 2 {
            return Err(ForecastError::InvalidParameter(format!(
                "cross-validation needs at least 2 folds, got {}",
                self.cv_folds
            )));
        }
        self.optimizer.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = AnalysisConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.optimizer.alpha_grid.len(), 9);
        assert_eq!(config.optimizer.window_grid, vec![3, 5, 7, 10, 14, 21, 28]);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = AnalysisConfig::from_json_str(r#"{"cv_folds": 3}"#).unwrap();
        assert_eq!(config.cv_folds, 3);
        assert_eq!(config.trend_window, 7);
        assert!(config.optimizer.parallel);
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        assert!(matches!(
            AnalysisConfig::from_json_str(r#"{"trend_window": 0}"#),
            Err(ForecastError::InvalidParameter(_))
        ));
        // Any finite level is accepted and mapped through the z-table
        assert!(AnalysisConfig::from_json_str(r#"{"confidence_level": 1.0}"#).is_ok());
        assert!(matches!(
            AnalysisConfig::from_json_str(r#"{"optimizer": {"window_grid": [0, 3]}}"#),
            Err(ForecastError::InvalidParameter(_))
        ));
        assert!(matches!(
            AnalysisConfig::from_json_str("not json"),
            Err(ForecastError::ConfigError(_))
        ));
    }
}
