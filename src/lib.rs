//! # Delivery Insights
//!
//! Trend, seasonality and forecasting analysis for software-delivery metrics.
//!
//! This crate re-exports the two workspace members:
//!
//! - [`forecast`]: the analysis engine (`delivery_forecast`)
//! - [`math`]: the numerical kernels it is built on (`series_math`)
//!
//! ## Example
//!
//! ```
//! use chrono::NaiveDate;
//! use delivery_insights::{analyze_seasonality, detect_trend, SeasonalityType, TrendDirection};
//! use delivery_insights::forecast::utils::generate_synthetic_series;
//!
//! let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
//! let flat = generate_synthetic_series(start, 10, 4.0, 0.0, 0.0, 1).unwrap();
//!
//! let trend = detect_trend(&flat, 7).unwrap();
//! assert_eq!(trend.direction, TrendDirection::Stable);
//!
//! // Fewer than 14 points never report a pattern
//! let seasonality = analyze_seasonality(&flat);
//! assert_eq!(seasonality.seasonality_type, SeasonalityType::None);
//! ```

pub use delivery_forecast as forecast;
pub use series_math as math;

pub use delivery_forecast::{
    aggregate, analyze_seasonality, cross_validate, detect_anomalies, detect_trend,
    fill_missing_dates, moving_average, normalize, optimize_parameters, predict,
    predict_exponential_smoothing, predict_linear_regression, predict_moving_average,
    standard_deviation, AnalysisConfig, ForecastError, ModelParameters, ModelType, Period,
    PredictionResult, SeasonalityResult, SeasonalityType, SeriesPoint, TimeSeriesData,
    TrendDirection, TrendResult, TrendStrength, ValidationResult,
};

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_facade_reaches_both_crates() {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let data = forecast::utils::generate_synthetic_series(start, 20, 1.0, 1.0, 0.0, 1).unwrap();

        let result = predict_moving_average(&data, 5, 3, 0.95).unwrap();
        assert_eq!(result.predictions.len(), 3);

        assert_eq!(math::mean(&[1.0, 2.0, 3.0]), 2.0);
    }
}
