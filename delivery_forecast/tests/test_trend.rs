use approx::assert_abs_diff_eq;
use chrono::{Duration, NaiveDate};
use delivery_forecast::config::AnalysisConfig;
use delivery_forecast::data::{start_of_day, SeriesPoint};
use delivery_forecast::error::ForecastError;
use delivery_forecast::trend::{detect_trend, detect_trend_with_config, TrendDirection, TrendStrength};
use delivery_forecast::utils::generate_synthetic_series;
use pretty_assertions::assert_eq;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

fn daily(values: &[f64]) -> Vec<SeriesPoint> {
    let start = start_of_day(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
    values
        .iter()
        .enumerate()
        .map(|(i, &v)| SeriesPoint::new(start + Duration::days(i as i64), v))
        .collect()
}

#[test]
fn test_trend_is_order_independent() {
    let start = NaiveDate::from_ymd_opt(2024, 2, 1).unwrap();
    let sorted = generate_synthetic_series(start, 45, 30.0, 0.8, 4.0, 11).unwrap();

    let mut shuffled = sorted.clone();
    shuffled.shuffle(&mut StdRng::seed_from_u64(99));
    assert_ne!(shuffled, sorted);

    let expected = detect_trend(&sorted, 7).unwrap();
    let actual = detect_trend(&shuffled, 7).unwrap();
    assert_eq!(actual, expected);
}

#[test]
fn test_trend_with_shared_timestamps_is_order_independent() {
    let start = start_of_day(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
    let mut ascending = Vec::new();
    let mut swapped = Vec::new();
    for i in 0..10 {
        let day = start + Duration::days(i);
        let low = SeriesPoint::new(day, 1.0 + i as f64);
        let high = SeriesPoint::new(day, 50.0 + 3.0 * i as f64);
        ascending.extend([low, high]);
        swapped.extend([high, low]);
    }

    let expected = detect_trend(&ascending, 3).unwrap();
    let actual = detect_trend(&swapped, 3).unwrap();
    assert_eq!(actual, expected);
    assert_eq!(actual.data[0].value, 1.0);
    assert_abs_diff_eq!(actual.change_rate, 7600.0, epsilon = 1e-9);
}

#[test]
fn test_perfectly_linear_series() {
    let values: Vec<f64> = (0..25).map(|day| 5.0 * day as f64).collect();
    let result = detect_trend(&daily(&values), 7).unwrap();

    assert_eq!(result.direction, TrendDirection::Increasing);
    assert_eq!(result.strength, TrendStrength::Strong);
    assert_abs_diff_eq!(result.slope, 5.0, epsilon = 1e-9);
    assert_abs_diff_eq!(result.intercept, 0.0, epsilon = 1e-9);
    assert_abs_diff_eq!(result.r_squared.unwrap(), 1.0, epsilon = 1e-9);

    assert_eq!(result.trend_line.len(), values.len());
    for (fitted, &value) in result.trend_line.iter().zip(values.iter()) {
        assert_abs_diff_eq!(fitted.value, value, epsilon = 1e-9);
    }
}

#[test]
fn test_constant_series() {
    let result = detect_trend(&daily(&[10.0; 20]), 7).unwrap();

    assert_eq!(result.slope, 0.0);
    assert_eq!(result.direction, TrendDirection::Stable);
    assert_eq!(result.strength, TrendStrength::None);
    assert_eq!(result.standard_deviation, 0.0);
    assert_eq!(result.r_squared, None);
    assert_eq!(result.change_rate, 0.0);
    assert!(result.anomalies.is_empty());
}

#[test]
fn test_decreasing_series_change_rate() {
    let values: Vec<f64> = (0..10).map(|day| 100.0 - 2.0 * day as f64).collect();
    let result = detect_trend(&daily(&values), 7).unwrap();

    assert_eq!(result.direction, TrendDirection::Decreasing);
    assert_eq!(result.strength, TrendStrength::Strong);
    // (82 - 100) / 100 * 100
    assert_abs_diff_eq!(result.change_rate, -18.0, epsilon = 1e-9);
}

#[test]
fn test_single_point() {
    let result = detect_trend(&daily(&[42.0]), 7).unwrap();

    assert_eq!(result.slope, 0.0);
    assert_eq!(result.trend_line[0].value, 42.0);
    assert_eq!(result.data.len(), 1);
}

#[test]
fn test_irregular_spacing_keeps_input_points() {
    let start = start_of_day(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
    let data = vec![
        SeriesPoint::new(start, 1.0),
        SeriesPoint::new(start + Duration::days(1), 2.0),
        SeriesPoint::new(start + Duration::days(5), 6.0),
    ];
    let result = detect_trend(&data, 7).unwrap();

    assert_eq!(result.trend_line.len(), 3);
    assert_eq!(result.trend_line[2].timestamp, data[2].timestamp);
    assert_abs_diff_eq!(result.slope, 1.0, epsilon = 1e-9);
}

#[test]
fn test_spike_is_reported_as_anomaly() {
    // Window [0, 2] has std 1 and |2 - 1| > 0.5 * 1
    let data = daily(&[0.0, 2.0]);
    let config = AnalysisConfig {
        anomaly_threshold: 0.5,
        ..AnalysisConfig::default()
    };
    let result = detect_trend_with_config(&data, &config).unwrap();

    assert_eq!(result.anomalies, vec![data[1]]);
}

#[test]
fn test_empty_input_fails() {
    assert!(matches!(
        detect_trend(&[], 7),
        Err(ForecastError::EmptyInput(_))
    ));
}

#[test]
fn test_trend_result_serializes_lowercase_tags() {
    let result = detect_trend(&daily(&[1.0, 2.0, 3.0]), 7).unwrap();
    let json = serde_json::to_value(&result).unwrap();

    assert_eq!(json["direction"], "increasing");
    assert_eq!(json["strength"], "strong");
    assert!(json["trendLine"].is_array());
    assert!(json.get("changeRate").is_some());
    assert!(json["rSquared"].is_number());
}
