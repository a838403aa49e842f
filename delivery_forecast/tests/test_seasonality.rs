use approx::assert_abs_diff_eq;
use chrono::{Datelike, Duration, NaiveDate, Weekday};
use delivery_forecast::data::{start_of_day, SeriesPoint};
use delivery_forecast::seasonality::{analyze_seasonality, weekly_pattern, SeasonalityType};
use pretty_assertions::assert_eq;

/// Weekdays at `weekday`, weekends at `weekend`, starting Monday 2024-01-01
fn weekday_weekend(days: usize, weekday: f64, weekend: f64) -> Vec<SeriesPoint> {
    let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    (0..days)
        .map(|i| {
            let date = start + Duration::days(i as i64);
            let value = match date.weekday() {
                Weekday::Sat | Weekday::Sun => weekend,
                _ => weekday,
            };
            SeriesPoint::new(start_of_day(date), value)
        })
        .collect()
}

#[test]
fn test_two_weeks_of_weekday_pattern_is_weekly() {
    let data = weekday_weekend(14, 10.0, 2.0);
    let result = analyze_seasonality(&data);

    assert_eq!(result.seasonality_type, SeasonalityType::Weekly);
    assert_eq!(result.period_length, 7);
    assert!(result.strength > 0.3);

    for day in ["mon", "tue", "wed", "thu", "fri"] {
        assert_abs_diff_eq!(result.pattern[day], 10.0, epsilon = 1e-9);
    }
    assert_abs_diff_eq!(result.pattern["sat"], 2.0, epsilon = 1e-9);
    assert_abs_diff_eq!(result.pattern["sun"], 2.0, epsilon = 1e-9);
}

#[test]
fn test_short_series_is_degenerate_not_error() {
    let data = weekday_weekend(13, 10.0, 2.0);
    let result = analyze_seasonality(&data);

    assert_eq!(result.seasonality_type, SeasonalityType::None);
    assert_eq!(result.strength, 0.0);
    assert_eq!(result.period_length, 0);
    assert!(result.pattern.is_empty());
}

#[test]
fn test_flat_series_has_no_pattern() {
    let data = weekday_weekend(28, 5.0, 5.0);
    let result = analyze_seasonality(&data);

    assert_eq!(result.seasonality_type, SeasonalityType::None);
    assert_eq!(result.period_length, 0);
}

#[test]
fn test_monthly_pattern_wins_over_flat_weeks() {
    // Constant within each month, January high and February low
    let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    let data: Vec<SeriesPoint> = (0..60)
        .map(|i| {
            let date = start + Duration::days(i);
            let value = if date.month() == 1 { 30.0 } else { 5.0 };
            SeriesPoint::new(start_of_day(date), value)
        })
        .collect();

    let result = analyze_seasonality(&data);

    assert_eq!(result.seasonality_type, SeasonalityType::Monthly);
    assert_eq!(result.period_length, 30);
    assert_abs_diff_eq!(result.pattern["jan"], 30.0, epsilon = 1e-9);
    assert_abs_diff_eq!(result.pattern["feb"], 5.0, epsilon = 1e-9);
}

#[test]
fn test_weekly_pattern_omits_empty_days() {
    let data = weekday_weekend(3, 1.0, 1.0);
    let pattern = weekly_pattern(&data);

    assert_eq!(pattern.len(), 3);
    assert!(pattern.contains_key("mon"));
    assert!(!pattern.contains_key("sun"));
}

#[test]
fn test_seasonality_serializes_type_field() {
    let result = analyze_seasonality(&weekday_weekend(14, 10.0, 2.0));
    let json = serde_json::to_value(&result).unwrap();

    assert_eq!(json["type"], "weekly");
    assert_eq!(json["periodLength"], 7);
}
