//! Series utilities: calendar aggregation, gap filling, trailing windows and
//! normalization. Every function sorts a private copy of its input first.

use crate::data::{sorted_copy, start_of_day, SeriesPoint};
use crate::error::{ForecastError, Result};
use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use series_math::{mean, min_max_scale, trailing_means, trailing_std_devs};
use std::collections::BTreeMap;

/// Calendar bucket used for aggregation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    Day,
    Week,
    Month,
    Quarter,
}

impl Period {
    /// First calendar day of the bucket containing `date`.
    ///
    /// Weeks start on Monday; months and quarters on their first day.
    pub fn bucket_start(&self, date: NaiveDate) -> NaiveDate {
        match self {
            Period::Day => date,
            Period::Week => date - Duration::days(date.weekday().num_days_from_monday() as i64),
            Period::Month => date - Duration::days(date.day0() as i64),
            Period::Quarter => {
                let month_start = date - Duration::days(date.day0() as i64);
                let quarter_month = (date.month0() / 3) * 3 + 1;
                NaiveDate::from_ymd_opt(date.year(), quarter_month, 1).unwrap_or(month_start)
            }
        }
    }
}

/// A point together with a statistic of its trailing window
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WindowedPoint {
    pub timestamp: DateTime<Utc>,
    pub value: f64,
    /// Mean or standard deviation of the trailing window ending at this point
    pub window_value: f64,
}

/// Bucket points by calendar period and emit one `(bucket start, mean)` point
/// per non-empty bucket, oldest first.
pub fn aggregate(data: &[SeriesPoint], period: Period) -> Vec<SeriesPoint> {
    let mut buckets: BTreeMap<NaiveDate, Vec<f64>> = BTreeMap::new();

    for point in data {
        let key = period.bucket_start(point.timestamp.date_naive());
        buckets.entry(key).or_default().push(point.value);
    }

    buckets
        .into_iter()
        .map(|(start, values)| SeriesPoint::new(start_of_day(start), mean(&values)))
        .collect()
}

pub fn aggregate_by_day(data: &[SeriesPoint]) -> Vec<SeriesPoint> {
    aggregate(data, Period::Day)
}

pub fn aggregate_by_week(data: &[SeriesPoint]) -> Vec<SeriesPoint> {
    aggregate(data, Period::Week)
}

pub fn aggregate_by_month(data: &[SeriesPoint]) -> Vec<SeriesPoint> {
    aggregate(data, Period::Month)
}

pub fn aggregate_by_quarter(data: &[SeriesPoint]) -> Vec<SeriesPoint> {
    aggregate(data, Period::Quarter)
}

/// One point per calendar day in `[start, end]`.
///
/// Days present in `data` carry their daily mean, absent days get
/// `default_value`. Nothing is interpolated.
pub fn fill_missing_dates(
    data: &[SeriesPoint],
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    default_value: f64,
) -> Result<Vec<SeriesPoint>> {
    let first_day = start.date_naive();
    let last_day = end.date_naive();
    if first_day > last_day {
        return Err(ForecastError::InvalidParameter(format!(
            "start ({}) is after end ({})",
            first_day, last_day
        )));
    }

    let daily: BTreeMap<NaiveDate, f64> = aggregate_by_day(data)
        .into_iter()
        .map(|p| (p.timestamp.date_naive(), p.value))
        .collect();

    let mut filled = Vec::with_capacity((last_day - first_day).num_days() as usize + 1);
    let mut day = first_day;
    while day <= last_day {
        let value = daily.get(&day).copied().unwrap_or(default_value);
        filled.push(SeriesPoint::new(start_of_day(day), value));
        day = day + Duration::days(1);
    }

    Ok(filled)
}

fn validate_window(window_size: usize) -> Result<()> {
    if window_size == 0 {
        return Err(ForecastError::InvalidParameter(
            "window size must be at least 1".to_string(),
        ));
    }
    Ok(())
}

fn windowed(
    data: &[SeriesPoint],
    window_size: usize,
    kernel: fn(&[f64], usize) -> series_math::Result<Vec<f64>>,
) -> Result<Vec<WindowedPoint>> {
    validate_window(window_size)?;
    let sorted = sorted_copy(data);
    let values: Vec<f64> = sorted.iter().map(|p| p.value).collect();
    let stats = kernel(&values, window_size)?;

    Ok(sorted
        .iter()
        .zip(stats)
        .map(|(p, window_value)| WindowedPoint {
            timestamp: p.timestamp,
            value: p.value,
            window_value,
        })
        .collect())
}

/// Trailing partial-window mean alongside each point
pub fn moving_average(data: &[SeriesPoint], window_size: usize) -> Result<Vec<WindowedPoint>> {
    windowed(data, window_size, trailing_means)
}

/// Trailing partial-window population standard deviation alongside each point
pub fn standard_deviation(
    data: &[SeriesPoint],
    window_size: usize,
) -> Result<Vec<WindowedPoint>> {
    windowed(data, window_size, trailing_std_devs)
}

/// Min-max scale values to `[0, 1]`; a flat series maps to `0.5` everywhere.
pub fn normalize(data: &[SeriesPoint]) -> Vec<SeriesPoint> {
    let sorted = sorted_copy(data);
    let values: Vec<f64> = sorted.iter().map(|p| p.value).collect();

    sorted
        .iter()
        .zip(min_max_scale(&values))
        .map(|(p, scaled)| SeriesPoint::new(p.timestamp, scaled))
        .collect()
}
