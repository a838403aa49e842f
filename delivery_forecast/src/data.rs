//! Time series data handling
//!
//! A series is an ordered collection of `(timestamp, value)` points handed over
//! by the metrics-collection layer. Every analysis works on a private copy
//! sorted ascending by timestamp; caller data is never reordered in place.

use crate::error::{ForecastError, Result};
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::Path;

const MILLIS_PER_DAY: f64 = 86_400_000.0;

/// A single observation of a delivery metric
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    pub timestamp: DateTime<Utc>,
    pub value: f64,
}

impl SeriesPoint {
    pub fn new(timestamp: DateTime<Utc>, value: f64) -> Self {
        Self { timestamp, value }
    }
}

/// Owned, timestamp-sorted time series
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TimeSeriesData {
    points: Vec<SeriesPoint>,
}

impl TimeSeriesData {
    /// Create a new TimeSeriesData from dates and values
    pub fn new(dates: Vec<DateTime<Utc>>, values: Vec<f64>) -> Result<Self> {
        if dates.len() != values.len() {
            return Err(ForecastError::DataError(format!(
                "Dates length ({}) doesn't match values length ({})",
                dates.len(),
                values.len()
            )));
        }

        let points = dates
            .into_iter()
            .zip(values)
            .map(|(timestamp, value)| SeriesPoint { timestamp, value })
            .collect();

        Ok(Self::from_points(points))
    }

    /// Wrap existing points, sorting them by timestamp
    pub fn from_points(points: Vec<SeriesPoint>) -> Self {
        Self {
            points: sort_points(points),
        }
    }

    /// Get the points, oldest first
    pub fn points(&self) -> &[SeriesPoint] {
        &self.points
    }

    /// Get the values as a vector
    pub fn values(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.value).collect()
    }

    /// Get the timestamps as a vector
    pub fn timestamps(&self) -> Vec<DateTime<Utc>> {
        self.points.iter().map(|p| p.timestamp).collect()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Consume the container and return the sorted points
    pub fn into_points(self) -> Vec<SeriesPoint> {
        self.points
    }
}

impl From<Vec<SeriesPoint>> for TimeSeriesData {
    fn from(points: Vec<SeriesPoint>) -> Self {
        Self::from_points(points)
    }
}

/// Ascending sort by timestamp, then by value for points sharing a timestamp.
///
/// The order is total, so the result never depends on the input order.
pub fn sort_points(mut points: Vec<SeriesPoint>) -> Vec<SeriesPoint> {
    points.sort_by(|a, b| {
        a.timestamp
            .cmp(&b.timestamp)
            .then(a.value.total_cmp(&b.value))
    });
    points
}

/// Sorted private copy of borrowed points
pub fn sorted_copy(points: &[SeriesPoint]) -> Vec<SeriesPoint> {
    sort_points(points.to_vec())
}

/// Fractional days elapsed from `origin` to `timestamp`
pub fn elapsed_days(origin: DateTime<Utc>, timestamp: DateTime<Utc>) -> f64 {
    (timestamp - origin).num_milliseconds() as f64 / MILLIS_PER_DAY
}

/// Midnight UTC of a calendar date
pub fn start_of_day(date: NaiveDate) -> DateTime<Utc> {
    DateTime::<Utc>::from_naive_utc_and_offset(
        NaiveDateTime::new(date, NaiveTime::default()),
        Utc,
    )
}

/// Parse an RFC 3339 timestamp, a naive `YYYY-MM-DDTHH:MM:SS` datetime or a
/// plain `YYYY-MM-DD` date (midnight UTC).
pub fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>> {
    let raw = raw.trim();

    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Ok(ts.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S") {
        return Ok(DateTime::<Utc>::from_naive_utc_and_offset(naive, Utc));
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Ok(start_of_day(date));
    }

    Err(ForecastError::DataError(format!(
        "Unrecognised timestamp: {:?}",
        raw
    )))
}

#[derive(Debug, Deserialize)]
struct CsvRow {
    timestamp: String,
    value: f64,
}

/// Data loader for `timestamp,value` CSV exports of the metrics store
#[derive(Debug)]
pub struct DataLoader;

impl DataLoader {
    /// Load time series data from a CSV file
    pub fn from_csv<P: AsRef<Path>>(path: P) -> Result<TimeSeriesData> {
        let file = File::open(path)?;
        Self::from_reader(file)
    }

    /// Load time series data from any reader producing CSV with a header row
    pub fn from_reader<R: Read>(reader: R) -> Result<TimeSeriesData> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut points = Vec::new();
        for row in csv_reader.deserialize::<CsvRow>() {
            let row = row?;
            points.push(SeriesPoint {
                timestamp: parse_timestamp(&row.timestamp)?,
                value: row.value,
            });
        }

        log::debug!("loaded {} points from csv", points.len());
        Ok(TimeSeriesData::from_points(points))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_sorted_copy_leaves_input_untouched() {
        let later = SeriesPoint::new(Utc.with_ymd_and_hms(2024, 3, 2, 0, 0, 0).unwrap(), 2.0);
        let earlier = SeriesPoint::new(Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap(), 1.0);
        let input = vec![later, earlier];

        let sorted = sorted_copy(&input);
        assert_eq!(sorted, vec![earlier, later]);
        assert_eq!(input[0], later);
    }

    #[test]
    fn test_shared_timestamps_sort_by_value() {
        let day = Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap();
        let next = Utc.with_ymd_and_hms(2024, 3, 2, 0, 0, 0).unwrap();
        let high = SeriesPoint::new(day, 9.0);
        let low = SeriesPoint::new(day, -2.0);
        let after = SeriesPoint::new(next, 0.0);

        let expected = vec![low, high, after];
        assert_eq!(sort_points(vec![after, high, low]), expected);
        assert_eq!(sort_points(vec![low, after, high]), expected);
    }

    #[test]
    fn test_elapsed_days_is_fractional() {
        let origin = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let noon = Utc.with_ymd_and_hms(2024, 1, 3, 12, 0, 0).unwrap();
        assert_eq!(elapsed_days(origin, noon), 2.5);
    }

    #[test]
    fn test_parse_timestamp_formats() {
        let expected = Utc.with_ymd_and_hms(2023, 1, 15, 0, 0, 0).unwrap();
        assert_eq!(parse_timestamp("2023-01-15").unwrap(), expected);
        assert_eq!(parse_timestamp("2023-01-15T00:00:00Z").unwrap(), expected);
        assert_eq!(parse_timestamp("2023-01-15T00:00:00").unwrap(), expected);
        assert!(parse_timestamp("not-a-date").is_err());
    }

    #[test]
    fn test_new_rejects_mismatched_lengths() {
        let dates = vec![Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()];
        assert!(TimeSeriesData::new(dates, vec![1.0, 2.0]).is_err());
    }
}
