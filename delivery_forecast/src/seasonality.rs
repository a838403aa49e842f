//! Weekly and monthly pattern detection

use crate::data::{sorted_copy, SeriesPoint};
use serde::{Deserialize, Serialize};
use series_math::{coefficient_of_variation, mean};
use std::collections::BTreeMap;

/// Below this many points no pattern is computed
pub const MIN_SEASONALITY_POINTS: usize = 14;
/// From this many points a monthly pattern is computed as well
pub const MIN_MONTHLY_POINTS: usize = 60;
/// Strength a pattern must exceed to be reported
const STRENGTH_THRESHOLD: f64 = 0.3;

const WEEKDAY_KEYS: [&str; 7] = ["mon", "tue", "wed", "thu", "fri", "sat", "sun"];
const MONTH_KEYS: [&str; 12] = [
    "jan", "feb", "mar", "apr", "may", "jun", "jul", "aug", "sep", "oct", "nov", "dec",
];

/// Kind of periodic pattern.
///
/// `Quarterly` and `Yearly` are valid values but the selection rule only ever
/// reports `Weekly`, `Monthly` or `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeasonalityType {
    Weekly,
    Monthly,
    Quarterly,
    Yearly,
    None,
}

/// Result of [`analyze_seasonality`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeasonalityResult {
    #[serde(rename = "type")]
    pub seasonality_type: SeasonalityType,
    /// Coefficient of variation of the bucket means, clamped to `[0, 1]`
    pub strength: f64,
    /// Days per cycle, 0 when no pattern was found
    pub period_length: u32,
    /// Bucket key (`"mon"`, `"jan"`, ...) to mean value
    pub pattern: BTreeMap<String, f64>,
}

impl SeasonalityResult {
    fn none() -> Self {
        Self {
            seasonality_type: SeasonalityType::None,
            strength: 0.0,
            period_length: 0,
            pattern: BTreeMap::new(),
        }
    }
}

/// Mean value per bucket; buckets without points are left out.
fn bucket_means<const N: usize>(
    data: &[SeriesPoint],
    keys: &[&str; N],
    bucket_of: impl Fn(&SeriesPoint) -> usize,
) -> BTreeMap<String, f64> {
    let mut buckets: Vec<Vec<f64>> = vec![Vec::new(); N];
    for point in data {
        buckets[bucket_of(point)].push(point.value);
    }

    buckets
        .iter()
        .enumerate()
        .filter(|(_, values)| !values.is_empty())
        .map(|(i, values)| (keys[i].to_string(), mean(values)))
        .collect()
}

/// Strength of a pattern: coefficient of variation over the positive bucket means.
pub fn pattern_strength(pattern: &BTreeMap<String, f64>) -> f64 {
    let positive: Vec<f64> = pattern.values().copied().filter(|&v| v > 0.0).collect();
    coefficient_of_variation(&positive)
        .map(|cv| cv.clamp(0.0, 1.0))
        .unwrap_or(0.0)
}

/// Day-of-week pattern (`"mon"` .. `"sun"`)
pub fn weekly_pattern(data: &[SeriesPoint]) -> BTreeMap<String, f64> {
    use chrono::Datelike;
    bucket_means(data, &WEEKDAY_KEYS, |p| {
        p.timestamp.weekday().num_days_from_monday() as usize
    })
}

/// Month-of-year pattern (`"jan"` .. `"dec"`)
pub fn monthly_pattern(data: &[SeriesPoint]) -> BTreeMap<String, f64> {
    use chrono::Datelike;
    bucket_means(data, &MONTH_KEYS, |p| p.timestamp.month0() as usize)
}

/// Detect a weekly or monthly pattern.
///
/// Short series (fewer than 14 points) get the valid degenerate result
/// `{ type: none, strength: 0, periodLength: 0, pattern: {} }`.
pub fn analyze_seasonality(data: &[SeriesPoint]) -> SeasonalityResult {
    if data.len() < MIN_SEASONALITY_POINTS {
        log::warn!(
            "seasonality needs {} points, got {}; reporting none",
            MIN_SEASONALITY_POINTS,
            data.len()
        );
        return SeasonalityResult::none();
    }

    let sorted = sorted_copy(data);
    let weekly = weekly_pattern(&sorted);
    let weekly_strength = pattern_strength(&weekly);

    let (monthly, monthly_strength) = if sorted.len() >= MIN_MONTHLY_POINTS {
        let monthly = monthly_pattern(&sorted);
        let strength = pattern_strength(&monthly);
        (monthly, strength)
    } else {
        (BTreeMap::new(), 0.0)
    };

    log::debug!(
        "seasonality strengths over {} points: weekly {:.3}, monthly {:.3}",
        sorted.len(),
        weekly_strength,
        monthly_strength
    );

    if weekly_strength > STRENGTH_THRESHOLD && weekly_strength >= monthly_strength {
        SeasonalityResult {
            seasonality_type: SeasonalityType::Weekly,
            strength: weekly_strength,
            period_length: 7,
            pattern: weekly,
        }
    } else if monthly_strength > STRENGTH_THRESHOLD {
        SeasonalityResult {
            seasonality_type: SeasonalityType::Monthly,
            strength: monthly_strength,
            period_length: 30,
            pattern: monthly,
        }
    } else {
        SeasonalityResult::none()
    }
}
