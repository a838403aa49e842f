//! Population statistics shared by every layer of the engine.

use statrs::statistics::Statistics;

/// Arithmetic mean, `NaN` for an empty slice.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    values.iter().mean()
}

/// Population standard deviation (divides by `n`, not `n - 1`).
///
/// Returns `0.0` for an empty slice so callers comparing against a threshold
/// never see `NaN`.
pub fn population_std_dev(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().population_std_dev()
}

/// Coefficient of variation (std-dev / mean). `None` when the mean is zero.
pub fn coefficient_of_variation(values: &[f64]) -> Option<f64> {
    let avg = mean(values);
    if values.is_empty() || avg == 0.0 {
        return None;
    }
    Some(population_std_dev(values) / avg)
}
