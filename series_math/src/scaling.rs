//! Min-max scaling

/// Scale values into `[0, 1]`.
///
/// A flat series has no range to scale against; every output is `0.5` then.
pub fn min_max_scale(values: &[f64]) -> Vec<f64> {
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    if max == min {
        return vec![0.5; values.len()];
    }

    let range = max - min;
    values.iter().map(|v| (v - min) / range).collect()
}
