//! Trailing moving averages
//!
//! The window for point `i` is `values[max(0, i - period + 1)..=i]`. Near the
//! start of a series the window is simply shorter, so every point gets a value.

use crate::statistics::mean;
use crate::{MathError, Result};
use std::collections::VecDeque;

/// Trailing Simple Moving Average with partial warm-up windows
#[derive(Debug, Clone)]
pub struct TrailingMovingAverage {
    period: usize,
    values: VecDeque<f64>,
}

impl TrailingMovingAverage {
    /// Create a new trailing moving average with the specified period
    pub fn new(period: usize) -> Result<Self> {
        if period == 0 {
            return Err(MathError::InvalidInput(
                "Period must be greater than zero".to_string(),
            ));
        }

        Ok(Self {
            period,
            values: VecDeque::with_capacity(period),
        })
    }

    /// Push a new value, evicting the oldest one once the window is full
    pub fn update(&mut self, value: f64) {
        self.values.push_back(value);
        if self.values.len() > self.period {
            self.values.pop_front();
        }
    }

    /// Mean of the current (possibly partial) window
    pub fn value(&self) -> Result<f64> {
        if self.values.is_empty() {
            return Err(MathError::InsufficientData(
                "No values pushed into the moving average yet".to_string(),
            ));
        }

        // Summed from scratch so a one-point window reproduces its input exactly.
        let (front, back) = self.values.as_slices();
        let total: f64 = front.iter().chain(back.iter()).sum();
        Ok(total / self.values.len() as f64)
    }

    /// Values currently inside the window, oldest first
    pub fn window(&self) -> Vec<f64> {
        self.values.iter().copied().collect()
    }

    /// Get the current period
    pub fn period(&self) -> usize {
        self.period
    }
}

/// Trailing partial-window mean for every value in `values`.
pub fn trailing_means(values: &[f64], period: usize) -> Result<Vec<f64>> {
    let mut sma = TrailingMovingAverage::new(period)?;
    let mut out = Vec::with_capacity(values.len());

    for &value in values {
        sma.update(value);
        out.push(sma.value()?);
    }

    Ok(out)
}

/// Mean of the last `period` values (or all of them when shorter).
pub fn tail_mean(values: &[f64], period: usize) -> Result<f64> {
    if period == 0 {
        return Err(MathError::InvalidInput(
            "Period must be greater than zero".to_string(),
        ));
    }
    if values.is_empty() {
        return Err(MathError::InsufficientData(
            "Cannot average an empty series".to_string(),
        ));
    }

    let start = values.len().saturating_sub(period);
    Ok(mean(&values[start..]))
}
