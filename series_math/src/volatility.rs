//! Trailing standard deviation
//!
//! Same window rule as [`crate::moving_averages`]; each window's deviation is
//! the population one.

use crate::moving_averages::TrailingMovingAverage;
use crate::statistics::population_std_dev;
use crate::Result;

/// Rolling population standard deviation over a trailing partial window
#[derive(Debug, Clone)]
pub struct TrailingStdDev {
    window: TrailingMovingAverage,
}

impl TrailingStdDev {
    /// Create a new trailing standard deviation with the specified period
    pub fn new(period: usize) -> Result<Self> {
        Ok(Self {
            window: TrailingMovingAverage::new(period)?,
        })
    }

    /// Push a new value into the window
    pub fn update(&mut self, value: f64) {
        self.window.update(value);
    }

    /// Population standard deviation of the current window
    pub fn value(&self) -> Result<f64> {
        // Surfaces the empty-window error from the underlying average.
        self.window.value()?;
        Ok(population_std_dev(&self.window.window()))
    }

    /// Get the current period
    pub fn period(&self) -> usize {
        self.window.period()
    }
}

/// Trailing partial-window population standard deviation for every value.
pub fn trailing_std_devs(values: &[f64], period: usize) -> Result<Vec<f64>> {
    let mut rolling = TrailingStdDev::new(period)?;
    let mut out = Vec::with_capacity(values.len());

    for &value in values {
        rolling.update(value);
        out.push(rolling.value()?);
    }

    Ok(out)
}
