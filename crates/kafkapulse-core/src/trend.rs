//! Connection trend between the two newest records.

use serde::Serialize;

/// Percentage change in connections from `previous` to `current`.
///
/// A previous count of zero divides by 1 instead, so going from 0 to 100
/// reads as +10000%.
pub fn trend_percent(current: u64, previous: u64) -> f64 {
    let divisor = if previous == 0 { 1.0 } else { previous as f64 };
    (current as f64 - previous as f64) / divisor * 100.0
}

/// Round to one decimal place for display.
pub fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Derived trend statistic. Never stored; recompute on every window change.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ConnectionTrend {
    pub current: u64,
    pub previous: u64,
    /// Unrounded percentage change.
    pub percent: f64,
}

impl ConnectionTrend {
    pub fn between(current: u64, previous: u64) -> Self {
        Self {
            current,
            previous,
            percent: trend_percent(current, previous),
        }
    }

    /// Percentage rounded to one decimal place.
    pub fn display_percent(&self) -> f64 {
        round_one_decimal(self.percent)
    }

    pub fn is_rising(&self) -> bool {
        self.percent >= 0.0
    }
}
