use crate::error::{Error, Result};
use crate::metrics::RollingMetrics;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// A metric that accepts non-negative observations
pub trait Metric {
    /// Record `value` in the current bucket.
    ///
    /// Negative values are rejected with `Error::NegativeValue` and leave the
    /// window untouched.
    fn add(&self, value: i64) -> Result<()>;

    /// Window sum truncated to an integer
    fn value(&self) -> i64;
}

/// Windowed aggregates over a metric's live buckets
pub trait Aggregation {
    fn min(&self) -> f64;
    fn max(&self) -> f64;
    fn avg(&self) -> f64;
    fn sum(&self) -> f64;
}

/// Point-in-time view of a window, read under a single lock
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct WindowSnapshot {
    pub sum: f64,
    pub avg: f64,
    pub min: f64,
    pub max: f64,
    /// Number of observations still inside the window
    pub count: u64,
}

impl WindowSnapshot {
    pub fn value(&self) -> i64 {
        self.sum as i64
    }
}

/// Rejects negative observations before they reach a policy.
pub(crate) fn check_non_negative(kind: &'static str, value: i64) -> Result<f64> {
    if value < 0 {
        warn!(kind, value, "Rejected negative value");
        RollingMetrics::increment_rejected_values(kind);
        return Err(Error::NegativeValue(value));
    }
    Ok(value as f64)
}
