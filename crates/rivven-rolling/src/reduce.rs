//! Reductions over a window's buckets
//!
//! Each function consumes the iterator it is handed. Empty buckets count as
//! zero for [`sum`] and [`avg`], and are skipped by [`min`] and [`max`]; a
//! window with no populated bucket reduces to `0.0` either way.

use crate::window::WindowIter;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Built-in reduction strategies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Reduction {
    Sum,
    Avg,
    Min,
    Max,
    Count,
}

impl Reduction {
    pub fn apply(self, iter: WindowIter<'_>) -> f64 {
        match self {
            Reduction::Sum => sum(iter),
            Reduction::Avg => avg(iter),
            Reduction::Min => min(iter),
            Reduction::Max => max(iter),
            Reduction::Count => count(iter),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Reduction::Sum => "sum",
            Reduction::Avg => "avg",
            Reduction::Min => "min",
            Reduction::Max => "max",
            Reduction::Count => "count",
        }
    }
}

impl fmt::Display for Reduction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Total of all stored values.
pub fn sum(iter: WindowIter<'_>) -> f64 {
    iter.filter_map(|bucket| bucket.value()).sum()
}

/// Total divided by the number of buckets iterated, populated or not.
pub fn avg(iter: WindowIter<'_>) -> f64 {
    let buckets = iter.len();
    if buckets == 0 {
        return 0.0;
    }
    sum(iter) / buckets as f64
}

/// Smallest value among populated buckets.
pub fn min(iter: WindowIter<'_>) -> f64 {
    iter.filter_map(|bucket| bucket.value())
        .reduce(f64::min)
        .unwrap_or(0.0)
}

/// Largest value among populated buckets.
pub fn max(iter: WindowIter<'_>) -> f64 {
    iter.filter_map(|bucket| bucket.value())
        .reduce(f64::max)
        .unwrap_or(0.0)
}

/// Number of writes recorded in the window.
pub fn count(iter: WindowIter<'_>) -> f64 {
    iter.map(|bucket| bucket.count() as f64).sum()
}
