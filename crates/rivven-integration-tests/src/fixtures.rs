//! Test fixtures for integration tests
//!
//! Counters and gauges on the system clock with bucket durations picked for
//! the two kinds of test in this crate:
//! - fast buckets that age out within a few milliseconds
//! - stable buckets that never rotate during a test

use anyhow::Result;
use rivven_rolling::{TimingCounter, TimingGauge, TimingOpts};
use std::time::Duration;

/// Bucket short enough to watch a window rotate
pub const FAST_BUCKET: Duration = Duration::from_millis(10);

/// Bucket long enough that nothing ages out while a test runs
pub const STABLE_BUCKET: Duration = Duration::from_secs(3600);

pub fn opts(size: usize, bucket_duration: Duration) -> TimingOpts {
    TimingOpts::new()
        .with_size(size)
        .with_bucket_duration(bucket_duration)
}

/// Counter whose buckets rotate every [`FAST_BUCKET`]
pub fn fast_counter(size: usize) -> Result<TimingCounter> {
    Ok(TimingCounter::new(opts(size, FAST_BUCKET))?)
}

/// Gauge whose buckets rotate every [`FAST_BUCKET`]
pub fn fast_gauge(size: usize) -> Result<TimingGauge> {
    Ok(TimingGauge::new(opts(size, FAST_BUCKET))?)
}

/// Counter that keeps every write in its first bucket
pub fn stable_counter(size: usize) -> Result<TimingCounter> {
    Ok(TimingCounter::new(opts(size, STABLE_BUCKET))?)
}

/// Gauge that keeps every write in its first bucket
pub fn stable_gauge(size: usize) -> Result<TimingGauge> {
    Ok(TimingGauge::new(opts(size, STABLE_BUCKET))?)
}
