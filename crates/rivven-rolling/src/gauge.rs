//! Rolling gauge over a time-bucketed window
//!
//! Tracks non-negative magnitudes such as latencies or queue depth. `add`
//! accumulates per bucket like the counter does; `set` keeps only the last
//! observation of each bucket.

use crate::clock::{Clock, SystemClock};
use crate::config::TimingGaugeOpts;
use crate::error::Result;
use crate::metric::{check_non_negative, Aggregation, Metric, WindowSnapshot};
use crate::policy::TimingPolicy;
use crate::reduce::{self, Reduction};
use crate::window::{Window, WindowIter};

/// Gauge whose window advances with wall-clock time
#[derive(Debug)]
pub struct TimingGauge<C: Clock = SystemClock> {
    policy: TimingPolicy<C>,
}

impl TimingGauge<SystemClock> {
    pub fn new(opts: TimingGaugeOpts) -> Result<Self> {
        Self::with_clock(opts, SystemClock)
    }
}

impl<C: Clock> TimingGauge<C> {
    pub fn with_clock(opts: TimingGaugeOpts, clock: C) -> Result<Self> {
        let window = Window::new(opts.window_opts())?;
        let policy = TimingPolicy::with_clock(window, opts.policy_opts(), clock)?;
        Ok(Self { policy })
    }

    /// Replace the current bucket's value with `value`.
    pub fn set(&self, value: i64) -> Result<()> {
        let value = check_non_negative("gauge", value)?;
        self.policy.append(value);
        Ok(())
    }

    /// Applies the reduction function to all buckets within the window.
    pub fn reduce<F>(&self, f: F) -> f64
    where
        F: FnOnce(WindowIter<'_>) -> f64,
    {
        self.policy.reduce(f)
    }

    pub fn count(&self) -> u64 {
        self.policy.reduce_with(Reduction::Count) as u64
    }

    pub fn snapshot(&self) -> WindowSnapshot {
        self.policy.snapshot()
    }

    pub fn policy(&self) -> &TimingPolicy<C> {
        &self.policy
    }
}

impl<C: Clock> Metric for TimingGauge<C> {
    fn add(&self, value: i64) -> Result<()> {
        let value = check_non_negative("gauge", value)?;
        self.policy.add(value);
        Ok(())
    }

    fn value(&self) -> i64 {
        self.sum() as i64
    }
}

impl<C: Clock> Aggregation for TimingGauge<C> {
    fn min(&self) -> f64 {
        self.policy.reduce(reduce::min)
    }

    fn max(&self) -> f64 {
        self.policy.reduce(reduce::max)
    }

    fn avg(&self) -> f64 {
        self.policy.reduce(reduce::avg)
    }

    fn sum(&self) -> f64 {
        self.policy.reduce(reduce::sum)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::error::Error;
    use std::sync::Arc;
    use std::time::Duration;

    const BUCKET: Duration = Duration::from_millis(5);

    fn gauge(size: usize) -> (TimingGauge<Arc<ManualClock>>, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::new());
        let opts = TimingGaugeOpts::new()
            .with_size(size)
            .with_bucket_duration(BUCKET);
        let gauge = TimingGauge::with_clock(opts, Arc::clone(&clock)).unwrap();
        (gauge, clock)
    }

    #[test]
    fn test_add_accumulates_like_counter() {
        let (gauge, _clock) = gauge(3);
        gauge.add(5).unwrap();
        gauge.add(7).unwrap();
        assert_eq!(gauge.sum(), 12.0);
        assert_eq!(gauge.avg(), 4.0);
        assert_eq!(gauge.value(), 12);
    }

    #[test]
    fn test_set_keeps_last_value_per_bucket() {
        let (gauge, clock) = gauge(3);
        gauge.set(40).unwrap();
        gauge.set(25).unwrap();
        clock.advance(BUCKET);
        gauge.set(30).unwrap();

        assert_eq!(gauge.sum(), 55.0);
        assert_eq!(gauge.min(), 25.0);
        assert_eq!(gauge.max(), 30.0);
        assert_eq!(gauge.count(), 3);
    }

    #[test]
    fn test_negative_values_are_rejected() {
        let (gauge, _clock) = gauge(3);
        gauge.set(8).unwrap();

        assert_eq!(gauge.add(-1), Err(Error::NegativeValue(-1)));
        assert_eq!(gauge.set(-2), Err(Error::NegativeValue(-2)));
        assert_eq!(gauge.sum(), 8.0);
        assert_eq!(gauge.count(), 1);
    }

    #[test]
    fn test_min_ignores_unwritten_buckets() {
        let (gauge, clock) = gauge(4);
        gauge.add(9).unwrap();
        clock.advance(BUCKET * 2);
        gauge.add(6).unwrap();

        // two of the four buckets were never written; they do not pull min to 0
        assert_eq!(gauge.min(), 6.0);
        assert_eq!(gauge.max(), 9.0);
        // but they do dilute the average
        assert_eq!(gauge.avg(), 15.0 / 4.0);
    }

    #[test]
    fn test_gauges_do_not_share_windows() {
        let clock = Arc::new(ManualClock::new());
        let opts = TimingGaugeOpts::new().with_size(2).with_bucket_duration(BUCKET);
        let a = TimingGauge::with_clock(opts, Arc::clone(&clock)).unwrap();
        let b = TimingGauge::with_clock(opts, Arc::clone(&clock)).unwrap();

        a.add(1).unwrap();
        assert_eq!(a.value(), 1);
        assert_eq!(b.value(), 0);
        assert!(!b.policy().epoch_started());
    }
}
