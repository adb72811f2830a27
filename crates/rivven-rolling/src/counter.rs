//! Rolling counter over a time-bucketed window
//!
//! Counts non-negative events (bytes sent, requests served, ...) per bucket
//! and reports totals over the trailing window.

use crate::clock::{Clock, SystemClock};
use crate::config::TimingCounterOpts;
use crate::error::Result;
use crate::metric::{check_non_negative, Aggregation, Metric, WindowSnapshot};
use crate::policy::TimingPolicy;
use crate::reduce::{self, Reduction};
use crate::window::{Window, WindowIter};

/// Counter whose window advances with wall-clock time
#[derive(Debug)]
pub struct TimingCounter<C: Clock = SystemClock> {
    policy: TimingPolicy<C>,
}

impl TimingCounter<SystemClock> {
    pub fn new(opts: TimingCounterOpts) -> Result<Self> {
        Self::with_clock(opts, SystemClock)
    }
}

impl<C: Clock> TimingCounter<C> {
    pub fn with_clock(opts: TimingCounterOpts, clock: C) -> Result<Self> {
        let window = Window::new(opts.window_opts())?;
        let policy = TimingPolicy::with_clock(window, opts.policy_opts(), clock)?;
        Ok(Self { policy })
    }

    /// Applies the reduction function to all buckets within the window.
    pub fn reduce<F>(&self, f: F) -> f64
    where
        F: FnOnce(WindowIter<'_>) -> f64,
    {
        self.policy.reduce(f)
    }

    /// Number of observations inside the window
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

impl<C: Clock> Metric for TimingCounter<C> {
    fn add(&self, value: i64) -> Result<()> {
        let value = check_non_negative("counter", value)?;
        self.policy.add(value);
        Ok(())
    }

    fn value(&self) -> i64 {
        self.sum() as i64
    }
}

impl<C: Clock> Aggregation for TimingCounter<C> {
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
