//! Time-driven bucket addressing
//!
//! A [`TimingPolicy`] turns elapsed time into a bucket offset and guards its
//! [`Window`] with a single reader/writer lock:
//!
//! - writes (`append`, `add`) take the lock exclusively
//! - reductions share it, and never mutate the window
//!
//! The epoch is recorded by the first write, so a policy that is never
//! written to never starts ticking. Offsets grow without bound; wraparound
//! and stale-bucket handling belong to the window.

use crate::clock::{Clock, SystemClock};
use crate::config::TimingPolicyOpts;
use crate::error::Result;
use crate::metric::WindowSnapshot;
use crate::reduce::Reduction;
use crate::window::{Window, WindowIter};
use parking_lot::RwLock;
use std::time::{Duration, Instant};
use tracing::{debug, trace};

#[derive(Debug)]
struct PolicyState {
    window: Window,
    epoch: Option<Instant>,
}

/// Rolling window that advances one bucket every `bucket_duration`
#[derive(Debug)]
pub struct TimingPolicy<C: Clock = SystemClock> {
    state: RwLock<PolicyState>,
    size: usize,
    bucket_duration: Duration,
    clock: C,
}

impl TimingPolicy<SystemClock> {
    pub fn new(window: Window, opts: TimingPolicyOpts) -> Result<Self> {
        Self::with_clock(window, opts, SystemClock)
    }
}

impl<C: Clock> TimingPolicy<C> {
    /// Create a policy that reads time from `clock`
    pub fn with_clock(window: Window, opts: TimingPolicyOpts, clock: C) -> Result<Self> {
        opts.validate()?;
        let size = window.size();
        debug!(
            size,
            bucket_duration = ?opts.bucket_duration,
            "Created timing policy"
        );
        Ok(Self {
            state: RwLock::new(PolicyState {
                window,
                epoch: None,
            }),
            size,
            bucket_duration: opts.bucket_duration,
            clock,
        })
    }

    /// Number of buckets in the window
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn bucket_duration(&self) -> Duration {
        self.bucket_duration
    }

    /// Whether the first write has happened
    pub fn epoch_started(&self) -> bool {
        self.state.read().epoch.is_some()
    }

    /// Offset of the bucket a write would land in right now
    pub fn current_offset(&self) -> Option<u64> {
        let state = self.state.read();
        state.epoch.map(|epoch| self.offset_since(epoch))
    }

    /// Overwrite the current bucket with `value`
    pub fn append(&self, value: f64) {
        self.write(Window::append, value);
    }

    /// Add `value` to the current bucket
    pub fn add(&self, value: f64) {
        self.write(Window::add, value);
    }

    /// Applies the reduction function to all buckets within the window.
    pub fn reduce<F>(&self, f: F) -> f64
    where
        F: FnOnce(WindowIter<'_>) -> f64,
    {
        let state = self.state.read();
        let head = state.epoch.map(|epoch| self.offset_since(epoch));
        f(state.window.iter(head, 0, self.size))
    }

    pub fn reduce_with(&self, reduction: Reduction) -> f64 {
        self.reduce(|iter| reduction.apply(iter))
    }

    /// Reads several reductions under one lock acquisition.
    pub fn reduce_many<const N: usize>(&self, reductions: [Reduction; N]) -> [f64; N] {
        let state = self.state.read();
        let head = state.epoch.map(|epoch| self.offset_since(epoch));
        reductions.map(|reduction| reduction.apply(state.window.iter(head, 0, self.size)))
    }

    /// Sum, average, extremes and observation count from one consistent read
    pub fn snapshot(&self) -> WindowSnapshot {
        let [sum, avg, min, max, count] = self.reduce_many([
            Reduction::Sum,
            Reduction::Avg,
            Reduction::Min,
            Reduction::Max,
            Reduction::Count,
        ]);
        WindowSnapshot {
            sum,
            avg,
            min,
            max,
            count: count as u64,
        }
    }

    fn write(&self, f: fn(&mut Window, u64, f64), value: f64) {
        let mut state = self.state.write();
        let epoch = *state.epoch.get_or_insert_with(|| {
            debug!(size = self.size, "Timing policy epoch started");
            self.clock.now()
        });
        let offset = self.offset_since(epoch);
        trace!(offset, value, "Recording value");
        f(&mut state.window, offset, value);
    }

    fn offset_since(&self, epoch: Instant) -> u64 {
        let elapsed = self.clock.now().saturating_duration_since(epoch);
        let offset = elapsed.as_nanos() / self.bucket_duration.as_nanos();
        u64::try_from(offset).unwrap_or(u64::MAX)
    }
}
