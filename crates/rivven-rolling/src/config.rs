use crate::error::{Error, Result};
use crate::serde_utils::duration_micros;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Options for a timing counter or gauge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimingOpts {
    /// Number of buckets in the window
    pub size: usize,

    /// Time span covered by a single bucket
    #[serde(with = "duration_micros")]
    pub bucket_duration: Duration,
}

/// Options for creating a `TimingCounter`
pub type TimingCounterOpts = TimingOpts;

/// Options for creating a `TimingGauge`
pub type TimingGaugeOpts = TimingOpts;

impl Default for TimingOpts {
    fn default() -> Self {
        Self {
            size: 10,
            bucket_duration: Duration::from_millis(100),
        }
    }
}

impl TimingOpts {
    /// Create options with the default window (10 x 100ms)
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of buckets
    pub fn with_size(mut self, size: usize) -> Self {
        self.size = size;
        self
    }

    /// Set the bucket duration
    pub fn with_bucket_duration(mut self, bucket_duration: Duration) -> Self {
        self.bucket_duration = bucket_duration;
        self
    }

    /// Total time span covered by the window
    pub fn window_duration(&self) -> Duration {
        self.bucket_duration
            .saturating_mul(u32::try_from(self.size).unwrap_or(u32::MAX))
    }

    pub fn validate(&self) -> Result<()> {
        self.window_opts().validate()?;
        self.policy_opts().validate()
    }

    pub fn window_opts(&self) -> WindowOpts {
        WindowOpts { size: self.size }
    }

    pub fn policy_opts(&self) -> TimingPolicyOpts {
        TimingPolicyOpts {
            bucket_duration: self.bucket_duration,
        }
    }
}

/// Options for creating a `Window`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowOpts {
    pub size: usize,
}

impl WindowOpts {
    pub fn validate(&self) -> Result<()> {
        if self.size == 0 {
            return Err(Error::InvalidWindowSize(self.size));
        }
        Ok(())
    }
}

/// Options for creating a `TimingPolicy`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimingPolicyOpts {
    #[serde(with = "duration_micros")]
    pub bucket_duration: Duration,
}

impl TimingPolicyOpts {
    pub fn validate(&self) -> Result<()> {
        if self.bucket_duration.is_zero() {
            return Err(Error::InvalidBucketDuration(self.bucket_duration));
        }
        Ok(())
    }
}
