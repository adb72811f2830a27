//! Time-bucketed rolling statistics for Rivven
//!
//! A rolling statistic tracks recent non-negative observations over a
//! trailing window of `size` buckets, each `bucket_duration` long. Writes go
//! to the bucket addressed by the time elapsed since the first write;
//! reductions (sum, avg, min, max, or any closure over the buckets) only see
//! data still inside the window. Nothing runs in the background: buckets age
//! lazily when the next write or read touches them.
//!
//! # Usage
//!
//! ```rust,ignore
//! use rivven_rolling::{Aggregation, Metric, TimingCounter, TimingCounterOpts};
//! use std::time::Duration;
//!
//! let latency = TimingCounter::new(
//!     TimingCounterOpts::new()
//!         .with_size(10)
//!         .with_bucket_duration(Duration::from_millis(100)),
//! )?;
//!
//! latency.add(42)?;
//! let recent_avg = latency.avg();
//! ```

pub mod clock;
pub mod config;
pub mod counter;
pub mod error;
pub mod gauge;
pub mod metric;
pub mod metrics;
pub mod policy;
pub mod reduce;
pub mod serde_utils;
pub mod window;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{TimingCounterOpts, TimingGaugeOpts, TimingOpts, TimingPolicyOpts, WindowOpts};
pub use counter::TimingCounter;
pub use error::{Error, Result};
pub use gauge::TimingGauge;
pub use metric::{Aggregation, Metric, WindowSnapshot};
pub use metrics::RollingMetrics;
pub use policy::TimingPolicy;
pub use reduce::Reduction;
pub use window::{Bucket, Window, WindowIter};
