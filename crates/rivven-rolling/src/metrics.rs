//! Instrumentation for rolling windows
//!
//! Uses the `metrics` crate facade, so nothing is recorded until the host
//! installs a recorder (e.g. a Prometheus exporter).
//!
//! # Metric Naming Convention
//!
//! All metrics follow the pattern: `rivven_rolling_{name}_{unit}`
//!
//! - `rivven_rolling_rejected_values_total{kind}` - negative observations refused
//! - `rivven_rolling_window_{sum,avg,min,max}{window}` - published snapshots
//!
//! # Usage
//!
//! ```rust,ignore
//! use rivven_rolling::{RollingMetrics, TimingCounter, TimingCounterOpts};
//!
//! let latency = TimingCounter::new(TimingCounterOpts::default())?;
//! latency.add(42)?;
//! RollingMetrics::record_snapshot("request_latency", &latency.snapshot());
//! ```

use crate::metric::WindowSnapshot;

/// Rolling window metrics
pub struct RollingMetrics;

impl RollingMetrics {
    // ---- Counters ----

    /// Negative values rejected by a facade (`kind` is "counter" or "gauge")
    pub fn increment_rejected_values(kind: &'static str) {
        metrics::counter!("rivven_rolling_rejected_values_total", "kind" => kind).increment(1);
    }

    // ---- Gauges ----

    /// Publish a window snapshot under the `window` label
    pub fn record_snapshot(window: &str, snapshot: &WindowSnapshot) {
        let window = window.to_string();
        metrics::gauge!("rivven_rolling_window_sum", "window" => window.clone()).set(snapshot.sum);
        metrics::gauge!("rivven_rolling_window_avg", "window" => window.clone()).set(snapshot.avg);
        metrics::gauge!("rivven_rolling_window_min", "window" => window.clone()).set(snapshot.min);
        metrics::gauge!("rivven_rolling_window_max", "window" => window).set(snapshot.max);
    }
}
