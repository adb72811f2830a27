//! Stress tests for rolling windows
//!
//! Tests for concurrent access to one window:
//! - Many writers never lose an update
//! - Readers never observe a torn or shrinking window
//! - Async tasks on a multi-threaded runtime behave like threads
//!
//! Run with: cargo test -p rivven-integration-tests --test stress -- --nocapture

use anyhow::Result;
use rivven_integration_tests::fixtures::*;
use rivven_integration_tests::helpers::*;
use rivven_rolling::{Aggregation, Metric, TimingCounter};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use tracing::info;

/// Configuration for stress tests
struct StressConfig {
    /// Number of concurrent writers
    writer_count: usize,
    /// Adds performed by each writer
    adds_per_writer: usize,
    /// Value passed to every add
    value: i64,
    /// Buckets in the window under test
    window_size: usize,
}

impl Default for StressConfig {
    fn default() -> Self {
        Self {
            writer_count: 8,
            adds_per_writer: 10_000,
            value: 3,
            window_size: 10,
        }
    }
}

impl StressConfig {
    fn expected_sum(&self) -> f64 {
        (self.writer_count * self.adds_per_writer) as f64 * self.value as f64
    }
}

/// Test that concurrent counter writers never lose an update
#[test]
fn test_concurrent_counter_writers() -> Result<()> {
    init_tracing();

    let config = StressConfig::default();
    let counter = Arc::new(stable_counter(config.window_size)?);

    let value = config.value;
    let start = Instant::now();
    fan_out_writers(
        &counter,
        config.writer_count,
        config.adds_per_writer,
        move |counter| {
            counter.add(value).unwrap();
        },
    );
    info!(elapsed = ?start.elapsed(), "Concurrent counter writes finished");

    assert_eq!(counter.sum(), config.expected_sum());
    assert_eq!(counter.value(), config.expected_sum() as i64);
    assert_eq!(
        counter.count(),
        (config.writer_count * config.adds_per_writer) as u64
    );
    Ok(())
}

/// Test that concurrent gauge writers never lose an update
#[test]
fn test_concurrent_gauge_writers() -> Result<()> {
    init_tracing();

    let config = StressConfig {
        writer_count: 4,
        adds_per_writer: 5_000,
        ..Default::default()
    };
    let gauge = Arc::new(stable_gauge(config.window_size)?);

    let value = config.value;
    fan_out_writers(
        &gauge,
        config.writer_count,
        config.adds_per_writer,
        move |gauge| {
            gauge.add(value).unwrap();
        },
    );

    assert_eq!(gauge.sum(), config.expected_sum());
    assert_eq!(gauge.avg(), config.expected_sum() / config.window_size as f64);
    Ok(())
}

/// Test that readers running alongside writers only ever see the sum grow
#[test]
fn test_readers_see_monotonic_sum_during_writes() -> Result<()> {
    init_tracing();

    let config = StressConfig {
        writer_count: 4,
        adds_per_writer: 5_000,
        value: 1,
        ..Default::default()
    };
    let counter = Arc::new(stable_counter(config.window_size)?);
    let done = Arc::new(AtomicBool::new(false));

    let readers: Vec<_> = (0..4)
        .map(|_| {
            let counter = Arc::clone(&counter);
            let done = Arc::clone(&done);
            thread::spawn(move || {
                let mut last = 0.0;
                let mut reads = 0u64;
                while !done.load(Ordering::Acquire) {
                    let sum = counter.sum();
                    assert!(sum >= last, "sum went backwards: {} -> {}", last, sum);
                    assert_eq!(sum.fract(), 0.0, "torn read: {}", sum);
                    last = sum;
                    reads += 1;
                }
                reads
            })
        })
        .collect();

    fan_out_writers(
        &counter,
        config.writer_count,
        config.adds_per_writer,
        |counter| {
            counter.add(1).unwrap();
        },
    );
    done.store(true, Ordering::Release);

    let total_reads: u64 = readers
        .into_iter()
        .map(|reader| reader.join().expect("reader thread panicked"))
        .sum();
    info!(total_reads, "Readers finished");

    assert_eq!(counter.sum(), config.expected_sum());
    Ok(())
}

/// Test that every reduction spans the whole window while buckets rotate
#[test]
fn test_window_size_is_stable_under_rotation() -> Result<()> {
    init_tracing();

    let size = 5;
    let counter = Arc::new(TimingCounter::new(opts(size, Duration::from_micros(50)))?);
    let done = Arc::new(AtomicBool::new(false));

    let reader = {
        let counter = Arc::clone(&counter);
        let done = Arc::clone(&done);
        thread::spawn(move || {
            while !done.load(Ordering::Acquire) {
                assert_eq!(counter.reduce(|iter| iter.count() as f64), size as f64);
            }
        })
    };

    fan_out_writers(&counter, 4, 2_000, |counter| {
        counter.add(1).unwrap();
    });
    done.store(true, Ordering::Release);
    reader.join().expect("reader thread panicked");

    assert!(counter.policy().current_offset().unwrap_or(0) > 0);
    Ok(())
}

/// Test concurrent adds from tasks on a multi-threaded runtime
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_async_writers() -> Result<()> {
    init_tracing();

    let tasks = 16;
    let adds_per_task = 1_000;
    let counter = Arc::new(stable_counter(4)?);

    let total = assert_completes_within(
        || async {
            let handles: Vec<_> = (0..tasks)
                .map(|_| {
                    let counter = Arc::clone(&counter);
                    tokio::spawn(async move {
                        for i in 0..adds_per_task {
                            counter.add(2)?;
                            if i % 100 == 0 {
                                tokio::task::yield_now().await;
                            }
                        }
                        Ok::<_, rivven_rolling::Error>(())
                    })
                })
                .collect();

            for handle in handles {
                handle.await.expect("task panicked")?;
            }
            Ok::<_, anyhow::Error>(counter.sum())
        },
        Duration::from_secs(30),
    )
    .await?;

    assert_eq!(total, (tasks * adds_per_task * 2) as f64);
    Ok(())
}

/// Test that rejected writes under contention leave no trace
#[test]
fn test_rejected_writes_under_contention() -> Result<()> {
    init_tracing();

    let counter = Arc::new(stable_counter(3)?);

    fan_out_writers(&counter, 4, 1_000, |counter| {
        counter.add(5).unwrap();
        assert!(counter.add(-5).is_err());
    });

    assert_eq!(counter.sum(), 20_000.0);
    assert_eq!(counter.count(), 4_000);
    Ok(())
}
