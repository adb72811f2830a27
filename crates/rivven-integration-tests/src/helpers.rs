//! Test helpers and utilities

use anyhow::Result;
use std::future::Future;
use std::sync::Arc;
use std::thread;
use std::time::Duration;
use tokio::time::{sleep, timeout};
use tracing::debug;

/// Initialize tracing for tests (call once at start of test)
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("rivven_rolling=debug".parse().unwrap())
                .add_directive("rivven_integration_tests=debug".parse().unwrap()),
        )
        .with_test_writer()
        .try_init();
}

/// Wait for a condition to become true with timeout
pub async fn wait_for<F>(
    condition: F,
    timeout_duration: Duration,
    poll_interval: Duration,
) -> Result<()>
where
    F: Fn() -> bool,
{
    let start = std::time::Instant::now();

    while start.elapsed() < timeout_duration {
        if condition() {
            return Ok(());
        }
        sleep(poll_interval).await;
    }

    anyhow::bail!("Condition not met within {:?}", timeout_duration)
}

/// Wait for a condition with default timeout (5s) and poll interval (1ms)
pub async fn wait_for_condition<F>(condition: F) -> Result<()>
where
    F: Fn() -> bool,
{
    wait_for(condition, Duration::from_secs(5), Duration::from_millis(1)).await
}

/// Assert that a future completes within the given timeout
pub async fn assert_completes_within<F, Fut, T>(future: F, duration: Duration) -> T
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = T>,
{
    timeout(duration, future())
        .await
        .unwrap_or_else(|_| panic!("Operation did not complete within {:?}", duration))
}

/// Run `writers` OS threads that each call `write` `iterations` times
/// against the shared target, then join them all.
pub fn fan_out_writers<T, F>(target: &Arc<T>, writers: usize, iterations: usize, write: F)
where
    T: Send + Sync + 'static,
    F: Fn(&T) + Send + Sync + Copy + 'static,
{
    let handles: Vec<_> = (0..writers)
        .map(|writer| {
            let target = Arc::clone(target);
            thread::spawn(move || {
                for _ in 0..iterations {
                    write(&target);
                }
                debug!(writer, iterations, "Writer finished");
            })
        })
        .collect();

    for handle in handles {
        handle.join().expect("writer thread panicked");
    }
}
