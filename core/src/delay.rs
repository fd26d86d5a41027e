//! Delay primitives.

use std::time::Duration;

use tokio::task::yield_now;
use tokio::time::sleep;

/// Resolves after at least `duration` has elapsed.
///
/// The first poll always yields to the scheduler, so a zero duration still
/// settles on a later poll and never inline in the caller's stack.
pub async fn delay(duration: Duration) {
    yield_now().await;
    if !duration.is_zero() {
        sleep(duration).await;
    }
}

pub async fn delay_ms(millis: u64) {
    delay(Duration::from_millis(millis)).await;
}

/// Yields once so other ready work on this task can make progress.
pub async fn next_tick() {
    yield_now().await;
}
