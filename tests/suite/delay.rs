//! Delay primitive scenarios

use futures_util::FutureExt;
use std::pin::pin;
use std::time::Duration;
use tandem_core::{delay, delay_ms};

use crate::common::{Clock, ms};

#[tokio::test]
async fn zero_delay_settles_asynchronously() {
    let mut pause = pin!(delay(Duration::ZERO));
    assert!(pause.as_mut().now_or_never().is_none());
    pause.await;
}

#[tokio::test(start_paused = true)]
async fn delay_lasts_at_least_requested_duration() {
    let clock = Clock::start();
    delay_ms(75).await;
    assert!(clock.elapsed() >= ms(75));
}
