//! All-settled aggregation scenarios

use futures_util::FutureExt;
use futures_util::future::LocalBoxFuture;
use tandem_core::{all_settled, delay_ms};

use crate::common::{Clock, ms, settle_after};

#[tokio::test(start_paused = true)]
async fn success_waits_for_slowest_operation() {
    let clock = Clock::start();
    let ops = [300, 20, 150].map(|millis| {
        let clock = clock.clone();
        async move {
            delay_ms(millis).await;
            clock.mark(format!("op-{millis}"));
            Ok::<_, &str>(millis)
        }
    });

    let result = all_settled(ops).await;

    assert_eq!(result, Ok(()));
    assert_eq!(clock.labels(), ["op-20", "op-150", "op-300"]);
    assert!(clock.elapsed() >= ms(300));
}

#[tokio::test(start_paused = true)]
async fn failure_is_reported_only_after_successes_settle() {
    let clock = Clock::start();
    let ok_clock = clock.clone();

    let ops: Vec<LocalBoxFuture<'_, Result<(), &str>>> = vec![
        settle_after(10, Err("quota exceeded")).boxed_local(),
        async move {
            delay_ms(200).await;
            ok_clock.mark("slow-success");
            Ok(())
        }
        .boxed_local(),
    ];

    let result = all_settled(ops).await;

    assert_eq!(result, Err("quota exceeded"));
    assert!(clock.has("slow-success"));
    assert!(clock.elapsed() >= ms(200));
}

#[tokio::test(start_paused = true)]
async fn representative_error_is_earliest_to_settle() {
    let result = all_settled(vec![
        settle_after::<()>(90, Err("third")),
        settle_after(30, Err("first")),
        settle_after(60, Err("second")),
    ])
    .await;

    assert_eq!(result, Err("first"));
}

#[tokio::test]
async fn empty_collection_resolves_without_waiting() {
    let ops: Vec<LocalBoxFuture<'_, Result<(), &str>>> = Vec::new();
    assert_eq!(all_settled(ops).now_or_never(), Some(Ok(())));
}
