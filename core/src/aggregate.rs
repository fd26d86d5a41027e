//! All-settled aggregation.
//!
//! Unlike `try_join_all`, an early failure never short-circuits: the aggregate
//! settles only once every input has settled, then reports the first failure
//! in settlement order (not declaration order).

use std::future::Future;

use futures_util::StreamExt;
use futures_util::stream::FuturesUnordered;
use tandem_types::Settlement;

/// Waits for every operation, succeeding only if none failed.
///
/// Inputs are polled concurrently on the current task. They are never
/// cancelled or retried. An empty input resolves `Ok(())` on the first poll.
pub async fn all_settled<I, F, T, E>(operations: I) -> Result<(), E>
where
    I: IntoIterator<Item = F>,
    F: Future<Output = Result<T, E>>,
{
    let mut pending: FuturesUnordered<F> = operations.into_iter().collect();
    let mut settlement = Settlement::new(pending.len());

    while let Some(outcome) = pending.next().await {
        settlement.record(outcome);
    }

    tracing::debug!(
        total = settlement.total(),
        failed = settlement.failed(),
        "All operations settled"
    );
    settlement.into_result()
}

/// Waits for every operation and discards all outcomes.
pub async fn all_settled_ignoring_errors<I, F, T, E>(operations: I)
where
    I: IntoIterator<Item = F>,
    F: Future<Output = Result<T, E>>,
{
    let mut pending: FuturesUnordered<F> = operations.into_iter().collect();
    while pending.next().await.is_some() {}
}
