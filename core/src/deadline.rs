//! Deadline guard.
//!
//! Races an operation against a timer. Whichever settles first decides the
//! outcome, and the timer is dropped as soon as the race ends.
//!
//! An operation passed by value is dropped, and therefore cancelled, when the
//! deadline wins. Pass `&mut op` (any `Unpin` future, e.g. a boxed future) or
//! a `JoinHandle` to keep the work running so it can still be awaited after a
//! timeout.

use std::future::Future;
use std::time::Duration;

use tandem_types::{DeadlineError, Timeout};
use tokio::time::timeout;

/// Returns the operation's outcome if it settles within `duration`, otherwise
/// a [`Timeout`].
pub async fn with_deadline<F, T, E>(
    operation: F,
    duration: Duration,
) -> Result<T, DeadlineError<E>>
where
    F: Future<Output = Result<T, E>>,
{
    match timeout(duration, operation).await {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(err)) => Err(DeadlineError::Failed(err)),
        Err(_) => {
            tracing::debug!(
                deadline_ms = duration.as_millis(),
                "Operation exceeded deadline; no longer listening"
            );
            Err(Timeout::new(duration).into())
        }
    }
}

pub async fn with_deadline_ms<F, T, E>(operation: F, millis: u64) -> Result<T, DeadlineError<E>>
where
    F: Future<Output = Result<T, E>>,
{
    with_deadline(operation, Duration::from_millis(millis)).await
}
