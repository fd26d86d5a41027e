//! Best-effort wrappers and success probes.
//!
//! These swallow failures entirely. Use them only where the caller does not
//! need to know that the operation failed.

use std::fmt::Display;
use std::future::Future;

/// Resolves to the operation's value, or `None` if it failed.
pub async fn suppress<F, T, E>(operation: F) -> Option<T>
where
    F: Future<Output = Result<T, E>>,
    E: Display,
{
    match operation.await {
        Ok(value) => Some(value),
        Err(err) => {
            tracing::debug!(error = %err, "Suppressed best-effort failure");
            None
        }
    }
}

/// Resolves to the operation's value, or `fallback` if it failed.
pub async fn ignore_errors<F, T, E>(operation: F, fallback: T) -> T
where
    F: Future<Output = Result<T, E>>,
    E: Display,
{
    suppress(operation).await.unwrap_or(fallback)
}

/// True if the operation resolves successfully.
pub async fn succeeds<F, T, E>(operation: F) -> bool
where
    F: Future<Output = Result<T, E>>,
{
    operation.await.is_ok()
}

/// True if the operation fails.
pub async fn fails<F, T, E>(operation: F) -> bool
where
    F: Future<Output = Result<T, E>>,
{
    operation.await.is_err()
}
