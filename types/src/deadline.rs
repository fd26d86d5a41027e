//! Deadline outcome types.
//!
//! A guarded operation produces exactly one of: its own value, its own failure,
//! or a [`Timeout`]. The two failure kinds are kept structurally apart so a
//! timeout can never be mistaken for an operation error.

use std::time::Duration;

use thiserror::Error;

/// Marker produced when a deadline elapses before the guarded operation settles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("operation timed out after {}ms", .after.as_millis())]
pub struct Timeout {
    after: Duration,
}

impl Timeout {
    #[must_use]
    pub const fn new(after: Duration) -> Self {
        Self { after }
    }

    /// The deadline that elapsed.
    #[must_use]
    pub const fn after(self) -> Duration {
        self.after
    }

    /// Always true. Lets callers test for the marker without matching on the type.
    #[must_use]
    pub const fn is_timeout(self) -> bool {
        true
    }
}

/// Failure of a deadline-guarded operation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeadlineError<E> {
    /// The deadline elapsed first; the operation's later outcome is discarded.
    #[error(transparent)]
    TimedOut(#[from] Timeout),
    /// The operation settled in time, with a failure.
    #[error("operation failed: {0}")]
    Failed(E),
}

impl<E> DeadlineError<E> {
    #[must_use]
    pub const fn is_timeout(&self) -> bool {
        matches!(self, Self::TimedOut(_))
    }

    #[must_use]
    pub const fn timeout(&self) -> Option<Timeout> {
        match self {
            Self::TimedOut(timeout) => Some(*timeout),
            Self::Failed(_) => None,
        }
    }

    /// Returns the operation's own error, or `None` for a timeout.
    pub fn into_failure(self) -> Option<E> {
        match self {
            Self::TimedOut(_) => None,
            Self::Failed(err) => Some(err),
        }
    }

    /// Maps the operation error, leaving a timeout untouched.
    pub fn map_failure<F>(self, f: impl FnOnce(E) -> F) -> DeadlineError<F> {
        match self {
            Self::TimedOut(timeout) => DeadlineError::TimedOut(timeout),
            Self::Failed(err) => DeadlineError::Failed(f(err)),
        }
    }
}
