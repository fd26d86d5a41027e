//! Ordered step pipeline.
//!
//! Steps are scheduled in declaration order behind a dependency cursor. The
//! cursor starts resolved; a blocking step replaces it with its own
//! completion, a concurrent step leaves it alone. Every step waits for the
//! cursor it saw when it was declared, regardless of whether that step
//! succeeded, and every step's outcome feeds the final [`all_settled`].
//!
//! ```text
//! [A blocking] [B concurrent] [C blocking] [D concurrent]
//!  cursor0 ->A   A ->B          A ->C         C ->D
//! ```
//!
//! Consecutive concurrent steps all start as soon as their shared cursor
//! settles; they never wait on one another.

use std::fmt;
use std::future::Future;

use futures_util::FutureExt;
use futures_util::future::{self, LocalBoxFuture, Shared};
use tandem_types::StepMode;
use tokio::sync::oneshot;

use crate::aggregate::all_settled;

type Invocation<'a, R, A, E> =
    Box<dyn FnOnce(Option<&R>, A) -> Result<LocalBoxFuture<'a, Result<(), E>>, E> + 'a>;

type Cursor<'a> = Shared<LocalBoxFuture<'a, ()>>;

/// One declared step of an ordered pipeline.
///
/// The operation receives the effective receiver and the step's arguments.
/// Returning `Err` before producing a future counts as a failed step; it is
/// never propagated directly and later steps still run. Success payloads are
/// discarded.
pub struct Step<'a, R, A, E> {
    operation: Invocation<'a, R, A, E>,
    receiver: Option<R>,
    args: A,
    mode: StepMode,
}

impl<'a, R: 'a, A: 'a, E: 'a> Step<'a, R, A, E> {
    pub fn new<Op, Fut, T>(mode: StepMode, args: A, operation: Op) -> Self
    where
        Op: FnOnce(Option<&R>, A) -> Result<Fut, E> + 'a,
        Fut: Future<Output = Result<T, E>> + 'a,
        T: 'a,
    {
        let operation: Invocation<'a, R, A, E> =
            Box::new(move |receiver: Option<&R>, args: A| {
                operation(receiver, args)
                    .map(|running| running.map(|outcome| outcome.map(drop)).boxed_local())
            });
        Self {
            operation,
            receiver: None,
            args,
            mode,
        }
    }

    pub fn blocking<Op, Fut, T>(args: A, operation: Op) -> Self
    where
        Op: FnOnce(Option<&R>, A) -> Result<Fut, E> + 'a,
        Fut: Future<Output = Result<T, E>> + 'a,
        T: 'a,
    {
        Self::new(StepMode::Blocking, args, operation)
    }

    pub fn concurrent<Op, Fut, T>(args: A, operation: Op) -> Self
    where
        Op: FnOnce(Option<&R>, A) -> Result<Fut, E> + 'a,
        Fut: Future<Output = Result<T, E>> + 'a,
        T: 'a,
    {
        Self::new(StepMode::Concurrent, args, operation)
    }

    /// Sets the receiver for this step and, until another is set, for the steps after it.
    pub fn with_receiver(mut self, receiver: R) -> Self {
        self.receiver = Some(receiver);
        self
    }

    #[must_use]
    pub const fn mode(&self) -> StepMode {
        self.mode
    }
}

impl<R: fmt::Debug, A: fmt::Debug, E> fmt::Debug for Step<'_, R, A, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Step")
            .field("mode", &self.mode)
            .field("receiver", &self.receiver)
            .field("args", &self.args)
            .finish_non_exhaustive()
    }
}

/// Runs `steps` in declaration order and resolves once every step has settled.
///
/// Resolves `Ok(())` only if every step succeeded; otherwise with the first
/// failure to settle. An empty pipeline resolves `Ok(())` on the first poll.
pub async fn run_ordered<'a, I, R, A, E>(steps: I) -> Result<(), E>
where
    I: IntoIterator<Item = Step<'a, R, A, E>>,
    R: Clone + 'a,
    A: 'a,
    E: 'a,
{
    let mut cursor: Cursor<'a> = future::ready(()).boxed_local().shared();
    let mut receiver: Option<R> = None;
    let mut outcomes = Vec::new();

    for (index, step) in steps.into_iter().enumerate() {
        let Step {
            operation,
            receiver: own_receiver,
            args,
            mode,
        } = step;

        if own_receiver.is_some() {
            receiver = own_receiver;
        }
        let step_receiver = receiver.clone();
        let after = cursor.clone();
        let (done_tx, done_rx) = oneshot::channel::<()>();

        outcomes.push(async move {
            after.await;
            tracing::trace!(step = index, mode = mode.as_str(), "Step started");

            let outcome = match operation(step_receiver.as_ref(), args) {
                Ok(running) => running.await,
                Err(err) => {
                    tracing::warn!(step = index, "Step failed before it could start");
                    Err(err)
                }
            };

            // Dropping the sender releases whoever waits on this step.
            drop(done_tx);
            tracing::trace!(step = index, ok = outcome.is_ok(), "Step settled");
            outcome
        });

        if mode.is_blocking() {
            cursor = done_rx.map(drop).boxed_local().shared();
        }
    }

    all_settled(outcomes).await
}
