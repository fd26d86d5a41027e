//! Asynchronous task orchestration for Tandem.
//!
//! A handful of combinators over plain futures:
//!
//! - **`all_settled`**: wait for every operation, report the first failure
//! - **`run_ordered`**: run declared steps in order, blocking or concurrent
//! - **`with_deadline`**: stop listening to an operation after a duration
//! - **`suppress`** / **`ignore_errors`**: best-effort results
//! - **`delay`**: an always-asynchronous pause
//!
//! Everything runs on the task that polls the returned future. Nothing here
//! spawns, and nothing holds state beyond a single call.

mod aggregate;
mod best_effort;
mod deadline;
mod delay;
mod pipeline;

pub use aggregate::{all_settled, all_settled_ignoring_errors};
pub use best_effort::{fails, ignore_errors, succeeds, suppress};
pub use deadline::{with_deadline, with_deadline_ms};
pub use delay::{delay, delay_ms, next_tick};
pub use pipeline::{Step, run_ordered};

pub use tandem_types::{DeadlineError, StepMode, Timeout};
