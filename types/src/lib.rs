//! Core domain types for Tandem.
//!
//! This crate contains pure domain types with no IO, no async, and minimal dependencies.
//! The orchestration combinators in `tandem-core` build on these.

// Pedantic lint configuration - these are intentional design choices
#![allow(clippy::missing_errors_doc)] // Result-returning functions are self-explanatory

mod deadline;
mod settlement;
mod step;

pub use deadline::{DeadlineError, Timeout};
pub use settlement::Settlement;
pub use step::StepMode;
