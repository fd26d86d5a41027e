//! Settlement bookkeeping for all-settled aggregation.

/// Running record of how many tracked operations have settled.
///
/// Only the first failure (in settlement order) is retained. Later failures
/// are counted but their payloads are dropped.
#[derive(Debug)]
pub struct Settlement<E> {
    total: usize,
    settled: usize,
    failed: usize,
    first_failure: Option<E>,
}

impl<E> Settlement<E> {
    #[must_use]
    pub const fn new(total: usize) -> Self {
        Self {
            total,
            settled: 0,
            failed: 0,
            first_failure: None,
        }
    }

    pub fn record_success(&mut self) {
        self.settled += 1;
    }

    pub fn record_failure(&mut self, err: E) {
        self.settled += 1;
        self.failed += 1;
        if self.first_failure.is_none() {
            self.first_failure = Some(err);
        }
    }

    /// Records a settled outcome, discarding any success payload.
    pub fn record<T>(&mut self, outcome: Result<T, E>) {
        match outcome {
            Ok(_) => self.record_success(),
            Err(err) => self.record_failure(err),
        }
    }

    #[must_use]
    pub const fn total(&self) -> usize {
        self.total
    }

    #[must_use]
    pub const fn settled(&self) -> usize {
        self.settled
    }

    #[must_use]
    pub const fn failed(&self) -> usize {
        self.failed
    }

    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.settled >= self.total
    }

    /// `Ok(())` when nothing failed, otherwise the first recorded failure.
    pub fn into_result(self) -> Result<(), E> {
        match self.first_failure {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}
