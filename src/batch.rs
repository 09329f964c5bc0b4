//! Batch outcomes
//!
//! Concurrent remote operations report every item's result instead of
//! collapsing into a single pass/fail, so callers choose how to reconcile.

/// Per-item results of a batch of remote operations.
#[derive(Debug)]
pub struct BatchOutcome<T, E> {
    /// Items whose operation succeeded, in submission order.
    pub succeeded: Vec<T>,

    /// Items whose operation failed, with the error, in submission order.
    pub failed: Vec<(T, E)>,
}

impl<T, E> Default for BatchOutcome<T, E> {
    fn default() -> Self {
        Self {
            succeeded: Vec::new(),
            failed: Vec::new(),
        }
    }
}

impl<T, E> BatchOutcome<T, E> {
    /// Sort `(item, result)` pairs into successes and failures.
    pub fn collect(results: impl IntoIterator<Item = (T, Result<(), E>)>) -> Self {
        results
            .into_iter()
            .fold(Self::default(), |mut outcome, (item, result)| {
                match result {
                    Ok(()) => outcome.succeeded.push(item),
                    Err(error) => outcome.failed.push((item, error)),
                }
                outcome
            })
    }

    /// Whether every operation succeeded.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }

    /// Number of operations in the batch.
    #[must_use]
    pub fn len(&self) -> usize {
        self.succeeded.len() + self.failed.len()
    }

    /// Whether the batch was empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
