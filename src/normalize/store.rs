use std::sync::{Arc, PoisonError, RwLock};

use super::engine::NormalizationOutcome;

/// Holds the outcome of the latest normalization run.
///
/// Each run replaces the whole outcome by swapping the `Arc`; snapshots taken
/// earlier keep pointing at the previous run and are never mutated.
#[derive(Debug, Default)]
pub struct ResultStore {
    current: RwLock<Option<Arc<NormalizationOutcome>>>,
}

impl ResultStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install a new outcome, dropping the previous one from the store.
    pub fn replace(&self, outcome: NormalizationOutcome) -> Arc<NormalizationOutcome> {
        let outcome = Arc::new(outcome);
        let mut slot = self.current.write().unwrap_or_else(PoisonError::into_inner);
        *slot = Some(Arc::clone(&outcome));
        outcome
    }

    /// The latest outcome, if any run has completed.
    pub fn snapshot(&self) -> Option<Arc<NormalizationOutcome>> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn clear(&self) {
        *self.current.write().unwrap_or_else(PoisonError::into_inner) = None;
    }
}
