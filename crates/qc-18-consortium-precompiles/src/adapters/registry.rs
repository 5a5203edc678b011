//! # In-Memory Candidate Registry
//!
//! [`CandidateRegistry`] adapter holding the latest snapshot published by the
//! host (e.g. after the validator-set contract state is read at epoch end).

use crate::errors::RegistryError;
use crate::ports::outbound::{CandidateRegistry, RegistrySnapshot};
use parking_lot::RwLock;
use tracing::debug;

/// Registry backed by a lock-protected snapshot.
#[derive(Debug, Default)]
pub struct InMemoryCandidateRegistry {
    snapshot: RwLock<Option<RegistrySnapshot>>,
}

impl InMemoryCandidateRegistry {
    /// Creates an empty registry. Lookups fail until a snapshot is published.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry holding `snapshot`.
    #[must_use]
    pub fn with_snapshot(snapshot: RegistrySnapshot) -> Self {
        Self {
            snapshot: RwLock::new(Some(snapshot)),
        }
    }

    /// Replaces the current snapshot.
    pub fn publish(&self, snapshot: RegistrySnapshot) {
        debug!(
            candidates = snapshot.pool.len(),
            target_set_size = snapshot.params.target_set_size,
            prioritized_quota = snapshot.params.prioritized_quota,
            "publishing candidate snapshot"
        );
        *self.snapshot.write() = Some(snapshot);
    }

    /// Drops the current snapshot.
    pub fn clear(&self) {
        *self.snapshot.write() = None;
    }
}

impl CandidateRegistry for InMemoryCandidateRegistry {
    fn snapshot(&self) -> Result<RegistrySnapshot, RegistryError> {
        self.snapshot.read().clone().ok_or(RegistryError::Unavailable)
    }
}
