//! # Driven Ports (SPI - Outbound)
//!
//! Interfaces the consortium precompiles depend on. External adapters
//! implement these traits to provide:
//! - Seal signer recovery (secp256k1)
//! - The current candidate registry snapshot (validator-set contract state)
//!
//! Both are read-only and synchronous: precompiles run inside block
//! execution and must not block on I/O.

use crate::domain::entities::{CandidatePool, ElectionParameters};
use crate::domain::value_objects::{Address, Hash, Seal};
use crate::errors::RegistryError;

// =============================================================================
// SIGNER RECOVERY
// =============================================================================

/// Recovers the producer address behind a header seal.
pub trait SignerRecovery: Send + Sync {
    /// Recovers the address that produced `seal` over `hash`.
    ///
    /// # Returns
    ///
    /// * `Some(Address)` - Recovered signer
    /// * `None` - Seal is malformed or recovery failed
    fn recover(&self, hash: &Hash, seal: &Seal) -> Option<Address>;
}

// =============================================================================
// CANDIDATE REGISTRY
// =============================================================================

/// Candidates and election bounds as stored by the validator-set contract.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RegistrySnapshot {
    /// Registered candidates with their stake and trust flags.
    pub pool: CandidatePool,
    /// Maximum validator count and prioritized quota.
    pub params: ElectionParameters,
}

/// Read-only access to the candidate registry.
///
/// Backs the zero-argument precompile variants.
pub trait CandidateRegistry: Send + Sync {
    /// Returns the current candidate snapshot.
    ///
    /// # Errors
    ///
    /// Returns a [`RegistryError`] if no consistent snapshot is available.
    fn snapshot(&self) -> Result<RegistrySnapshot, RegistryError>;
}
