//! # Driving Ports (API - Inbound)
//!
//! Interface exposed by the consortium precompiles to the host engine and to
//! in-process callers that skip the ABI boundary (consensus, tooling).
//!
//! Authorization and static-call rules live at the call boundary
//! (`evm::precompiles`); this API assumes a trusted caller.

use crate::domain::entities::{CandidatePool, ElectionParameters, ValidatorSet};
use crate::domain::equivocation::EquivocationVerdict;
use crate::domain::value_objects::{Address, U256};
use crate::errors::{HeaderError, RegistryError};

/// Primary API for validator election and double-sign verification.
pub trait ConsortiumPrecompileApi: Send + Sync {
    /// Orders `pool` by descending stake (equal stake: higher address first).
    fn sort_validators(&self, pool: &CandidatePool) -> Vec<Address>;

    /// Orders the registered candidates by descending stake.
    ///
    /// # Errors
    ///
    /// Fails if the registry has no snapshot.
    fn sort_registered_validators(&self) -> Result<Vec<Address>, RegistryError>;

    /// Elects the validator set for the next epoch.
    fn pick_validator_set(&self, pool: &CandidatePool, params: ElectionParameters)
        -> ValidatorSet;

    /// Elects the validator set from the registered candidates and bounds.
    ///
    /// # Errors
    ///
    /// Fails if the registry has no snapshot.
    fn pick_registered_validator_set(&self) -> Result<ValidatorSet, RegistryError>;

    /// Checks two serialized headers for a double-sign on `chain_id`.
    ///
    /// # Errors
    ///
    /// Returns a [`HeaderError`] if either record is malformed.
    fn check_double_sign(
        &self,
        chain_id: U256,
        first: &[u8],
        second: &[u8],
    ) -> Result<EquivocationVerdict, HeaderError>;

    /// Returns true iff the two headers prove a double-sign on `chain_id`.
    ///
    /// # Errors
    ///
    /// Returns a [`HeaderError`] if either record is malformed.
    fn verify_double_sign(
        &self,
        chain_id: U256,
        first: &[u8],
        second: &[u8],
    ) -> Result<bool, HeaderError> {
        Ok(self.check_double_sign(chain_id, first, second)?.is_proven())
    }
}
