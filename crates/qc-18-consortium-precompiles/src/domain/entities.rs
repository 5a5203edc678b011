//! # Core Domain Entities
//!
//! Main business entities for validator election and call handling.
//! Candidates live in an arena ([`CandidatePool`]); ordering and
//! partitioning operate on index sequences into that arena, so the
//! `(address, weight, trusted)` triple of a candidate can never come apart.

use crate::domain::value_objects::{Address, U256};
use crate::errors::ElectionError;
use serde::{Deserialize, Serialize};

// =============================================================================
// CALL CONTEXT
// =============================================================================

/// Execution-context facts a precompile may read.
///
/// Supplied by the host engine for every invocation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CallContext {
    /// Immediate caller of the precompile.
    pub caller: Address,
    /// Chain identifier bound into header signing hashes.
    pub chain_id: U256,
    /// Is this a static call (no state changes allowed).
    pub is_static: bool,
}

impl CallContext {
    /// Creates a context for a STATICCALL from `caller`.
    #[must_use]
    pub const fn static_call(caller: Address, chain_id: U256) -> Self {
        Self {
            caller,
            chain_id,
            is_static: true,
        }
    }

    /// Creates a context for a plain CALL from `caller`.
    #[must_use]
    pub const fn call(caller: Address, chain_id: U256) -> Self {
        Self {
            caller,
            chain_id,
            is_static: false,
        }
    }
}

// =============================================================================
// CANDIDATES
// =============================================================================

/// One staking participant.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    /// Candidate address.
    pub address: Address,
    /// Total delegated plus self stake.
    pub weight: U256,
    /// Registered by a governance-designated trusted organization.
    pub trusted: bool,
}

impl Candidate {
    /// Creates a candidate.
    #[must_use]
    pub const fn new(address: Address, weight: U256, trusted: bool) -> Self {
        Self {
            address,
            weight,
            trusted,
        }
    }
}

/// Arena of candidates for one election call.
///
/// Positions in the arena never move. Orderings are expressed as
/// `Vec<usize>` index sequences over it.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidatePool {
    candidates: Vec<Candidate>,
}

impl CandidatePool {
    /// Creates a pool from already-paired candidates.
    #[must_use]
    pub fn new(candidates: Vec<Candidate>) -> Self {
        Self { candidates }
    }

    /// Pairs three parallel sequences into a pool.
    ///
    /// # Errors
    ///
    /// Returns [`ElectionError::LengthMismatch`] unless all three sequences
    /// have the same length.
    pub fn from_parallel(
        addresses: Vec<Address>,
        weights: Vec<U256>,
        trusted: Vec<bool>,
    ) -> Result<Self, ElectionError> {
        if addresses.len() != weights.len() || addresses.len() != trusted.len() {
            return Err(ElectionError::LengthMismatch {
                addresses: addresses.len(),
                weights: weights.len(),
                trust_flags: trusted.len(),
            });
        }

        let candidates = addresses
            .into_iter()
            .zip(weights)
            .zip(trusted)
            .map(|((address, weight), trusted)| Candidate::new(address, weight, trusted))
            .collect();

        Ok(Self { candidates })
    }

    /// Pairs addresses and weights into a pool with no trusted members.
    ///
    /// # Errors
    ///
    /// Returns [`ElectionError::LengthMismatch`] if the lengths differ.
    pub fn from_weighted(addresses: Vec<Address>, weights: Vec<U256>) -> Result<Self, ElectionError> {
        let trusted = vec![false; addresses.len()];
        Self::from_parallel(addresses, weights, trusted)
    }

    /// Number of candidates.
    #[must_use]
    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    /// Returns true if the pool is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    /// Candidate at arena position `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    #[must_use]
    pub fn candidate(&self, index: usize) -> &Candidate {
        &self.candidates[index]
    }

    /// All candidates in arena (input) order.
    #[must_use]
    pub fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }

    /// Number of trusted candidates.
    #[must_use]
    pub fn trusted_count(&self) -> usize {
        self.candidates.iter().filter(|c| c.trusted).count()
    }

    /// The identity index sequence `0..len`.
    #[must_use]
    pub fn input_order(&self) -> Vec<usize> {
        (0..self.candidates.len()).collect()
    }

    /// Resolves an index sequence to addresses.
    #[must_use]
    pub fn addresses_of(&self, order: &[usize]) -> Vec<Address> {
        order.iter().map(|&i| self.candidates[i].address).collect()
    }
}

// =============================================================================
// ELECTION PARAMETERS
// =============================================================================

/// Caller-supplied election bounds.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElectionParameters {
    /// Maximum number of validators to output.
    pub target_set_size: usize,
    /// Maximum number of trusted candidates in the prioritized block.
    pub prioritized_quota: usize,
}

impl ElectionParameters {
    /// Creates parameters.
    #[must_use]
    pub const fn new(target_set_size: usize, prioritized_quota: usize) -> Self {
        Self {
            target_set_size,
            prioritized_quota,
        }
    }

    /// Converts 256-bit boundary values.
    ///
    /// Both values only ever bound a count of in-memory candidates, so a
    /// value above `usize::MAX` behaves exactly like `usize::MAX`.
    #[must_use]
    pub fn from_words(target_set_size: U256, prioritized_quota: U256) -> Self {
        Self {
            target_set_size: saturating_usize(target_set_size),
            prioritized_quota: saturating_usize(prioritized_quota),
        }
    }
}

fn saturating_usize(value: U256) -> usize {
    if value > U256::from(usize::MAX) {
        usize::MAX
    } else {
        value.as_usize()
    }
}

// =============================================================================
// VALIDATOR SET
// =============================================================================

/// Arranged validator set for the next epoch.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidatorSet {
    validators: Vec<Address>,
    prioritized: usize,
}

impl ValidatorSet {
    /// Creates a set. `prioritized` counts the leading trusted entries.
    #[must_use]
    pub fn new(validators: Vec<Address>, prioritized: usize) -> Self {
        let prioritized = prioritized.min(validators.len());
        Self {
            validators,
            prioritized,
        }
    }

    /// Validators in role-rotation order.
    #[must_use]
    pub fn validators(&self) -> &[Address] {
        &self.validators
    }

    /// Number of leading entries that came from the prioritized block.
    #[must_use]
    pub fn prioritized_count(&self) -> usize {
        self.prioritized
    }

    /// Number of validators.
    #[must_use]
    pub fn len(&self) -> usize {
        self.validators.len()
    }

    /// Returns true if no validator was elected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.validators.is_empty()
    }

    /// Consumes the set, returning the ordered addresses.
    #[must_use]
    pub fn into_addresses(self) -> Vec<Address> {
        self.validators
    }
}

// =============================================================================
// TESTS
// =============================================================================
