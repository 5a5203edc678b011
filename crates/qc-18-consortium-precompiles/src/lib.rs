//! # QC-18 Consortium Precompiles - Validator Election & Slashing Evidence
//!
//! **Subsystem ID:** 18
//! **Status:** Production-Ready
//!
//! ## Purpose
//!
//! Native system contracts for a proof-of-authority consortium chain. Given
//! candidate stakes and trust flags, they elect the active validator set;
//! given two sealed header records, they decide whether one producer signed
//! two different blocks at the same height.
//!
//! ## Precompiles
//!
//! | Address | Method | Authorized Caller |
//! |---------|--------|-------------------|
//! | `0x…66` | `sortValidators(address[],uint256[])`, `sortValidators()` | Consortium system contract |
//! | `0x…67` | `validatingDoubleSignProof(bytes,bytes)` | Consortium system contract |
//! | `0x…68` | `pickValidatorSet(address[],uint256[],uint256[],uint256,uint256)`, `pickValidatorSet()` | Consortium system contract |
//!
//! The system contracts are the configured validator-set, slash-indicator
//! and staking contracts. All three precompiles are read-only and only run
//! inside a static call. Calldata layouts are declared with `sol!` in
//! `evm/precompiles/interface.rs`.
//!
//! ## Domain Invariants
//!
//! | Invariant | Enforcement Location |
//! |-----------|---------------------|
//! | Output length is `min(target, candidates)` | `domain/invariants.rs` - `check_truncation_invariant()` |
//! | Trusted prefix covers `min(quota, target, trusted)` slots | `domain/invariants.rs` - `check_prefix_invariant()` |
//! | Election is a permutation before truncation | `domain/invariants.rs` - `check_completeness_invariant()` |
//! | Prefix and suffix each follow stake order | `domain/invariants.rs` - `check_residual_order_invariant()` |
//!
//! ## Safety Limits
//!
//! | Limit | Default | Purpose |
//! |-------|---------|---------|
//! | `max_candidates` | 1024 | Bound sort cost per call |
//! | `max_header_size` | 64 KB | Bound decode cost per call |
//!
//! ## Outbound Dependencies
//!
//! | Trait | Default Adapter | Purpose |
//! |-------|-----------------|---------|
//! | `SignerRecovery` | `K256SignerRecovery` | Recover a seal's producer |
//! | `CandidateRegistry` | `InMemoryCandidateRegistry` | Candidates for zero-argument calls |
//!
//! ## Usage Example
//!
//! ```ignore
//! use qc_18_consortium_precompiles::prelude::*;
//!
//! let (service, registry) = create_test_service(ServiceConfig::from_env());
//! let context = CallContext::static_call(service.config().validator_set_contract, U256::from(2020));
//! let calldata = PickRegisteredValidatorSetCall {}.abi_encode();
//!
//! if let Some(result) = service.execute(PICK_VALIDATOR_SET_ADDRESS, &context, &calldata) {
//!     let output = result?;
//!     let elected = PickValidatorSetCall::abi_decode_returns(output.output.as_slice(), true)?;
//!     println!("Elected: {:?}", elected.validators);
//! }
//! ```

// Crate-level lints
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::similar_names)]

// =============================================================================
// MODULES
// =============================================================================

pub mod adapters;
pub mod domain;
pub mod errors;
pub mod evm;
pub mod ports;
pub mod service;

// =============================================================================
// PRELUDE
// =============================================================================

/// Convenient re-exports for common usage.
pub mod prelude {
    // Domain entities
    pub use crate::domain::entities::{
        CallContext, Candidate, CandidatePool, ElectionParameters, ValidatorSet,
    };

    // Value objects
    pub use crate::domain::value_objects::{Address, Bytes, Hash, Seal, U256};

    // Domain services
    pub use crate::domain::election::arrange_validator_set;
    pub use crate::domain::equivocation::{check_equivocation, EquivocationVerdict, RejectReason};
    pub use crate::domain::header::HeaderRecord;
    pub use crate::domain::ordering::stake_order;
    pub use crate::domain::services::keccak256;

    // Invariants
    pub use crate::domain::invariants::check_all_invariants;

    // Ports
    pub use crate::ports::inbound::ConsortiumPrecompileApi;
    pub use crate::ports::outbound::{CandidateRegistry, RegistrySnapshot, SignerRecovery};

    // Errors
    pub use crate::errors::{
        ConfigError, ElectionError, HeaderError, PrecompileError, RegistryError,
    };

    // EVM boundary
    pub use crate::evm::precompiles::interface::{
        decode_header, encode_header, PickRegisteredValidatorSetCall, PickValidatorSetCall,
        SortRegisteredValidatorsCall, SortValidatorsCall, ValidatingDoubleSignProofCall,
    };
    pub use crate::evm::{
        execute_precompile, is_consortium_precompile, PrecompileOutput,
        PICK_VALIDATOR_SET_ADDRESS, VALIDATOR_SORTING_ADDRESS, VERIFY_DOUBLE_SIGN_ADDRESS,
    };

    // Adapters
    pub use crate::adapters::{InMemoryCandidateRegistry, K256SignerRecovery};

    // Service
    pub use crate::service::{create_test_service, PrecompileService, ServiceConfig, ServiceStats};
}

// =============================================================================
// CRATE INFO
// =============================================================================

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Subsystem ID.
pub const SUBSYSTEM_ID: u8 = 18;

/// Subsystem name.
pub const SUBSYSTEM_NAME: &str = "Consortium Precompiles";

// =============================================================================
// TESTS
// =============================================================================
