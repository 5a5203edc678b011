//! # Precompiled Contracts
//!
//! Consortium system precompiles:
//!
//! | Address | Precompile | Methods |
//! |---------|------------|---------|
//! | `0x…66` | [`ValidatorSorting`] | `sortValidators(address[],uint256[])`, `sortValidators()` |
//! | `0x…67` | [`VerifyDoubleSignProof`] | `validatingDoubleSignProof(bytes,bytes)` |
//! | `0x…68` | [`PickValidatorSet`] | `pickValidatorSet(address[],uint256[],uint256[],uint256,uint256)`, `pickValidatorSet()` |
//!
//! Every call is checked in the same order: static context, caller, selector,
//! argument decoding, resource bounds. Only then does the domain run.
//!
//! Any configured consortium system contract may call any of the three.

pub mod interface;
pub mod pick_validator_set;
pub mod validator_sorting;
pub mod verify_headers;

pub use pick_validator_set::PickValidatorSet;
pub use validator_sorting::ValidatorSorting;
pub use verify_headers::VerifyDoubleSignProof;

use crate::domain::entities::CallContext;
use crate::domain::value_objects::{Address, Bytes};
use crate::errors::PrecompileError;
use crate::ports::outbound::{CandidateRegistry, SignerRecovery};
use crate::service::ServiceConfig;

/// Address of the validator sorting precompile.
pub const VALIDATOR_SORTING_ADDRESS: Address = precompile_address(0x66);

/// Address of the double-sign proof precompile.
pub const VERIFY_DOUBLE_SIGN_ADDRESS: Address = precompile_address(0x67);

/// Address of the validator-set picking precompile.
pub const PICK_VALIDATOR_SET_ADDRESS: Address = precompile_address(0x68);

const fn precompile_address(last: u8) -> Address {
    let mut bytes = [0u8; 20];
    bytes[19] = last;
    Address::new(bytes)
}

/// Returns true if `address` hosts a consortium precompile.
#[must_use]
pub fn is_consortium_precompile(address: &Address) -> bool {
    *address == VALIDATOR_SORTING_ADDRESS
        || *address == VERIFY_DOUBLE_SIGN_ADDRESS
        || *address == PICK_VALIDATOR_SET_ADDRESS
}

/// Precompile execution result.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PrecompileOutput {
    /// ABI-encoded return data.
    pub output: Bytes,
}

impl PrecompileOutput {
    /// Wraps encoded return data.
    #[must_use]
    pub fn new(output: Vec<u8>) -> Self {
        Self {
            output: Bytes(output),
        }
    }
}

/// Everything a precompile may read during one call.
#[derive(Clone, Copy)]
pub struct PrecompileEnv<'a> {
    /// Host-supplied call context.
    pub context: &'a CallContext,
    /// Authorization and resource bounds.
    pub config: &'a ServiceConfig,
    /// Source for the zero-argument variants.
    pub registry: &'a dyn CandidateRegistry,
    /// Seal signer recovery.
    pub recovery: &'a dyn SignerRecovery,
}

impl PrecompileEnv<'_> {
    /// Rejects non-static invocations when static calls are enforced.
    ///
    /// # Errors
    ///
    /// Returns [`PrecompileError::NotStaticCall`].
    pub fn require_static(&self) -> Result<(), PrecompileError> {
        if self.config.enforce_static_call && !self.context.is_static {
            return Err(PrecompileError::NotStaticCall);
        }
        Ok(())
    }

    /// Rejects callers outside the configured system contracts.
    ///
    /// # Errors
    ///
    /// Returns [`PrecompileError::UnauthorizedCaller`].
    pub fn require_system_caller(&self) -> Result<(), PrecompileError> {
        if !self.config.is_system_contract(&self.context.caller) {
            return Err(PrecompileError::UnauthorizedCaller(self.context.caller));
        }
        Ok(())
    }

    /// Rejects candidate counts above the configured bound.
    ///
    /// # Errors
    ///
    /// Returns [`PrecompileError::TooManyCandidates`].
    pub fn require_candidate_count(&self, count: usize) -> Result<(), PrecompileError> {
        if count > self.config.max_candidates {
            return Err(PrecompileError::TooManyCandidates {
                count,
                max: self.config.max_candidates,
            });
        }
        Ok(())
    }
}

/// Trait for precompiled contracts.
pub trait Precompile: Send + Sync {
    /// Execute the precompile with given input.
    ///
    /// # Arguments
    ///
    /// * `env` - Call context, configuration and driven ports
    /// * `input` - Calldata (selector and ABI-encoded arguments)
    ///
    /// # Returns
    ///
    /// * `PrecompileOutput` - ABI-encoded return data
    ///
    /// # Errors
    ///
    /// Any [`PrecompileError`]; the host reverts the call.
    fn execute(&self, env: &PrecompileEnv<'_>, input: &[u8])
        -> Result<PrecompileOutput, PrecompileError>;

    /// Get the address of this precompile.
    fn address(&self) -> Address;
}

/// Check if an address is a consortium precompile and execute it.
#[must_use]
pub fn execute_precompile(
    address: Address,
    env: &PrecompileEnv<'_>,
    input: &[u8],
) -> Option<Result<PrecompileOutput, PrecompileError>> {
    let result = match address {
        a if a == VALIDATOR_SORTING_ADDRESS => ValidatorSorting.execute(env, input),
        a if a == VERIFY_DOUBLE_SIGN_ADDRESS => VerifyDoubleSignProof.execute(env, input),
        a if a == PICK_VALIDATOR_SET_ADDRESS => PickValidatorSet.execute(env, input),
        _ => return None,
    };

    Some(result)
}

// =============================================================================
// TESTS
// =============================================================================
