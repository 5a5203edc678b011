//! # Validator Sorting Precompile (0x66)
//!
//! Orders candidates by descending stake without any trust handling.
//!
//! - `sortValidators(address[] validators, uint256[] weights) returns (address[])`
//! - `sortValidators() returns (address[])` reads the registry snapshot

use alloy_sol_types::SolCall;

use super::interface::{
    decode_args, from_sol_address, from_sol_uint, split_selector, to_sol_addresses,
    SortRegisteredValidatorsCall, SortValidatorsCall,
};
use super::{Precompile, PrecompileEnv, PrecompileOutput, VALIDATOR_SORTING_ADDRESS};
use crate::domain::entities::CandidatePool;
use crate::domain::ordering::stake_order;
use crate::domain::value_objects::Address;
use crate::errors::PrecompileError;
use tracing::debug;

/// Validator sorting precompile.
#[derive(Clone, Copy, Debug, Default)]
pub struct ValidatorSorting;

impl ValidatorSorting {
    fn decode_pool(env: &PrecompileEnv<'_>, args: &[u8]) -> Result<CandidatePool, PrecompileError> {
        let call = decode_args::<SortValidatorsCall>(args)?;
        env.require_candidate_count(call.validators.len())?;

        let addresses = call.validators.into_iter().map(from_sol_address).collect();
        let weights = call.weights.into_iter().map(from_sol_uint).collect();
        Ok(CandidatePool::from_weighted(addresses, weights)?)
    }

    fn registered_pool(env: &PrecompileEnv<'_>) -> Result<CandidatePool, PrecompileError> {
        let snapshot = env.registry.snapshot()?;
        env.require_candidate_count(snapshot.pool.len())?;
        Ok(snapshot.pool)
    }
}

impl Precompile for ValidatorSorting {
    fn execute(
        &self,
        env: &PrecompileEnv<'_>,
        input: &[u8],
    ) -> Result<PrecompileOutput, PrecompileError> {
        env.require_static()?;
        env.require_system_caller()?;

        let (selector, args) = split_selector(input)?;
        let pool = if selector == SortValidatorsCall::SELECTOR {
            Self::decode_pool(env, args)?
        } else if selector == SortRegisteredValidatorsCall::SELECTOR {
            Self::registered_pool(env)?
        } else {
            return Err(PrecompileError::UnknownSelector(selector));
        };

        let sorted = pool.addresses_of(&stake_order(&pool));
        debug!(candidates = sorted.len(), "sorted validators");

        Ok(PrecompileOutput::new(SortValidatorsCall::abi_encode_returns(&(
            to_sol_addresses(&sorted),
        ))))
    }

    fn address(&self) -> Address {
        VALIDATOR_SORTING_ADDRESS
    }
}
