//! # Validator Set Picking Precompile (0x68)
//!
//! Runs the full election (stake ordering, trusted prioritization,
//! truncation).
//!
//! - `pickValidatorSet(address[] candidates, uint256[] weights, uint256[] isTrustedOrganizations,
//!   uint256 maxValidatorNumber, uint256 maxPrioritizedValidatorNumber) returns (address[])`
//! - `pickValidatorSet() returns (address[])` reads the registry snapshot
//!
//! A non-zero trust word marks the candidate as trusted.

use alloy_sol_types::SolCall;

use super::interface::{
    decode_args, from_sol_address, from_sol_uint, split_selector, to_sol_addresses,
    PickRegisteredValidatorSetCall, PickValidatorSetCall,
};
use super::{PICK_VALIDATOR_SET_ADDRESS, Precompile, PrecompileEnv, PrecompileOutput};
use crate::domain::election::arrange_validator_set;
use crate::domain::entities::{CandidatePool, ElectionParameters};
use crate::domain::value_objects::Address;
use crate::errors::PrecompileError;
use tracing::debug;

/// Validator-set picking precompile.
#[derive(Clone, Copy, Debug, Default)]
pub struct PickValidatorSet;

impl PickValidatorSet {
    fn decode_call(
        env: &PrecompileEnv<'_>,
        args: &[u8],
    ) -> Result<(CandidatePool, ElectionParameters), PrecompileError> {
        let call = decode_args::<PickValidatorSetCall>(args)?;
        env.require_candidate_count(call.candidates.len())?;

        let addresses = call.candidates.into_iter().map(from_sol_address).collect();
        let weights = call.weights.into_iter().map(from_sol_uint).collect();
        let trusted = call
            .isTrustedOrganizations
            .into_iter()
            .map(|flag| !flag.is_zero())
            .collect();
        let params = ElectionParameters::from_words(
            from_sol_uint(call.maxValidatorNumber),
            from_sol_uint(call.maxPrioritizedValidatorNumber),
        );

        let pool = CandidatePool::from_parallel(addresses, weights, trusted)?;
        Ok((pool, params))
    }

    fn registered_call(
        env: &PrecompileEnv<'_>,
    ) -> Result<(CandidatePool, ElectionParameters), PrecompileError> {
        let snapshot = env.registry.snapshot()?;
        env.require_candidate_count(snapshot.pool.len())?;
        Ok((snapshot.pool, snapshot.params))
    }
}

impl Precompile for PickValidatorSet {
    fn execute(
        &self,
        env: &PrecompileEnv<'_>,
        input: &[u8],
    ) -> Result<PrecompileOutput, PrecompileError> {
        env.require_static()?;
        env.require_system_caller()?;

        let (selector, args) = split_selector(input)?;
        let (pool, params) = if selector == PickValidatorSetCall::SELECTOR {
            Self::decode_call(env, args)?
        } else if selector == PickRegisteredValidatorSetCall::SELECTOR {
            Self::registered_call(env)?
        } else {
            return Err(PrecompileError::UnknownSelector(selector));
        };

        let set = arrange_validator_set(&pool, params);
        debug!(
            candidates = pool.len(),
            trusted = pool.trusted_count(),
            elected = set.len(),
            prioritized = set.prioritized_count(),
            "picked validator set"
        );

        Ok(PrecompileOutput::new(PickValidatorSetCall::abi_encode_returns(&(
            to_sol_addresses(set.validators()),
        ))))
    }

    fn address(&self) -> Address {
        PICK_VALIDATOR_SET_ADDRESS
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{InMemoryCandidateRegistry, K256SignerRecovery};
    use crate::domain::entities::{CallContext, Candidate};
    use crate::domain::value_objects::U256;
    use crate::evm::precompiles::interface::{to_sol_address, to_sol_uint};
    use crate::ports::outbound::RegistrySnapshot;
    use crate::service::ServiceConfig;

    const VALIDATOR_SET: u64 = 0x1000;
    const SLASH_INDICATOR: u64 = 0x2000;

    fn addr(n: u64) -> Address {
        Address::from_low_u64_be(n)
    }

    fn run_as(
        caller: u64,
        registry: &InMemoryCandidateRegistry,
        input: &[u8],
    ) -> Result<Vec<Address>, PrecompileError> {
        let config = ServiceConfig {
            validator_set_contract: addr(VALIDATOR_SET),
            slash_indicator_contract: addr(SLASH_INDICATOR),
            max_candidates: 32,
            ..ServiceConfig::default()
        };
        let context = CallContext::static_call(addr(caller), U256::one());
        let env = PrecompileEnv {
            context: &context,
            config: &config,
            registry,
            recovery: &K256SignerRecovery,
        };
        let output = PickValidatorSet.execute(&env, input)?;
        let validators = PickValidatorSetCall::abi_decode_returns(output.output.as_slice(), true)
            .map_err(|e| PrecompileError::InvalidInput(e.to_string()))?
            .validators;
        Ok(validators.into_iter().map(from_sol_address).collect())
    }

    fn run(registry: &InMemoryCandidateRegistry, input: &[u8]) -> Result<Vec<Address>, PrecompileError> {
        run_as(VALIDATOR_SET, registry, input)
    }

    fn pick_call(
        addresses: &[Address],
        weights: &[U256],
        trusted: &[U256],
        target: U256,
        quota: U256,
    ) -> Vec<u8> {
        PickValidatorSetCall {
            candidates: addresses.iter().map(to_sol_address).collect(),
            weights: weights.iter().copied().map(to_sol_uint).collect(),
            isTrustedOrganizations: trusted.iter().copied().map(to_sol_uint).collect(),
            maxValidatorNumber: to_sol_uint(target),
            maxPrioritizedValidatorNumber: to_sol_uint(quota),
        }
        .abi_encode()
    }

    fn scenario() -> (Vec<Address>, Vec<U256>) {
        let addresses = (100..=120).map(addr).collect();
        let weights = (1..=21u64).map(|i| U256::from(i * 1_000_000)).collect();
        (addresses, weights)
    }

    #[test]
    fn test_picks_with_trusted_prefix() {
        let (addresses, weights) = scenario();
        let trusted: Vec<U256> = (0..21)
            .map(|i| if (10..=14).contains(&i) { U256::one() } else { U256::zero() })
            .collect();

        let picked = run(
            &InMemoryCandidateRegistry::new(),
            &pick_call(
                &addresses[..15],
                &weights[..15],
                &trusted[..15],
                U256::from(21),
                U256::from(11),
            ),
        )
        .unwrap();

        let expected: Vec<Address> = (100..=114).rev().map(addr).collect();
        assert_eq!(picked, expected);
    }

    #[test]
    fn test_any_nonzero_trust_word_is_trusted() {
        let addresses = vec![addr(1), addr(2), addr(3)];
        let weights = vec![U256::from(30), U256::from(20), U256::from(10)];
        let trusted = vec![U256::zero(), U256::zero(), U256::MAX];

        let picked = run(
            &InMemoryCandidateRegistry::new(),
            &pick_call(&addresses, &weights, &trusted, U256::from(2), U256::one()),
        )
        .unwrap();
        assert_eq!(picked, vec![addr(3), addr(1)]);
    }

    #[test]
    fn test_oversized_bounds_saturate() {
        let (addresses, weights) = scenario();
        let trusted = vec![U256::zero(); 21];
        let input = pick_call(&addresses, &weights, &trusted, U256::MAX, U256::MAX);

        let picked = run(&InMemoryCandidateRegistry::new(), &input).unwrap();
        assert_eq!(picked.len(), 21);
        assert_eq!(picked[0], addr(120));
    }

    #[test]
    fn test_slash_indicator_may_pick() {
        let (addresses, weights) = scenario();
        let trusted = vec![U256::zero(); 21];
        let input = pick_call(&addresses, &weights, &trusted, U256::from(3), U256::zero());

        let picked = run_as(SLASH_INDICATOR, &InMemoryCandidateRegistry::new(), &input).unwrap();
        assert_eq!(picked, vec![addr(120), addr(119), addr(118)]);

        let err = run_as(0x3000, &InMemoryCandidateRegistry::new(), &input).unwrap_err();
        assert_eq!(err, PrecompileError::UnauthorizedCaller(addr(0x3000)));
    }

    #[test]
    fn test_rejects_trust_length_mismatch() {
        let (addresses, weights) = scenario();
        let err = run(
            &InMemoryCandidateRegistry::new(),
            &pick_call(&addresses, &weights, &[U256::one()], U256::from(21), U256::from(11)),
        )
        .unwrap_err();
        assert!(matches!(err, PrecompileError::Election(_)));
    }

    #[test]
    fn test_rejects_too_many_candidates() {
        let addresses: Vec<Address> = (0..33).map(addr).collect();
        let weights = vec![U256::one(); 33];
        let trusted = vec![U256::zero(); 33];

        let err = run(
            &InMemoryCandidateRegistry::new(),
            &pick_call(&addresses, &weights, &trusted, U256::from(21), U256::from(11)),
        )
        .unwrap_err();
        assert_eq!(err, PrecompileError::TooManyCandidates { count: 33, max: 32 });
    }

    #[test]
    fn test_rejects_truncated_calldata() {
        let (addresses, weights) = scenario();
        let input = pick_call(
            &addresses,
            &weights,
            &vec![U256::zero(); 21],
            U256::from(21),
            U256::from(11),
        );

        for cut in [2, 4 + 64, input.len() - 1] {
            let err = run(&InMemoryCandidateRegistry::new(), &input[..cut]).unwrap_err();
            assert!(err.is_input_error(), "cut at {cut}: {err}");
        }
    }

    #[test]
    fn test_registered_variant_uses_snapshot_bounds() {
        let mut candidates: Vec<Candidate> = (0..21u64)
            .map(|i| Candidate::new(addr(100 + i), U256::from((i + 1) * 1_000_000), false))
            .collect();
        for candidate in &mut candidates[16..] {
            candidate.trusted = true;
        }
        let registry = InMemoryCandidateRegistry::with_snapshot(RegistrySnapshot {
            pool: CandidatePool::new(candidates),
            params: ElectionParameters::new(11, 11),
        });

        let picked = run(&registry, &PickRegisteredValidatorSetCall {}.abi_encode()).unwrap();
        let expected: Vec<Address> = (110..=120).rev().map(addr).collect();
        assert_eq!(picked, expected);
    }
}
