//! # Double-Sign Proof Precompile (0x67)
//!
//! `validatingDoubleSignProof(bytes header1, bytes header2) returns (bool)`
//!
//! Each argument is an ABI-encoded `BlockHeader` tuple. Returns `true` iff
//! both tuples decode, both name the executing chain, both seals recover to
//! the same producer, both headers share a block number, and the headers
//! differ. Malformed tuples revert instead of returning `false`.

use alloy_sol_types::SolCall;

use super::interface::{decode_args, decode_header, split_selector, ValidatingDoubleSignProofCall};
use super::{Precompile, PrecompileEnv, PrecompileOutput, VERIFY_DOUBLE_SIGN_ADDRESS};
use crate::domain::equivocation::{judge, EquivocationVerdict, RejectReason};
use crate::domain::value_objects::Address;
use crate::errors::PrecompileError;
use tracing::{debug, info};

/// Double-sign proof precompile.
#[derive(Clone, Copy, Debug, Default)]
pub struct VerifyDoubleSignProof;

impl VerifyDoubleSignProof {
    fn require_header_size(env: &PrecompileEnv<'_>, header: &[u8]) -> Result<(), PrecompileError> {
        if header.len() > env.config.max_header_size {
            return Err(PrecompileError::HeaderTooLarge {
                size: header.len(),
                max: env.config.max_header_size,
            });
        }
        Ok(())
    }

    fn verdict(env: &PrecompileEnv<'_>, args: &[u8]) -> Result<EquivocationVerdict, PrecompileError> {
        let call = decode_args::<ValidatingDoubleSignProofCall>(args)?;
        Self::require_header_size(env, &call.header1)?;
        Self::require_header_size(env, &call.header2)?;

        let (first_chain, first) = decode_header(&call.header1)?;
        let (second_chain, second) = decode_header(&call.header2)?;

        let chain_id = env.context.chain_id;
        if first_chain != chain_id || second_chain != chain_id {
            return Ok(EquivocationVerdict::Rejected(RejectReason::ForeignChain));
        }

        Ok(judge(chain_id, &first, &second, |hash, seal| {
            env.recovery.recover(hash, seal)
        })?)
    }
}

impl Precompile for VerifyDoubleSignProof {
    fn execute(
        &self,
        env: &PrecompileEnv<'_>,
        input: &[u8],
    ) -> Result<PrecompileOutput, PrecompileError> {
        env.require_static()?;
        env.require_system_caller()?;

        let (selector, args) = split_selector(input)?;
        if selector != ValidatingDoubleSignProofCall::SELECTOR {
            return Err(PrecompileError::UnknownSelector(selector));
        }

        let verdict = Self::verdict(env, args)?;
        match verdict {
            EquivocationVerdict::Proven { signer, number } => {
                info!(signer = %signer, number = %number, "double-sign proof accepted");
            }
            EquivocationVerdict::Rejected(reason) => {
                debug!(?reason, "double-sign proof rejected");
            }
        }

        Ok(PrecompileOutput::new(
            ValidatingDoubleSignProofCall::abi_encode_returns(&(verdict.is_proven(),)),
        ))
    }

    fn address(&self) -> Address {
        VERIFY_DOUBLE_SIGN_ADDRESS
    }
}
