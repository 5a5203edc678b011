//! # Solidity Interfaces
//!
//! Calldata and return layouts of the consortium precompiles, declared with
//! `sol!`. Selectors come from the generated call types.
//!
//! Header evidence travels as the ABI parameter encoding of [`BlockHeader`],
//! the same tuple the slash-indicator contract builds on chain. The producer
//! still signs the RLP form (see `domain::header`).

use alloy_primitives::{Address as SolAddress, B256, U256 as SolUint};
use alloy_sol_types::{sol, SolCall, SolType};

use crate::domain::header::{HeaderRecord, BLOOM_LEN};
use crate::domain::value_objects::{Address, Bytes, Hash, U256};
use crate::errors::{HeaderError, PrecompileError};

sol! {
    /// Validator sorting precompile (`0x…66`).
    #[derive(Debug)]
    interface IValidatorSorting {
        function sortValidators(address[] calldata validators, uint256[] calldata weights)
            external view returns (address[] memory sorted);
        function sortValidators() external view returns (address[] memory sorted);
    }

    /// Validator-set picking precompile (`0x…68`).
    #[derive(Debug)]
    interface IPickValidatorSet {
        function pickValidatorSet(
            address[] calldata candidates,
            uint256[] calldata weights,
            uint256[] calldata isTrustedOrganizations,
            uint256 maxValidatorNumber,
            uint256 maxPrioritizedValidatorNumber
        ) external view returns (address[] memory validators);
        function pickValidatorSet() external view returns (address[] memory validators);
    }

    /// Double-sign proof precompile (`0x…67`).
    #[derive(Debug)]
    interface IDoubleSignProof {
        function validatingDoubleSignProof(bytes calldata header1, bytes calldata header2)
            external view returns (bool proven);
    }

    /// Header tuple submitted as double-sign evidence.
    struct BlockHeader {
        uint256 chainId;
        bytes32 parentHash;
        bytes32 ommersHash;
        address coinbase;
        bytes32 stateRoot;
        bytes32 transactionsRoot;
        bytes32 receiptsRoot;
        uint8[256] logsBloom;
        uint256 difficulty;
        uint256 number;
        uint64 gasLimit;
        uint64 gasUsed;
        uint64 timestamp;
        bytes extraData;
        bytes32 mixHash;
        uint64 nonce;
    }
}

pub use IDoubleSignProof::validatingDoubleSignProofCall as ValidatingDoubleSignProofCall;
pub use IPickValidatorSet::{
    pickValidatorSet_0Call as PickValidatorSetCall,
    pickValidatorSet_1Call as PickRegisteredValidatorSetCall,
};
pub use IValidatorSorting::{
    sortValidators_0Call as SortValidatorsCall, sortValidators_1Call as SortRegisteredValidatorsCall,
};

/// Selector length in bytes.
pub const SELECTOR_LEN: usize = 4;

/// Splits calldata into its selector and argument block.
///
/// # Errors
///
/// Returns [`PrecompileError::InvalidInputLength`] if `input` is shorter than
/// a selector.
pub fn split_selector(input: &[u8]) -> Result<([u8; SELECTOR_LEN], &[u8]), PrecompileError> {
    match input.split_first_chunk::<SELECTOR_LEN>() {
        Some((selector, args)) => Ok((*selector, args)),
        None => Err(PrecompileError::InvalidInputLength {
            expected: SELECTOR_LEN,
            actual: input.len(),
        }),
    }
}

/// Decodes the argument block of `C`.
///
/// Upper bytes of address words are not checked.
///
/// # Errors
///
/// Returns [`PrecompileError::InvalidInput`] when the arguments do not match
/// the layout of `C`.
pub fn decode_args<C: SolCall>(args: &[u8]) -> Result<C, PrecompileError> {
    C::abi_decode_raw(args, false)
        .map_err(|e| PrecompileError::InvalidInput(format!("{}: {e}", C::SIGNATURE)))
}

// =============================================================================
// CONVERSIONS
// =============================================================================

/// Domain address to ABI address.
#[must_use]
pub fn to_sol_address(address: &Address) -> SolAddress {
    SolAddress::new(*address.as_bytes())
}

/// ABI address to domain address.
#[must_use]
pub fn from_sol_address(address: SolAddress) -> Address {
    Address::new(*address.0)
}

/// Domain addresses to ABI addresses.
#[must_use]
pub fn to_sol_addresses(addresses: &[Address]) -> Vec<SolAddress> {
    addresses.iter().map(to_sol_address).collect()
}

/// Domain integer to ABI integer.
#[must_use]
pub fn to_sol_uint(value: U256) -> SolUint {
    let mut word = [0u8; 32];
    value.to_big_endian(&mut word);
    SolUint::from_be_bytes(word)
}

/// ABI integer to domain integer.
#[must_use]
pub fn from_sol_uint(value: SolUint) -> U256 {
    U256::from_big_endian(&value.to_be_bytes::<32>())
}

// =============================================================================
// HEADER EVIDENCE
// =============================================================================

/// Decodes one header argument of `validatingDoubleSignProof`.
///
/// Returns the chain id carried in the tuple along with the record.
///
/// # Errors
///
/// Returns [`HeaderError::Abi`] for a malformed tuple and
/// [`HeaderError::ExtraDataTooShort`] when extra-data cannot hold a seal.
pub fn decode_header(bytes: &[u8]) -> Result<(U256, HeaderRecord), HeaderError> {
    let header = <BlockHeader as SolType>::abi_decode_params(bytes, false)
        .map_err(|e| HeaderError::Abi(e.to_string()))?;

    let record = HeaderRecord {
        parent_hash: Hash::new(header.parentHash.0),
        uncle_hash: Hash::new(header.ommersHash.0),
        coinbase: from_sol_address(header.coinbase),
        state_root: Hash::new(header.stateRoot.0),
        transactions_root: Hash::new(header.transactionsRoot.0),
        receipts_root: Hash::new(header.receiptsRoot.0),
        logs_bloom: header.logsBloom.to_vec(),
        difficulty: from_sol_uint(header.difficulty),
        number: from_sol_uint(header.number),
        gas_limit: header.gasLimit,
        gas_used: header.gasUsed,
        timestamp: header.timestamp,
        extra_data: Bytes(header.extraData.to_vec()),
        mix_digest: Hash::new(header.mixHash.0),
        nonce: header.nonce.to_be_bytes(),
    };
    record.unsealed_extra()?;

    Ok((from_sol_uint(header.chainId), record))
}

/// Encodes `record` as the header tuple bound to `chain_id`.
///
/// A logs bloom shorter than [`BLOOM_LEN`] is zero-padded.
#[must_use]
pub fn encode_header(record: &HeaderRecord, chain_id: U256) -> Vec<u8> {
    let mut logs_bloom = [0u8; BLOOM_LEN];
    let len = record.logs_bloom.len().min(BLOOM_LEN);
    logs_bloom[..len].copy_from_slice(&record.logs_bloom[..len]);

    let header = BlockHeader {
        chainId: to_sol_uint(chain_id),
        parentHash: B256::new(*record.parent_hash.as_bytes()),
        ommersHash: B256::new(*record.uncle_hash.as_bytes()),
        coinbase: to_sol_address(&record.coinbase),
        stateRoot: B256::new(*record.state_root.as_bytes()),
        transactionsRoot: B256::new(*record.transactions_root.as_bytes()),
        receiptsRoot: B256::new(*record.receipts_root.as_bytes()),
        logsBloom: logs_bloom,
        difficulty: to_sol_uint(record.difficulty),
        number: to_sol_uint(record.number),
        gasLimit: record.gas_limit,
        gasUsed: record.gas_used,
        timestamp: record.timestamp,
        extraData: record.extra_data.as_slice().to_vec().into(),
        mixHash: B256::new(*record.mix_digest.as_bytes()),
        nonce: u64::from_be_bytes(record.nonce),
    };

    <BlockHeader as SolType>::abi_encode_params(&header)
}

// =============================================================================
// TESTS
// =============================================================================
