//! # Header Records
//!
//! Decoding and signing-payload reconstruction for serialized block headers
//! submitted as double-sign evidence.
//!
//! A record is the RLP list of the 15 consensus header fields:
//!
//! | # | Field | Encoding |
//! |---|-------|----------|
//! | 0 | parent hash | 32 bytes |
//! | 1 | uncle hash | 32 bytes |
//! | 2 | coinbase | 20 bytes |
//! | 3 | state root | 32 bytes |
//! | 4 | transactions root | 32 bytes |
//! | 5 | receipts root | 32 bytes |
//! | 6 | logs bloom | 256 bytes |
//! | 7 | difficulty | canonical integer, at most 32 bytes |
//! | 8 | number | canonical integer, at most 32 bytes |
//! | 9 | gas limit | u64 |
//! | 10 | gas used | u64 |
//! | 11 | timestamp | u64 |
//! | 12 | extra-data | bytes, sealed (last 65 bytes = `r \|\| s \|\| v`) |
//! | 13 | mix digest | 32 bytes |
//! | 14 | nonce | 8 bytes |
//!
//! The producer signs `keccak256(rlp([chain_id, ..fields]))` with the seal
//! stripped from extra-data.
//!
//! Evidence submitted to the precompile arrives as an ABI `BlockHeader`
//! tuple instead (see `evm::precompiles::interface`); both forms decode to a
//! [`HeaderRecord`].

use crate::domain::services::keccak256;
use crate::domain::value_objects::{Address, Bytes, Hash, Seal, U256};
use crate::errors::HeaderError;
use rlp::{Rlp, RlpStream};

/// Number of fields in a header record.
pub const HEADER_FIELD_COUNT: usize = 15;

/// Length of the logs bloom in bytes.
pub const BLOOM_LEN: usize = 256;

/// Length of the header nonce in bytes.
pub const NONCE_LEN: usize = 8;

/// A decoded block header.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HeaderRecord {
    /// Hash of the parent block.
    pub parent_hash: Hash,
    /// Hash of the uncle list.
    pub uncle_hash: Hash,
    /// Fee recipient.
    pub coinbase: Address,
    /// State trie root.
    pub state_root: Hash,
    /// Transaction trie root.
    pub transactions_root: Hash,
    /// Receipt trie root.
    pub receipts_root: Hash,
    /// Logs bloom ([`BLOOM_LEN`] bytes).
    pub logs_bloom: Vec<u8>,
    /// Block difficulty.
    pub difficulty: U256,
    /// Block number.
    pub number: U256,
    /// Gas limit.
    pub gas_limit: u64,
    /// Gas used.
    pub gas_used: u64,
    /// Unix timestamp.
    pub timestamp: u64,
    /// Extra-data including the trailing producer seal.
    pub extra_data: Bytes,
    /// Mix digest.
    pub mix_digest: Hash,
    /// Header nonce.
    pub nonce: [u8; NONCE_LEN],
}

impl HeaderRecord {
    /// Decodes a serialized header record.
    ///
    /// # Errors
    ///
    /// Returns a [`HeaderError`] when the bytes are not exactly one RLP list
    /// of [`HEADER_FIELD_COUNT`] well-formed fields, or when extra-data is too
    /// short to hold a seal.
    pub fn decode(bytes: &[u8]) -> Result<Self, HeaderError> {
        let rlp = Rlp::new(bytes);
        if !rlp.is_list() {
            return Err(HeaderError::Rlp("header record is not a list".to_string()));
        }

        let info = rlp.payload_info()?;
        let encoded_len = info.header_len + info.value_len;
        if encoded_len < bytes.len() {
            return Err(HeaderError::TrailingBytes(bytes.len() - encoded_len));
        }

        let item_count = rlp.item_count()?;
        if item_count != HEADER_FIELD_COUNT {
            return Err(HeaderError::UnexpectedFieldCount {
                expected: HEADER_FIELD_COUNT,
                actual: item_count,
            });
        }

        let header = Self {
            parent_hash: decode_hash(&rlp, 0, "parentHash")?,
            uncle_hash: decode_hash(&rlp, 1, "uncleHash")?,
            coinbase: decode_address(&rlp, 2, "coinbase")?,
            state_root: decode_hash(&rlp, 3, "stateRoot")?,
            transactions_root: decode_hash(&rlp, 4, "transactionsRoot")?,
            receipts_root: decode_hash(&rlp, 5, "receiptsRoot")?,
            logs_bloom: decode_fixed(&rlp, 6, "logsBloom", BLOOM_LEN)?,
            difficulty: decode_u256(&rlp, 7, "difficulty")?,
            number: decode_u256(&rlp, 8, "number")?,
            gas_limit: decode_u64(&rlp, 9)?,
            gas_used: decode_u64(&rlp, 10)?,
            timestamp: decode_u64(&rlp, 11)?,
            extra_data: Bytes(decode_bytes(&rlp, 12)?),
            mix_digest: decode_hash(&rlp, 13, "mixDigest")?,
            nonce: decode_nonce(&rlp, 14)?,
        };

        // Checked at decode time so every decoded record carries a seal.
        header.unsealed_extra()?;
        Ok(header)
    }

    /// Encodes the record back into its RLP form.
    #[must_use]
    pub fn encode(&self) -> Vec<u8> {
        let mut stream = RlpStream::new_list(HEADER_FIELD_COUNT);
        self.append_fields(&mut stream, self.extra_data.as_slice());
        stream.out().to_vec()
    }

    /// Extra-data with the trailing seal removed.
    ///
    /// # Errors
    ///
    /// Returns [`HeaderError::ExtraDataTooShort`] if extra-data is shorter
    /// than [`Seal::LEN`].
    pub fn unsealed_extra(&self) -> Result<&[u8], HeaderError> {
        let len = self.extra_data.len();
        if len < Seal::LEN {
            return Err(HeaderError::ExtraDataTooShort {
                len,
                required: Seal::LEN,
            });
        }
        Ok(&self.extra_data.as_slice()[..len - Seal::LEN])
    }

    /// The producer seal carried at the end of extra-data.
    ///
    /// # Errors
    ///
    /// Returns [`HeaderError::ExtraDataTooShort`] if there is no room for a
    /// seal.
    pub fn seal(&self) -> Result<Seal, HeaderError> {
        let unsealed = self.unsealed_extra()?.len();
        Seal::from_slice(&self.extra_data.as_slice()[unsealed..]).ok_or(
            HeaderError::ExtraDataTooShort {
                len: self.extra_data.len(),
                required: Seal::LEN,
            },
        )
    }

    /// Hash the producer signed for this header on `chain_id`.
    ///
    /// # Errors
    ///
    /// Returns [`HeaderError::ExtraDataTooShort`] if there is no seal to strip.
    pub fn signing_hash(&self, chain_id: U256) -> Result<Hash, HeaderError> {
        let unsealed = self.unsealed_extra()?;

        let mut stream = RlpStream::new_list(HEADER_FIELD_COUNT + 1);
        append_u256(&mut stream, chain_id);
        self.append_fields(&mut stream, unsealed);

        Ok(keccak256(&stream.out()))
    }

    /// Replaces the trailing seal of extra-data, keeping the vanity prefix.
    ///
    /// Extra-data shorter than a seal is treated as pure vanity and the seal
    /// is appended.
    #[must_use]
    pub fn with_seal(mut self, seal: &Seal) -> Self {
        let mut extra = match self.unsealed_extra() {
            Ok(unsealed) => unsealed.to_vec(),
            Err(_) => self.extra_data.as_slice().to_vec(),
        };
        extra.extend_from_slice(&seal.to_bytes());
        self.extra_data = Bytes(extra);
        self
    }

    fn append_fields(&self, stream: &mut RlpStream, extra_data: &[u8]) {
        stream.append(&self.parent_hash.as_bytes().as_slice());
        stream.append(&self.uncle_hash.as_bytes().as_slice());
        stream.append(&self.coinbase.as_bytes().as_slice());
        stream.append(&self.state_root.as_bytes().as_slice());
        stream.append(&self.transactions_root.as_bytes().as_slice());
        stream.append(&self.receipts_root.as_bytes().as_slice());
        stream.append(&self.logs_bloom.as_slice());
        append_u256(stream, self.difficulty);
        append_u256(stream, self.number);
        stream.append(&self.gas_limit);
        stream.append(&self.gas_used);
        stream.append(&self.timestamp);
        stream.append(&extra_data);
        stream.append(&self.mix_digest.as_bytes().as_slice());
        stream.append(&self.nonce.as_slice());
    }
}

// =============================================================================
// RLP HELPERS
// =============================================================================

fn append_u256(stream: &mut RlpStream, value: U256) {
    let mut buf = [0u8; 32];
    value.to_big_endian(&mut buf);
    let start = buf.iter().position(|&b| b != 0).unwrap_or(32);
    stream.append(&&buf[start..]);
}

fn decode_bytes(rlp: &Rlp, index: usize) -> Result<Vec<u8>, HeaderError> {
    Ok(rlp.at(index)?.as_val::<Vec<u8>>()?)
}

fn decode_u64(rlp: &Rlp, index: usize) -> Result<u64, HeaderError> {
    Ok(rlp.at(index)?.as_val::<u64>()?)
}

fn decode_fixed(
    rlp: &Rlp,
    index: usize,
    field: &'static str,
    expected: usize,
) -> Result<Vec<u8>, HeaderError> {
    let bytes = decode_bytes(rlp, index)?;
    if bytes.len() != expected {
        return Err(HeaderError::InvalidFieldLength {
            field,
            expected,
            actual: bytes.len(),
        });
    }
    Ok(bytes)
}

fn decode_hash(rlp: &Rlp, index: usize, field: &'static str) -> Result<Hash, HeaderError> {
    let bytes = decode_fixed(rlp, index, field, 32)?;
    Hash::from_slice(&bytes).ok_or(HeaderError::InvalidFieldLength {
        field,
        expected: 32,
        actual: bytes.len(),
    })
}

fn decode_address(rlp: &Rlp, index: usize, field: &'static str) -> Result<Address, HeaderError> {
    let bytes = decode_fixed(rlp, index, field, Address::LEN)?;
    Address::from_slice(&bytes).ok_or(HeaderError::InvalidFieldLength {
        field,
        expected: Address::LEN,
        actual: bytes.len(),
    })
}

fn decode_nonce(rlp: &Rlp, index: usize) -> Result<[u8; NONCE_LEN], HeaderError> {
    let bytes = decode_fixed(rlp, index, "nonce", NONCE_LEN)?;
    let mut nonce = [0u8; NONCE_LEN];
    nonce.copy_from_slice(&bytes);
    Ok(nonce)
}

fn decode_u256(rlp: &Rlp, index: usize, field: &'static str) -> Result<U256, HeaderError> {
    let bytes = decode_bytes(rlp, index)?;
    if bytes.len() > 32 {
        return Err(HeaderError::InvalidFieldLength {
            field,
            expected: 32,
            actual: bytes.len(),
        });
    }
    if bytes.first() == Some(&0) {
        return Err(HeaderError::Rlp(format!("non-canonical integer in {field}")));
    }
    Ok(U256::from_big_endian(&bytes))
}

// =============================================================================
// TESTS
// =============================================================================
