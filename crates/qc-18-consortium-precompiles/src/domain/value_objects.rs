//! # Value Objects
//!
//! Fixed-width byte primitives used by the election and the header codec.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub use primitive_types::U256;

// =============================================================================
// ADDRESS
// =============================================================================

/// A 20-byte account address.
///
/// Ordering is byte-lexicographic, which equals the ordering of the address
/// read as a big-endian integer. The stake ordering relies on this for its
/// equal-weight tie-break.
#[derive(
    Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub struct Address(pub [u8; 20]);

impl Address {
    /// `0x00…00`, the unset address.
    pub const ZERO: Self = Self([0; 20]);

    /// Width in bytes.
    pub const LEN: usize = 20;

    /// Wraps raw bytes.
    #[must_use]
    pub const fn new(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }

    /// `None` unless `slice` is exactly [`Self::LEN`] bytes.
    #[must_use]
    pub fn from_slice(slice: &[u8]) -> Option<Self> {
        <[u8; 20]>::try_from(slice).ok().map(Self)
    }

    /// Address whose low eight bytes hold `value` big-endian.
    ///
    /// `Address::from_low_u64_be(0x66)` is `0x0000...0066`.
    #[must_use]
    pub fn from_low_u64_be(value: u64) -> Self {
        let mut bytes = [0u8; Self::LEN];
        bytes[Self::LEN - 8..].copy_from_slice(&value.to_be_bytes());
        Self(bytes)
    }

    /// Raw bytes.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }

    /// True for [`Self::ZERO`].
    #[must_use]
    pub fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

/// Abbreviated as `0x0000…0066` for log lines.
impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "0x{}…{}",
            hex::encode(&self.0[..2]),
            hex::encode(&self.0[Self::LEN - 2..])
        )
    }
}

/// Failure to parse a hex address.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid address: {0}")]
pub struct ParseAddressError(pub String);

impl FromStr for Address {
    type Err = ParseAddressError;

    /// Accepts 40 hex digits with an optional `0x` prefix.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let digits = s
            .strip_prefix("0x")
            .or_else(|| s.strip_prefix("0X"))
            .unwrap_or(s);
        let bytes = hex::decode(digits).map_err(|e| ParseAddressError(e.to_string()))?;
        Self::from_slice(&bytes).ok_or_else(|| {
            ParseAddressError(format!("expected {} bytes, got {}", Self::LEN, bytes.len()))
        })
    }
}

// =============================================================================
// HASH
// =============================================================================

/// A 32-byte Keccak-256 digest.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Hash(pub [u8; 32]);

impl Hash {
    /// All-zero digest.
    pub const ZERO: Self = Self([0; 32]);

    /// Wraps raw bytes.
    #[must_use]
    pub const fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// `None` unless `slice` is exactly 32 bytes.
    #[must_use]
    pub fn from_slice(slice: &[u8]) -> Option<Self> {
        <[u8; 32]>::try_from(slice).ok().map(Self)
    }

    /// Raw bytes.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl fmt::Debug for Hash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl fmt::Display for Hash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}…{}", hex::encode(&self.0[..4]), hex::encode(&self.0[28..]))
    }
}

// =============================================================================
// BYTES
// =============================================================================

/// Owned variable-length byte string (header extra-data, return data).
#[derive(Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Bytes(pub Vec<u8>);

impl Bytes {
    /// Unwraps the buffer.
    #[must_use]
    pub fn into_vec(self) -> Vec<u8> {
        self.0
    }

    /// Borrowed view.
    #[must_use]
    pub fn as_slice(&self) -> &[u8] {
        &self.0
    }

    /// Length in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True for a zero-length buffer.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for Bytes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0.get(..8) {
            Some(head) if self.0.len() > 8 => {
                write!(f, "0x{}..({} bytes)", hex::encode(head), self.0.len())
            }
            _ => write!(f, "0x{}", hex::encode(&self.0)),
        }
    }
}

// =============================================================================
// SEAL
// =============================================================================

/// Producer seal appended to a header's extra-data: `r || s || v`.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct Seal {
    /// Signature `r` scalar, big-endian.
    pub r: [u8; 32],
    /// Signature `s` scalar, big-endian.
    pub s: [u8; 32],
    /// Recovery id; only 0 and 1 recover.
    pub v: u8,
}

impl Seal {
    /// Encoded seal length in bytes.
    pub const LEN: usize = 65;

    /// Assembles a seal from its parts.
    #[must_use]
    pub const fn new(r: [u8; 32], s: [u8; 32], v: u8) -> Self {
        Self { r, s, v }
    }

    /// Splits exactly 65 bytes into `r`, `s`, `v`.
    #[must_use]
    pub fn from_slice(slice: &[u8]) -> Option<Self> {
        let bytes = <&[u8; 65]>::try_from(slice).ok()?;
        let (r, rest) = bytes.split_at(32);
        let (s, v) = rest.split_at(32);
        Some(Self {
            r: r.try_into().ok()?,
            s: s.try_into().ok()?,
            v: v[0],
        })
    }

    /// The 65-byte wire form.
    #[must_use]
    pub fn to_bytes(&self) -> [u8; 65] {
        let mut out = [0u8; Self::LEN];
        out[..32].copy_from_slice(&self.r);
        out[32..64].copy_from_slice(&self.s);
        out[64] = self.v;
        out
    }
}

// =============================================================================
// TESTS
// =============================================================================
