//! # Domain Services
//!
//! Pure hashing helpers shared by the header codec and the recovery adapter.
//! These functions are deterministic and have no side effects.

use crate::domain::value_objects::{Address, Hash};
use sha3::{Digest, Keccak256};

// =============================================================================
// HASHING
// =============================================================================

/// Keccak-256 of `data`.
#[must_use]
pub fn keccak256(data: &[u8]) -> Hash {
    let digest = Keccak256::digest(data);
    let mut out = [0u8; 32];
    out.copy_from_slice(&digest);
    Hash::new(out)
}

// =============================================================================
// ADDRESS DERIVATION
// =============================================================================

/// Derives an account address from an uncompressed SEC1 public key.
///
/// Address = keccak256(x || y)\[12:\]. The `0x04` tag byte is skipped when
/// present. Returns `None` for any other length.
#[must_use]
pub fn address_from_public_key(public_key: &[u8]) -> Option<Address> {
    let coordinates = match public_key.len() {
        65 if public_key[0] == 0x04 => &public_key[1..],
        64 => public_key,
        _ => return None,
    };

    let hash = keccak256(coordinates);
    Address::from_slice(&hash.as_bytes()[12..])
}

// =============================================================================
// TESTS
// =============================================================================
