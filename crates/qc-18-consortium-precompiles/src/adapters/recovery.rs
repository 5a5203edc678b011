//! # Seal Recovery Adapter
//!
//! secp256k1 implementation of [`SignerRecovery`] backed by `k256`.

use crate::domain::services::address_from_public_key;
use crate::domain::value_objects::{Address, Hash, Seal};
use crate::ports::outbound::SignerRecovery;
use k256::ecdsa::{RecoveryId, Signature, VerifyingKey};
use tracing::trace;

/// Recovers seal signers with `k256`.
///
/// Accepts `v` in `{0, 1}`. High-s seals are normalized to low-s with the
/// recovery id parity flipped, matching secp256k1 `ecrecover`.
#[derive(Clone, Copy, Debug, Default)]
pub struct K256SignerRecovery;

impl K256SignerRecovery {
    /// Creates the adapter.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl SignerRecovery for K256SignerRecovery {
    fn recover(&self, hash: &Hash, seal: &Seal) -> Option<Address> {
        if seal.v > 1 {
            trace!(v = seal.v, "seal recovery id out of range");
            return None;
        }

        let mut sig_bytes = [0u8; 64];
        sig_bytes[..32].copy_from_slice(&seal.r);
        sig_bytes[32..].copy_from_slice(&seal.s);
        let signature = Signature::from_slice(&sig_bytes).ok()?;

        // k256 only verifies low-s; negating s mirrors R across the x-axis.
        let (signature, v) = match signature.normalize_s() {
            Some(normalized) => (normalized, seal.v ^ 1),
            None => (signature, seal.v),
        };
        let recovery_id = RecoveryId::from_byte(v)?;

        let key = match VerifyingKey::recover_from_prehash(hash.as_bytes(), &signature, recovery_id)
        {
            Ok(key) => key,
            Err(_) => {
                trace!(hash = %hash, "seal recovery failed");
                return None;
            }
        };

        address_from_public_key(key.to_encoded_point(false).as_bytes())
    }
}

// =============================================================================
// TESTS
// =============================================================================
