//! # Equivocation Verification
//!
//! Decides whether two serialized headers prove that one producer sealed two
//! different blocks at the same height.
//!
//! Signer recovery is injected as a function so this module stays free of
//! cryptographic backends; see `ports::outbound::SignerRecovery`.

use crate::domain::header::HeaderRecord;
use crate::domain::value_objects::{Address, Hash, Seal, U256};
use crate::errors::HeaderError;

/// Why a pair of headers is not double-sign evidence.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RejectReason {
    /// Both records decode to the same header.
    IdenticalHeaders,
    /// The headers are at different heights.
    DifferentNumbers,
    /// A seal did not yield a signer.
    UnrecoverableSigner,
    /// The headers were sealed by different producers.
    DifferentSigners,
    /// A header tuple names a chain other than the executing one.
    ForeignChain,
}

/// Outcome of checking a header pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EquivocationVerdict {
    /// `signer` sealed two distinct headers at height `number`.
    Proven {
        /// Equivocating producer.
        signer: Address,
        /// Shared block number.
        number: U256,
    },
    /// The pair is well-formed but proves nothing.
    Rejected(RejectReason),
}

impl EquivocationVerdict {
    /// Returns true if the pair proves a double-sign.
    #[must_use]
    pub fn is_proven(&self) -> bool {
        matches!(self, Self::Proven { .. })
    }
}

/// Checks two serialized header records for equivocation.
///
/// `recover` maps a signing hash and seal to the producer address, or `None`
/// when the seal is invalid.
///
/// # Errors
///
/// Returns a [`HeaderError`] if either record fails to decode. A pair that
/// decodes but proves nothing is `Ok` with a [`EquivocationVerdict::Rejected`].
pub fn check_equivocation<F>(
    chain_id: U256,
    first: &[u8],
    second: &[u8],
    recover: F,
) -> Result<EquivocationVerdict, HeaderError>
where
    F: Fn(&Hash, &Seal) -> Option<Address>,
{
    let first = HeaderRecord::decode(first)?;
    let second = HeaderRecord::decode(second)?;
    judge(chain_id, &first, &second, recover)
}

/// Checks two decoded headers for equivocation.
///
/// # Errors
///
/// Returns [`HeaderError::ExtraDataTooShort`] if a header carries no seal.
pub fn judge<F>(
    chain_id: U256,
    first: &HeaderRecord,
    second: &HeaderRecord,
    recover: F,
) -> Result<EquivocationVerdict, HeaderError>
where
    F: Fn(&Hash, &Seal) -> Option<Address>,
{
    if first == second {
        return Ok(EquivocationVerdict::Rejected(RejectReason::IdenticalHeaders));
    }
    if first.number != second.number {
        return Ok(EquivocationVerdict::Rejected(RejectReason::DifferentNumbers));
    }

    let first_signer = recover(&first.signing_hash(chain_id)?, &first.seal()?);
    let second_signer = recover(&second.signing_hash(chain_id)?, &second.seal()?);

    let verdict = match (first_signer, second_signer) {
        (Some(a), Some(b)) if a == b => EquivocationVerdict::Proven {
            signer: a,
            number: first.number,
        },
        (Some(_), Some(_)) => EquivocationVerdict::Rejected(RejectReason::DifferentSigners),
        _ => EquivocationVerdict::Rejected(RejectReason::UnrecoverableSigner),
    };
    Ok(verdict)
}

// =============================================================================
// TESTS
// =============================================================================
