//! # Error Types
//!
//! All error types for validator election, header decoding and the
//! precompile call boundary.

use crate::domain::value_objects::Address;
use thiserror::Error;

// =============================================================================
// ELECTION ERRORS
// =============================================================================

/// Errors raised while assembling a candidate pool.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ElectionError {
    /// Parallel candidate sequences have different lengths.
    #[error(
        "candidate length mismatch: {addresses} addresses, {weights} weights, {trust_flags} trust flags"
    )]
    LengthMismatch {
        /// Number of addresses supplied.
        addresses: usize,
        /// Number of weights supplied.
        weights: usize,
        /// Number of trust flags supplied.
        trust_flags: usize,
    },
}

// =============================================================================
// HEADER ERRORS
// =============================================================================

/// Errors from decoding a serialized block header record.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum HeaderError {
    /// Structurally invalid RLP.
    #[error("malformed header rlp: {0}")]
    Rlp(String),

    /// The record is not a list of the expected number of fields.
    #[error("unexpected header field count: expected {expected}, got {actual}")]
    UnexpectedFieldCount {
        /// Expected number of fields.
        expected: usize,
        /// Number of fields found.
        actual: usize,
    },

    /// Bytes follow the encoded record.
    #[error("trailing bytes after header record: {0}")]
    TrailingBytes(usize),

    /// A fixed-width field has the wrong length.
    #[error("invalid length for header field {field}: expected {expected}, got {actual}")]
    InvalidFieldLength {
        /// Field name.
        field: &'static str,
        /// Expected length in bytes.
        expected: usize,
        /// Actual length in bytes.
        actual: usize,
    },

    /// The ABI header tuple does not decode.
    #[error("malformed header tuple: {0}")]
    Abi(String),

    /// Extra-data cannot hold a producer seal.
    #[error("extra-data too short for seal: {len} < {required} bytes")]
    ExtraDataTooShort {
        /// Extra-data length.
        len: usize,
        /// Minimum length.
        required: usize,
    },
}

impl From<rlp::DecoderError> for HeaderError {
    fn from(err: rlp::DecoderError) -> Self {
        Self::Rlp(err.to_string())
    }
}

// =============================================================================
// REGISTRY ERRORS
// =============================================================================

/// Errors from the candidate registry port.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// No candidate snapshot is available yet.
    #[error("candidate registry has no snapshot")]
    Unavailable,

    /// The registry returned inconsistent data.
    #[error("candidate registry corrupted: {0}")]
    Corrupted(String),
}

// =============================================================================
// PRECOMPILE ERRORS
// =============================================================================

/// Errors from precompiled contract execution.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PrecompileError {
    /// Invalid input length.
    #[error("invalid input length: expected {expected}, got {actual}")]
    InvalidInputLength {
        /// Minimum expected length.
        expected: usize,
        /// Actual length.
        actual: usize,
    },

    /// Invalid input data.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Selector not served by this precompile.
    #[error("unknown selector: 0x{}", hex::encode(.0))]
    UnknownSelector([u8; 4]),

    /// Caller is not one of the configured system contracts.
    #[error("unauthorized caller {0:?}: not a consortium system contract")]
    UnauthorizedCaller(Address),

    /// Invoked outside a static call.
    #[error("precompile requires a static call")]
    NotStaticCall,

    /// Candidate count above the configured bound.
    #[error("too many candidates: {count} > {max}")]
    TooManyCandidates {
        /// Supplied count.
        count: usize,
        /// Configured bound.
        max: usize,
    },

    /// Header record above the configured bound.
    #[error("header too large: {size} > {max} bytes")]
    HeaderTooLarge {
        /// Supplied size.
        size: usize,
        /// Configured bound.
        max: usize,
    },

    /// Candidate pool could not be assembled.
    #[error("election error: {0}")]
    Election(#[from] ElectionError),

    /// Header record could not be decoded.
    #[error("header error: {0}")]
    Header(#[from] HeaderError),

    /// Candidate registry lookup failed.
    #[error("registry error: {0}")]
    Registry(#[from] RegistryError),

    /// No precompile is deployed at the address.
    #[error("precompile not implemented: {0:?}")]
    NotImplemented(Address),
}

impl PrecompileError {
    /// Revert reason reported to the host engine.
    #[must_use]
    pub fn revert_reason(&self) -> String {
        self.to_string()
    }

    /// Returns true if the error came from malformed caller input rather than
    /// from authorization or environment.
    #[must_use]
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidInputLength { .. }
                | Self::InvalidInput(_)
                | Self::UnknownSelector(_)
                | Self::TooManyCandidates { .. }
                | Self::HeaderTooLarge { .. }
                | Self::Election(_)
                | Self::Header(_)
        )
    }
}

// =============================================================================
// CONFIG ERRORS
// =============================================================================

/// Errors from service configuration validation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A resource bound is zero.
    #[error("{0} must be greater than zero")]
    ZeroLimit(&'static str),

    /// One contract is bound to two system roles.
    #[error("system contract bound to more than one role: {0:?}")]
    DuplicateContract(Address),
}

// =============================================================================
// TESTS
// =============================================================================
