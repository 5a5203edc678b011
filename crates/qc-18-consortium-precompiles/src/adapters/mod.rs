//! # Adapters Layer (Outer Hexagon)
//!
//! Concrete implementations of the driven ports.
//!
//! - `K256SignerRecovery` implements `SignerRecovery`
//! - `InMemoryCandidateRegistry` implements `CandidateRegistry`

pub mod recovery;
pub mod registry;

pub use recovery::*;
pub use registry::*;
