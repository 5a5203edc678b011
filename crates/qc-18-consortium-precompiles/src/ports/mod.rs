//! # Ports Layer (Middle Hexagon)
//!
//! Trait definitions for the consortium precompiles.
//! These are the interfaces between the domain and the outside world.
//!
//! - **Driving Ports (Inbound)**: `ConsortiumPrecompileApi`
//! - **Driven Ports (Outbound)**: `SignerRecovery`, `CandidateRegistry`
//! - No concrete implementations in this module

pub mod inbound;
pub mod outbound;

pub use inbound::*;
pub use outbound::*;
