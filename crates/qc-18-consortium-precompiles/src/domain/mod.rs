//! # Domain Layer (Inner Hexagon)
//!
//! Pure business logic for validator election and double-sign evidence.
//! No I/O and no signature backend; signer recovery is injected.
//!
//! - All types here are pure domain concepts.
//! - Dependencies point INWARD only (adapters depend on this, not vice versa).

pub mod election;
pub mod entities;
pub mod equivocation;
pub mod header;
pub mod invariants;
pub mod ordering;
pub mod services;
pub mod value_objects;

pub use election::*;
pub use entities::*;
pub use equivocation::*;
pub use header::*;
pub use invariants::*;
pub use ordering::*;
pub use services::*;
pub use value_objects::*;
