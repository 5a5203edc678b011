//! # Integration Tests
//!
//! Multi-step flows that exercise the precompiles the way the system
//! contracts drive them across an epoch.

pub mod flows;
