//! # Consortium Precompile Benchmarks
//!
//! Performance benchmarks per subsystem.
//! Candidate counts go up to the default `max_candidates` bound.

pub mod qc_18_consortium;
