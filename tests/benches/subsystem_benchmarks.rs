//! # Consortium Precompile Subsystem Benchmarks
//!
//! | Subsystem | Claim | Target |
//! |-----------|-------|--------|
//! | qc-18 Stake ordering | 1024 candidates | < 1ms |
//! | qc-18 Validator set picking | 1024 candidates via ABI | < 2ms |
//! | qc-18 Double-sign proof | Two recoveries + decode | < 1ms |

use criterion::{criterion_group, criterion_main};
use qc_tests::benchmarks::qc_18_consortium::{
    bench_double_sign_verification, bench_pick_validator_set, bench_stake_ordering,
};

criterion_group!(
    benches,
    bench_stake_ordering,
    bench_pick_validator_set,
    bench_double_sign_verification,
);

criterion_main!(benches);
