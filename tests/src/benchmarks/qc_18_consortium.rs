//! # QC-18 Consortium Precompiles Benchmarks
//!
//! Claims to validate:
//! - Sorting 1024 candidates: < 1ms
//! - Full election with trusted prefix: same order as sorting
//! - Double-sign check: dominated by two signer recoveries
//!
//! Brutal Conditions:
//! - Heavy weight ties (few distinct stakes)
//! - Trusted candidates scattered through the stake order
//! - Full ABI round trip through the service

use alloy_sol_types::SolCall;
use criterion::{black_box, BenchmarkId, Criterion, Throughput};
use k256::ecdsa::SigningKey;
use qc_18_consortium_precompiles::domain::header::{BLOOM_LEN, NONCE_LEN};
use qc_18_consortium_precompiles::evm::precompiles::interface::{to_sol_address, to_sol_uint};
use qc_18_consortium_precompiles::prelude::*;
use rand::Rng;
use std::time::Duration;

const CANDIDATE_COUNTS: [usize; 4] = [21, 100, 500, 1024];

/// Random pool; `distinct_weights` controls how often stakes tie.
fn random_pool(size: usize, distinct_weights: u64, trusted_ratio: f64) -> CandidatePool {
    let mut rng = rand::thread_rng();
    CandidatePool::new(
        (0..size)
            .map(|i| {
                Candidate::new(
                    Address::from_low_u64_be(i as u64 + 1),
                    U256::from(rng.gen_range(0..distinct_weights)),
                    rng.gen_bool(trusted_ratio),
                )
            })
            .collect(),
    )
}

fn signed_header(key: &SigningKey, chain_id: U256, timestamp: u64) -> HeaderRecord {
    let header = HeaderRecord {
        parent_hash: Hash::new([0x11; 32]),
        uncle_hash: Hash::ZERO,
        coinbase: Address::ZERO,
        state_root: Hash::new([0x22; 32]),
        transactions_root: Hash::ZERO,
        receipts_root: Hash::ZERO,
        logs_bloom: vec![0u8; BLOOM_LEN],
        difficulty: U256::from(7),
        number: U256::from(1_000),
        gas_limit: 100_000_000,
        gas_used: 0,
        timestamp,
        extra_data: Bytes(vec![0u8; 32 + Seal::LEN]),
        mix_digest: Hash::ZERO,
        nonce: [0u8; NONCE_LEN],
    };

    let hash = header
        .signing_hash(chain_id)
        .expect("extra-data holds a seal");
    let (signature, recovery_id) = key
        .sign_prehash_recoverable(hash.as_bytes())
        .expect("signing succeeds");
    let bytes = signature.to_bytes();
    let mut r = [0u8; 32];
    let mut s = [0u8; 32];
    r.copy_from_slice(&bytes[..32]);
    s.copy_from_slice(&bytes[32..]);

    header.with_seal(&Seal::new(r, s, recovery_id.to_byte()))
}

pub fn bench_stake_ordering(c: &mut Criterion) {
    let mut group = c.benchmark_group("qc-18/stake_ordering");
    group.measurement_time(Duration::from_secs(5));

    for size in CANDIDATE_COUNTS {
        let spread = random_pool(size, u64::MAX, 0.0);
        let tied = random_pool(size, 4, 0.0);

        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("distinct_weights", size), &spread, |b, pool| {
            b.iter(|| black_box(stake_order(pool)))
        });
        group.bench_with_input(BenchmarkId::new("tied_weights", size), &tied, |b, pool| {
            b.iter(|| black_box(stake_order(pool)))
        });
    }

    group.finish();
}

pub fn bench_pick_validator_set(c: &mut Criterion) {
    let mut group = c.benchmark_group("qc-18/pick_validator_set");
    group.measurement_time(Duration::from_secs(5));

    let params = ElectionParameters::new(21, 11);
    for size in CANDIDATE_COUNTS {
        let pool = random_pool(size, 1_000, 0.3);

        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("arrange", size), &pool, |b, pool| {
            b.iter(|| black_box(arrange_validator_set(pool, params)))
        });
    }

    // Full ABI path through the service.
    let validator_set = Address::from_low_u64_be(0x1000);
    let (service, _registry) = create_test_service(ServiceConfig {
        validator_set_contract: validator_set,
        slash_indicator_contract: Address::from_low_u64_be(0x2000),
        ..ServiceConfig::default()
    });
    let context = CallContext::static_call(validator_set, U256::one());

    for size in CANDIDATE_COUNTS {
        let pool = random_pool(size, 1_000, 0.3);
        let input = PickValidatorSetCall {
            candidates: pool.candidates().iter().map(|c| to_sol_address(&c.address)).collect(),
            weights: pool.candidates().iter().map(|c| to_sol_uint(c.weight)).collect(),
            isTrustedOrganizations: pool
                .candidates()
                .iter()
                .map(|c| to_sol_uint(if c.trusted { U256::one() } else { U256::zero() }))
                .collect(),
            maxValidatorNumber: to_sol_uint(U256::from(21)),
            maxPrioritizedValidatorNumber: to_sol_uint(U256::from(11)),
        }
        .abi_encode();

        group.throughput(Throughput::Bytes(input.len() as u64));
        group.bench_with_input(BenchmarkId::new("precompile_call", size), &input, |b, input| {
            b.iter(|| black_box(service.execute(PICK_VALIDATOR_SET_ADDRESS, &context, input)))
        });
    }

    group.finish();
}

pub fn bench_double_sign_verification(c: &mut Criterion) {
    let mut group = c.benchmark_group("qc-18/double_sign");
    group.measurement_time(Duration::from_secs(10));

    let chain_id = U256::from(2020);
    let key = SigningKey::random(&mut rand::thread_rng());
    let first_record = signed_header(&key, chain_id, 1_000);
    let second_record = signed_header(&key, chain_id, 1_001);
    let first = first_record.encode();
    let second = second_record.encode();
    let first_tuple = encode_header(&first_record, chain_id);
    let second_tuple = encode_header(&second_record, chain_id);

    group.bench_function("decode_header_rlp", |b| {
        b.iter(|| black_box(HeaderRecord::decode(&first)))
    });
    group.bench_function("decode_header_tuple", |b| {
        b.iter(|| black_box(decode_header(&first_tuple)))
    });

    let slash_indicator = Address::from_low_u64_be(0x2000);
    let (service, _registry) = create_test_service(ServiceConfig {
        validator_set_contract: Address::from_low_u64_be(0x1000),
        slash_indicator_contract: slash_indicator,
        ..ServiceConfig::default()
    });
    let context = CallContext::static_call(slash_indicator, chain_id);
    let input = ValidatingDoubleSignProofCall {
        header1: first_tuple.into(),
        header2: second_tuple.into(),
    }
    .abi_encode();

    group.bench_function("check_double_sign", |b| {
        b.iter(|| black_box(service.check_double_sign(chain_id, &first, &second)))
    });
    group.bench_function("precompile_call", |b| {
        b.iter(|| black_box(service.execute(VERIFY_DOUBLE_SIGN_ADDRESS, &context, &input)))
    });

    group.finish();
}
