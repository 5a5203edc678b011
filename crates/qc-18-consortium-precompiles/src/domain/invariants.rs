//! # Domain Invariants
//!
//! Properties every arranged validator set must satisfy. The service checks
//! them in debug builds after each election; the property tests check them
//! on random pools.
//!
//! - Prefix: the leading `min(quota, trusted, target)` entries are trusted
//!   and in descending stake.
//! - Truncation: output length is `min(target, candidates)`.
//! - Completeness: output is a sub-multiset of the input.

use crate::domain::entities::{CandidatePool, ElectionParameters};
use crate::domain::ordering::outranks;

// =============================================================================
// INVARIANT CHECKS
// =============================================================================

/// Truncation: the arrangement holds exactly `min(target, candidates)` entries.
#[must_use]
pub fn check_truncation_invariant(
    pool: &CandidatePool,
    params: ElectionParameters,
    order: &[usize],
) -> bool {
    order.len() == params.target_set_size.min(pool.len())
}

/// Prefix: the first `min(quota, trusted, target)` entries are trusted and
/// each outranks the next.
#[must_use]
pub fn check_prefix_invariant(
    pool: &CandidatePool,
    params: ElectionParameters,
    order: &[usize],
) -> bool {
    let expected = params
        .prioritized_quota
        .min(pool.trusted_count())
        .min(params.target_set_size)
        .min(order.len());

    let prefix = &order[..expected];
    prefix.iter().all(|&i| pool.candidate(i).trusted)
        && prefix
            .windows(2)
            .all(|w| !outranks(pool.candidate(w[1]), pool.candidate(w[0])))
}

/// Completeness: every index is valid and used at most once.
#[must_use]
pub fn check_completeness_invariant(pool: &CandidatePool, order: &[usize]) -> bool {
    let mut seen = vec![false; pool.len()];
    for &i in order {
        match seen.get_mut(i) {
            Some(slot) if !*slot => *slot = true,
            _ => return false,
        }
    }
    true
}

/// Residual: entries after the prioritized block are in descending stake.
#[must_use]
pub fn check_residual_order_invariant(
    pool: &CandidatePool,
    prioritized: usize,
    order: &[usize],
) -> bool {
    order
        .get(prioritized..)
        .unwrap_or(&[])
        .windows(2)
        .all(|w| !outranks(pool.candidate(w[1]), pool.candidate(w[0])))
}

/// Runs every arrangement check.
#[must_use]
pub fn check_all_invariants(
    pool: &CandidatePool,
    params: ElectionParameters,
    order: &[usize],
    prioritized: usize,
) -> bool {
    check_truncation_invariant(pool, params, order)
        && check_prefix_invariant(pool, params, order)
        && check_completeness_invariant(pool, order)
        && check_residual_order_invariant(pool, prioritized, order)
}

// =============================================================================
// TESTS
// =============================================================================
