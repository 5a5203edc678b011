//! # Validator Set Arrangement
//!
//! Turns a candidate pool into the ordered validator set for the next epoch.
//!
//! ## Algorithm
//!
//! 1. Sort the whole pool by descending stake ([`sort_by_stake`]).
//! 2. Scan left to right; the first `prioritized_quota` trusted candidates
//!    are exchanged into the front block one by one. The block ends up in
//!    descending-stake order, the displaced candidates scramble the rest.
//! 3. Re-sort the residual block by descending stake.
//! 4. Truncate to `target_set_size`.
//!
//! Trust only grants placement priority. Trusted candidates beyond the quota
//! compete in the residual block like everyone else.

use crate::domain::entities::{CandidatePool, ElectionParameters, ValidatorSet};
use crate::domain::ordering::{sort_by_stake, stake_order};
use tracing::trace;

/// Moves up to `quota` trusted candidates to the front of `order`.
///
/// `order` must already be sorted by stake. Returns the length of the
/// prioritized block.
pub fn extract_prioritized(pool: &CandidatePool, order: &mut [usize], quota: usize) -> usize {
    let mut insert_position = 0;

    for i in 0..order.len() {
        if insert_position >= quota {
            break;
        }
        if pool.candidate(order[i]).trusted {
            order.swap(i, insert_position);
            insert_position += 1;
        }
    }

    insert_position
}

/// Returns the arranged index order over `pool`, truncated to the target size,
/// together with the number of prioritized entries before truncation.
#[must_use]
pub fn arrange_order(pool: &CandidatePool, params: ElectionParameters) -> (Vec<usize>, usize) {
    let mut order = stake_order(pool);

    let prioritized = extract_prioritized(pool, &mut order, params.prioritized_quota);
    sort_by_stake(pool, &mut order[prioritized..]);

    order.truncate(params.target_set_size);

    trace!(
        candidates = pool.len(),
        prioritized,
        elected = order.len(),
        "arranged validator candidates"
    );

    (order, prioritized)
}

/// Elects the ordered validator set from `pool`.
#[must_use]
pub fn arrange_validator_set(pool: &CandidatePool, params: ElectionParameters) -> ValidatorSet {
    let (order, prioritized) = arrange_order(pool, params);
    ValidatorSet::new(pool.addresses_of(&order), prioritized)
}

// =============================================================================
// TESTS
// =============================================================================
