//! # Stake Ordering
//!
//! Descending sort of candidates by stake weight.
//!
//! The element-exchange sequence is consensus-relevant: every node must
//! produce the same permutation, so the partition scheme below is fixed
//! and must not be swapped for `sort_by` or any other algorithm.
//!
//! ## Algorithm
//!
//! In-place quicksort over an index sequence:
//!
//! 1. Middle element is the pivot; it is exchanged with the last slot.
//! 2. Lomuto partition: every element that outranks the pivot is exchanged
//!    into the growing left block.
//! 3. The pivot is exchanged into its final slot, both sides are sorted.
//!
//! A candidate outranks another when its weight is larger, or when weights
//! are equal and its address (as a big-endian integer) is larger.

use crate::domain::entities::{Candidate, CandidatePool};
use std::cmp::Ordering;

/// Returns true if `a` belongs strictly before `b`.
#[must_use]
pub fn outranks(a: &Candidate, b: &Candidate) -> bool {
    match a.weight.cmp(&b.weight) {
        Ordering::Greater => true,
        Ordering::Equal => a.address > b.address,
        Ordering::Less => false,
    }
}

/// Sorts `order` (indices into `pool`) by descending stake.
///
/// # Panics
///
/// Panics if `order` holds an index outside `pool`.
pub fn sort_by_stake(pool: &CandidatePool, order: &mut [usize]) {
    let mut remaining: &mut [usize] = order;

    loop {
        let len = remaining.len();
        if len < 2 {
            return;
        }

        let right = len - 1;
        remaining.swap(len / 2, right);

        let mut left = 0;
        for i in 0..len {
            if outranks(pool.candidate(remaining[i]), pool.candidate(remaining[right])) {
                remaining.swap(left, i);
                left += 1;
            }
        }
        remaining.swap(left, right);

        // Recurse into the shorter side, keep looping on the longer one.
        let (lower, upper) = std::mem::take(&mut remaining).split_at_mut(left);
        let upper = &mut upper[1..];
        if lower.len() < upper.len() {
            sort_by_stake(pool, lower);
            remaining = upper;
        } else {
            sort_by_stake(pool, upper);
            remaining = lower;
        }
    }
}

/// Returns the full pool order sorted by descending stake.
#[must_use]
pub fn stake_order(pool: &CandidatePool) -> Vec<usize> {
    let mut order = pool.input_order();
    sort_by_stake(pool, &mut order);
    order
}
