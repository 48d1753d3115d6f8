//! Weighted reward selection.
//!
//! The walk order over pool entries is part of the contract: two callers with
//! the same seed and the same pool must resolve to the same entry, which is
//! what makes draws replayable off-chain.

use crate::rng::{RewardRng, XorShiftRng};

/// Sum of all entry weights, the draw denominator.
pub fn total_weight(weights: &[u32]) -> u64 {
    weights.iter().map(|w| *w as u64).sum()
}

/// Select an entry index for a pre-drawn roll `r`.
///
/// Walks the weights in slice order accumulating a running sum; entry `i` is
/// selected iff `sum(w[..i]) <= r < sum(w[..=i])`. Returns `None` when the
/// total weight is zero or `r` is out of range. Zero-weight entries can never
/// be selected.
pub fn select_weighted(weights: &[u32], r: u64) -> Option<usize> {
    let mut cumulative = 0u64;
    for (i, w) in weights.iter().enumerate() {
        cumulative += *w as u64;
        if r < cumulative {
            return Some(i);
        }
    }
    None
}

/// Draw an entry index from a seed.
///
/// Rolls a uniform `r` in `[0, total_weight)` via [`XorShiftRng`] and
/// delegates to [`select_weighted`]. Deterministic given seed and weights.
pub fn draw_index(weights: &[u32], seed: u64) -> Option<usize> {
    let total = total_weight(weights);
    if total == 0 {
        return None;
    }
    let mut rng = XorShiftRng::seed_from_u64(seed);
    select_weighted(weights, rng.gen_range(total))
}
