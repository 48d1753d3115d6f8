//! Experience threshold table for Evolution items.
//!
//! The level is always a pure function of accumulated experience; the ledger
//! never stores a level it could not recompute from this module.

/// Cumulative experience required to hold `level`.
///
/// `required_experience(L) = L * 100 * (L + 1) / 2`, i.e. 100 XP for level 1,
/// 300 for level 2, 600 for level 3 and so on. Computed in `u128` and clamped
/// so extreme levels cannot wrap.
pub fn required_experience(level: u32) -> u64 {
    let l = level as u128;
    let xp = l * 100 * (l + 1) / 2;
    xp.min(u64::MAX as u128) as u64
}

/// The highest level whose threshold is covered by `experience`.
///
/// Solves `50·L·(L+1) <= xp` in closed form, then nudges the result to absorb
/// integer square-root rounding. Monotone in `experience` by construction.
pub fn level_for_experience(experience: u64) -> u32 {
    // 50·L² + 50·L - xp <= 0  =>  L = floor((-50 + sqrt(2500 + 200·xp)) / 100)
    let disc = 2500u128 + 200u128 * experience as u128;
    let mut level = ((isqrt(disc).saturating_sub(50)) / 100) as u32;

    while threshold(level + 1) <= experience as u128 {
        level += 1;
    }
    while level > 0 && threshold(level) > experience as u128 {
        level -= 1;
    }
    level
}

/// Unclamped threshold, for exact comparisons inside this module.
fn threshold(level: u32) -> u128 {
    let l = level as u128;
    l * 100 * (l + 1) / 2
}

/// Newton's method integer square root.
fn isqrt(n: u128) -> u128 {
    if n < 2 {
        return n;
    }
    let mut x = n;
    let mut y = (x + 1) / 2;
    while y < x {
        x = y;
        y = (x + n / x) / 2;
    }
    x
}
