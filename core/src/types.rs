//! Item taxonomy shared between the pure core and the on-chain ledger.

use parity_scale_codec::{Decode, DecodeWithMemTracking, Encode, MaxEncodedLen};
use scale_info::TypeInfo;
use serde::{Deserialize, Serialize};

/// What an item fundamentally is. Fixed at mint time, never changes.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Encode,
    Decode,
    DecodeWithMemTracking,
    MaxEncodedLen,
    TypeInfo,
    Serialize,
    Deserialize,
)]
pub enum ItemKind {
    /// One-off badge, deduplicated per owner and category.
    Achievement,
    /// Time-bounded bonus source.
    PowerUp,
    /// Levels up as experience accrues.
    Evolution,
    /// Consumable container resolved by a weighted draw.
    LootBox,
    /// Anything outside the other four buckets.
    Special,
}

/// Ordinal rarity classification. Affects reward-pool weighting only.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Encode,
    Decode,
    DecodeWithMemTracking,
    MaxEncodedLen,
    TypeInfo,
    Serialize,
    Deserialize,
)]
pub enum Rarity {
    Common,
    Rare,
    Epic,
    Legendary,
    Mythic,
}
