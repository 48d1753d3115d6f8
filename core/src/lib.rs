//! Deterministic core logic for the reward ledger.
//!
//! Everything in this crate is a pure function of its inputs, including the
//! random seed for weighted draws. The on-chain pallet supplies storage,
//! accounts and time; this crate supplies the math that must be replayable
//! and externally verifiable.

#![cfg_attr(not(feature = "std"), no_std)]

pub mod draw;
pub mod leveling;
pub mod rng;
pub mod types;


pub use draw::{draw_index, select_weighted, total_weight};
pub use leveling::{level_for_experience, required_experience};
pub use rng::{RewardRng, XorShiftRng};
pub use types::{ItemKind, Rarity};
