//! Opponent AI for WARGAMES.
//!
//! The opponent has no strategy: its defenses and targets are drawn uniformly
//! at random at the moment of launch, so nothing about them can be inferred
//! while the player is still choosing.

pub mod selector;

pub use selector::{select, select_plan, OpponentPlan, SelectionError};
pub use wargames_core as core;
