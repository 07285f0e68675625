//! Simulation engine for WARGAMES.
//!
//! Owns the phase state machine, the player's selections, the missile wave
//! and the explosion effects. Completely headless: the caller supplies
//! monotonic millisecond timestamps and draws from `GameStateSnapshot`s.

pub mod casualties;
pub mod destruction;
pub mod engine;
pub mod loading;
pub mod selection;
pub mod systems;
pub mod wave;

pub use engine::{GameEngine, SimConfig, TickOutcome};
pub use wargames_core as core;

#[cfg(test)]
mod tests;
