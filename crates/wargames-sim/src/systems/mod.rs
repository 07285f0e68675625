//! Systems that advance the game state each tick.
//!
//! Systems are plain functions over the pieces of state they need. They do
//! not own state; the engine decides which ones run in which phase.

pub mod effects;
pub mod flight;
pub mod impact;
pub mod intercept;
pub mod launch;
pub mod snapshot;
