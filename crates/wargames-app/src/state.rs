//! Messages flowing in and out of the game loop.

use serde::Serialize;

use wargames_core::commands::PlayerCommand;
use wargames_core::events::GameEvent;
use wargames_core::state::GameStateSnapshot;

/// Commands sent from the input thread to the game loop.
#[derive(Debug, Clone, PartialEq)]
pub enum LoopCommand {
    /// A player command to forward to the engine.
    Player(PlayerCommand),
    /// Write a full snapshot after the next tick.
    Snapshot,
    /// Finish the current tick and stop.
    Shutdown,
}

/// One line of loop output.
#[derive(Debug, Serialize)]
#[serde(tag = "kind", content = "data")]
pub enum LoopOutput<'a> {
    Event(&'a GameEvent),
    Snapshot(&'a GameStateSnapshot),
}
