//! Player commands sent from the presentation layer to the simulation.
//!
//! Commands are queued and applied at the next tick boundary. Commands that
//! are not valid in the current phase are ignored.

use serde::{Deserialize, Serialize};

/// All possible player actions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlayerCommand {
    // --- Phase control ---
    /// Leave the menu and begin a new game.
    StartGame,
    /// Advance from the defense phase to the offense phase.
    Continue,
    /// Launch the wave from the offense phase.
    Launch,
    /// Abandon the current game and return to the menu.
    Reset,

    // --- Selection ---
    /// Toggle defense on a player city.
    ToggleDefense { index: usize },
    /// Toggle targeting of an opponent city.
    ToggleTarget { index: usize },
    /// Pointer click in map coordinates; resolved to a city for the current phase.
    Click { x: f64, y: f64 },

    // --- Display ---
    ToggleGrid,
    ToggleHelp,

    // --- Loading terminal ---
    /// Type one character into the terminal.
    TerminalChar { ch: char },
    TerminalBackspace,
    TerminalSubmit,
}
