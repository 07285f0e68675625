//! WARGAMES headless driver.
//!
//! Runs the simulation engine in a fixed-rate frame loop, reading player
//! commands as JSON lines on stdin and writing events and snapshots as JSON
//! lines on stdout. Logs go to stderr.

pub mod game_loop;
pub mod input;
pub mod state;

pub use wargames_core as core;
