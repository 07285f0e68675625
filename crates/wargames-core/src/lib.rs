//! Core types and definitions for the WARGAMES simulation.
//!
//! This crate defines the vocabulary shared across all other crates:
//! cities, commands, events, state snapshots, errors and constants.
//! It has no dependency on any runtime or rendering framework.

pub mod cities;
pub mod commands;
pub mod constants;
pub mod enums;
pub mod error;
pub mod events;
pub mod state;
pub mod types;
