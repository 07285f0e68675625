//! Game state snapshot: the complete visible state handed to the presentation layer.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::enums::*;

/// Complete game state for drawing one frame.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameStateSnapshot {
    pub phase: GamePhase,
    pub show_grid: bool,
    pub show_help: bool,
    pub defenses_selected: usize,
    pub defense_limit: usize,
    pub targets_selected: usize,
    pub target_limit: usize,
    pub can_continue: bool,
    pub can_launch: bool,
    pub player_cities: Vec<CityView>,
    pub opponent_cities: Vec<CityView>,
    pub missiles: Vec<MissileView>,
    pub effects: Vec<EffectView>,
    pub destroyed_player_cities: Vec<String>,
    pub destroyed_opponent_cities: Vec<String>,
    /// Only present in the results phase.
    pub casualties: Option<CasualtyReport>,
    /// Only present while loading.
    pub terminal: Option<TerminalView>,
}

/// A city marker on the map.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CityView {
    pub index: usize,
    pub name: String,
    pub x: i32,
    pub y: i32,
    pub population: u64,
    pub destroyed: bool,
    pub defended: bool,
    pub targeted: bool,
}

/// A missile trail to draw.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MissileView {
    pub kind: MissileKind,
    /// Side that fired the missile; drives the trail colour.
    pub owner: Side,
    pub origin: DVec2,
    pub position: DVec2,
    pub progress: f64,
}

/// An explosion to draw.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EffectView {
    pub kind: EffectKind,
    pub position: DVec2,
    /// Fraction of the effect's lifetime already elapsed (0.0 - 1.0).
    pub age: f64,
    /// Current drawn radius; grows from half to full size over the lifetime.
    pub radius: f64,
}

/// WOPR terminal contents.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TerminalView {
    /// Lines revealed so far; the last one may be partial.
    pub lines: Vec<String>,
    pub prompt_visible: bool,
    pub input: String,
    pub error: Option<String>,
}

/// Population losses on both sides.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CasualtyReport {
    pub player: SideCasualties,
    pub opponent: SideCasualties,
}

impl CasualtyReport {
    pub fn side(&self, side: Side) -> &SideCasualties {
        match side {
            Side::Player => &self.player,
            Side::Opponent => &self.opponent,
        }
    }
}

/// Population losses for one side.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SideCasualties {
    pub casualties: u64,
    pub total_population: u64,
    /// Share of the population killed, in percent. Zero when the population is zero.
    pub percent: f64,
}

impl SideCasualties {
    pub fn new(casualties: u64, total_population: u64) -> Self {
        let percent = if total_population > 0 {
            casualties as f64 / total_population as f64 * 100.0
        } else {
            0.0
        };
        Self {
            casualties,
            total_population,
            percent,
        }
    }

    /// Percentage rounded to one decimal place, as shown on the results panel.
    pub fn percent_rounded(&self) -> f64 {
        (self.percent * 10.0).round() / 10.0
    }
}
