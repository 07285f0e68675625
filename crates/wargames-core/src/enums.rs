//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// One of the two nations on the map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    /// The human player's nation (USA).
    Player,
    /// The computer opponent's nation (USSR).
    Opponent,
}

impl Side {
    pub const ALL: [Side; 2] = [Side::Player, Side::Opponent];

    /// The other side.
    pub fn opponent(self) -> Side {
        match self {
            Side::Player => Side::Opponent,
            Side::Opponent => Side::Player,
        }
    }
}

/// What a selected city is used for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    /// Own city that receives an interceptor battery and serves as a launch site.
    Defense,
    /// Enemy city that receives an attack missile.
    Target,
}

/// Top-level game phase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// WOPR terminal asking the player to select a game.
    #[default]
    Loading,
    Menu,
    /// Player is choosing cities to defend.
    Defense,
    /// Player is choosing enemy cities to target.
    Offense,
    /// Missile wave in flight.
    Launch,
    Results,
}

/// Missile role within a wave.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MissileKind {
    Attack,
    Intercept,
}

/// Visual effect category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EffectKind {
    /// Mushroom cloud over a destroyed city.
    CityExplosion,
    /// Short flash where an interceptor met its target.
    Intercept,
}
