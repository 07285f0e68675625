//! Events emitted by the simulation for audio and UI feedback.

use serde::{Deserialize, Serialize};

use crate::enums::{GamePhase, Side};

/// Something noteworthy that happened during a tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GameEvent {
    PhaseChanged { from: GamePhase, to: GamePhase },
    /// A defended city fired an interceptor. `side` owns the city.
    InterceptLaunched { side: Side, city_index: usize },
    /// An attack missile aimed at `side`'s city was destroyed in flight.
    MissileIntercepted { side: Side, city_index: usize },
    /// A city was hit and destroyed.
    CityDestroyed {
        side: Side,
        city_index: usize,
        name: String,
    },
}
