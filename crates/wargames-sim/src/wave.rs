//! Missile wave data model.
//!
//! Missiles live in an append-only arena for the duration of one wave.
//! Resolved missiles are never removed, so their flags stay queryable until
//! the next game; interceptors refer to their quarry by `MissileId`.

use wargames_core::enums::{MissileKind, Side};
use wargames_core::types::{CityRef, Flight};

/// Stable index of a missile within its wave.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MissileId(pub usize);

/// Offensive missile flying from a launch city to an enemy city.
#[derive(Debug, Clone)]
pub struct AttackMissile {
    pub flight: Flight,
    /// Side that fired the missile.
    pub owner: Side,
    /// City the missile is aimed at (always on `owner.opponent()`).
    pub target: CityRef,
    /// Warhead detonation has been evaluated.
    pub impact_applied: bool,
    pub intercepted: bool,
    pub intercept_launched: bool,
}

/// Defensive missile chasing one attack missile.
#[derive(Debug, Clone)]
pub struct InterceptMissile {
    pub flight: Flight,
    /// Side defending the threatened city.
    pub owner: Side,
    /// Fixed at creation.
    pub target_missile: MissileId,
    pub impact_applied: bool,
}

#[derive(Debug, Clone)]
pub enum Missile {
    Attack(AttackMissile),
    Intercept(InterceptMissile),
}

impl Missile {
    pub fn kind(&self) -> MissileKind {
        match self {
            Missile::Attack(_) => MissileKind::Attack,
            Missile::Intercept(_) => MissileKind::Intercept,
        }
    }

    pub fn flight(&self) -> &Flight {
        match self {
            Missile::Attack(m) => &m.flight,
            Missile::Intercept(m) => &m.flight,
        }
    }

    pub fn flight_mut(&mut self) -> &mut Flight {
        match self {
            Missile::Attack(m) => &mut m.flight,
            Missile::Intercept(m) => &mut m.flight,
        }
    }

    pub fn owner(&self) -> Side {
        match self {
            Missile::Attack(m) => m.owner,
            Missile::Intercept(m) => m.owner,
        }
    }

    pub fn impact_applied(&self) -> bool {
        match self {
            Missile::Attack(m) => m.impact_applied,
            Missile::Intercept(m) => m.impact_applied,
        }
    }

    pub fn as_attack(&self) -> Option<&AttackMissile> {
        match self {
            Missile::Attack(m) => Some(m),
            Missile::Intercept(_) => None,
        }
    }

    pub fn as_intercept(&self) -> Option<&InterceptMissile> {
        match self {
            Missile::Intercept(m) => Some(m),
            Missile::Attack(_) => None,
        }
    }
}

/// All missiles of the current wave plus the wave clock.
#[derive(Debug, Clone, Default)]
pub struct Wave {
    missiles: Vec<Missile>,
    /// Timestamp of launch (ms). `None` until a wave has been launched.
    started_at_ms: Option<u64>,
    /// Wave clock progress in `[0, 1]` as of the last update.
    progress: f64,
}

impl Wave {
    /// Start a fresh wave clock at `now_ms`, discarding any previous missiles.
    pub fn begin(&mut self, now_ms: u64) {
        self.missiles.clear();
        self.started_at_ms = Some(now_ms);
        self.progress = 0.0;
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn started_at_ms(&self) -> Option<u64> {
        self.started_at_ms
    }

    /// Milliseconds since launch, or 0 before launch or for timestamps preceding it.
    pub fn elapsed_ms(&self, now_ms: u64) -> u64 {
        self.started_at_ms
            .map_or(0, |start| now_ms.saturating_sub(start))
    }

    pub fn progress(&self) -> f64 {
        self.progress
    }

    pub fn set_progress(&mut self, progress: f64) {
        self.progress = progress.clamp(0.0, 1.0);
    }

    pub fn push(&mut self, missile: Missile) -> MissileId {
        self.missiles.push(missile);
        MissileId(self.missiles.len() - 1)
    }

    pub fn get(&self, id: MissileId) -> Option<&Missile> {
        self.missiles.get(id.0)
    }

    pub fn get_mut(&mut self, id: MissileId) -> Option<&mut Missile> {
        self.missiles.get_mut(id.0)
    }

    pub fn len(&self) -> usize {
        self.missiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.missiles.is_empty()
    }

    pub fn missiles(&self) -> &[Missile] {
        &self.missiles
    }

    pub fn missiles_mut(&mut self) -> &mut [Missile] {
        &mut self.missiles
    }

    pub fn iter(&self) -> impl Iterator<Item = (MissileId, &Missile)> {
        self.missiles
            .iter()
            .enumerate()
            .map(|(i, m)| (MissileId(i), m))
    }

    pub fn attacks(&self) -> impl Iterator<Item = (MissileId, &AttackMissile)> {
        self.iter().filter_map(|(id, m)| m.as_attack().map(|a| (id, a)))
    }

    pub fn intercepts(&self) -> impl Iterator<Item = (MissileId, &InterceptMissile)> {
        self.iter()
            .filter_map(|(id, m)| m.as_intercept().map(|i| (id, i)))
    }

    /// The interceptor chasing `attack`, if one was launched.
    pub fn interceptor_for(&self, attack: MissileId) -> Option<MissileId> {
        self.intercepts()
            .find(|(_, i)| i.target_missile == attack)
            .map(|(id, _)| id)
    }
}
