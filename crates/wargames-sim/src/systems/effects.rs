//! Explosion effects, stored as entities in a hecs world.

use glam::DVec2;
use hecs::{Entity, World};

use wargames_core::constants::{
    CITY_EXPLOSION_DURATION_MS, EXPLOSION_RADIUS, INTERCEPT_EXPLOSION_DURATION_MS,
};
use wargames_core::enums::EffectKind;
use wargames_core::state::EffectView;

/// A timed explosion marker.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Effect {
    pub kind: EffectKind,
    pub position: DVec2,
    pub started_at_ms: u64,
    pub duration_ms: u64,
}

impl Effect {
    pub fn new(kind: EffectKind, position: DVec2, started_at_ms: u64) -> Self {
        let duration_ms = match kind {
            EffectKind::CityExplosion => CITY_EXPLOSION_DURATION_MS,
            EffectKind::Intercept => INTERCEPT_EXPLOSION_DURATION_MS,
        };
        Self {
            kind,
            position,
            started_at_ms,
            duration_ms,
        }
    }

    pub fn is_expired(&self, now_ms: u64) -> bool {
        now_ms.saturating_sub(self.started_at_ms) >= self.duration_ms
    }

    /// Fraction of the lifetime elapsed, clamped to `[0, 1]`.
    pub fn age(&self, now_ms: u64) -> f64 {
        if self.duration_ms == 0 {
            return 1.0;
        }
        let elapsed = now_ms.saturating_sub(self.started_at_ms);
        (elapsed as f64 / self.duration_ms as f64).min(1.0)
    }

    pub fn radius(&self, now_ms: u64) -> f64 {
        EXPLOSION_RADIUS * (0.5 + 0.5 * self.age(now_ms))
    }
}

pub fn spawn(world: &mut World, kind: EffectKind, position: DVec2, now_ms: u64) -> Entity {
    world.spawn((Effect::new(kind, position, now_ms),))
}

/// Remove effects whose lifetime has run out.
/// Uses a pre-allocated buffer to avoid per-tick allocation.
pub fn prune(world: &mut World, now_ms: u64, despawn_buffer: &mut Vec<Entity>) {
    despawn_buffer.clear();

    for (entity, effect) in world.query_mut::<&Effect>() {
        if effect.is_expired(now_ms) {
            despawn_buffer.push(entity);
        }
    }

    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
}

/// Live effects, oldest first.
pub fn views(world: &World, now_ms: u64) -> Vec<EffectView> {
    let mut effects: Vec<Effect> = world
        .query::<&Effect>()
        .iter()
        .map(|(_, effect)| *effect)
        .filter(|effect| !effect.is_expired(now_ms))
        .collect();
    effects.sort_by_key(|effect| effect.started_at_ms);
    effects
        .into_iter()
        .map(|effect| EffectView {
            kind: effect.kind,
            position: effect.position,
            age: effect.age(now_ms),
            radius: effect.radius(now_ms),
        })
        .collect()
}

pub fn count(world: &World) -> usize {
    world.query::<&Effect>().iter().count()
}
