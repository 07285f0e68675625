//! Intercept resolution: interceptors that reach their aim point kill their quarry.

use glam::DVec2;
use hecs::World;
use tracing::debug;

use wargames_core::constants::INTERCEPT_RESOLVE_PROGRESS;
use wargames_core::enums::EffectKind;
use wargames_core::events::GameEvent;

use crate::systems::effects;
use crate::wave::{Missile, MissileId, Wave};

/// Resolve every interceptor at or past the resolve threshold.
///
/// Returns the attack missiles intercepted during this call.
pub fn run(
    wave: &mut Wave,
    effect_world: &mut World,
    now_ms: u64,
    events: &mut Vec<GameEvent>,
) -> Vec<MissileId> {
    let due: Vec<(MissileId, MissileId, DVec2)> = wave
        .intercepts()
        .filter(|(_, i)| !i.impact_applied && i.flight.progress >= INTERCEPT_RESOLVE_PROGRESS)
        .map(|(id, i)| (id, i.target_missile, i.flight.position()))
        .collect();

    let mut intercepted = Vec::with_capacity(due.len());
    for (interceptor_id, attack_id, position) in due {
        if let Some(Missile::Intercept(interceptor)) = wave.get_mut(interceptor_id) {
            interceptor.impact_applied = true;
        }
        effects::spawn(effect_world, EffectKind::Intercept, position, now_ms);

        // An attacker that already detonated cannot be resolved twice.
        if let Some(Missile::Attack(attack)) = wave.get_mut(attack_id) {
            if attack.impact_applied || attack.intercepted {
                continue;
            }
            attack.intercepted = true;
            debug!(side = ?attack.target.side, city = attack.target.index, "missile intercepted");
            events.push(GameEvent::MissileIntercepted {
                side: attack.target.side,
                city_index: attack.target.index,
            });
            intercepted.push(attack_id);
        }
    }
    intercepted
}
