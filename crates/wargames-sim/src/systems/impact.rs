//! Impact resolution: attack missiles that reach their target destroy it.

use hecs::World;
use tracing::debug;

use wargames_core::cities::CityRegistry;
use wargames_core::constants::IMPACT_RESOLVE_PROGRESS;
use wargames_core::enums::EffectKind;
use wargames_core::events::GameEvent;

use crate::destruction::DestructionRecord;
use crate::systems::effects;
use crate::wave::{Missile, Wave};

/// Detonate every unresolved, un-intercepted attack missile at or past the
/// impact threshold. Returns the number of cities destroyed by this call.
pub fn run(
    wave: &mut Wave,
    destruction: &mut DestructionRecord,
    registry: &CityRegistry,
    effect_world: &mut World,
    now_ms: u64,
    events: &mut Vec<GameEvent>,
) -> usize {
    let mut destroyed = 0;
    for missile in wave.missiles_mut() {
        let Missile::Attack(attack) = missile else {
            continue;
        };
        if attack.impact_applied
            || attack.intercepted
            || attack.flight.progress < IMPACT_RESOLVE_PROGRESS
        {
            continue;
        }
        attack.impact_applied = true;

        let target = attack.target;
        let Some(city) = registry.city(target.side, target.index) else {
            continue;
        };
        if !destruction.destroy(target.side, target.index, &city.name) {
            continue;
        }
        effects::spawn(
            effect_world,
            EffectKind::CityExplosion,
            attack.flight.position(),
            now_ms,
        );
        debug!(side = ?target.side, city = %city.name, "city destroyed");
        events.push(GameEvent::CityDestroyed {
            side: target.side,
            city_index: target.index,
            name: city.name.clone(),
        });
        destroyed += 1;
    }
    destroyed
}
