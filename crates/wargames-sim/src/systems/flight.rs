//! Wave clock and missile progress.
//!
//! Attack missiles track the wave clock directly. Once the wave is half way,
//! every defended target fires one interceptor at the attacker's midpoint;
//! interceptors fly four times as fast, arriving at 75% wave progress.

use glam::DVec2;
use tracing::{debug, trace};

use wargames_core::cities::CityRegistry;
use wargames_core::constants::*;
use wargames_core::events::GameEvent;
use wargames_core::types::{CityRef, Flight};

use crate::selection::SideSelections;
use crate::wave::{InterceptMissile, Missile, MissileId, Wave};

/// Advance every missile to the wave clock at `now_ms`.
///
/// Returns true once the wave duration has elapsed, at which point every
/// missile sits at progress 1.
pub fn run(
    wave: &mut Wave,
    selections: &SideSelections,
    registry: &CityRegistry,
    now_ms: u64,
    events: &mut Vec<GameEvent>,
) -> bool {
    let elapsed = wave.elapsed_ms(now_ms);
    let complete = elapsed >= WAVE_DURATION_MS;
    let progress = (elapsed as f64 / WAVE_DURATION_MS as f64).min(1.0);
    wave.set_progress(progress);
    trace!(elapsed, progress, "wave update");

    if progress >= INTERCEPT_TRIGGER_PROGRESS {
        launch_interceptors(wave, selections, registry, events);
    }

    for missile in wave.missiles_mut() {
        let missile_progress = match missile {
            _ if complete => 1.0,
            Missile::Attack(_) => progress,
            Missile::Intercept(_) => intercept_progress(progress),
        };
        missile.flight_mut().set_progress(missile_progress);
    }

    complete
}

/// Interceptor progress for a given wave progress.
pub fn intercept_progress(wave_progress: f64) -> f64 {
    ((wave_progress - INTERCEPT_TRIGGER_PROGRESS) * INTERCEPT_SPEED_FACTOR).clamp(0.0, 1.0)
}

/// Fire one interceptor for each unanswered attack on a defended city.
fn launch_interceptors(
    wave: &mut Wave,
    selections: &SideSelections,
    registry: &CityRegistry,
    events: &mut Vec<GameEvent>,
) {
    let pending: Vec<(MissileId, CityRef, DVec2)> = wave
        .attacks()
        .filter(|(_, a)| !a.intercept_launched && !a.intercepted)
        .filter(|(_, a)| {
            selections
                .side(a.target.side)
                .defenses
                .contains(a.target.index)
        })
        .map(|(id, a)| (id, a.target, a.flight.point_at(INTERCEPT_AIM_FRACTION)))
        .collect();

    for (attack_id, target, aim_point) in pending {
        let Some(city) = registry.city(target.side, target.index) else {
            continue;
        };
        if let Some(Missile::Attack(attack)) = wave.get_mut(attack_id) {
            attack.intercept_launched = true;
        }
        wave.push(Missile::Intercept(InterceptMissile {
            flight: Flight::new(city.position(), aim_point),
            owner: target.side,
            target_missile: attack_id,
            impact_applied: false,
        }));
        debug!(side = ?target.side, city = %city.name, "interceptor launched");
        events.push(GameEvent::InterceptLaunched {
            side: target.side,
            city_index: target.index,
        });
    }
}
