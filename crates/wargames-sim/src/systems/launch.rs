//! Wave launch: pairs each side's targets with its launch cities.

use tracing::debug;

use wargames_core::cities::CityRegistry;
use wargames_core::enums::Side;
use wargames_core::types::{CityRef, Flight};

use crate::selection::SideSelections;
use crate::wave::{AttackMissile, Missile, Wave};

/// Create the attack missiles for a new wave. Returns how many were created.
///
/// The i-th target (ascending index) is attacked from the i-th defended city
/// (ascending index). Targets without a matching launch city get no missile.
pub fn run(wave: &mut Wave, selections: &SideSelections, registry: &CityRegistry) -> usize {
    let mut launched = 0;
    for owner in Side::ALL {
        let own = selections.side(owner);
        let enemy = owner.opponent();
        for (launch_idx, target_idx) in own.defenses.iter().zip(own.targets.iter()) {
            let (Some(launch_city), Some(target_city)) = (
                registry.city(owner, launch_idx),
                registry.city(enemy, target_idx),
            ) else {
                continue;
            };
            debug!(
                ?owner,
                from = %launch_city.name,
                to = %target_city.name,
                "attack missile launched"
            );
            wave.push(Missile::Attack(AttackMissile {
                flight: Flight::new(launch_city.position(), target_city.position()),
                owner,
                target: CityRef::new(enemy, target_idx),
                impact_applied: false,
                intercepted: false,
                intercept_launched: false,
            }));
            launched += 1;
        }
    }
    launched
}
