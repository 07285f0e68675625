//! Snapshot builder: assembles the presentation view of the engine.

use wargames_core::cities::CityRegistry;
use wargames_core::enums::{GamePhase, Side};
use wargames_core::state::{CityView, GameStateSnapshot, MissileView};

use crate::destruction::DestructionRecord;
use crate::engine::GameEngine;
use crate::selection::SelectionSet;
use crate::wave::{Missile, Wave};

/// Build a complete snapshot of the engine at `now_ms`.
pub fn build_snapshot(engine: &GameEngine, now_ms: u64) -> GameStateSnapshot {
    let phase = engine.phase();
    let registry = engine.registry();
    let destruction = engine.destruction();
    let player = engine.selections(Side::Player);
    let opponent = engine.selections(Side::Opponent);

    GameStateSnapshot {
        phase,
        show_grid: engine.show_grid(),
        show_help: engine.show_help(),
        defenses_selected: player.defenses.len(),
        defense_limit: player.defenses.limit(),
        targets_selected: player.targets.len(),
        target_limit: player.targets.limit(),
        can_continue: phase == GamePhase::Defense && engine.can_continue(),
        can_launch: phase == GamePhase::Offense && engine.can_launch(),
        player_cities: city_views(
            registry,
            destruction,
            Side::Player,
            &player.defenses,
            &opponent.targets,
        ),
        opponent_cities: city_views(
            registry,
            destruction,
            Side::Opponent,
            &opponent.defenses,
            &player.targets,
        ),
        missiles: missile_views(engine.wave()),
        effects: engine.effects(now_ms),
        destroyed_player_cities: engine.destroyed_cities(Side::Player).to_vec(),
        destroyed_opponent_cities: engine.destroyed_cities(Side::Opponent).to_vec(),
        casualties: (phase == GamePhase::Results).then(|| engine.calculate_casualties()),
        terminal: (phase == GamePhase::Loading).then(|| engine.terminal().view()),
    }
}

fn city_views(
    registry: &CityRegistry,
    destruction: &DestructionRecord,
    side: Side,
    defended: &SelectionSet,
    targeted: &SelectionSet,
) -> Vec<CityView> {
    registry
        .cities(side)
        .iter()
        .enumerate()
        .map(|(index, city)| CityView {
            index,
            name: city.name.clone(),
            x: city.x,
            y: city.y,
            population: city.population,
            destroyed: destruction.is_destroyed(side, index),
            defended: defended.contains(index),
            targeted: targeted.contains(index),
        })
        .collect()
}

/// Missiles worth drawing: launched and not shot down.
fn missile_views(wave: &Wave) -> Vec<MissileView> {
    wave.missiles()
        .iter()
        .filter(|m| !matches!(m, Missile::Attack(a) if a.intercepted))
        .filter(|m| m.flight().progress > 0.0)
        .map(|m| MissileView {
            kind: m.kind(),
            owner: m.owner(),
            origin: m.flight().origin,
            position: m.flight().position(),
            progress: m.flight().progress,
        })
        .collect()
}
