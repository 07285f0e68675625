//! Tests for the phase controller, selections, missile wave and effects.

use glam::DVec2;
use hecs::World;
use proptest::prelude::*;

use wargames_core::cities::{City, CityRegistry};
use wargames_core::commands::PlayerCommand;
use wargames_core::constants::*;
use wargames_core::enums::*;
use wargames_core::error::SetupError;
use wargames_core::events::GameEvent;
use wargames_core::types::{CityRef, Flight};

use crate::casualties;
use crate::destruction::DestructionRecord;
use crate::engine::{GameEngine, SimConfig};
use crate::loading::{LoadingTerminal, TerminalOutcome};
use crate::selection::{SelectionSet, SideSelections};
use crate::systems::{effects, flight, impact, intercept, launch};
use crate::wave::{AttackMissile, Missile, MissileId, Wave};

// ---- Helpers ----

fn headless(seed: u64) -> GameEngine {
    GameEngine::new(SimConfig {
        seed,
        skip_loading: true,
    })
    .unwrap()
}

/// Engine in the offense phase with defenses {0..5} and targets {0..5}.
fn ready_to_launch(seed: u64) -> GameEngine {
    let mut engine = headless(seed);
    assert!(engine.start_game());
    for i in 0..DEFENSE_LIMIT {
        assert!(engine.toggle_defense(i));
    }
    assert!(engine.continue_to_offense());
    for i in 0..TARGET_LIMIT {
        assert!(engine.toggle_target(i));
    }
    engine
}

fn selections(
    player_defenses: &[usize],
    player_targets: &[usize],
    opponent_defenses: &[usize],
    opponent_targets: &[usize],
) -> SideSelections {
    let mut s = SideSelections::default();
    s.player.defenses = SelectionSet::from_indices(DEFENSE_LIMIT, player_defenses.iter().copied());
    s.player.targets = SelectionSet::from_indices(TARGET_LIMIT, player_targets.iter().copied());
    s.opponent.defenses =
        SelectionSet::from_indices(DEFENSE_LIMIT, opponent_defenses.iter().copied());
    s.opponent.targets = SelectionSet::from_indices(TARGET_LIMIT, opponent_targets.iter().copied());
    s
}

/// Runs the wave systems the way the engine does, for one timestamp.
struct WaveHarness {
    registry: CityRegistry,
    selections: SideSelections,
    wave: Wave,
    destruction: DestructionRecord,
    effects: World,
    events: Vec<GameEvent>,
}

impl WaveHarness {
    fn launch(selections: SideSelections) -> Self {
        let registry = CityRegistry::default();
        let mut wave = Wave::default();
        wave.begin(0);
        launch::run(&mut wave, &selections, &registry);
        Self {
            destruction: DestructionRecord::new(&registry),
            registry,
            selections,
            wave,
            effects: World::new(),
            events: Vec::new(),
        }
    }

    fn step(&mut self, now_ms: u64) -> bool {
        let complete = flight::run(
            &mut self.wave,
            &self.selections,
            &self.registry,
            now_ms,
            &mut self.events,
        );
        intercept::run(&mut self.wave, &mut self.effects, now_ms, &mut self.events);
        impact::run(
            &mut self.wave,
            &mut self.destruction,
            &self.registry,
            &mut self.effects,
            now_ms,
            &mut self.events,
        );
        complete
    }

    /// Step at 60 Hz until the wave completes.
    fn run_to_end(&mut self) {
        let mut now = 0;
        while !self.step(now) {
            now += 16;
        }
    }

    fn intercepts(&self) -> Vec<(MissileId, f64)> {
        self.wave
            .intercepts()
            .map(|(id, m)| (id, m.flight.progress))
            .collect()
    }
}

fn attack(from: DVec2, to: DVec2, target: CityRef) -> Missile {
    Missile::Attack(AttackMissile {
        flight: Flight::new(from, to),
        owner: target.side.opponent(),
        target,
        impact_applied: false,
        intercepted: false,
        intercept_launched: false,
    })
}

// ---- Engine construction ----

#[test]
fn test_default_config_starts_at_loading() {
    let engine = GameEngine::new(SimConfig::default()).unwrap();
    assert_eq!(engine.phase(), GamePhase::Loading);
    assert_eq!(headless(1).phase(), GamePhase::Menu);
}

#[test]
fn test_registry_too_small_is_rejected() {
    let player = (0..4).map(|i| City::new(format!("P{i}"), i, 0, 1)).collect();
    let opponent = (0..10).map(|i| City::new(format!("O{i}"), i, 0, 1)).collect();
    let registry = CityRegistry::new(player, opponent).unwrap();
    let err = GameEngine::with_registry(SimConfig::default(), registry).err();
    assert_eq!(
        err,
        Some(SetupError::LimitExceedsPool {
            role: Role::Defense,
            side: Side::Player,
            limit: DEFENSE_LIMIT,
            pool: 4,
        })
    );
}

// ---- Selection ----

#[test]
fn test_defense_limit_and_exact_advance() {
    let mut engine = headless(1);
    engine.start_game();

    for i in 0..4 {
        assert!(engine.toggle_defense(i));
    }
    assert!(!engine.can_continue(), "4/5 must not advance");

    assert!(engine.toggle_defense(4));
    assert!(engine.can_continue(), "5/5 must advance");

    assert!(!engine.toggle_defense(5), "6th defense must be refused");
    assert_eq!(engine.selections(Side::Player).defenses.len(), 5);

    assert!(engine.toggle_defense(2), "removal always succeeds");
    assert!(!engine.can_continue(), "back to 4/5 must not advance");
    assert!(!engine.continue_to_offense());
    assert_eq!(engine.phase(), GamePhase::Defense);
}

#[test]
fn test_toggle_is_phase_gated() {
    let mut engine = headless(1);
    assert!(!engine.toggle_defense(0), "no toggling from the menu");
    engine.start_game();
    assert!(!engine.toggle_target(0), "targets belong to the offense phase");
    assert!(!engine.toggle_defense(10), "index out of range");
}

#[test]
fn test_selection_set_from_indices_truncates() {
    let set = SelectionSet::from_indices(3, [9, 1, 4, 7, 1]);
    assert_eq!(set.iter().collect::<Vec<_>>(), vec![1, 4, 7]);
    assert!(set.can_advance());
}

#[test]
fn test_click_maps_to_city() {
    let mut engine = headless(1);
    engine.start_game();
    // New York at (360, 203)
    assert!(engine.click(DVec2::new(362.0, 205.0)));
    assert!(engine.selections(Side::Player).defenses.contains(0));
    // Empty sea
    assert!(!engine.click(DVec2::new(600.0, 600.0)));
    // Moscow is not selectable during the defense phase
    assert!(!engine.click(DVec2::new(750.0, 143.0)));
}

proptest! {
    #[test]
    fn prop_defense_selection_bounded(toggles in proptest::collection::vec(0usize..10, 0..60)) {
        let mut engine = headless(7);
        engine.start_game();
        for index in toggles {
            let before = engine.selections(Side::Player).defenses.len();
            let was_selected = engine.selections(Side::Player).defenses.contains(index);
            let ok = engine.toggle_defense(index);
            let after = engine.selections(Side::Player).defenses.len();

            prop_assert!(after <= DEFENSE_LIMIT);
            prop_assert_eq!(engine.can_continue(), after == DEFENSE_LIMIT);
            if was_selected {
                prop_assert!(ok);
                prop_assert_eq!(after, before - 1);
            } else if before < DEFENSE_LIMIT {
                prop_assert!(ok);
                prop_assert_eq!(after, before + 1);
            } else {
                prop_assert!(!ok);
                prop_assert_eq!(after, before);
            }
        }
    }

    #[test]
    fn prop_selection_set_never_exceeds_limit(
        limit in 0usize..8,
        seed in proptest::collection::vec(0usize..20, 0..30),
        toggles in proptest::collection::vec(0usize..20, 0..60),
    ) {
        let mut set = SelectionSet::from_indices(limit, seed);
        prop_assert!(set.len() <= set.limit());
        for index in toggles {
            set.toggle(index);
            prop_assert!(set.len() <= limit);
            prop_assert_eq!(set.can_advance(), set.len() == limit);
        }
    }
}

// ---- Phase controller ----

#[test]
fn test_full_phase_sequence() {
    let mut engine = ready_to_launch(3);
    assert!(engine.can_launch());
    assert!(engine.launch(0));
    assert_eq!(engine.phase(), GamePhase::Launch);

    let outcome = engine.tick(2999);
    assert!(!outcome.animation_complete);
    assert_eq!(engine.phase(), GamePhase::Launch);

    let outcome = engine.tick(3000);
    assert!(outcome.animation_complete);
    assert_eq!(engine.phase(), GamePhase::Results);
    assert!(outcome.events.contains(&GameEvent::PhaseChanged {
        from: GamePhase::Launch,
        to: GamePhase::Results,
    }));

    assert!(engine.reset());
    assert_eq!(engine.phase(), GamePhase::Menu);
}

#[test]
fn test_opponent_selects_only_at_launch() {
    let mut engine = ready_to_launch(5);
    assert!(engine.selections(Side::Opponent).defenses.is_empty());
    assert!(engine.selections(Side::Opponent).targets.is_empty());

    engine.launch(0);
    let opponent = engine.selections(Side::Opponent);
    assert_eq!(opponent.defenses.len(), DEFENSE_LIMIT);
    assert_eq!(opponent.targets.len(), TARGET_LIMIT);
    assert!(opponent.defenses.iter().all(|i| i < 10));
    assert!(opponent.targets.iter().all(|i| i < 10));
}

#[test]
fn test_opponent_selection_follows_seed() {
    let picks = |seed| {
        let mut engine = ready_to_launch(seed);
        engine.launch(0);
        let opponent = engine.selections(Side::Opponent).clone();
        (
            opponent.defenses.iter().collect::<Vec<_>>(),
            opponent.targets.iter().collect::<Vec<_>>(),
        )
    };
    assert_eq!(picks(99), picks(99));
    assert!((0..10).any(|seed| picks(seed) != picks(99)));
}

#[test]
fn test_launch_requires_full_selections() {
    let mut engine = headless(1);
    engine.start_game();
    for i in 0..DEFENSE_LIMIT {
        engine.toggle_defense(i);
    }
    assert!(!engine.launch(0), "still in defense phase");
    engine.continue_to_offense();
    engine.toggle_target(0);
    assert!(!engine.can_launch());
    assert!(!engine.launch(0));
    assert_eq!(engine.phase(), GamePhase::Offense);
}

#[test]
fn test_reset_discards_everything() {
    for stop_at in [GamePhase::Defense, GamePhase::Offense, GamePhase::Launch] {
        let mut engine = ready_to_launch(2);
        if stop_at == GamePhase::Defense {
            engine = headless(2);
            engine.start_game();
            engine.toggle_defense(3);
        } else if stop_at == GamePhase::Launch {
            engine.launch(0);
            engine.tick(2500);
        }
        assert_eq!(engine.phase(), stop_at);

        assert!(engine.reset());
        assert_eq!(engine.phase(), GamePhase::Menu);
        assert!(engine.selections(Side::Player).defenses.is_empty());
        assert!(engine.selections(Side::Player).targets.is_empty());
        assert!(engine.selections(Side::Opponent).targets.is_empty());
        assert!(engine.missiles().is_empty());
        assert_eq!(engine.effect_count(), 0);
        assert!(engine.destroyed_cities(Side::Player).is_empty());
        assert!(engine.destroyed_cities(Side::Opponent).is_empty());
    }
}

#[test]
fn test_invalid_actions_are_ignored() {
    let mut engine = headless(1);
    assert!(!engine.reset(), "reset is meaningless at the menu");
    assert!(!engine.continue_to_offense());
    assert!(!engine.launch(0));
    engine.start_game();
    assert!(!engine.start_game(), "already playing");
    assert_eq!(engine.phase(), GamePhase::Defense);
}

#[test]
fn test_queued_commands_apply_on_tick() {
    let mut engine = headless(1);
    engine.queue_command(PlayerCommand::StartGame);
    engine.queue_commands((0..DEFENSE_LIMIT).map(|index| PlayerCommand::ToggleDefense { index }));
    engine.queue_command(PlayerCommand::Continue);
    assert_eq!(engine.phase(), GamePhase::Menu, "nothing happens before the tick");

    let outcome = engine.tick(0);
    assert_eq!(engine.phase(), GamePhase::Offense);
    assert_eq!(
        outcome.events,
        vec![
            GameEvent::PhaseChanged {
                from: GamePhase::Menu,
                to: GamePhase::Defense,
            },
            GameEvent::PhaseChanged {
                from: GamePhase::Defense,
                to: GamePhase::Offense,
            },
        ]
    );
}

#[test]
fn test_queued_launch_uses_tick_time() {
    let mut engine = ready_to_launch(4);
    engine.queue_command(PlayerCommand::Launch);
    engine.tick(10_000);
    assert_eq!(engine.wave().started_at_ms(), Some(10_000));
    assert!(!engine.tick(12_999).animation_complete);
    assert!(engine.tick(13_000).animation_complete);
}

#[test]
fn test_display_toggles() {
    let mut engine = GameEngine::new(SimConfig::default()).unwrap();
    assert!(!engine.toggle_grid(), "not while loading");
    let mut engine = headless(1);
    assert!(engine.toggle_grid());
    assert!(engine.toggle_help());
    assert!(engine.show_grid() && engine.show_help());
    engine.start_game();
    assert!(engine.show_grid(), "display modes survive a new game");
}

// ---- Launch pairing ----

#[test]
fn test_launch_pairs_targets_with_defenses_in_index_order() {
    let harness = WaveHarness::launch(selections(&[4, 1, 7, 2, 9], &[8, 0, 3, 6, 5], &[], &[]));
    let registry = &harness.registry;
    let pairs: Vec<(DVec2, CityRef)> = harness
        .wave
        .attacks()
        .map(|(_, a)| (a.flight.origin, a.target))
        .collect();
    let expected: Vec<(DVec2, CityRef)> = [(1, 0), (2, 3), (4, 5), (7, 6), (9, 8)]
        .into_iter()
        .map(|(from, to)| {
            (
                registry.city(Side::Player, from).unwrap().position(),
                CityRef::new(Side::Opponent, to),
            )
        })
        .collect();
    assert_eq!(pairs, expected);
}

#[test]
fn test_launch_excess_targets_get_no_missile() {
    let harness = WaveHarness::launch(selections(&[], &[], &[3, 4], &[0, 1, 2]));
    assert_eq!(harness.wave.len(), 2);
    assert!(harness
        .wave
        .attacks()
        .all(|(_, a)| a.owner == Side::Opponent && a.target.index < 2));
}

// ---- Wave timing ----

#[test]
fn test_intercept_appears_at_half_wave_and_lands_at_three_quarters() {
    // Opponent fires from Moscow at New York, which the player defends.
    let mut harness = WaveHarness::launch(selections(&[0, 1, 2, 3, 4], &[], &[0], &[0]));

    harness.step(1000);
    assert!(harness.intercepts().is_empty(), "no interceptor before 50%");

    harness.step(1500);
    let intercepts = harness.intercepts();
    assert_eq!(intercepts.len(), 1);
    assert_eq!(intercepts[0].1, 0.0);

    harness.step(2250);
    let intercepts = harness.intercepts();
    assert_eq!(intercepts.len(), 1, "interceptors are launched once");
    assert_eq!(intercepts[0].1, 1.0);
}

#[test]
fn test_intercept_aims_at_attack_midpoint() {
    let mut harness = WaveHarness::launch(selections(&[0, 1, 2, 3, 4], &[], &[0], &[0]));
    harness.step(1600);
    let (attack_id, attack) = harness.wave.attacks().next().unwrap();
    let expected_aim = attack.flight.point_at(0.5);
    let (_, interceptor) = harness.wave.intercepts().next().unwrap();
    assert_eq!(interceptor.target_missile, attack_id);
    assert_eq!(interceptor.owner, Side::Player);
    assert_eq!(interceptor.flight.destination, expected_aim);
    assert_eq!(
        interceptor.flight.origin,
        harness.registry.city(Side::Player, 0).unwrap().position()
    );
    assert_eq!(harness.wave.interceptor_for(attack_id), Some(MissileId(1)));
}

#[test]
fn test_intercept_progress_formula() {
    assert_eq!(flight::intercept_progress(0.25), 0.0);
    assert_eq!(flight::intercept_progress(0.5), 0.0);
    assert_eq!(flight::intercept_progress(0.625), 0.5);
    assert_eq!(flight::intercept_progress(0.75), 1.0);
    assert_eq!(flight::intercept_progress(0.9), 1.0);
}

#[test]
fn test_wave_completion_forces_full_progress() {
    let mut harness = WaveHarness::launch(selections(&[0, 1, 2, 3, 4], &[0, 1], &[0], &[0]));
    assert!(!harness.step(2999));
    assert!(harness.step(3000));
    assert!(harness
        .wave
        .missiles()
        .iter()
        .all(|m| m.flight().progress == 1.0));
    assert_eq!(harness.wave.progress(), 1.0);
}

// ---- Resolution ----

#[test]
fn test_end_to_end_defended_city_survives() {
    // Player defends {0..5}; opponent targets New York (defended) and Seattle (not).
    let mut harness = WaveHarness::launch(selections(&[0, 1, 2, 3, 4], &[], &[0, 1], &[0, 5]));
    harness.run_to_end();

    let player = harness.destruction.side(Side::Player);
    assert!(!player.is_destroyed(0), "New York was intercepted");
    assert!(player.is_destroyed(5));
    assert_eq!(player.names(), ["Seattle".to_owned()]);

    let (_, new_york_attack) = harness
        .wave
        .attacks()
        .find(|(_, a)| a.target.index == 0)
        .unwrap();
    assert!(new_york_attack.intercepted);
    assert!(!new_york_attack.impact_applied);
    assert!(harness.events.contains(&GameEvent::MissileIntercepted {
        side: Side::Player,
        city_index: 0,
    }));
}

#[test]
fn test_city_destroyed_at_most_once() {
    let registry = CityRegistry::default();
    let mut destruction = DestructionRecord::new(&registry);
    let mut effect_world = World::new();
    let mut events = Vec::new();
    let target = CityRef::new(Side::Opponent, 2);
    let kiev = registry.city(Side::Opponent, 2).unwrap().position();

    let mut wave = Wave::default();
    wave.begin(0);
    let first = wave.push(attack(DVec2::ZERO, kiev, target));
    let second = wave.push(attack(DVec2::new(10.0, 10.0), kiev, target));
    for m in wave.missiles_mut() {
        m.flight_mut().set_progress(1.0);
    }

    let destroyed = impact::run(
        &mut wave,
        &mut destruction,
        &registry,
        &mut effect_world,
        3000,
        &mut events,
    );
    assert_eq!(destroyed, 1);
    assert_eq!(destruction.side(Side::Opponent).names(), ["Kiev".to_owned()]);
    assert_eq!(effects::count(&effect_world), 1);
    for id in [first, second] {
        assert!(wave.get(id).unwrap().impact_applied());
    }

    // Running again changes nothing.
    let destroyed = impact::run(
        &mut wave,
        &mut destruction,
        &registry,
        &mut effect_world,
        3016,
        &mut events,
    );
    assert_eq!(destroyed, 0);
    assert_eq!(destruction.side(Side::Opponent).names().len(), 1);
}

#[test]
fn test_intercepted_flag_suppresses_impact() {
    // No defenses at all: only the manual flag can save Moscow.
    let mut harness = WaveHarness::launch(selections(&[0], &[0], &[], &[]));
    harness.step(1500);
    if let Some(Missile::Attack(a)) = harness.wave.get_mut(MissileId(0)) {
        a.intercepted = true;
    }
    harness.run_to_end();
    assert!(!harness.destruction.is_destroyed(Side::Opponent, 0));
    assert!(harness.destruction.side(Side::Opponent).names().is_empty());
}

#[test]
fn test_impact_waits_for_threshold() {
    let mut harness = WaveHarness::launch(selections(&[0], &[0], &[], &[]));
    harness.step(2930);
    assert!(!harness.destruction.is_destroyed(Side::Opponent, 0));
    harness.step(2950);
    assert!(harness.destruction.is_destroyed(Side::Opponent, 0));
}

#[test]
fn test_intercept_returns_newly_intercepted_only() {
    let mut harness = WaveHarness::launch(selections(&[0, 1, 2, 3, 4], &[], &[0, 1], &[0, 1]));
    harness.step(1500);
    let first = intercept::run(
        &mut harness.wave,
        &mut harness.effects,
        1500,
        &mut harness.events,
    );
    assert!(first.is_empty());

    harness.step(2250);
    let again = intercept::run(
        &mut harness.wave,
        &mut harness.effects,
        2250,
        &mut harness.events,
    );
    assert!(again.is_empty(), "already resolved inside step()");
    assert_eq!(
        harness
            .wave
            .attacks()
            .filter(|(_, a)| a.intercepted)
            .count(),
        2
    );
}

#[test]
fn test_large_time_delta_still_intercepts() {
    let mut harness = WaveHarness::launch(selections(&[0, 1, 2, 3, 4], &[], &[0, 1], &[0, 5]));
    assert!(harness.step(60_000), "one huge stall ends the wave");
    assert!(!harness.destruction.is_destroyed(Side::Player, 0));
    assert!(harness.destruction.is_destroyed(Side::Player, 5));
}

#[test]
fn test_engine_wave_outcome_matches_defenses() {
    for seed in 0..20 {
        let mut engine = ready_to_launch(seed);
        engine.launch(0);
        let mut now = 0;
        while !engine.tick(now).animation_complete {
            now += 16;
        }
        assert_eq!(engine.phase(), GamePhase::Results);

        for side in Side::ALL {
            let attacker = engine.selections(side.opponent()).clone();
            let defender = engine.selections(side).clone();
            for target in attacker.targets.iter() {
                assert_eq!(
                    engine.destruction().is_destroyed(side, target),
                    !defender.defenses.contains(target),
                    "seed {seed}: {side:?} city {target}"
                );
            }
            let expected_losses = attacker
                .targets
                .iter()
                .filter(|t| !defender.defenses.contains(*t))
                .count();
            assert_eq!(engine.destroyed_cities(side).len(), expected_losses);
        }
    }
}

// ---- Effects ----

#[test]
fn test_effect_lifetimes() {
    let mut world = World::new();
    let mut buffer = Vec::new();
    effects::spawn(&mut world, EffectKind::Intercept, DVec2::ZERO, 1000);
    effects::spawn(&mut world, EffectKind::CityExplosion, DVec2::ZERO, 1000);

    let fresh = effects::views(&world, 1000);
    assert!(fresh.iter().all(|v| (v.radius - EXPLOSION_RADIUS / 2.0).abs() < 1e-9));

    effects::prune(&mut world, 1799, &mut buffer);
    assert_eq!(effects::count(&world), 2);
    effects::prune(&mut world, 1800, &mut buffer);
    assert_eq!(effects::count(&world), 1, "intercept flash gone after 800 ms");

    let views = effects::views(&world, 2500);
    assert_eq!(views.len(), 1);
    assert_eq!(views[0].kind, EffectKind::CityExplosion);
    assert!((views[0].age - 0.5).abs() < 1e-9);
    assert!((views[0].radius - 0.75 * EXPLOSION_RADIUS).abs() < 1e-9);

    effects::prune(&mut world, 4000, &mut buffer);
    assert_eq!(effects::count(&world), 0);
}

#[test]
fn test_effects_fade_during_results() {
    let mut engine = ready_to_launch(11);
    engine.launch(0);
    let mut now = 0;
    while !engine.tick(now).animation_complete {
        now += 16;
    }
    let explosions = engine
        .effects(now)
        .iter()
        .filter(|e| e.kind == EffectKind::CityExplosion)
        .count();
    let destroyed = engine.destroyed_cities(Side::Player).len()
        + engine.destroyed_cities(Side::Opponent).len();
    assert_eq!(explosions, destroyed);

    engine.tick(now + CITY_EXPLOSION_DURATION_MS);
    assert_eq!(engine.phase(), GamePhase::Results);
    assert_eq!(engine.effect_count(), 0);
}

// ---- Casualties ----

#[test]
fn test_casualties_percentage() {
    let player = vec![
        City::new("Alpha", 0, 0, 8_400_000),
        City::new("Bravo", 10, 0, 2_300_000),
        City::new("Charlie", 20, 0, 5_000_000),
        City::new("Delta", 30, 0, 4_000_000),
        City::new("Echo", 40, 0, 5_000_000),
    ];
    let opponent = (0..5)
        .map(|i| City::new(format!("O{i}"), 500 + i, 0, 1_000_000))
        .collect();
    let registry = CityRegistry::new(player, opponent).unwrap();
    let mut destruction = DestructionRecord::new(&registry);
    destruction.destroy(Side::Player, 0, "Alpha");
    destruction.destroy(Side::Player, 1, "Bravo");

    let report = casualties::calculate(&registry, &destruction);
    assert_eq!(report.player.casualties, 10_700_000);
    assert_eq!(report.player.total_population, 24_700_000);
    assert!((report.player.percent_rounded() - 43.3).abs() < 1e-9);
    assert_eq!(report.opponent.casualties, 0);
    assert_eq!(report.opponent.percent, 0.0);
}

// ---- Snapshot ----

#[test]
fn test_snapshot_per_phase() {
    let engine = GameEngine::new(SimConfig::default()).unwrap();
    let snap = engine.snapshot(0);
    assert!(snap.terminal.is_some());
    assert!(snap.casualties.is_none());

    let mut engine = ready_to_launch(8);
    let snap = engine.snapshot(0);
    assert!(snap.can_launch);
    assert_eq!(snap.targets_selected, 5);
    assert_eq!(snap.player_cities.len(), 10);
    assert_eq!(snap.opponent_cities.iter().filter(|c| c.targeted).count(), 5);

    engine.launch(0);
    engine.tick(1200);
    let snap = engine.snapshot(1200);
    assert_eq!(snap.missiles.len(), 10);
    assert!(snap.missiles.iter().all(|m| m.kind == MissileKind::Attack));
    assert!(snap.terminal.is_none());

    engine.tick(3000);
    let snap = engine.snapshot(3000);
    assert_eq!(snap.phase, GamePhase::Results);
    assert!(snap.casualties.is_some());
    let intercepted = engine
        .wave()
        .attacks()
        .filter(|(_, a)| a.intercepted)
        .count();
    let drawn_attacks = snap
        .missiles
        .iter()
        .filter(|m| m.kind == MissileKind::Attack)
        .count();
    assert_eq!(drawn_attacks, 10 - intercepted, "shot-down missiles are not drawn");
    let json = serde_json::to_string(&snap).unwrap();
    assert!(json.contains("\"phase\":\"Results\""));
}

// ---- Loading terminal ----

fn reveal(terminal: &mut LoadingTerminal) -> u64 {
    let mut now = 0;
    while !terminal.is_ready() {
        now += 60;
        terminal.update(now);
        assert!(now < 120_000, "terminal never finished revealing");
    }
    now
}

#[test]
fn test_terminal_reveals_game_list() {
    let mut terminal = LoadingTerminal::new();
    terminal.update(60);
    assert_eq!(terminal.view().lines, vec!["C".to_owned()]);

    let now = reveal(&mut terminal);
    assert!(now > 0);
    let view = terminal.view();
    assert!(view.prompt_visible);
    assert_eq!(view.lines.len(), TERMINAL_GAMES.len());
    assert_eq!(view.lines.last().unwrap(), TERMINAL_START_GAME);
}

#[test]
fn test_terminal_ignores_input_until_ready() {
    let mut terminal = LoadingTerminal::new();
    terminal.type_char('x');
    assert_eq!(terminal.input(), "");
    assert_eq!(terminal.submit(0), None);
    assert!(terminal.error().is_none());
}

#[test]
fn test_terminal_rejects_other_games() {
    let mut terminal = LoadingTerminal::new();
    let now = reveal(&mut terminal);

    "chess".chars().for_each(|c| terminal.type_char(c));
    assert_eq!(terminal.input(), "CHESS");
    assert_eq!(terminal.submit(now), None);
    assert_eq!(terminal.error(), Some("UNABLE TO FIND PROGRAM: CHESS"));
    assert_eq!(terminal.input(), "");

    "tic tac toe".chars().for_each(|c| terminal.type_char(c));
    assert_eq!(terminal.submit(now), None);
    assert_eq!(terminal.error(), Some("INVALID SELECTION"));

    terminal.update(now + TERMINAL_ERROR_DURATION_MS);
    assert!(terminal.error().is_some());
    terminal.update(now + TERMINAL_ERROR_DURATION_MS + 1);
    assert!(terminal.error().is_none());
}

#[test]
fn test_terminal_backspace_and_start() {
    let mut terminal = LoadingTerminal::new();
    let now = reveal(&mut terminal);
    "global thermonuclear warz".chars().for_each(|c| terminal.type_char(c));
    terminal.backspace();
    assert_eq!(terminal.submit(now), Some(TerminalOutcome::StartGame));
}

#[test]
fn test_engine_leaves_loading_via_terminal() {
    let mut engine = GameEngine::new(SimConfig::default()).unwrap();
    let mut now = 0;
    while !engine.terminal().is_ready() {
        now += 60;
        engine.tick(now);
    }
    engine.queue_commands(
        TERMINAL_START_GAME
            .chars()
            .map(|ch| PlayerCommand::TerminalChar { ch }),
    );
    engine.queue_command(PlayerCommand::TerminalSubmit);
    let outcome = engine.tick(now + 16);
    assert_eq!(engine.phase(), GamePhase::Menu);
    assert!(outcome.events.contains(&GameEvent::PhaseChanged {
        from: GamePhase::Loading,
        to: GamePhase::Menu,
    }));
}
