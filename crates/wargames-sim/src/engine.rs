//! Game engine: the phase state machine that owns all session state.
//!
//! `GameEngine` applies player actions, runs the wave systems while missiles
//! are in flight, and produces `GameStateSnapshot`s. Completely headless:
//! time comes in as monotonic milliseconds, so tests can drive it exactly.

use std::collections::VecDeque;

use glam::DVec2;
use hecs::{Entity, World};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{error, info};

use wargames_core::cities::CityRegistry;
use wargames_core::commands::PlayerCommand;
use wargames_core::constants::*;
use wargames_core::enums::{GamePhase, Role, Side};
use wargames_core::error::SetupError;
use wargames_core::events::GameEvent;
use wargames_core::state::{CasualtyReport, EffectView, GameStateSnapshot};

use crate::casualties;
use crate::destruction::DestructionRecord;
use crate::loading::{LoadingTerminal, TerminalOutcome};
use crate::selection::{SelectionSet, Selections, SideSelections};
use crate::systems;
use crate::wave::{Missile, Wave};

/// Configuration for a new session.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// RNG seed for the opponent's picks. Same seed = same opponent.
    pub seed: u64,
    /// Start at the menu instead of the WOPR terminal.
    pub skip_loading: bool,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            skip_loading: false,
        }
    }
}

/// Result of one tick.
#[derive(Debug, Clone, Default)]
pub struct TickOutcome {
    /// The wave finished during this tick (the engine is now in Results).
    pub animation_complete: bool,
    pub events: Vec<GameEvent>,
}

/// The game engine. Owns the session state exclusively.
pub struct GameEngine {
    registry: CityRegistry,
    phase: GamePhase,
    rng: ChaCha8Rng,
    selections: SideSelections,
    wave: Wave,
    destruction: DestructionRecord,
    effects: World,
    despawn_buffer: Vec<Entity>,
    terminal: LoadingTerminal,
    show_grid: bool,
    show_help: bool,
    command_queue: VecDeque<PlayerCommand>,
    events: Vec<GameEvent>,
}

impl GameEngine {
    /// Create an engine over the built-in city registry.
    pub fn new(config: SimConfig) -> Result<Self, SetupError> {
        Self::with_registry(config, CityRegistry::default())
    }

    /// Create an engine over a custom registry.
    ///
    /// Fails if either side is too small for the opponent to make its picks.
    pub fn with_registry(config: SimConfig, registry: CityRegistry) -> Result<Self, SetupError> {
        validate_registry(&registry)?;
        let phase = if config.skip_loading {
            GamePhase::Menu
        } else {
            GamePhase::Loading
        };
        Ok(Self {
            destruction: DestructionRecord::new(&registry),
            registry,
            phase,
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            selections: SideSelections::default(),
            wave: Wave::default(),
            effects: World::new(),
            despawn_buffer: Vec::new(),
            terminal: LoadingTerminal::new(),
            show_grid: false,
            show_help: false,
            command_queue: VecDeque::new(),
            events: Vec::new(),
        })
    }

    // --- Read-only views ---

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn registry(&self) -> &CityRegistry {
        &self.registry
    }

    pub fn selections(&self, side: Side) -> &Selections {
        self.selections.side(side)
    }

    pub fn wave(&self) -> &Wave {
        &self.wave
    }

    /// Every missile of the current wave, resolved ones included.
    pub fn missiles(&self) -> &[Missile] {
        self.wave.missiles()
    }

    /// Effects still alive at `now_ms`.
    pub fn effects(&self, now_ms: u64) -> Vec<EffectView> {
        systems::effects::views(&self.effects, now_ms)
    }

    /// Number of effect records currently held (including ones not yet pruned).
    pub fn effect_count(&self) -> usize {
        systems::effects::count(&self.effects)
    }

    pub fn destruction(&self) -> &DestructionRecord {
        &self.destruction
    }

    /// Names of `side`'s destroyed cities, in order of destruction.
    pub fn destroyed_cities(&self, side: Side) -> &[String] {
        self.destruction.side(side).names()
    }

    pub fn terminal(&self) -> &LoadingTerminal {
        &self.terminal
    }

    pub fn show_grid(&self) -> bool {
        self.show_grid
    }

    pub fn show_help(&self) -> bool {
        self.show_help
    }

    // --- Selection ---

    /// Toggle defense on a player city. Only during the defense phase.
    pub fn toggle_defense(&mut self, index: usize) -> bool {
        self.phase == GamePhase::Defense && self.toggle(Side::Player, Role::Defense, index)
    }

    /// Toggle an opponent city as a target. Only during the offense phase.
    pub fn toggle_target(&mut self, index: usize) -> bool {
        self.phase == GamePhase::Offense && self.toggle(Side::Player, Role::Target, index)
    }

    fn toggle(&mut self, side: Side, role: Role, index: usize) -> bool {
        let pool = match role {
            Role::Defense => side,
            Role::Target => side.opponent(),
        };
        if index >= self.registry.len(pool) {
            return false;
        }
        self.selections.side_mut(side).get_mut(role).toggle(index)
    }

    pub fn can_continue(&self) -> bool {
        self.selections.player.defenses.can_advance()
    }

    pub fn can_launch(&self) -> bool {
        let player = &self.selections.player;
        player.defenses.can_advance() && player.targets.can_advance()
    }

    /// Map a pointer position to a city for the current phase and toggle it.
    pub fn click(&mut self, point: DVec2) -> bool {
        match self.phase {
            GamePhase::Defense => self
                .registry
                .city_at(Side::Player, point, CITY_PICK_RADIUS)
                .is_some_and(|index| self.toggle_defense(index)),
            GamePhase::Offense => self
                .registry
                .city_at(Side::Opponent, point, CITY_PICK_RADIUS)
                .is_some_and(|index| self.toggle_target(index)),
            _ => false,
        }
    }

    // --- Phase transitions ---

    /// Menu → Defense, with a clean slate.
    pub fn start_game(&mut self) -> bool {
        if self.phase != GamePhase::Menu {
            return false;
        }
        self.clear_session();
        self.set_phase(GamePhase::Defense);
        true
    }

    /// Defense → Offense, once the defenses are complete.
    pub fn continue_to_offense(&mut self) -> bool {
        if self.phase != GamePhase::Defense || !self.can_continue() {
            return false;
        }
        self.set_phase(GamePhase::Offense);
        true
    }

    /// Offense → Launch. The opponent picks its cities here and nowhere else.
    pub fn launch(&mut self, now_ms: u64) -> bool {
        if self.phase != GamePhase::Offense || !self.can_launch() {
            return false;
        }

        let plan = match wargames_opponent::select_plan(
            &mut self.rng,
            self.registry.len(Side::Opponent),
            self.registry.len(Side::Player),
        ) {
            Ok(plan) => plan,
            Err(err) => {
                // Unreachable for a registry accepted by `with_registry`.
                error!(%err, "opponent selection failed");
                return false;
            }
        };
        self.selections.opponent = Selections {
            defenses: SelectionSet::from_indices(DEFENSE_LIMIT, plan.defenses),
            targets: SelectionSet::from_indices(TARGET_LIMIT, plan.targets),
        };

        self.wave.begin(now_ms);
        let launched = systems::launch::run(&mut self.wave, &self.selections, &self.registry);
        info!(
            missiles = launched,
            opponent_defenses = ?self.selections.opponent.defenses.iter().collect::<Vec<_>>(),
            opponent_targets = ?self.selections.opponent.targets.iter().collect::<Vec<_>>(),
            "wave launched"
        );
        self.set_phase(GamePhase::Launch);
        true
    }

    /// Return to the menu from any in-game phase, discarding the game.
    pub fn reset(&mut self) -> bool {
        if matches!(self.phase, GamePhase::Loading | GamePhase::Menu) {
            return false;
        }
        self.clear_session();
        self.set_phase(GamePhase::Menu);
        true
    }

    pub fn toggle_grid(&mut self) -> bool {
        if self.phase == GamePhase::Loading {
            return false;
        }
        self.show_grid = !self.show_grid;
        true
    }

    pub fn toggle_help(&mut self) -> bool {
        if self.phase == GamePhase::Loading {
            return false;
        }
        self.show_help = !self.show_help;
        true
    }

    // --- Commands ---

    /// Queue a player command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: PlayerCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = PlayerCommand>) {
        self.command_queue.extend(commands);
    }

    /// Apply a single command immediately. Returns whether it had any effect.
    pub fn handle_command(&mut self, command: PlayerCommand, now_ms: u64) -> bool {
        match command {
            PlayerCommand::StartGame => self.start_game(),
            PlayerCommand::Continue => self.continue_to_offense(),
            PlayerCommand::Launch => self.launch(now_ms),
            PlayerCommand::Reset => self.reset(),
            PlayerCommand::ToggleDefense { index } => self.toggle_defense(index),
            PlayerCommand::ToggleTarget { index } => self.toggle_target(index),
            PlayerCommand::Click { x, y } => self.click(DVec2::new(x, y)),
            PlayerCommand::ToggleGrid => self.toggle_grid(),
            PlayerCommand::ToggleHelp => self.toggle_help(),
            PlayerCommand::TerminalChar { ch } => {
                if self.phase != GamePhase::Loading {
                    return false;
                }
                self.terminal.type_char(ch);
                true
            }
            PlayerCommand::TerminalBackspace => {
                if self.phase != GamePhase::Loading {
                    return false;
                }
                self.terminal.backspace();
                true
            }
            PlayerCommand::TerminalSubmit => {
                if self.phase != GamePhase::Loading {
                    return false;
                }
                match self.terminal.submit(now_ms) {
                    Some(TerminalOutcome::StartGame) => {
                        self.set_phase(GamePhase::Menu);
                        true
                    }
                    None => false,
                }
            }
        }
    }

    fn process_commands(&mut self, now_ms: u64) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command, now_ms);
        }
    }

    // --- Tick ---

    /// Apply queued commands and advance everything time-driven to `now_ms`.
    pub fn tick(&mut self, now_ms: u64) -> TickOutcome {
        self.process_commands(now_ms);

        let mut animation_complete = false;
        match self.phase {
            GamePhase::Loading => self.terminal.update(now_ms),
            GamePhase::Launch => {
                animation_complete = self.run_wave_systems(now_ms);
                if animation_complete {
                    self.set_phase(GamePhase::Results);
                }
            }
            GamePhase::Results => {
                systems::effects::prune(&mut self.effects, now_ms, &mut self.despawn_buffer);
            }
            GamePhase::Menu | GamePhase::Defense | GamePhase::Offense => {}
        }

        TickOutcome {
            animation_complete,
            events: std::mem::take(&mut self.events),
        }
    }

    /// Run the wave systems in order. Returns true when the wave is over.
    fn run_wave_systems(&mut self, now_ms: u64) -> bool {
        // 1. Flight progress and interceptor launches
        let complete = systems::flight::run(
            &mut self.wave,
            &self.selections,
            &self.registry,
            now_ms,
            &mut self.events,
        );
        // 2. Intercepts resolve before impacts so a due intercept always wins
        systems::intercept::run(&mut self.wave, &mut self.effects, now_ms, &mut self.events);
        // 3. Impacts
        systems::impact::run(
            &mut self.wave,
            &mut self.destruction,
            &self.registry,
            &mut self.effects,
            now_ms,
            &mut self.events,
        );
        // 4. Expired effects
        systems::effects::prune(&mut self.effects, now_ms, &mut self.despawn_buffer);
        complete
    }

    // --- Results ---

    pub fn calculate_casualties(&self) -> CasualtyReport {
        casualties::calculate(&self.registry, &self.destruction)
    }

    /// Build the presentation snapshot for `now_ms`.
    pub fn snapshot(&self, now_ms: u64) -> GameStateSnapshot {
        systems::snapshot::build_snapshot(self, now_ms)
    }

    // --- Internals ---

    fn set_phase(&mut self, to: GamePhase) {
        let from = self.phase;
        if from == to {
            return;
        }
        info!(?from, ?to, "phase change");
        self.phase = to;
        self.events.push(GameEvent::PhaseChanged { from, to });
    }

    fn clear_session(&mut self) {
        self.selections.clear();
        self.wave.clear();
        self.destruction.reset(&self.registry);
        self.effects.clear();
    }
}

fn validate_registry(registry: &CityRegistry) -> Result<(), SetupError> {
    for side in Side::ALL {
        if registry.is_empty(side) {
            return Err(SetupError::EmptyRegistry { side });
        }
    }
    // Each side defends from its own pool and targets the other side's pool.
    let checks = [
        (Role::Defense, Side::Player, DEFENSE_LIMIT),
        (Role::Defense, Side::Opponent, DEFENSE_LIMIT),
        (Role::Target, Side::Opponent, TARGET_LIMIT),
        (Role::Target, Side::Player, TARGET_LIMIT),
    ];
    for (role, side, limit) in checks {
        let pool = registry.len(side);
        if limit > pool {
            return Err(SetupError::LimitExceedsPool {
                role,
                side,
                limit,
                pool,
            });
        }
    }
    Ok(())
}
