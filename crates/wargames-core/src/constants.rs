//! Game constants and tuning parameters.

/// Frame loop rate (Hz). Nominal only; the engine is driven by wall-clock time.
pub const TICK_RATE: u32 = 60;

// --- Map ---

/// Window width in pixels; city coordinates are in this space.
pub const MAP_WIDTH: i32 = 1400;

/// Window height in pixels.
pub const MAP_HEIGHT: i32 = 700;

/// Radius (pixels) within which a click selects a city.
pub const CITY_PICK_RADIUS: f64 = 8.0;

// --- Selection ---

/// Number of own cities each side defends.
pub const DEFENSE_LIMIT: usize = 5;

/// Number of enemy cities each side targets.
pub const TARGET_LIMIT: usize = 5;

// --- Missile wave ---

/// Total flight time of an attack wave (milliseconds).
pub const WAVE_DURATION_MS: u64 = 3000;

/// Wave progress at which defended cities fire interceptors.
pub const INTERCEPT_TRIGGER_PROGRESS: f64 = 0.5;

/// Fraction of the attacker's path where interceptors aim.
pub const INTERCEPT_AIM_FRACTION: f64 = 0.5;

/// Interceptor speed relative to attack missiles.
pub const INTERCEPT_SPEED_FACTOR: f64 = 4.0;

/// Interceptor progress at which the intercept resolves.
pub const INTERCEPT_RESOLVE_PROGRESS: f64 = 0.95;

/// Attack missile progress at which the warhead detonates.
pub const IMPACT_RESOLVE_PROGRESS: f64 = 0.98;

// --- Effects ---

/// Lifetime of a mushroom cloud over a destroyed city (milliseconds).
pub const CITY_EXPLOSION_DURATION_MS: u64 = 3000;

/// Lifetime of an intercept flash (milliseconds).
pub const INTERCEPT_EXPLOSION_DURATION_MS: u64 = 800;

/// Maximum drawn radius of an explosion (pixels).
pub const EXPLOSION_RADIUS: f64 = 30.0;

// --- Loading terminal ---

/// Delay between revealed characters (milliseconds).
pub const TERMINAL_CHAR_DELAY_MS: u64 = 50;

/// Extra pause after each completed line (milliseconds).
pub const TERMINAL_LINE_DELAY_MS: u64 = 200;

/// How long an input error stays on screen (milliseconds).
pub const TERMINAL_ERROR_DURATION_MS: u64 = 3000;

/// Game list printed by the terminal. The last entry starts the game.
pub const TERMINAL_GAMES: [&str; 10] = [
    "CHESS",
    "POKER",
    "FIGHTER COMBAT",
    "GUERRILLA ENGAGEMENT",
    "DESERT WARFARE",
    "AIR-TO-GROUND ACTIONS",
    "THEATERWIDE TACTICAL WARFARE",
    "THEATERWIDE BIOTOXIC AND CHEMICAL WARFARE",
    "",
    "GLOBAL THERMONUCLEAR WAR",
];

/// Terminal input that starts the game.
pub const TERMINAL_START_GAME: &str = "GLOBAL THERMONUCLEAR WAR";

// Interceptors must resolve before the attacker they chase would detonate.
const _: () = assert!(INTERCEPT_RESOLVE_PROGRESS < IMPACT_RESOLVE_PROGRESS);
