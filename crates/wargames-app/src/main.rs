use std::error::Error;
use std::io;
use std::sync::mpsc;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use wargames_app::game_loop::run_game_loop;
use wargames_app::input::spawn_stdin_reader;
use wargames_sim::{GameEngine, SimConfig};

#[derive(Parser)]
#[command(name = "wargames")]
#[command(about = "Headless WARGAMES: JSON commands on stdin, JSON events on stdout")]
#[command(version)]
struct Cli {
    /// Seed for the opponent's picks
    #[arg(long, default_value_t = SimConfig::default().seed)]
    seed: u64,

    /// Start at the menu instead of the WOPR terminal
    #[arg(long)]
    skip_loading: bool,

    /// Enable verbose logging to stderr
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    // Logs go to stderr; stdout carries the protocol. RUST_LOG wins if set.
    let default_level = if cli.verbose { "debug" } else { "info" };
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .with(env_filter)
        .init();

    let mut engine = GameEngine::new(SimConfig {
        seed: cli.seed,
        skip_loading: cli.skip_loading,
    })?;

    let (cmd_tx, cmd_rx) = mpsc::channel();
    let _reader = spawn_stdin_reader(cmd_tx)?;

    let stdout = io::stdout();
    run_game_loop(&mut engine, &cmd_rx, &mut stdout.lock())?;
    Ok(())
}
