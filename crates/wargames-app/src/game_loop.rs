//! Game loop: runs the engine at 60 Hz on the calling thread.
//!
//! Commands arrive via `mpsc` channel and are queued on the engine before
//! each tick. Events and requested snapshots are written as JSON lines.

use std::io::{self, Write};
use std::sync::mpsc;
use std::time::{Duration, Instant};

use tracing::{debug, info};

use wargames_core::constants::TICK_RATE;
use wargames_sim::GameEngine;

use crate::state::{LoopCommand, LoopOutput};

/// Nominal duration of one frame.
pub const TICK_DURATION: Duration = Duration::from_nanos(1_000_000_000 / TICK_RATE as u64);

/// The game loop. Runs until a Shutdown command or channel disconnect.
///
/// The engine clock is milliseconds since the loop started.
pub fn run_game_loop<W: Write>(
    engine: &mut GameEngine,
    cmd_rx: &mpsc::Receiver<LoopCommand>,
    out: &mut W,
) -> io::Result<()> {
    let started = Instant::now();
    let mut next_tick_time = started;
    let mut ticks: u64 = 0;

    loop {
        // 1. Drain all pending commands
        let mut snapshot_requested = false;
        let mut shutdown = false;
        loop {
            match cmd_rx.try_recv() {
                Ok(LoopCommand::Player(cmd)) => engine.queue_command(cmd),
                Ok(LoopCommand::Snapshot) => snapshot_requested = true,
                Ok(LoopCommand::Shutdown) | Err(mpsc::TryRecvError::Disconnected) => {
                    shutdown = true;
                    break;
                }
                Err(mpsc::TryRecvError::Empty) => break,
            }
        }

        // 2. Advance one tick
        let now_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
        let outcome = engine.tick(now_ms);
        ticks += 1;

        // 3. Report
        for event in &outcome.events {
            write_line(out, &LoopOutput::Event(event))?;
        }
        if snapshot_requested {
            write_line(out, &LoopOutput::Snapshot(&engine.snapshot(now_ms)))?;
        }

        if shutdown {
            info!(ticks, "game loop stopped");
            return Ok(());
        }

        // 4. Sleep until next tick
        next_tick_time += TICK_DURATION;
        let now = Instant::now();
        if next_tick_time > now {
            std::thread::sleep(next_tick_time - now);
        } else if now - next_tick_time > TICK_DURATION * 2 {
            // Too far behind, reset to avoid catch-up spiral
            debug!(behind = ?(now - next_tick_time), "frame schedule reset");
            next_tick_time = now;
        }
    }
}

fn write_line<W: Write>(out: &mut W, message: &LoopOutput<'_>) -> io::Result<()> {
    serde_json::to_writer(&mut *out, message)?;
    writeln!(out)?;
    out.flush()
}
