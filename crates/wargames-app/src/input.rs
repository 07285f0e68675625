//! Line-oriented command input.

use std::io::{self, BufRead};
use std::sync::mpsc;
use std::thread;

use tracing::warn;

use wargames_core::commands::PlayerCommand;

use crate::state::LoopCommand;

/// Parse one input line.
///
/// Blank lines yield `None`. `snapshot` and `quit` are loop commands; anything
/// else must be a JSON `PlayerCommand`.
pub fn parse_line(line: &str) -> Result<Option<LoopCommand>, serde_json::Error> {
    let line = line.trim();
    match line {
        "" => Ok(None),
        "snapshot" => Ok(Some(LoopCommand::Snapshot)),
        "quit" | "exit" => Ok(Some(LoopCommand::Shutdown)),
        json => serde_json::from_str(json).map(|cmd| Some(LoopCommand::Player(cmd))),
    }
}

/// Forward stdin lines to the game loop until EOF, then ask it to shut down.
pub fn spawn_stdin_reader(
    cmd_tx: mpsc::Sender<LoopCommand>,
) -> io::Result<thread::JoinHandle<()>> {
    thread::Builder::new()
        .name("wargames-stdin".into())
        .spawn(move || {
            for line in io::stdin().lock().lines() {
                let Ok(line) = line else {
                    break;
                };
                match parse_line(&line) {
                    Ok(Some(cmd)) => {
                        if cmd_tx.send(cmd).is_err() {
                            return;
                        }
                    }
                    Ok(None) => {}
                    Err(err) => warn!(%err, %line, "ignoring malformed command"),
                }
            }
            let _ = cmd_tx.send(LoopCommand::Shutdown);
        })
}
