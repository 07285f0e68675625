//! WOPR loading terminal.
//!
//! Types out the list of games one character at a time, then waits for the
//! player to ask for the only game that is actually available.

use tracing::debug;

use wargames_core::constants::*;
use wargames_core::state::TerminalView;

/// Result of submitting terminal input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminalOutcome {
    StartGame,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct TerminalError {
    message: String,
    shown_at_ms: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadingTerminal {
    current_line: usize,
    current_char: usize,
    /// Timestamp of the last reveal step. May lie in the future after a line break.
    last_step_ms: u64,
    reveal_complete: bool,
    input: String,
    error: Option<TerminalError>,
}

impl LoadingTerminal {
    pub fn new() -> Self {
        Self::default()
    }

    /// True once the whole list is shown and input is accepted.
    pub fn is_ready(&self) -> bool {
        self.reveal_complete
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_ref().map(|e| e.message.as_str())
    }

    /// Reveal at most one more character and expire stale errors.
    pub fn update(&mut self, now_ms: u64) {
        if !self.reveal_complete && now_ms.saturating_sub(self.last_step_ms) > TERMINAL_CHAR_DELAY_MS
        {
            match TERMINAL_GAMES.get(self.current_line) {
                Some(line) if self.current_char < line.len() => {
                    self.current_char += 1;
                    self.last_step_ms = now_ms;
                }
                Some(_) => {
                    self.current_line += 1;
                    self.current_char = 0;
                    self.last_step_ms = now_ms + TERMINAL_LINE_DELAY_MS;
                }
                None => {
                    self.reveal_complete = true;
                    debug!("terminal ready for input");
                }
            }
        }

        if self
            .error
            .as_ref()
            .is_some_and(|e| now_ms.saturating_sub(e.shown_at_ms) > TERMINAL_ERROR_DURATION_MS)
        {
            self.error = None;
        }
    }

    /// Append a printable character, upper-cased. Ignored until ready.
    pub fn type_char(&mut self, ch: char) {
        if self.reveal_complete && !ch.is_control() {
            self.input.extend(ch.to_uppercase());
        }
    }

    pub fn backspace(&mut self) {
        if self.reveal_complete {
            self.input.pop();
        }
    }

    /// Evaluate the typed input.
    pub fn submit(&mut self, now_ms: u64) -> Option<TerminalOutcome> {
        if !self.reveal_complete {
            return None;
        }
        let request = self.input.trim().to_uppercase();
        if request == TERMINAL_START_GAME {
            return Some(TerminalOutcome::StartGame);
        }

        let known = TERMINAL_GAMES
            .iter()
            .any(|game| !game.is_empty() && game.eq_ignore_ascii_case(&request));
        let message = if known {
            format!("UNABLE TO FIND PROGRAM: {request}")
        } else {
            "INVALID SELECTION".to_owned()
        };
        debug!(%message, "terminal rejected input");
        self.error = Some(TerminalError {
            message,
            shown_at_ms: now_ms,
        });
        self.input.clear();
        None
    }

    pub fn view(&self) -> TerminalView {
        let mut lines: Vec<String> = TERMINAL_GAMES
            .iter()
            .take(self.current_line)
            .map(|line| (*line).to_owned())
            .collect();
        if let Some(line) = TERMINAL_GAMES.get(self.current_line) {
            lines.push(line.chars().take(self.current_char).collect());
        }
        TerminalView {
            lines,
            prompt_visible: self.reveal_complete,
            input: self.input.clone(),
            error: self.error().map(str::to_owned),
        }
    }
}
