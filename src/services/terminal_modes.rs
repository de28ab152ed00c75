//! Terminal mode management: raw mode and the alternate screen
//!
//! Tracks which modes were enabled so that only those are undone.

use crossterm::cursor::Show;
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use std::io::{self, stdout};

/// Terminal modes enabled for the session
#[derive(Debug, Default)]
pub struct TerminalModes {
    raw_mode: bool,
    alternate_screen: bool,
}

impl TerminalModes {
    /// Enable raw mode and switch to the alternate screen
    ///
    /// On failure, anything already enabled is undone before returning.
    pub fn enable() -> io::Result<Self> {
        let mut modes = Self::default();

        enable_raw_mode()?;
        modes.raw_mode = true;
        tracing::debug!("Enabled raw mode");

        if let Err(e) = execute!(stdout(), EnterAlternateScreen) {
            modes.undo();
            return Err(e);
        }
        modes.alternate_screen = true;
        tracing::debug!("Entered alternate screen");

        Ok(modes)
    }

    /// Restore the terminal; safe to call more than once
    pub fn undo(&mut self) {
        if self.alternate_screen {
            if let Err(e) = execute!(stdout(), LeaveAlternateScreen, Show) {
                tracing::warn!("Failed to leave alternate screen: {}", e);
            }
            self.alternate_screen = false;
        }
        if self.raw_mode {
            if let Err(e) = disable_raw_mode() {
                tracing::warn!("Failed to disable raw mode: {}", e);
            }
            self.raw_mode = false;
        }
    }
}

impl Drop for TerminalModes {
    fn drop(&mut self) {
        self.undo();
    }
}

/// Best-effort restore from a panic hook, where no `TerminalModes` is reachable
pub fn emergency_cleanup() {
    let _ = execute!(stdout(), LeaveAlternateScreen, Show);
    let _ = disable_raw_mode();
}
