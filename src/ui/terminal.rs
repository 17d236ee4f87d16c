//! # Terminal Session
//!
//! Raw mode and the alternate screen are held by a [`TerminalGuard`]. The
//! guard restores the terminal when it is dropped, so every exit path out of
//! the event loop (normal return, `?` error, unwinding panic) hands the user
//! back a working shell. [`install_panic_hook`] covers panics that abort
//! before unwinding reaches the guard, and [`install_signal_handler`] covers
//! SIGINT, SIGTERM and SIGHUP, which would otherwise kill the process with
//! the terminal still in raw mode.

use anyhow::{Context, Result};
use crossterm::{
    cursor::Show,
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout, Write};
use std::panic;

/// Exit status after a termination signal (128 + SIGINT, as a shell reports it).
pub const SIGNAL_EXIT_CODE: i32 = 130;

pub type CrosstermTerminal = Terminal<CrosstermBackend<Stdout>>;

/// Exclusive ownership of the user's terminal for the lifetime of the dashboard.
pub struct TerminalGuard {
    terminal: CrosstermTerminal,
    restored: bool,
}

impl TerminalGuard {
    /// Enter raw mode and the alternate screen.
    ///
    /// Fails without drawing anything if the terminal cannot be put into raw
    /// mode; any partial setup is undone before returning the error.
    pub fn acquire() -> Result<Self> {
        enable_raw_mode().context("Failed to enable raw mode for terminal")?;

        let mut stdout = io::stdout();
        if let Err(e) = execute!(stdout, EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(e).context("Failed to setup terminal");
        }

        let backend = CrosstermBackend::new(stdout);
        let mut terminal = match Terminal::new(backend) {
            Ok(terminal) => terminal,
            Err(e) => {
                let _ = disable_raw_mode();
                let _ = execute!(io::stdout(), LeaveAlternateScreen);
                return Err(e).context("Failed to create terminal");
            }
        };
        let _ = terminal.hide_cursor();

        log::debug!("Terminal acquired");

        Ok(Self {
            terminal,
            restored: false,
        })
    }

    pub fn terminal_mut(&mut self) -> &mut CrosstermTerminal {
        &mut self.terminal
    }

    /// Leave the alternate screen and raw mode. Safe to call more than once.
    pub fn restore(&mut self) -> Result<()> {
        if self.restored {
            return Ok(());
        }
        self.restored = true;

        // Every step runs even if an earlier one failed; the first error wins.
        let raw = disable_raw_mode().context("Failed to disable raw mode");
        let screen = execute!(self.terminal.backend_mut(), LeaveAlternateScreen)
            .context("Failed to restore terminal");
        let cursor = self
            .terminal
            .show_cursor()
            .context("Failed to show cursor");

        log::debug!("Terminal restored");

        raw.and(screen).and(cursor)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        if let Err(e) = self.restore() {
            log::error!("Terminal restore failed: {:#}", e);
        }
    }
}

/// Restore the terminal before the default panic message is printed.
pub fn install_panic_hook() {
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let _ = restore_terminal(&mut io::stdout());

        original_hook(panic_info);
    }));
}

/// Leave raw mode and the alternate screen and show the cursor, writing the
/// escape sequences to `out`. Used where the [`TerminalGuard`] is out of reach.
pub fn restore_terminal<W: Write>(out: &mut W) -> io::Result<()> {
    let raw = disable_raw_mode();
    let screen = execute!(out, LeaveAlternateScreen, Show);
    raw.and(screen)
}

/// Restore the terminal and exit when baker is asked to terminate.
///
/// Must be called at most once per process.
pub fn install_signal_handler() -> Result<()> {
    ctrlc::set_handler(|| {
        let _ = restore_terminal(&mut io::stdout());
        log::info!("Terminated by signal, terminal restored");
        std::process::exit(SIGNAL_EXIT_CODE);
    })
    .context("Failed to install signal handler")
}
