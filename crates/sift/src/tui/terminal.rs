use crossterm::{
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use eyre::{Context, Result, bail};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{IsTerminal, Stdout, stdout};

/// Install a panic hook that puts the terminal back into a usable state
/// before the panic message is printed.
///
/// Call this once, before creating a [`TerminalGuard`].
pub fn install_panic_hook() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        // Already panicking, nothing useful to do with errors here
        let _ = execute!(stdout(), LeaveAlternateScreen);
        let _ = disable_raw_mode();
        original_hook(panic_info);
    }));
}

/// Owns the terminal for the lifetime of the overlay UI.
///
/// Creating the guard switches to the alternate screen and raw mode;
/// dropping it switches back.
pub struct TerminalGuard {
    terminal: Terminal<CrosstermBackend<Stdout>>,
}

impl TerminalGuard {
    pub fn new() -> Result<Self> {
        if !stdout().is_terminal() {
            bail!(
                "sift overlay requires a terminal (TTY) but stdout is not a terminal. \
                 Use `sift search` when output is piped or redirected."
            );
        }

        enable_raw_mode().context("failed to enable raw mode")?;
        execute!(stdout(), EnterAlternateScreen).context("failed to enter alternate screen")?;

        let terminal =
            Terminal::new(CrosstermBackend::new(stdout())).context("failed to create terminal")?;

        Ok(Self { terminal })
    }

    pub fn terminal(&mut self) -> &mut Terminal<CrosstermBackend<Stdout>> {
        &mut self.terminal
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        // Best-effort restore; the panic hook covers abnormal exits
        let _ = execute!(self.terminal.backend_mut(), LeaveAlternateScreen);
        let _ = self.terminal.show_cursor();
        let _ = disable_raw_mode();
    }
}
