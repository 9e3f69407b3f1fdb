use crate::presentation::renderers::backend::CrosstermTerminal;
use crate::presentation::renderers::refresh::Dashboard;
use anyhow::Result;
use crossterm::{cursor, execute};
use std::io;
use workclock_core::{Clock, ColorMode, Config};

/// Redraws the dashboard until interrupted.
pub fn handle<C: Clock>(config: &Config, clock: C, mode: ColorMode) -> Result<()> {
    // Restore the cursor on Ctrl+C; the loop never returns on its own
    ctrlc::set_handler(move || {
        let _ = execute!(io::stdout(), cursor::Show);
        std::process::exit(0);
    })?;

    warn_if_unsized();

    let mut dashboard = Dashboard::new(config, clock, mode, Box::new(CrosstermTerminal::new()));
    dashboard.run()
}

/// Draws a single frame below the current cursor position.
pub fn handle_once<C: Clock>(config: &Config, clock: C, mode: ColorMode) -> Result<()> {
    let mut dashboard = Dashboard::new(config, clock, mode, Box::new(CrosstermTerminal::new()));
    dashboard.draw_once()
}

fn warn_if_unsized() {
    if terminal_size::terminal_size().is_none() {
        log::warn!(
            "terminal size unavailable, assuming {} columns",
            crate::presentation::renderers::backend::FALLBACK_WIDTH
        );
    }
}
