//! Raw-mode terminal handling.
//!
//! [`Screen`] owns the alternate screen for as long as it lives, so the
//! terminal is given back on every exit path, early `?` returns included.

use std::io::{self, Stdout};
use std::panic;
use std::sync::Once;

use crossterm::{
    ExecutableCommand,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::{debug, error, warn};

pub type AppTerminal = Terminal<CrosstermBackend<Stdout>>;

static PANIC_HOOK: Once = Once::new();

pub struct Screen {
    terminal: AppTerminal,
}

impl Screen {
    pub fn enter() -> io::Result<Self> {
        PANIC_HOOK.call_once(install_panic_hook);

        enable_raw_mode()?;
        let entered = io::stdout()
            .execute(EnterAlternateScreen)
            .and_then(|_| Terminal::new(CrosstermBackend::new(io::stdout())));

        match entered {
            Ok(terminal) => {
                debug!("Entered alternate screen");
                Ok(Self { terminal })
            }
            Err(err) => {
                let _ = leave();
                Err(err)
            }
        }
    }

    pub fn terminal(&mut self) -> &mut AppTerminal {
        &mut self.terminal
    }
}

impl Drop for Screen {
    fn drop(&mut self) {
        if let Err(err) = leave() {
            warn!("Could not restore the terminal: {}", err);
        }
        let _ = self.terminal.show_cursor();
        debug!("Left alternate screen");
    }
}

fn leave() -> io::Result<()> {
    disable_raw_mode()?;
    io::stdout().execute(LeaveAlternateScreen)?;
    Ok(())
}

/// Gives the terminal back before the panic message is printed, and keeps a
/// copy of the message in the log.
fn install_panic_hook() {
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        error!("Panic: {}", panic_info);
        let _ = leave();
        original_hook(panic_info);
    }));
}
