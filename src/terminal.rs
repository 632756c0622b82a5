use crossterm::{
    cursor::{SetCursorStyle, Show},
    execute,
    style::ResetColor,
    terminal::{
        self, disable_raw_mode, enable_raw_mode, Clear, ClearType, EnterAlternateScreen,
        LeaveAlternateScreen,
    },
    tty::IsTty,
};
use std::io::{self, stdin, stdout};
use std::sync::Once;

use crate::error::{Result, TyperError};

/// Raw mode and alternate screen for as long as the guard lives.
///
/// The terminal is restored when the guard drops, when the program panics and
/// when it receives SIGINT/SIGTERM/SIGHUP.
#[derive(Debug)]
pub struct TerminalGuard {
    _private: (),
}

impl TerminalGuard {
    pub fn acquire() -> Result<Self> {
        if !stdin().is_tty() {
            return Err(TyperError::TerminalUnavailable(io::Error::new(
                io::ErrorKind::Unsupported,
                "stdin must be a tty",
            )));
        }
        terminal::size().map_err(TyperError::TerminalUnavailable)?;

        install_panic_hook();
        install_signal_handler();

        enable_raw_mode().map_err(TyperError::TerminalUnavailable)?;
        let guard = Self { _private: () };

        execute!(stdout(), EnterAlternateScreen, SetCursorStyle::BlinkingBar)
            .map_err(TyperError::TerminalUnavailable)?;

        tracing::debug!("terminal acquired");
        Ok(guard)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        if let Err(e) = restore() {
            tracing::error!(error = %e, "failed to restore terminal");
        } else {
            tracing::debug!("terminal restored");
        }
    }
}

/// Undo everything `TerminalGuard::acquire` did. Safe to call more than once.
pub fn restore() -> io::Result<()> {
    let screen = execute!(
        stdout(),
        ResetColor,
        Clear(ClearType::All),
        Show,
        SetCursorStyle::DefaultUserShape,
        LeaveAlternateScreen
    );
    let raw = disable_raw_mode();
    screen.and(raw)
}

fn install_panic_hook() {
    static HOOK: Once = Once::new();
    HOOK.call_once(|| {
        let default_panic = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            let _ = restore();
            tracing::error!(target: "runtime.panic", %info, "panic");
            default_panic(info);
        }));
    });
}

fn install_signal_handler() {
    static HANDLER: Once = Once::new();
    HANDLER.call_once(|| {
        let installed = ctrlc::set_handler(|| {
            let _ = restore();
            tracing::warn!("terminated by signal");
            std::process::exit(130);
        });
        if let Err(e) = installed {
            tracing::warn!(error = %e, "could not install signal handler");
        }
    });
}
