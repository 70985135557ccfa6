//! Terminal lifecycle management for smellrev.
//!
//! The TUI renders to stdout through a `BufWriter` so escape sequences are
//! batched into fewer write(2) syscalls, reducing flicker at the 30 FPS
//! render interval.

use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use signal_hook::consts::SIGTERM;
use signal_hook::flag::register;
use std::io::{stdout, BufWriter, Stdout};
use std::panic;
use std::sync::{atomic::AtomicBool, Arc};

/// The terminal type used by smellrev.
pub type Tui = Terminal<CrosstermBackend<BufWriter<Stdout>>>;

/// Initialise the terminal for TUI rendering.
///
/// Enables raw mode and enters the alternate screen. Call [`restore_tui`] at
/// every exit path.
///
/// # Errors
///
/// Returns `Err` if `enable_raw_mode`, `execute!`, or `Terminal::new` fails.
pub fn init_tui() -> std::io::Result<Tui> {
    let mut out = BufWriter::new(stdout());
    enable_raw_mode()?;
    execute!(out, EnterAlternateScreen)?;
    Terminal::new(CrosstermBackend::new(out))
}

/// Restore the terminal to its pre-TUI state.
///
/// Disables raw mode and leaves the alternate screen. Idempotent; must be
/// called at every exit path including the panic hook, because ratatui 0.30
/// does not auto-restore the terminal on `Drop`.
///
/// # Errors
///
/// Returns `Err` if `disable_raw_mode` or `execute!` fails. The panic hook
/// ignores the error (best-effort only).
pub fn restore_tui() -> std::io::Result<()> {
    disable_raw_mode()?;
    execute!(stdout(), LeaveAlternateScreen)?;
    Ok(())
}

/// Install a panic hook that restores the terminal before printing the panic
/// message.
///
/// Must be called **before** [`init_tui`]. Chains onto any previously
/// installed hook so the default panic printer still runs after the terminal
/// is restored. Without this, a panic leaves the terminal in raw mode with
/// the alternate screen active and the message invisible.
pub fn install_panic_hook() {
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let _ = restore_tui();
        original_hook(panic_info);
    }));
}

/// Register a SIGTERM handler that sets an `AtomicBool` flag.
///
/// Returns an `Arc<AtomicBool>` that flips to `true` when the process
/// receives SIGTERM. The main event loop polls this flag on a heartbeat.
///
/// # Panics
///
/// Panics if the OS refuses to register the signal handler — treated as a
/// fatal initialisation error rather than a recoverable condition.
pub fn register_sigterm() -> Arc<AtomicBool> {
    let term = Arc::new(AtomicBool::new(false));
    register(SIGTERM, Arc::clone(&term)).expect("failed to register SIGTERM handler");
    term
}
