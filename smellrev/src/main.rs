//! smellrev — terminal client for reviewing code fragments against a fixed
//! taxonomy of code smells and anti-patterns.
//!
//! Entry point for the `smellrev` binary. Wires together the terminal
//! lifecycle (`tui`), unified event bus (`event`), the background session
//! worker (`worker`), rendering (`ui`), and the theme system (`theme`).
//!
//! # Startup sequence (order matters)
//!
//! 1. Load config from XDG — read-only, safe before terminal init.
//! 2. Initialise tracing to `.smellrev/smellrev.log` — stdout is the TUI.
//! 3. `install_panic_hook()` — installed before `init_tui` so it restores
//!    the terminal before the panic message prints.
//! 4. `register_sigterm()` — returns the flag polled in the event loop.
//! 5. `init_tui()` — enters alternate screen and enables raw mode.
//! 6. Spawn the event task and the session worker; the worker issues the
//!    first fragment fetch before any reviewer input is possible.
//!
//! # Safety
//!
//! `restore_tui()` is called after the event loop exits — normal quit,
//! SIGTERM, or channel close. The event loop exits only via `break`, never
//! via `?`, so the restore is always reached; the panic hook covers panics.

mod app;
mod config;
mod event;
mod theme;
mod tui;
mod ui;
mod worker;

use std::sync::atomic::Ordering;

use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::ui::keybindings::{handle_key, KeyAction};

/// Sets up file logging under `.smellrev/`. Logging failures are soft: the
/// TUI runs fine without a log file.
fn init_tracing() {
    if std::fs::create_dir_all(".smellrev").is_err() {
        return;
    }
    let Ok(file) = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(".smellrev/smellrev.log")
    else {
        return;
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::sync::Arc::new(file))
        .with_ansi(false)
        .init();
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    // Step 0: read-only setup, safe before terminal init.
    let config = config::load();
    let theme = theme::Theme::from_name(&config.theme);
    init_tracing();
    info!(backend_url = %config.backend_url, "smellrev starting");

    let mut state = app::AppState::default();

    // Step 1: panic hook first — innermost hook restores the terminal.
    tui::install_panic_hook();

    // Step 2: SIGTERM flag — polled in the heartbeat arm below.
    let term_flag = tui::register_sigterm();

    // Step 3: enter alternate screen and raw mode.
    let mut terminal = tui::init_tui()?;

    // Step 4: event channel and background tasks. The session worker fetches
    // the first fragment immediately.
    let handler = event::EventHandler::new();
    event::spawn_event_task(handler.tx.clone());
    state.commands = Some(worker::spawn_session_worker(
        config.backend_url,
        config.reviewer,
        handler.tx.clone(),
    ));
    let mut rx = handler.rx;

    // Event loop — exits only via `break`, never via `?`, which guarantees
    // `restore_tui()` is always reached after the loop.
    'event_loop: loop {
        tokio::select! {
            // Heartbeat: guarantees SIGTERM is checked at least every 50ms
            // even when no events arrive. Without this arm, a quiescent
            // terminal blocks forever in rx.recv().
            _ = tokio::time::sleep(std::time::Duration::from_millis(50)) => {
                if term_flag.load(Ordering::Relaxed) {
                    break 'event_loop;
                }
            }
            maybe_event = rx.recv() => {
                match maybe_event {
                    Some(event::AppEvent::Render) => {
                        // Exactly one draw() per Render event — never elsewhere.
                        terminal.draw(|frame| ui::render(frame, &mut state, &theme))?;
                    }
                    Some(event::AppEvent::Key(key)) => {
                        if handle_key(key, &mut state) == KeyAction::Quit {
                            break 'event_loop;
                        }
                    }
                    Some(event::AppEvent::Tick) => {
                        state.tick();
                    }
                    Some(event::AppEvent::Session(snapshot)) => {
                        state.apply_snapshot(*snapshot);
                    }
                    Some(event::AppEvent::Notice(notice)) => {
                        state.push_notice(notice);
                    }
                    Some(event::AppEvent::Resize(_, _)) => {
                        // Handled by ratatui on the next Render: frame.area()
                        // returns the new size and the layout recomputes.
                    }
                    Some(event::AppEvent::Quit) | None => break 'event_loop,
                }
                if term_flag.load(Ordering::Relaxed) {
                    break 'event_loop;
                }
            }
        }
    }

    // Single exit point: restore the terminal unconditionally. Covers normal
    // quit, SIGTERM, and channel close; the panic hook handles panics.
    tui::restore_tui()?;
    info!("smellrev stopped");
    Ok(())
}
