//! Event bus for smellrev.
//!
//! All user input, timer ticks, and session-worker results are normalised
//! into a single `AppEvent` enum and sent over a tokio unbounded MPSC
//! channel. The main loop receives from this channel and dispatches.
//!
//! Two independent intervals drive the render and logic cycles:
//! - **Render interval** (33 ms ≈ 30 FPS) — triggers a `terminal.draw()`.
//! - **Tick interval** (250 ms = 4 Hz) — drives toast expiry and the busy
//!   spinner.

use crossterm::event::{Event, EventStream, KeyEvent, KeyEventKind};
use futures::{FutureExt, StreamExt};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::interval;

use smellrev_core::session::SessionSnapshot;
use smellrev_core::types::Notice;

/// All events the application can receive from any source.
#[derive(Debug)]
pub enum AppEvent {
    /// A key press from the terminal (`KeyEventKind::Press` only).
    ///
    /// Release and repeat events are filtered in [`spawn_event_task`] to
    /// avoid double-firing on Windows, which synthesises both press and
    /// release for every keystroke.
    Key(KeyEvent),
    /// Terminal was resized to (columns, rows).
    Resize(u16, u16),
    /// Logic tick for state updates (4 Hz / 250 ms).
    Tick,
    /// Render tick — triggers a `terminal.draw()` call (≈30 FPS / 33 ms).
    Render,
    /// Fresh session state from the background session worker.
    Session(Box<SessionSnapshot>),
    /// Transient notification from the session engine.
    Notice(Notice),
    /// Quit signal.
    Quit,
}

/// Holds the sender and receiver ends of the unified event channel.
///
/// The sender (`tx`) is cloned and distributed to background tasks; the
/// receiver (`rx`) is owned by the main event loop.
pub struct EventHandler {
    pub tx: mpsc::UnboundedSender<AppEvent>,
    pub rx: mpsc::UnboundedReceiver<AppEvent>,
}

impl EventHandler {
    /// Creates a new `EventHandler` with a fresh unbounded channel.
    ///
    /// Unbounded is appropriate: the producer side (terminal events plus
    /// timers plus one worker) generates events at a bounded rate and the
    /// consumer always keeps up.
    pub fn new() -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self { tx, rx }
    }
}

impl Default for EventHandler {
    fn default() -> Self {
        Self::new()
    }
}

/// Spawns the background tokio task that drives the unified event channel.
///
/// The task runs until the receiver is dropped. Two independent
/// `tokio::time::interval` timers drive the render and logic cycles;
/// crossterm input is polled via `EventStream`.
///
/// `reader.next().fuse()` is required so that if the crossterm stream
/// terminates unexpectedly, `tokio::select!` does not keep polling a
/// completed future. Send errors are ignored — if the receiver is gone the
/// task exits on its next send attempt.
pub fn spawn_event_task(tx: mpsc::UnboundedSender<AppEvent>) {
    tokio::spawn(async move {
        let mut tick_interval = interval(Duration::from_millis(250));
        let mut render_interval = interval(Duration::from_millis(33));
        let mut reader = EventStream::new();

        loop {
            let tick_tick = tick_interval.tick();
            let render_tick = render_interval.tick();
            let crossterm_event = reader.next().fuse();

            tokio::select! {
                _ = tick_tick => {
                    let _ = tx.send(AppEvent::Tick);
                }
                _ = render_tick => {
                    let _ = tx.send(AppEvent::Render);
                }
                maybe_event = crossterm_event => {
                    match maybe_event {
                        Some(Ok(Event::Key(key))) => {
                            if key.kind == KeyEventKind::Press {
                                let _ = tx.send(AppEvent::Key(key));
                            }
                        }
                        Some(Ok(Event::Resize(w, h))) => {
                            let _ = tx.send(AppEvent::Resize(w, h));
                        }
                        _ => {}
                    }
                }
            }
        }
    });
}
