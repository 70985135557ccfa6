//! Background task that owns the review session.
//!
//! The session engine performs network round trips, so it lives in its own
//! tokio task rather than the render loop. All communication is via
//! channels: `SessionCommand` in, `AppEvent::Session` snapshots and
//! `AppEvent::Notice` out.
//!
//! Commands are processed strictly one at a time — the worker awaits each
//! fetch/submit to completion before reading the next command — so there is
//! never more than one operation in flight. The UI additionally stops
//! sending verdict/advance commands while the latest snapshot is busy.

use tokio::sync::mpsc::{self, UnboundedSender};
use tracing::info;

use smellrev_core::backend::HttpBackend;
use smellrev_core::selection::AnnotationField;
use smellrev_core::session::{NoticeSink, ReviewSession};
use smellrev_core::types::{Notice, SmellCategory, VerdictStatus};

use crate::event::AppEvent;

/// Commands sent from the key dispatcher to the session worker.
#[derive(Debug)]
pub enum SessionCommand {
    /// Fetch the next fragment (initial load, or manual retry after error).
    Advance,
    /// Build and record a verdict, then advance.
    Submit(VerdictStatus),
    /// Select/deselect a taxonomy entry.
    Toggle { key: String, category: SmellCategory },
    /// Replace one text field of a selected annotation.
    SetField { key: String, field: AnnotationField, value: String },
    /// Collapse/expand a selected annotation's section.
    ToggleExpanded { key: String },
    /// Update the reviewer identity label.
    SetReviewer(String),
}

/// Notification surface backed by the app event channel.
///
/// The session engine calls this synchronously; the toast stack renders it.
struct ChannelNotices {
    tx: UnboundedSender<AppEvent>,
}

impl NoticeSink for ChannelNotices {
    fn notice(&self, notice: Notice) {
        let _ = self.tx.send(AppEvent::Notice(notice));
    }
}

/// Spawns the session worker and returns its command sender.
///
/// The worker builds the HTTP backend, issues the initial fetch before
/// accepting any command, and emits a snapshot after every state change.
/// It exits when the command sender is dropped.
pub fn spawn_session_worker(
    base_url: String,
    reviewer: String,
    event_tx: UnboundedSender<AppEvent>,
) -> UnboundedSender<SessionCommand> {
    let (command_tx, mut command_rx) = mpsc::unbounded_channel::<SessionCommand>();

    tokio::spawn(async move {
        info!(%base_url, "session worker starting");
        let backend = HttpBackend::new(base_url);
        let notices = ChannelNotices { tx: event_tx.clone() };
        let mut session = ReviewSession::new(backend.clone(), backend, notices);
        session.set_reviewer(reviewer);

        // Show the loading state, then fetch the first fragment before any
        // reviewer input is possible.
        let _ = event_tx.send(AppEvent::Session(Box::new(session.snapshot())));
        session.advance().await;
        let _ = event_tx.send(AppEvent::Session(Box::new(session.snapshot())));

        while let Some(command) = command_rx.recv().await {
            match command {
                SessionCommand::Advance => session.advance().await,
                SessionCommand::Submit(status) => session.submit(status).await,
                SessionCommand::Toggle { key, category } => session.toggle(&key, category),
                SessionCommand::SetField { key, field, value } => {
                    session.set_field(&key, field, value)
                }
                SessionCommand::ToggleExpanded { key } => session.toggle_expanded(&key),
                SessionCommand::SetReviewer(name) => session.set_reviewer(name),
            }
            if event_tx.send(AppEvent::Session(Box::new(session.snapshot()))).is_err() {
                break;
            }
        }
        info!("session worker stopped");
    });

    command_tx
}
