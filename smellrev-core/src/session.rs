//! The review-session state machine.
//!
//! One `ReviewSession` is the single authority for "which fragment is under
//! review and what happens when the reviewer acts on it". It owns the current
//! fragment, the annotation set, and the verdict-submission protocol, and is
//! generic over its three collaborators so tests can drive it with in-memory
//! fakes. There is no ambient storage: sessions are plain owned values, and a
//! process may hold several independent ones.
//!
//! The session has no terminal state — the fragment queue is treated as
//! infinite and the session ends when its owner drops it.

use anyhow::Result;
use async_trait::async_trait;
use tracing::{info, warn};

use crate::selection::{AnnotationField, AnnotationSet};
use crate::types::{Fragment, Notice, SmellCategory, Verdict, VerdictStatus};

/// Yields code fragments on demand, keyed by a continuation hint.
#[async_trait]
pub trait FragmentSource: Send + Sync {
    /// Fetches the fragment following `after` (`None` = first fragment).
    async fn next_fragment(&self, after: Option<i64>) -> Result<Fragment>;
}

/// Durably records a submitted review outcome.
#[async_trait]
pub trait VerdictSink: Send + Sync {
    async fn record(&self, verdict: &Verdict) -> Result<()>;
}

/// Displays transient success/failure messages to the reviewer.
///
/// No state, no further contract: show the text, auto-dismiss.
pub trait NoticeSink: Send {
    fn notice(&self, notice: Notice);
}

/// Controller states. `Error` is reachable from `Loading` and `Submitting`;
/// both `advance` and `submit` are accepted from `Ready` and `Error`, which
/// is how a failed operation is retried.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Phase {
    /// A fetch for the next fragment is outstanding. Initial state.
    #[default]
    Loading,
    /// A fragment is displayed and accepting reviewer edits.
    Ready,
    /// A verdict is on its way to the sink.
    Submitting,
    /// The last fetch or submit failed; previous state is kept for retry.
    Error,
}

/// A cloneable view of session state for rendering.
///
/// Produced after every command the worker processes and handed to the UI
/// wholesale, so the render path never touches the live session.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSnapshot {
    pub phase: Phase,
    /// True while a fetch or submit is logically in flight. Advisory: drives
    /// UI disablement of the verdict commands.
    pub busy: bool,
    pub reviewer: String,
    pub fragment: Option<Fragment>,
    pub annotations: AnnotationSet,
    /// Count of fragments advanced through. Display only.
    pub advanced: u64,
    /// Message from the most recent failure; cleared by the next success.
    pub last_error: Option<String>,
}

impl Default for SessionSnapshot {
    /// The pre-first-fetch view: loading, busy, nothing to show yet.
    fn default() -> Self {
        Self {
            phase: Phase::Loading,
            busy: true,
            reviewer: String::new(),
            fragment: None,
            annotations: AnnotationSet::default(),
            advanced: 0,
            last_error: None,
        }
    }
}

/// The review-session engine.
pub struct ReviewSession<S, V, N> {
    source: S,
    sink: V,
    notices: N,
    reviewer: String,
    phase: Phase,
    fragment: Option<Fragment>,
    annotations: AnnotationSet,
    advanced: u64,
    last_error: Option<String>,
}

impl<S, V, N> ReviewSession<S, V, N>
where
    S: FragmentSource,
    V: VerdictSink,
    N: NoticeSink,
{
    /// Creates a session in `Loading` state. The caller is expected to issue
    /// the first [`ReviewSession::advance`] before accepting reviewer input.
    pub fn new(source: S, sink: V, notices: N) -> Self {
        Self {
            source,
            sink,
            notices,
            reviewer: String::new(),
            phase: Phase::Loading,
            fragment: None,
            annotations: AnnotationSet::default(),
            advanced: 0,
            last_error: None,
        }
    }

    pub fn reviewer(&self) -> &str {
        &self.reviewer
    }

    /// Sets the reviewer identity label. Free text, mutable for the life of
    /// the session; not a verified principal.
    pub fn set_reviewer(&mut self, name: impl Into<String>) {
        self.reviewer = name.into();
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// True while a fetch or submit is outstanding.
    pub fn busy(&self) -> bool {
        matches!(self.phase, Phase::Loading | Phase::Submitting)
    }

    pub fn fragment(&self) -> Option<&Fragment> {
        self.fragment.as_ref()
    }

    pub fn annotations(&self) -> &AnnotationSet {
        &self.annotations
    }

    /// Selects or deselects a taxonomy entry for the current fragment.
    pub fn toggle(&mut self, key: &str, category: SmellCategory) {
        self.annotations.toggle(key, category);
    }

    /// Edits one text field of a selected annotation.
    pub fn set_field(&mut self, key: &str, field: AnnotationField, value: impl Into<String>) {
        self.annotations.set_field(key, field, value);
    }

    /// Collapses/expands a selected annotation's section.
    pub fn toggle_expanded(&mut self, key: &str) {
        self.annotations.toggle_expanded(key);
    }

    /// Requests the next fragment, passing the current fragment's id as a
    /// continuation hint.
    ///
    /// On success the fragment is replaced wholesale, the annotation set is
    /// reset to the machine-assist suggestions of the new fragment, and the
    /// advance counter increments. On failure the previous fragment (and its
    /// annotations) stay in place so the display never blanks; the reviewer
    /// retries manually.
    pub async fn advance(&mut self) {
        self.phase = Phase::Loading;
        let hint = self.fragment.as_ref().and_then(|f| f.id);
        match self.source.next_fragment(hint).await {
            Ok(fragment) => {
                info!(id = ?fragment.id, "loaded next fragment");
                self.annotations = AnnotationSet::seeded(&fragment.suggestions);
                self.fragment = Some(fragment);
                self.advanced += 1;
                self.last_error = None;
                self.phase = Phase::Ready;
            }
            Err(err) => {
                warn!(error = %err, "fragment fetch failed");
                self.last_error = Some(err.to_string());
                self.phase = Phase::Error;
                self.notices
                    .notice(Notice::error("Failed to load the next fragment. Try again."));
            }
        }
    }

    /// Builds and records a verdict for the current fragment, then advances.
    ///
    /// `Submitted` is gated locally before any sink call: the reviewer
    /// identity and the annotation set must both be non-empty. The other
    /// statuses only need a current fragment. On sink failure every piece of
    /// in-progress state is left untouched so the identical submission can be
    /// retried.
    pub async fn submit(&mut self, status: VerdictStatus) {
        let Some(fragment) = &self.fragment else {
            self.notices.notice(Notice::warning("No fragment is loaded yet."));
            return;
        };

        if status == VerdictStatus::Submitted {
            if self.reviewer.trim().is_empty() {
                self.notices
                    .notice(Notice::warning("Enter your reviewer name before submitting."));
                return;
            }
            if self.annotations.is_empty() {
                self.notices.notice(Notice::warning(
                    "No annotations selected. Mark the fragment clean if it has no smells.",
                ));
                return;
            }
        }

        let verdict = Verdict {
            reviewer: self.reviewer.clone(),
            kind: fragment.kind.clone(),
            languages: fragment.languages.clone(),
            start_line: fragment.start_line,
            end_line: fragment.end_line,
            code: fragment.code.clone(),
            status,
            fragment_id: fragment.id,
            annotations: match status {
                VerdictStatus::Submitted => self.annotations.recorded(),
                _ => Vec::new(),
            },
        };

        self.phase = Phase::Submitting;
        match self.sink.record(&verdict).await {
            Ok(()) => {
                info!(status = verdict.status.as_str(), id = ?verdict.fragment_id, "verdict recorded");
                self.last_error = None;
                self.notices.notice(Notice::success(success_text(status)));
                // The sink call for this fragment has completed; only now is
                // the fragment allowed to be replaced.
                self.advance().await;
            }
            Err(err) => {
                warn!(error = %err, status = verdict.status.as_str(), "verdict submission failed");
                self.last_error = Some(err.to_string());
                self.phase = Phase::Error;
                self.notices.notice(Notice::error(failure_text(status)));
            }
        }
    }

    /// Clones the renderable state.
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            phase: self.phase,
            busy: self.busy(),
            reviewer: self.reviewer.clone(),
            fragment: self.fragment.clone(),
            annotations: self.annotations.clone(),
            advanced: self.advanced,
            last_error: self.last_error.clone(),
        }
    }
}

fn success_text(status: VerdictStatus) -> &'static str {
    match status {
        VerdictStatus::Submitted => "Annotations submitted.",
        VerdictStatus::Skipped => "Fragment skipped.",
        VerdictStatus::Rejected => "Fragment rejected.",
        VerdictStatus::Clean => "Fragment marked clean.",
    }
}

fn failure_text(status: VerdictStatus) -> &'static str {
    match status {
        VerdictStatus::Submitted => "Failed to submit annotations. Try again.",
        VerdictStatus::Skipped => "Failed to skip the fragment. Try again.",
        VerdictStatus::Rejected => "Failed to reject the fragment. Try again.",
        VerdictStatus::Clean => "Failed to mark the fragment clean. Try again.",
    }
}
