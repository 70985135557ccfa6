//! Central application state for smellrev.
//!
//! This module owns all mutable UI state: the current mode, which panel has
//! focus, per-panel scroll offsets and viewport heights, panel width
//! percentages, the taxonomy cursor, the active text edit, the toast stack,
//! and the latest session snapshot from the worker. No rendering logic lives
//! here — `app.rs` is pure state read by the render module and mutated by
//! the keybinding dispatcher and event handlers.

use tokio::sync::mpsc::UnboundedSender;

use smellrev_core::session::SessionSnapshot;
use smellrev_core::taxonomy::{self, TaxonomyEntry};
use smellrev_core::types::Notice;

use crate::worker::SessionCommand;

/// Editor mode controlling which keybinding set is active.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Command/navigation mode (default). The verdict keys live here.
    #[default]
    Normal,
    /// Text insertion mode for the reviewer name and annotation fields.
    /// Every printable key goes into the edit buffer — verdict keys
    /// included, which is what keeps typing from triggering submissions.
    Insert,
    /// Full-screen help overlay shown above all panels.
    HelpOverlay,
    /// Quit-confirmation dialog shown when unsaved annotation text exists.
    ConfirmQuit,
}

/// Which panel currently has keyboard focus.
///
/// Navigation cycles Annotations → Code → Guide → Annotations via Tab.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum PanelFocus {
    /// Left panel: taxonomy checklist and annotation fields.
    #[default]
    Annotations,
    /// Centre panel: the fragment under review.
    Code,
    /// Right panel: the static reference guide.
    Guide,
}

impl PanelFocus {
    pub fn next(self) -> Self {
        match self {
            PanelFocus::Annotations => PanelFocus::Code,
            PanelFocus::Code => PanelFocus::Guide,
            PanelFocus::Guide => PanelFocus::Annotations,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            PanelFocus::Annotations => PanelFocus::Guide,
            PanelFocus::Code => PanelFocus::Annotations,
            PanelFocus::Guide => PanelFocus::Code,
        }
    }
}

/// Which text field the Insert-mode buffer is editing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditTarget {
    /// The reviewer identity label (single-line).
    Reviewer,
    /// The suggestion field of the annotation keyed by the string.
    Suggestion(String),
    /// The refactored-code field of the annotation keyed by the string.
    Refactored(String),
}

/// Which half of the reference guide is shown.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum GuideTab {
    #[default]
    CodeSmells,
    AntiPatterns,
}

/// One transient notification with its remaining lifetime in logic ticks.
#[derive(Debug, Clone)]
pub struct Toast {
    pub notice: Notice,
    pub ticks_left: u8,
}

/// Toast lifetime: 12 ticks at 4 Hz ≈ 3 seconds.
const TOAST_TICKS: u8 = 12;
/// At most this many toasts are stacked; older ones are dropped first.
const MAX_TOASTS: usize = 4;

/// All mutable UI state passed through every render cycle.
pub struct AppState {
    pub mode: Mode,
    pub focus: PanelFocus,

    /// Latest session state from the worker. Rendering reads only this.
    pub session: SessionSnapshot,
    /// True while a fetch/submit is in flight. Set optimistically when a
    /// verdict/advance command is sent, reconciled from each snapshot.
    pub busy: bool,

    /// Index of the highlighted taxonomy entry (across both sections).
    pub cursor: usize,

    /// Vertical scroll offset for the code panel.
    pub code_scroll: usize,
    /// Vertical scroll offset for the annotation panel.
    pub annotations_scroll: u16,
    /// Vertical scroll offset for the guide panel.
    pub guide_scroll: u16,
    /// Vertical scroll offset for the help overlay.
    pub help_scroll: u16,

    /// Inner panel heights after borders, cached after each render and used
    /// by half-page and full-page scroll calculations.
    pub annotations_viewport_height: u16,
    pub code_viewport_height: u16,
    pub guide_viewport_height: u16,

    /// Width percentages for the three panels. Defaults: 25 / 55 / 20.
    pub left_pct: u16,
    pub center_pct: u16,
    pub right_pct: u16,

    pub guide_tab: GuideTab,

    /// The active Insert-mode target, if any, and its working buffer. The
    /// buffer is committed to the session on Esc.
    pub edit: Option<EditTarget>,
    pub edit_buffer: String,

    pub toasts: Vec<Toast>,
    /// Advances on each logic tick while busy; drives the spinner glyph.
    pub spinner_frame: usize,

    /// Command channel to the session worker. `None` only in tests.
    pub commands: Option<UnboundedSender<SessionCommand>>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            mode: Mode::default(),
            focus: PanelFocus::default(),
            session: SessionSnapshot::default(),
            busy: true,
            cursor: 0,
            code_scroll: 0,
            annotations_scroll: 0,
            guide_scroll: 0,
            help_scroll: 0,
            annotations_viewport_height: 0,
            code_viewport_height: 0,
            guide_viewport_height: 0,
            left_pct: 25,
            center_pct: 55,
            right_pct: 20,
            guide_tab: GuideTab::default(),
            edit: None,
            edit_buffer: String::new(),
            toasts: Vec::new(),
            spinner_frame: 0,
            commands: None,
        }
    }
}

impl AppState {
    /// Sends a command to the session worker, if one is attached.
    pub fn send(&self, command: SessionCommand) {
        if let Some(tx) = &self.commands {
            let _ = tx.send(command);
        }
    }

    /// Replaces the session view with a fresh snapshot from the worker.
    ///
    /// Resets the code scroll when a new fragment arrived (the advance
    /// counter moved) so each fragment starts at its first line.
    pub fn apply_snapshot(&mut self, snapshot: SessionSnapshot) {
        if snapshot.advanced != self.session.advanced {
            self.code_scroll = 0;
            self.annotations_scroll = 0;
        }
        self.busy = snapshot.busy;
        self.session = snapshot;
    }

    /// One logic tick: expire toasts and advance the busy spinner.
    pub fn tick(&mut self) {
        for toast in &mut self.toasts {
            toast.ticks_left = toast.ticks_left.saturating_sub(1);
        }
        self.toasts.retain(|t| t.ticks_left > 0);
        if self.busy {
            self.spinner_frame = self.spinner_frame.wrapping_add(1);
        }
    }

    /// Pushes a notification onto the toast stack, dropping the oldest when
    /// full.
    pub fn push_notice(&mut self, notice: Notice) {
        if self.toasts.len() == MAX_TOASTS {
            self.toasts.remove(0);
        }
        self.toasts.push(Toast { notice, ticks_left: TOAST_TICKS });
    }

    /// The taxonomy entry under the cursor.
    pub fn entry_at_cursor(&self) -> &'static TaxonomyEntry {
        let len = taxonomy::all().count();
        taxonomy::all()
            .nth(self.cursor.min(len - 1))
            .expect("taxonomy is never empty")
    }

    pub fn cursor_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn cursor_down(&mut self) {
        let last = taxonomy::all().count() - 1;
        self.cursor = (self.cursor + 1).min(last);
    }

    /// Scrolls the focused panel down by `lines` rows.
    ///
    /// For `Annotations` the cursor moves instead of the raw offset — the
    /// panel scrolls to follow the cursor during render.
    pub fn scroll_down(&mut self, lines: u16) {
        match self.focus {
            PanelFocus::Annotations => {
                for _ in 0..lines {
                    self.cursor_down();
                }
            }
            PanelFocus::Code => {
                self.code_scroll = self.code_scroll.saturating_add(lines as usize);
            }
            PanelFocus::Guide => {
                self.guide_scroll = self.guide_scroll.saturating_add(lines);
            }
        }
    }

    /// Scrolls the focused panel up by `lines` rows.
    pub fn scroll_up(&mut self, lines: u16) {
        match self.focus {
            PanelFocus::Annotations => {
                for _ in 0..lines {
                    self.cursor_up();
                }
            }
            PanelFocus::Code => {
                self.code_scroll = self.code_scroll.saturating_sub(lines as usize);
            }
            PanelFocus::Guide => {
                self.guide_scroll = self.guide_scroll.saturating_sub(lines);
            }
        }
    }

    /// Scrolls the focused panel to the very top.
    pub fn scroll_top(&mut self) {
        match self.focus {
            PanelFocus::Annotations => self.cursor = 0,
            PanelFocus::Code => self.code_scroll = 0,
            PanelFocus::Guide => self.guide_scroll = 0,
        }
    }

    /// Scrolls the focused panel to the very bottom.
    pub fn scroll_bottom(&mut self) {
        match self.focus {
            PanelFocus::Annotations => self.cursor = taxonomy::all().count() - 1,
            PanelFocus::Code => {
                let lines = self
                    .session
                    .fragment
                    .as_ref()
                    .map(|f| f.code.lines().count())
                    .unwrap_or(0);
                self.code_scroll = lines.saturating_sub(1);
            }
            PanelFocus::Guide => self.guide_scroll = u16::MAX,
        }
    }

    /// Scrolls the focused panel down by half its visible height.
    ///
    /// Uses the viewport height cached from the previous render; scrolls by
    /// 1 on the first frame when no height is cached yet.
    pub fn half_page_down(&mut self) {
        let half = self.focused_viewport_height() / 2;
        self.scroll_down(half.max(1));
    }

    /// Scrolls the focused panel up by half its visible height.
    pub fn half_page_up(&mut self) {
        let half = self.focused_viewport_height() / 2;
        self.scroll_up(half.max(1));
    }

    /// Scrolls the focused panel down by its full visible height.
    pub fn full_page_down(&mut self) {
        let full = self.focused_viewport_height();
        self.scroll_down(full.max(1));
    }

    /// Scrolls the focused panel up by its full visible height.
    pub fn full_page_up(&mut self) {
        let full = self.focused_viewport_height();
        self.scroll_up(full.max(1));
    }

    fn focused_viewport_height(&self) -> u16 {
        match self.focus {
            PanelFocus::Annotations => self.annotations_viewport_height,
            PanelFocus::Code => self.code_viewport_height,
            PanelFocus::Guide => self.guide_viewport_height,
        }
    }

    /// Shrinks the code (centre) panel by transferring 5% to the side
    /// panels. The centre panel will not shrink below 20%.
    pub fn shrink_code_panel(&mut self) {
        const MIN_CENTER: u16 = 20;
        const STEP: u16 = 5;
        if self.center_pct <= MIN_CENTER {
            return;
        }
        let transfer = STEP.min(self.center_pct - MIN_CENTER);
        self.center_pct -= transfer;
        let left_gain = transfer / 2;
        self.left_pct = self.left_pct.saturating_add(left_gain);
        self.right_pct = self.right_pct.saturating_add(transfer - left_gain);
    }

    /// Grows the code (centre) panel by pulling 5% from the side panels,
    /// each of which keeps at least 5%.
    pub fn grow_code_panel(&mut self) {
        const MAX_CENTER: u16 = 80;
        const MIN_SIDE: u16 = 5;
        const STEP: u16 = 5;
        if self.center_pct >= MAX_CENTER {
            return;
        }
        let transfer = STEP.min(MAX_CENTER - self.center_pct);
        let left_give = (transfer / 2).min(self.left_pct.saturating_sub(MIN_SIDE));
        let right_give = (transfer - transfer / 2).min(self.right_pct.saturating_sub(MIN_SIDE));
        self.left_pct -= left_give;
        self.right_pct -= right_give;
        self.center_pct += left_give + right_give;
    }

    /// Starts an Insert-mode edit: loads the target's current text into the
    /// working buffer. The caller switches `mode` to `Insert`.
    pub fn begin_edit(&mut self, target: EditTarget) {
        self.edit_buffer = match &target {
            EditTarget::Reviewer => self.session.reviewer.clone(),
            EditTarget::Suggestion(key) => self
                .session
                .annotations
                .get(key)
                .map(|a| a.suggestion.clone())
                .unwrap_or_default(),
            EditTarget::Refactored(key) => self
                .session
                .annotations
                .get(key)
                .map(|a| a.refactored_code.clone())
                .unwrap_or_default(),
        };
        self.edit = Some(target);
    }

    /// Ends the active edit and returns the command that persists it.
    ///
    /// Also applies the new text to the local snapshot so the display does
    /// not flicker back to the stale value while the worker round-trips.
    pub fn commit_edit(&mut self) -> Option<SessionCommand> {
        use smellrev_core::selection::AnnotationField;

        let target = self.edit.take()?;
        let value = std::mem::take(&mut self.edit_buffer);
        Some(match target {
            EditTarget::Reviewer => {
                self.session.reviewer = value.clone();
                SessionCommand::SetReviewer(value)
            }
            EditTarget::Suggestion(key) => {
                self.session.annotations.set_field(&key, AnnotationField::Suggestion, &value);
                SessionCommand::SetField { key, field: AnnotationField::Suggestion, value }
            }
            EditTarget::Refactored(key) => {
                self.session
                    .annotations
                    .set_field(&key, AnnotationField::RefactoredCode, &value);
                SessionCommand::SetField { key, field: AnnotationField::RefactoredCode, value }
            }
        })
    }

    /// Whether quitting now would lose typed annotation text.
    pub fn has_unsaved_work(&self) -> bool {
        self.session.annotations.has_unsaved_text() || self.edit.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toasts_expire_after_their_ttl() {
        let mut state = AppState::default();
        state.push_notice(Notice::success("done"));
        for _ in 0..TOAST_TICKS {
            state.tick();
        }
        assert!(state.toasts.is_empty());
    }

    #[test]
    fn toast_stack_is_bounded() {
        let mut state = AppState::default();
        for i in 0..10 {
            state.push_notice(Notice::error(format!("e{i}")));
        }
        assert_eq!(state.toasts.len(), MAX_TOASTS);
        assert_eq!(state.toasts[0].notice.text, "e6");
    }

    #[test]
    fn cursor_stays_inside_the_taxonomy() {
        let mut state = AppState::default();
        state.cursor_up();
        assert_eq!(state.cursor, 0);
        for _ in 0..100 {
            state.cursor_down();
        }
        assert_eq!(state.cursor, taxonomy::all().count() - 1);
        assert_eq!(state.entry_at_cursor().key, "Magic Numbers");
    }

    #[test]
    fn new_fragment_resets_code_scroll() {
        let mut state = AppState::default();
        state.code_scroll = 40;
        let mut snapshot = SessionSnapshot::default();
        snapshot.advanced = 1;
        state.apply_snapshot(snapshot);
        assert_eq!(state.code_scroll, 0);
    }

    #[test]
    fn commit_edit_updates_local_view_and_builds_command() {
        let mut state = AppState::default();
        state.session.annotations.toggle("Blob", smellrev_core::types::SmellCategory::CodeSmell);
        state.begin_edit(EditTarget::Suggestion("Blob".into()));
        state.edit_buffer.push_str("tidy");

        let command = state.commit_edit().expect("command");
        assert!(matches!(command, SessionCommand::SetField { .. }));
        assert_eq!(state.session.annotations.get("Blob").unwrap().suggestion, "tidy");
        assert!(state.edit.is_none());
    }
}
