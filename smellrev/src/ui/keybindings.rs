//! Keybinding dispatcher for smellrev.
//!
//! Translates raw crossterm `KeyEvent`s into `AppState` mutations and
//! session-worker commands, returning a `KeyAction` telling the event loop
//! whether to continue or quit. The dispatcher branches first on
//! `state.mode`, so HelpOverlay, ConfirmQuit, Insert, and Normal all have
//! isolated handler functions.
//!
//! The verdict keys (S/K/R/N, case-insensitive) are matched only inside the
//! Normal handler. While a text field is being edited the mode is `Insert`
//! and every printable key lands in the edit buffer instead — typing the
//! letter "s" into a suggestion can never trigger a submission.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use smellrev_core::types::VerdictStatus;

use crate::app::{AppState, EditTarget, GuideTab, Mode, PanelFocus};
use crate::worker::SessionCommand;

/// Control-flow signal returned from the key dispatcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// Continue the event loop normally.
    Continue,
    /// Exit cleanly.
    Quit,
}

/// Dispatches a key event to the handler matching the current mode.
///
/// Mutates `state` in place and returns a `KeyAction` signalling whether to
/// continue or quit. The event loop should call this once per received key.
pub fn handle_key(key: KeyEvent, state: &mut AppState) -> KeyAction {
    match state.mode {
        Mode::HelpOverlay => handle_help(key, state),
        Mode::ConfirmQuit => handle_confirm_quit(key, state),
        Mode::Insert => handle_insert(key, state),
        Mode::Normal => handle_normal(key, state),
    }
}

// ---------------------------------------------------------------------------
// Normal mode
// ---------------------------------------------------------------------------

/// Handles a key event while in Normal mode.
///
/// Scroll keys are tried first, then the verdict keys, then everything else.
/// Verdict and fetch commands are suppressed while the session is busy — the
/// worker only ever has one operation in flight.
fn handle_normal(key: KeyEvent, state: &mut AppState) -> KeyAction {
    if let Some(action) = handle_scroll_key(key, state) {
        return action;
    }
    if let Some(action) = handle_verdict_key(key, state) {
        return action;
    }

    match key.code {
        // Panel focus
        KeyCode::Tab => {
            state.focus = state.focus.next();
            KeyAction::Continue
        }
        KeyCode::BackTab => {
            state.focus = state.focus.prev();
            KeyAction::Continue
        }

        // Guide tabs
        KeyCode::Left | KeyCode::Right if state.focus == PanelFocus::Guide => {
            state.guide_tab = match state.guide_tab {
                GuideTab::CodeSmells => GuideTab::AntiPatterns,
                GuideTab::AntiPatterns => GuideTab::CodeSmells,
            };
            state.guide_scroll = 0;
            KeyAction::Continue
        }

        // Annotation selection and field editing
        KeyCode::Char(' ') if state.focus == PanelFocus::Annotations => {
            if !state.busy {
                let entry = state.entry_at_cursor();
                state.send(SessionCommand::Toggle {
                    key: entry.key.to_owned(),
                    category: entry.category,
                });
            }
            KeyAction::Continue
        }
        KeyCode::Enter if state.focus == PanelFocus::Annotations => {
            if !state.busy {
                begin_field_edit(state, FieldKind::Suggestion);
            }
            KeyAction::Continue
        }
        KeyCode::Char('e') if state.focus == PanelFocus::Annotations => {
            if !state.busy {
                begin_field_edit(state, FieldKind::Refactored);
            }
            KeyAction::Continue
        }
        KeyCode::Char('x') if state.focus == PanelFocus::Annotations => {
            if !state.busy {
                let entry = state.entry_at_cursor();
                state.send(SessionCommand::ToggleExpanded { key: entry.key.to_owned() });
            }
            KeyAction::Continue
        }

        // Reviewer identity
        KeyCode::Char('a') => {
            state.begin_edit(EditTarget::Reviewer);
            state.mode = Mode::Insert;
            KeyAction::Continue
        }

        // Manual fetch: first load retry or recovery after a failed advance.
        KeyCode::Char('g') => {
            if !state.busy {
                state.busy = true;
                state.send(SessionCommand::Advance);
            }
            KeyAction::Continue
        }

        // Code panel resize
        KeyCode::Char('<') => {
            state.shrink_code_panel();
            KeyAction::Continue
        }
        KeyCode::Char('>') => {
            state.grow_code_panel();
            KeyAction::Continue
        }

        // Help overlay
        KeyCode::Char('?') => {
            state.help_scroll = 0;
            state.mode = Mode::HelpOverlay;
            KeyAction::Continue
        }

        // Quit / confirm-quit
        KeyCode::Char('q') | KeyCode::Esc => {
            if state.has_unsaved_work() {
                state.mode = Mode::ConfirmQuit;
                KeyAction::Continue
            } else {
                KeyAction::Quit
            }
        }

        _ => KeyAction::Continue,
    }
}

/// Handles the verdict keys S/K/R/N, case-insensitively.
///
/// Returns `Some` when the key was one of the four, `None` to fall through.
/// Commands are dropped while busy: the UI equivalent of disabled buttons.
fn handle_verdict_key(key: KeyEvent, state: &mut AppState) -> Option<KeyAction> {
    let status = match key.code {
        KeyCode::Char(c) => match c.to_ascii_lowercase() {
            's' => VerdictStatus::Submitted,
            'k' => VerdictStatus::Skipped,
            'r' => VerdictStatus::Rejected,
            'n' => VerdictStatus::Clean,
            _ => return None,
        },
        _ => return None,
    };
    if !state.busy {
        state.busy = true;
        state.send(SessionCommand::Submit(status));
    }
    Some(KeyAction::Continue)
}

/// Handles scroll-related keys: arrows, Home/End, page keys, Ctrl combos.
///
/// Returns `Some(KeyAction)` when the key was consumed, `None` when the key
/// should fall through to the rest of the Normal handler.
fn handle_scroll_key(key: KeyEvent, state: &mut AppState) -> Option<KeyAction> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    match key.code {
        KeyCode::Down => {
            state.scroll_down(1);
            Some(KeyAction::Continue)
        }
        KeyCode::Up => {
            state.scroll_up(1);
            Some(KeyAction::Continue)
        }
        KeyCode::Home => {
            state.scroll_top();
            Some(KeyAction::Continue)
        }
        KeyCode::End => {
            state.scroll_bottom();
            Some(KeyAction::Continue)
        }
        KeyCode::PageDown => {
            state.full_page_down();
            Some(KeyAction::Continue)
        }
        KeyCode::PageUp => {
            state.full_page_up();
            Some(KeyAction::Continue)
        }
        KeyCode::Char('d') if ctrl => {
            state.half_page_down();
            Some(KeyAction::Continue)
        }
        KeyCode::Char('u') if ctrl => {
            state.half_page_up();
            Some(KeyAction::Continue)
        }
        _ => None,
    }
}

enum FieldKind {
    Suggestion,
    Refactored,
}

/// Opens an Insert-mode edit on the cursor entry's field, if it is selected.
///
/// Editing requires prior selection; the key is ignored otherwise.
fn begin_field_edit(state: &mut AppState, field: FieldKind) {
    let entry = state.entry_at_cursor();
    if !state.session.annotations.is_selected(entry.key) {
        return;
    }
    let target = match field {
        FieldKind::Suggestion => EditTarget::Suggestion(entry.key.to_owned()),
        FieldKind::Refactored => EditTarget::Refactored(entry.key.to_owned()),
    };
    state.begin_edit(target);
    state.mode = Mode::Insert;
}

// ---------------------------------------------------------------------------
// Insert mode
// ---------------------------------------------------------------------------

/// Handles a key event while editing a text field.
///
/// Every printable character is appended to the edit buffer — including
/// s/k/r/n, which is the point. Esc commits the buffer to the session and
/// returns to Normal mode. Enter inserts a newline in the multi-line fields
/// and commits the single-line reviewer field.
fn handle_insert(key: KeyEvent, state: &mut AppState) -> KeyAction {
    match key.code {
        KeyCode::Esc => {
            if let Some(command) = state.commit_edit() {
                state.send(command);
            }
            state.mode = Mode::Normal;
            KeyAction::Continue
        }
        KeyCode::Enter => {
            if matches!(state.edit, Some(EditTarget::Reviewer)) {
                if let Some(command) = state.commit_edit() {
                    state.send(command);
                }
                state.mode = Mode::Normal;
            } else {
                state.edit_buffer.push('\n');
            }
            KeyAction::Continue
        }
        KeyCode::Backspace => {
            state.edit_buffer.pop();
            KeyAction::Continue
        }
        KeyCode::Tab => {
            if !matches!(state.edit, Some(EditTarget::Reviewer)) {
                state.edit_buffer.push_str("  ");
            }
            KeyAction::Continue
        }
        KeyCode::Char(c) => {
            state.edit_buffer.push(c);
            KeyAction::Continue
        }
        _ => KeyAction::Continue,
    }
}

// ---------------------------------------------------------------------------
// HelpOverlay mode
// ---------------------------------------------------------------------------

/// Handles a key event while the help overlay is visible.
///
/// Up/Down scroll the overlay; `?`, `Esc`, or `q` dismisses it. All other
/// keys are ignored — the verdict keys are inert under the overlay.
fn handle_help(key: KeyEvent, state: &mut AppState) -> KeyAction {
    match key.code {
        KeyCode::Down => {
            state.help_scroll = state.help_scroll.saturating_add(1);
            KeyAction::Continue
        }
        KeyCode::Up => {
            state.help_scroll = state.help_scroll.saturating_sub(1);
            KeyAction::Continue
        }
        KeyCode::Char('?') | KeyCode::Esc | KeyCode::Char('q') => {
            state.mode = Mode::Normal;
            KeyAction::Continue
        }
        _ => KeyAction::Continue,
    }
}

// ---------------------------------------------------------------------------
// ConfirmQuit mode
// ---------------------------------------------------------------------------

/// Handles a key event while the quit-confirmation dialog is active.
///
/// `y`/`Y` confirms and returns `Quit`. `n`/`N`/`Esc` cancels. All other
/// keys are ignored.
fn handle_confirm_quit(key: KeyEvent, state: &mut AppState) -> KeyAction {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') => KeyAction::Quit,
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
            state.mode = Mode::Normal;
            KeyAction::Continue
        }
        _ => KeyAction::Continue,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use smellrev_core::types::SmellCategory;
    use tokio::sync::mpsc;

    fn press(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE)
    }

    fn wired_state() -> (AppState, mpsc::UnboundedReceiver<SessionCommand>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let mut state = AppState::default();
        state.commands = Some(tx);
        state.busy = false;
        (state, rx)
    }

    #[test]
    fn verdict_keys_send_submit_commands_case_insensitively() {
        let (mut state, mut rx) = wired_state();

        handle_key(press('s'), &mut state);
        assert!(matches!(
            rx.try_recv().unwrap(),
            SessionCommand::Submit(VerdictStatus::Submitted)
        ));

        state.busy = false;
        handle_key(press('K'), &mut state);
        assert!(matches!(rx.try_recv().unwrap(), SessionCommand::Submit(VerdictStatus::Skipped)));

        state.busy = false;
        handle_key(press('R'), &mut state);
        assert!(matches!(rx.try_recv().unwrap(), SessionCommand::Submit(VerdictStatus::Rejected)));

        state.busy = false;
        handle_key(press('n'), &mut state);
        assert!(matches!(rx.try_recv().unwrap(), SessionCommand::Submit(VerdictStatus::Clean)));
    }

    #[test]
    fn verdict_keys_are_suppressed_while_editing_text() {
        let (mut state, mut rx) = wired_state();
        state.session.annotations.toggle("Blob", SmellCategory::CodeSmell);
        state.begin_edit(EditTarget::Suggestion("Blob".into()));
        state.mode = Mode::Insert;

        for c in ['s', 'k', 'r', 'n', 'S'] {
            handle_key(press(c), &mut state);
        }

        assert!(rx.try_recv().is_err(), "no command may be sent while typing");
        assert_eq!(state.edit_buffer, "skrnS");
    }

    #[test]
    fn verdict_keys_are_dropped_while_busy() {
        let (mut state, mut rx) = wired_state();
        state.busy = true;
        handle_key(press('k'), &mut state);
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn escape_commits_the_edit_and_returns_to_normal() {
        let (mut state, mut rx) = wired_state();
        state.session.annotations.toggle("Blob", SmellCategory::CodeSmell);
        state.begin_edit(EditTarget::Suggestion("Blob".into()));
        state.mode = Mode::Insert;
        state.edit_buffer.push_str("extract method");

        handle_key(KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE), &mut state);

        assert_eq!(state.mode, Mode::Normal);
        match rx.try_recv().unwrap() {
            SessionCommand::SetField { key, value, .. } => {
                assert_eq!(key, "Blob");
                assert_eq!(value, "extract method");
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn space_toggles_the_cursor_entry() {
        let (mut state, mut rx) = wired_state();
        state.focus = PanelFocus::Annotations;
        handle_key(press(' '), &mut state);
        match rx.try_recv().unwrap() {
            SessionCommand::Toggle { key, category } => {
                assert_eq!(key, "Feature Envy");
                assert_eq!(category, SmellCategory::CodeSmell);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn editing_requires_prior_selection() {
        let (mut state, mut rx) = wired_state();
        state.focus = PanelFocus::Annotations;
        handle_key(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE), &mut state);
        assert_eq!(state.mode, Mode::Normal);
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn quit_asks_for_confirmation_with_unsaved_text() {
        let (mut state, _rx) = wired_state();
        state.session.annotations.toggle("Blob", SmellCategory::CodeSmell);
        state
            .session
            .annotations
            .set_field("Blob", smellrev_core::selection::AnnotationField::Suggestion, "typed");

        assert_eq!(handle_key(press('q'), &mut state), KeyAction::Continue);
        assert_eq!(state.mode, Mode::ConfirmQuit);

        // 'n' cancels, 'y' quits.
        assert_eq!(handle_key(press('n'), &mut state), KeyAction::Continue);
        assert_eq!(state.mode, Mode::Normal);
        state.mode = Mode::ConfirmQuit;
        assert_eq!(handle_key(press('y'), &mut state), KeyAction::Quit);
    }

    #[test]
    fn quit_is_immediate_without_unsaved_text() {
        let (mut state, _rx) = wired_state();
        assert_eq!(handle_key(press('q'), &mut state), KeyAction::Quit);
    }

    #[test]
    fn help_overlay_swallows_verdict_keys() {
        let (mut state, mut rx) = wired_state();
        state.mode = Mode::HelpOverlay;
        handle_key(press('s'), &mut state);
        assert!(rx.try_recv().is_err());
    }
}
