//! UI rendering module for smellrev.
//!
//! Module root for `ui/`. Re-exports `render()` as the single entry point
//! called by the event loop's `terminal.draw()` closure. Layout arithmetic
//! lives in `layout.rs`; each panel has its own renderer module.

mod layout;
pub mod annotations;
pub mod code_view;
pub mod guide;
pub mod help;
pub mod keybindings;
pub mod toast;

use ratatui::{
    layout::Constraint,
    style::Style,
    text::Line,
    widgets::{Block, Clear, Paragraph},
    Frame,
};

use crate::app::{AppState, Mode};
use crate::theme::Theme;
use layout::{compute_layout, inner_rect, render_status_bar};

/// Renders one complete frame: 3-panel layout, status bar, overlays, toasts.
///
/// Called exactly once per `AppEvent::Render` inside `terminal.draw()` —
/// never from anywhere else. Viewport heights are written back into `state`
/// so the *next* keypress can compute page-scroll distances; the one-frame
/// lag is imperceptible.
pub fn render(frame: &mut Frame, state: &mut AppState, theme: &Theme) {
    let [left, center, right, status_bar] = compute_layout(frame, state);

    state.annotations_viewport_height = inner_rect(left).height;
    state.code_viewport_height = inner_rect(center).height;
    state.guide_viewport_height = inner_rect(right).height;

    let focus = state.focus;

    if left.width > 0 {
        annotations::render_annotations(frame, left, focus, state, theme);
    }

    code_view::render_code(frame, center, focus, state, theme);

    if right.width > 0 {
        guide::render_guide(frame, right, focus, state, theme);
    }

    render_status_bar(frame, status_bar, state, theme);

    // Overlays sit above the panels; Clear is called inside each renderer.
    if state.mode == Mode::HelpOverlay {
        help::render_help_overlay(frame, theme, state.help_scroll);
    }
    if state.mode == Mode::ConfirmQuit {
        render_confirm_quit(frame, theme);
    }

    toast::render_toasts(frame, state, theme);
}

/// Renders the quit-confirmation dialog as a small centred modal.
fn render_confirm_quit(frame: &mut Frame, theme: &Theme) {
    if frame.area().width < 50 {
        return;
    }
    let area = frame
        .area()
        .centered(Constraint::Length(46), Constraint::Length(4));

    frame.render_widget(Clear, area);
    let block = Block::bordered()
        .title(" Quit? ")
        .border_style(Style::default().fg(theme.notice_warning));
    frame.render_widget(
        Paragraph::new(vec![
            Line::raw("Unsaved annotation text will be lost."),
            Line::raw("y: quit    n / Esc: keep reviewing"),
        ])
        .block(block),
        area,
    );
}
