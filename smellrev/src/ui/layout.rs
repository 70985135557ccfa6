//! Responsive 3-panel layout engine for smellrev.
//!
//! Pure layout arithmetic — no mutable application state lives here. Called
//! inside `terminal.draw()` on every render so every frame reflects the
//! current terminal size.
//!
//! At `>= 110` columns all three panels are visible with widths driven by
//! `AppState.left_pct / center_pct / right_pct` (defaults 25 / 55 / 20).
//! Below 110 columns the guide panel collapses; below 80 columns both side
//! panels collapse and the code panel fills the full width.
//!
//! `Spacing::Overlap(1)` combined with `Block::merge_borders(MergeStrategy::Fuzzy)`
//! makes adjacent panel borders share a single column and merge their
//! junction box-drawing characters automatically.

use ratatui::{
    layout::{Constraint, Layout, Margin, Rect, Spacing},
    style::{Modifier, Style},
    symbols::merge::MergeStrategy,
    text::{Line, Span},
    widgets::{Block, BorderType, Paragraph},
    Frame,
};

use smellrev_core::session::Phase;

use crate::app::{AppState, Mode};
use crate::theme::Theme;

/// Returns `[annotations, code, guide, status_bar]` panel `Rect`s for the
/// current frame.
///
/// The returned rects are valid only for the current draw closure — never
/// store them across frames.
pub fn compute_layout(frame: &Frame, state: &AppState) -> [Rect; 4] {
    let term_width = frame.area().width;

    // Vertical split: main area plus a 1-row status bar.
    let [main_area, status_bar] =
        frame.area().layout(&Layout::vertical([Constraint::Fill(1), Constraint::Length(1)]));

    let horizontal = if term_width >= 110 {
        Layout::horizontal([
            Constraint::Percentage(state.left_pct),
            Constraint::Percentage(state.center_pct),
            Constraint::Percentage(state.right_pct),
        ])
        .spacing(Spacing::Overlap(1))
    } else if term_width >= 80 {
        // Keep the annotation panel; the guide is reference material.
        Layout::horizontal([
            Constraint::Percentage(35),
            Constraint::Fill(1),
            Constraint::Length(0),
        ])
        .spacing(Spacing::Overlap(1))
    } else {
        Layout::horizontal([
            Constraint::Length(0),
            Constraint::Fill(1),
            Constraint::Length(0),
        ])
        .spacing(Spacing::Overlap(1))
    };

    let [left, center, right] = main_area.layout(&horizontal);

    [left, center, right, status_bar]
}

/// Returns the inner `Rect` of a panel after removing the 1-cell border.
///
/// Used to cache viewport heights in `AppState` before panels render, so
/// page-scroll distances are available at keypress time.
pub fn inner_rect(area: Rect) -> Rect {
    area.inner(Margin { vertical: 1, horizontal: 1 })
}

/// Builds a bordered `Block` for a panel.
///
/// `BorderType::Thick` marks the focused panel; `MergeStrategy::Fuzzy` is
/// required because `Exact` produces bad junctions when mixing Thick and
/// Plain borders.
pub fn panel_block<'a>(title: &'a str, is_focused: bool, theme: &'a Theme) -> Block<'a> {
    let border_style = if is_focused {
        Style::default().fg(theme.border_active)
    } else {
        Style::default().fg(theme.border_inactive)
    };
    let border_type = if is_focused { BorderType::Thick } else { BorderType::Plain };

    Block::bordered()
        .title(title)
        .border_type(border_type)
        .border_style(border_style)
        .merge_borders(MergeStrategy::Fuzzy)
}

const SPINNER: [char; 4] = ['|', '/', '-', '\\'];

/// Renders the 1-row status bar at the bottom of the terminal.
///
/// Always shows the mode indicator, the reviewer identity, and the count of
/// fragments advanced through; appends a spinner while a fetch/submit is in
/// flight and an error marker when the session is in its error state.
pub fn render_status_bar(frame: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
    let (mode_text, mode_fg) = match state.mode {
        Mode::Insert => (" INSERT ", theme.status_mode_insert),
        Mode::Normal | Mode::ConfirmQuit | Mode::HelpOverlay => {
            (" NORMAL ", theme.status_mode_normal)
        }
    };

    let reviewer = if state.session.reviewer.trim().is_empty() {
        "(no reviewer — press a)".to_owned()
    } else {
        state.session.reviewer.clone()
    };

    let mut spans = vec![
        Span::styled(mode_text, Style::default().fg(mode_fg).add_modifier(Modifier::BOLD)),
        Span::raw(format!(" {} ", reviewer)),
        Span::raw(format!("· Fragment {} ", state.session.advanced)),
    ];

    if state.busy {
        let glyph = SPINNER[state.spinner_frame % SPINNER.len()];
        spans.push(Span::raw(format!("· {glyph} working ")));
    }
    if state.session.phase == Phase::Error {
        if let Some(error) = &state.session.last_error {
            spans.push(Span::styled(
                format!("· {error} "),
                Style::default().fg(theme.notice_error),
            ));
        }
    }

    frame.render_widget(
        Paragraph::new(Line::from(spans))
            .style(Style::default().bg(theme.status_bar_bg).fg(theme.status_bar_fg)),
        area,
    );
}
