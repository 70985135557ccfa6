//! Help overlay renderer for smellrev.
//!
//! Draws a centred modal box over the panel layout using `Clear` to erase
//! the background first, inside the same `terminal.draw()` closure as all
//! other panels.

use ratatui::{
    layout::Constraint,
    text::{Line, Text},
    widgets::{Block, Clear, Paragraph, Wrap},
    Frame,
};

use crate::theme::Theme;

/// Renders the help overlay as a centred modal on top of the 3-panel layout.
///
/// The paragraph scrolls vertically by `help_scroll` rows. Skipped on
/// terminals narrower than 60 columns to avoid a zero-height `Rect`.
pub fn render_help_overlay(frame: &mut Frame, theme: &Theme, help_scroll: u16) {
    if frame.area().width < 60 {
        return;
    }

    let overlay_area = frame
        .area()
        .centered(Constraint::Percentage(80), Constraint::Percentage(80));

    frame.render_widget(Clear, overlay_area);

    let block = Block::bordered()
        .title(" Help — Up/Down scroll, ? or Esc to dismiss ")
        .border_style(ratatui::style::Style::default().fg(theme.border_active));

    frame.render_widget(
        Paragraph::new(build_help_text())
            .block(block)
            .wrap(Wrap { trim: false })
            .scroll((help_scroll, 0)),
        overlay_area,
    );
}

/// Builds the help text as a multi-line `Text` value, grouped by section.
fn build_help_text() -> Text<'static> {
    Text::from(vec![
        Line::from("Verdicts (case-insensitive, disabled while working)"),
        Line::from("  s             Submit annotations"),
        Line::from("  k             Skip fragment"),
        Line::from("  r             Reject fragment"),
        Line::from("  n             No code smell (mark clean)"),
        Line::from(""),
        Line::from("Annotations"),
        Line::from("  Up / Down     Move between taxonomy entries"),
        Line::from("  Space         Select / deselect entry"),
        Line::from("  Enter         Edit suggestion text"),
        Line::from("  e             Edit refactored code"),
        Line::from("  x             Collapse / expand entry"),
        Line::from("  Esc           Finish editing (saves the field)"),
        Line::from(""),
        Line::from("Navigation"),
        Line::from("  Tab / S-Tab   Move panel focus right / left"),
        Line::from("  Up / Down     Scroll the focused panel"),
        Line::from("  Ctrl-d / u    Scroll half page down / up"),
        Line::from("  PgDn / PgUp   Scroll full page down / up"),
        Line::from("  Home / End    Jump to top / bottom"),
        Line::from("  Left / Right  Switch guide tab (guide focused)"),
        Line::from("  < / >         Shrink / grow code panel by 5%"),
        Line::from(""),
        Line::from("Session"),
        Line::from("  a             Edit reviewer name"),
        Line::from("  g             Fetch next fragment / retry after error"),
        Line::from(""),
        Line::from("General"),
        Line::from("  ?             Open / close this help overlay"),
        Line::from("  q / Esc       Quit (confirms if unsaved annotations exist)"),
    ])
}
