//! Transient notification renderer for smellrev.
//!
//! Toasts stack in the bottom-right corner above the status bar, newest at
//! the bottom, each erased onto the background with `Clear` before drawing.
//! Expiry is driven by logic ticks in `AppState::tick`.

use ratatui::{
    layout::Rect,
    style::Style,
    text::Line,
    widgets::{Block, BorderType, Clear, Paragraph},
    Frame,
};

use crate::app::AppState;
use crate::theme::Theme;

const TOAST_WIDTH: u16 = 44;
const TOAST_HEIGHT: u16 = 3;

/// Renders the toast stack. Skipped entirely on terminals too narrow to fit
/// a toast without clipping panel borders.
pub fn render_toasts(frame: &mut Frame, state: &AppState, theme: &Theme) {
    let area = frame.area();
    if area.width < TOAST_WIDTH + 2 || state.toasts.is_empty() {
        return;
    }

    let x = area.width - TOAST_WIDTH - 1;
    // Bottom-most toast sits just above the status bar row.
    let mut y = area.height.saturating_sub(1 + TOAST_HEIGHT);

    for toast in state.toasts.iter().rev() {
        if y == 0 {
            break;
        }
        let rect = Rect::new(x, y, TOAST_WIDTH, TOAST_HEIGHT);
        let accent = theme.notice(toast.notice.level);

        frame.render_widget(Clear, rect);
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(accent));
        frame.render_widget(
            Paragraph::new(Line::raw(toast.notice.text.clone()))
                .style(Style::default().bg(theme.background))
                .block(block),
            rect,
        );

        y = y.saturating_sub(TOAST_HEIGHT);
    }
}
