//! Code panel renderer for smellrev.
//!
//! Renders the fragment under review with a line-number gutter and
//! lexer-classified token colors. Only the visible window of lines is
//! materialized per frame, so rendering stays O(viewport) regardless of
//! fragment size.

use ratatui::{
    style::Style,
    text::{Line, Span},
    widgets::{List, ListItem},
    Frame,
};

use smellrev_core::lexer;
use smellrev_core::session::Phase;

use crate::app::{AppState, PanelFocus};
use crate::theme::Theme;
use crate::ui::layout::{inner_rect, panel_block};

/// Renders the centre code panel.
///
/// The panel title carries the fragment's language tags and its line range
/// in the original file. When no fragment is loaded yet, a placeholder
/// matching the session phase is shown instead.
pub fn render_code(
    frame: &mut Frame,
    area: ratatui::layout::Rect,
    focus: PanelFocus,
    state: &AppState,
    theme: &Theme,
) {
    let is_focused = focus == PanelFocus::Code;

    let Some(fragment) = &state.session.fragment else {
        let message = match state.session.phase {
            Phase::Error => "Could not load a fragment. Press g to retry.",
            _ => "Loading fragment...",
        };
        let block = panel_block("Code", is_focused, theme);
        let inner = inner_rect(area);
        frame.render_widget(block, area);
        frame.render_widget(List::new(vec![ListItem::new(Line::raw(message))]), inner);
        return;
    };

    let title = format!(
        "Code — {} [{}-{}]",
        fragment.languages.join(", "),
        fragment.start_line,
        fragment.end_line
    );
    let block = panel_block(&title, is_focused, theme);
    let inner = inner_rect(area);
    frame.render_widget(block, area);

    // Gutter width fits the largest line number in the fragment.
    let last_number = fragment.start_line as usize + fragment.code.lines().count();
    let gutter = last_number.to_string().len().max(3);

    let all_lines: Vec<Line> = lexer::tokenize(&fragment.code, fragment.start_line)
        .map(|line| {
            let mut spans = vec![Span::styled(
                format!("{:>gutter$} ", line.number),
                Style::default().fg(theme.line_number),
            )];
            spans.extend(line.tokens.iter().map(|token| {
                Span::styled(token.text.to_owned(), Style::default().fg(theme.token(token.kind)))
            }));
            Line::from(spans)
        })
        .collect();

    let total = all_lines.len();
    let viewport_height = inner.height as usize;
    let visible_start = state.code_scroll.min(total.saturating_sub(1));
    let visible_end = (visible_start + viewport_height).min(total);

    let items: Vec<ListItem> = all_lines[visible_start..visible_end]
        .iter()
        .map(|l| ListItem::new(l.clone()))
        .collect();

    frame.render_widget(List::new(items), inner);
}
