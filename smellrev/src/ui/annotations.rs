//! Annotation panel renderer for smellrev.
//!
//! Shows the machine-assist comment (when present), then the fixed taxonomy
//! as two checkbox sections. Selected entries expand to show their
//! suggestion and refactored-code fields; the field being edited displays
//! the live Insert-mode buffer with a block cursor.

use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use smellrev_core::taxonomy::{self, TaxonomyEntry};
use smellrev_core::types::SmellCategory;

use crate::app::{AppState, EditTarget, PanelFocus};
use crate::theme::Theme;
use crate::ui::layout::{inner_rect, panel_block};

/// Renders the left annotation panel.
///
/// Takes `state` mutably: after building the content, the scroll offset is
/// adjusted so the cursor row stays inside the viewport.
pub fn render_annotations(
    frame: &mut Frame,
    area: ratatui::layout::Rect,
    focus: PanelFocus,
    state: &mut AppState,
    theme: &Theme,
) {
    let is_focused = focus == PanelFocus::Annotations;
    let selected = state.session.annotations.len();
    let title = if selected > 0 {
        format!("Annotations ({selected})")
    } else {
        "Annotations".to_owned()
    };
    let block = panel_block(&title, is_focused, theme);
    let inner = inner_rect(area);
    frame.render_widget(block, area);

    let mut lines: Vec<Line> = Vec::new();
    let mut cursor_row = 0usize;

    if let Some(fragment) = &state.session.fragment {
        if let Some(comment) = &fragment.assist_comment {
            lines.push(Line::from(Span::styled(
                "AI comment",
                Style::default().fg(theme.assist_comment).add_modifier(Modifier::BOLD),
            )));
            for text in comment.lines() {
                lines.push(Line::from(Span::styled(
                    format!("  {text}"),
                    Style::default().fg(theme.assist_comment),
                )));
            }
            lines.push(Line::raw(""));
        }
    }

    let mut index = 0usize;
    push_section(&mut lines, "Code Smells", theme.category_smell);
    for entry in taxonomy::CODE_SMELLS {
        push_entry(&mut lines, &mut cursor_row, entry, index, state, theme);
        index += 1;
    }
    lines.push(Line::raw(""));
    push_section(&mut lines, "Anti-Patterns", theme.category_anti);
    for entry in taxonomy::ANTI_PATTERNS {
        push_entry(&mut lines, &mut cursor_row, entry, index, state, theme);
        index += 1;
    }

    // Keep the cursor row visible: clamp the scroll window around it.
    let height = inner.height as usize;
    if height > 0 {
        let scroll = state.annotations_scroll as usize;
        if cursor_row < scroll {
            state.annotations_scroll = cursor_row as u16;
        } else if cursor_row >= scroll + height {
            state.annotations_scroll = (cursor_row + 1 - height) as u16;
        }
    }

    frame.render_widget(
        Paragraph::new(lines).scroll((state.annotations_scroll, 0)),
        inner,
    );
}

fn push_section(lines: &mut Vec<Line>, title: &'static str, color: ratatui::style::Color) {
    lines.push(Line::from(Span::styled(
        title,
        Style::default().fg(color).add_modifier(Modifier::BOLD),
    )));
}

/// Appends one taxonomy entry: its checkbox row and, when selected and
/// expanded, its field rows.
fn push_entry(
    lines: &mut Vec<Line>,
    cursor_row: &mut usize,
    entry: &TaxonomyEntry,
    index: usize,
    state: &AppState,
    theme: &Theme,
) {
    let annotations = &state.session.annotations;
    let selected = annotations.is_selected(entry.key);
    let expanded = annotations.is_expanded(entry.key);
    let at_cursor = state.cursor == index;

    if at_cursor {
        *cursor_row = lines.len();
    }

    let marker = if at_cursor { "> " } else { "  " };
    let checkbox = if selected { "[x] " } else { "[ ] " };
    let chevron = match (selected, expanded) {
        (true, true) => "v ",
        (true, false) => "> ",
        (false, _) => "  ",
    };
    let accent = match entry.category {
        SmellCategory::CodeSmell => theme.category_smell,
        SmellCategory::AntiPattern => theme.category_anti,
    };
    let label_style = if at_cursor {
        Style::default().fg(theme.border_active).add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };

    lines.push(Line::from(vec![
        Span::styled(marker.to_owned(), Style::default().fg(theme.border_active)),
        Span::styled(checkbox.to_owned(), Style::default().fg(accent)),
        Span::raw(chevron.to_owned()),
        Span::styled(entry.label.to_owned(), label_style),
    ]));

    if !(selected && expanded) {
        return;
    }

    let annotation = annotations.get(entry.key);
    let suggestion = field_text(
        state,
        entry.key,
        FieldView::Suggestion,
        annotation.map(|a| a.suggestion.as_str()).unwrap_or(""),
    );
    let refactored = field_text(
        state,
        entry.key,
        FieldView::Refactored,
        annotation.map(|a| a.refactored_code.as_str()).unwrap_or(""),
    );

    push_field(lines, "Suggestion (Enter to edit)", &suggestion, theme);
    push_field(lines, "Refactored code (e to edit, optional)", &refactored, theme);
}

enum FieldView {
    Suggestion,
    Refactored,
}

/// The text to display for a field: the live edit buffer with a block
/// cursor while this field is being edited, the stored value otherwise.
fn field_text(state: &AppState, key: &str, field: FieldView, stored: &str) -> String {
    let editing = match (&state.edit, field) {
        (Some(EditTarget::Suggestion(k)), FieldView::Suggestion) => k == key,
        (Some(EditTarget::Refactored(k)), FieldView::Refactored) => k == key,
        _ => false,
    };
    if editing {
        format!("{}\u{2588}", state.edit_buffer)
    } else {
        stored.to_owned()
    }
}

fn push_field(lines: &mut Vec<Line>, label: &'static str, text: &str, theme: &Theme) {
    lines.push(Line::from(Span::styled(
        format!("      {label}:"),
        Style::default().fg(theme.line_number),
    )));
    if text.is_empty() {
        lines.push(Line::from(Span::styled(
            "        (empty)".to_owned(),
            Style::default().fg(theme.line_number).add_modifier(Modifier::ITALIC),
        )));
        return;
    }
    for row in text.lines() {
        lines.push(Line::raw(format!("        {row}")));
    }
}
