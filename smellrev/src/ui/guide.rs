//! Reference guide panel renderer for smellrev.
//!
//! Static embedded content: two tabs (Code Smells / Anti-Patterns), each
//! listing every taxonomy entry with its definition, symptoms, refactoring
//! tip, and a before/after example pair.

use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use smellrev_core::taxonomy;

use crate::app::{AppState, GuideTab, PanelFocus};
use crate::theme::Theme;
use crate::ui::layout::{inner_rect, panel_block};

/// Renders the right reference-guide panel.
pub fn render_guide(
    frame: &mut Frame,
    area: ratatui::layout::Rect,
    focus: PanelFocus,
    state: &AppState,
    theme: &Theme,
) {
    let is_focused = focus == PanelFocus::Guide;
    let block = panel_block("Reference Guide", is_focused, theme);
    let inner = inner_rect(area);
    frame.render_widget(block, area);

    let (entries, tab_line) = match state.guide_tab {
        GuideTab::CodeSmells => (
            taxonomy::CODE_SMELLS,
            tab_header("Code Smells", "Anti-Patterns", theme.category_smell, theme),
        ),
        GuideTab::AntiPatterns => (
            taxonomy::ANTI_PATTERNS,
            tab_header("Anti-Patterns", "Code Smells", theme.category_anti, theme),
        ),
    };

    let mut lines: Vec<Line> = vec![tab_line, Line::raw("")];

    for entry in entries {
        lines.push(Line::from(Span::styled(
            entry.label.to_owned(),
            Style::default().add_modifier(Modifier::BOLD),
        )));
        push_labeled(&mut lines, "Definition", entry.definition, theme);
        push_labeled(&mut lines, "Symptoms", entry.symptoms, theme);
        push_labeled(&mut lines, "Refactoring", entry.refactoring_tip, theme);

        lines.push(Line::from(Span::styled(
            "  Before",
            Style::default().fg(theme.guide_before).add_modifier(Modifier::BOLD),
        )));
        for row in entry.before.lines() {
            lines.push(Line::from(Span::styled(
                format!("    {row}"),
                Style::default().fg(theme.guide_before),
            )));
        }
        lines.push(Line::from(Span::styled(
            "  After",
            Style::default().fg(theme.guide_after).add_modifier(Modifier::BOLD),
        )));
        for row in entry.after.lines() {
            lines.push(Line::from(Span::styled(
                format!("    {row}"),
                Style::default().fg(theme.guide_after),
            )));
        }
        lines.push(Line::raw(""));
    }

    frame.render_widget(Paragraph::new(lines).scroll((state.guide_scroll, 0)), inner);
}

/// Builds the tab header: active tab highlighted, inactive dimmed, with the
/// Left/Right hint.
fn tab_header(
    active: &'static str,
    inactive: &'static str,
    accent: ratatui::style::Color,
    theme: &Theme,
) -> Line<'static> {
    Line::from(vec![
        Span::styled(
            format!("[{active}]"),
            Style::default().fg(accent).add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled(inactive.to_owned(), Style::default().fg(theme.line_number)),
        Span::styled("  (←/→)".to_owned(), Style::default().fg(theme.line_number)),
    ])
}

fn push_labeled(lines: &mut Vec<Line>, label: &'static str, text: &'static str, theme: &Theme) {
    lines.push(Line::from(vec![
        Span::styled(format!("  {label}: "), Style::default().fg(theme.line_number)),
        Span::raw(text),
    ]));
}
