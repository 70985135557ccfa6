//! Color theme system for smellrev.
//!
//! A `Theme` holds named `ratatui::style::Color` fields covering every UI
//! surface smellrev renders, including one color per lexer token class. Two
//! built-in themes are provided:
//!
//! - `dark` — ANSI 16 colors (`Color::Reset`, `Color::DarkGray`, etc.) so it
//!   works on any terminal including 256-color SSH sessions.
//! - `catppuccin_mocha` — Catppuccin Mocha palette in RGB; needs truecolor.

use ratatui::style::Color;

use smellrev_core::lexer::TokenKind;
use smellrev_core::types::NoticeLevel;

/// All color values used across smellrev's UI surfaces.
#[derive(Debug, Clone)]
pub struct Theme {
    /// Border color for the currently focused panel.
    pub border_active: Color,
    /// Border color for unfocused panels.
    pub border_inactive: Color,

    // Code panel token classes
    pub token_keyword: Color,
    pub token_string: Color,
    pub token_number: Color,
    pub token_comment: Color,
    pub token_operator: Color,
    pub token_plain: Color,
    /// Line-number gutter.
    pub line_number: Color,

    // Annotation panel
    /// Accent for code-smell taxonomy entries.
    pub category_smell: Color,
    /// Accent for anti-pattern taxonomy entries.
    pub category_anti: Color,
    /// Machine-assist comment block.
    pub assist_comment: Color,

    // Guide panel
    pub guide_before: Color,
    pub guide_after: Color,

    // Notifications
    pub notice_success: Color,
    pub notice_warning: Color,
    pub notice_error: Color,

    // Status bar
    pub status_bar_bg: Color,
    pub status_bar_fg: Color,
    pub status_mode_normal: Color,
    pub status_mode_insert: Color,

    /// Application background (used for clearing overlay areas).
    pub background: Color,
}

impl Theme {
    /// Returns the color for a lexer token class.
    pub fn token(&self, kind: TokenKind) -> Color {
        match kind {
            TokenKind::Keyword => self.token_keyword,
            TokenKind::StringLit => self.token_string,
            TokenKind::Number => self.token_number,
            TokenKind::Comment => self.token_comment,
            TokenKind::Operator => self.token_operator,
            TokenKind::Plain => self.token_plain,
        }
    }

    /// Returns the accent color for a notification level.
    pub fn notice(&self, level: NoticeLevel) -> Color {
        match level {
            NoticeLevel::Success => self.notice_success,
            NoticeLevel::Warning => self.notice_warning,
            NoticeLevel::Error => self.notice_error,
        }
    }

    /// Built-in dark theme using ANSI 16 colors.
    ///
    /// Works on all terminals; the default when no config is present or the
    /// configured name is unknown.
    pub fn dark() -> Self {
        Self {
            border_active: Color::Cyan,
            border_inactive: Color::DarkGray,

            token_keyword: Color::Blue,
            token_string: Color::Green,
            token_number: Color::Magenta,
            token_comment: Color::DarkGray,
            token_operator: Color::Red,
            token_plain: Color::Reset,
            line_number: Color::DarkGray,

            category_smell: Color::Blue,
            category_anti: Color::Red,
            assist_comment: Color::Yellow,

            guide_before: Color::Red,
            guide_after: Color::Green,

            notice_success: Color::Green,
            notice_warning: Color::Yellow,
            notice_error: Color::Red,

            status_bar_bg: Color::DarkGray,
            status_bar_fg: Color::White,
            status_mode_normal: Color::Cyan,
            status_mode_insert: Color::Green,

            background: Color::Reset,
        }
    }

    /// Catppuccin Mocha theme using RGB truecolor values.
    ///
    /// Colors degrade to the nearest ANSI 256 approximation on terminals
    /// without truecolor support. Palette source:
    /// <https://github.com/catppuccin/catppuccin> Mocha variant.
    pub fn catppuccin_mocha() -> Self {
        let green = Color::Rgb(166, 227, 161); // #a6e3a1
        let red = Color::Rgb(243, 139, 168); // #f38ba8
        let yellow = Color::Rgb(249, 226, 175); // #f9e2af
        let blue = Color::Rgb(137, 180, 250); // #89b4fa
        let mauve = Color::Rgb(203, 166, 247); // #cba6f7
        let lavender = Color::Rgb(180, 190, 254); // #b4befe
        let overlay1 = Color::Rgb(127, 132, 156); // #7f849c
        let surface1 = Color::Rgb(69, 71, 90); // #45475a
        let base = Color::Rgb(30, 30, 46); // #1e1e2e
        let text = Color::Rgb(205, 214, 244); // #cdd6f4
        let peach = Color::Rgb(250, 179, 135); // #fab387

        Self {
            border_active: lavender,
            border_inactive: overlay1,

            token_keyword: blue,
            token_string: green,
            token_number: mauve,
            token_comment: overlay1,
            token_operator: red,
            token_plain: text,
            line_number: overlay1,

            category_smell: blue,
            category_anti: red,
            assist_comment: yellow,

            guide_before: red,
            guide_after: green,

            notice_success: green,
            notice_warning: peach,
            notice_error: red,

            status_bar_bg: surface1,
            status_bar_fg: text,
            status_mode_normal: lavender,
            status_mode_insert: green,

            background: base,
        }
    }

    /// Resolves a theme name string to the corresponding built-in theme.
    ///
    /// Unknown names fall back to `dark()` so a typo in config never
    /// prevents startup; the fallback is printed to stderr, not a hard error.
    pub fn from_name(name: &str) -> Self {
        match name {
            "catppuccin-mocha" | "catppuccin_mocha" => Self::catppuccin_mocha(),
            "dark" => Self::dark(),
            other => {
                eprintln!("smellrev: unknown theme '{}', falling back to 'dark'", other);
                Self::dark()
            }
        }
    }
}
