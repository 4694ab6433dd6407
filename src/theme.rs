//! Theme configuration for CLI and player output
//!
//! Centralizes color choices. CLI text helpers respect `NO_COLOR`.

use crossterm::style::Color;

/// Color theme.
#[derive(Debug, Clone)]
pub struct Theme {
    /// Primary text color (used for most content)
    pub text_primary: Color,
    /// Secondary/dimmed text color
    pub text_secondary: Color,
    /// Accent color for highlights and the active cue
    pub accent: Color,
    /// Error/warning color
    pub error: Color,
    /// Success color
    pub success: Color,
    /// Emit escape codes at all
    pub colored: bool,
}

impl Default for Theme {
    fn default() -> Self {
        Self::standard()
    }
}

impl Theme {
    /// Light gray text with green accent, standard ANSI colors only.
    pub fn standard() -> Self {
        Self {
            text_primary: Color::Grey,
            text_secondary: Color::DarkGrey,
            accent: Color::Green,
            error: Color::Red,
            success: Color::Green,
            colored: true,
        }
    }

    /// Same palette with all escape codes suppressed.
    pub fn plain() -> Self {
        Self {
            colored: false,
            ..Self::standard()
        }
    }

    fn paint(&self, color: Color, text: &str) -> String {
        if self.colored {
            format!("{}{}{}", color_to_ansi(color), text, ANSI_RESET)
        } else {
            text.to_string()
        }
    }

    /// Format text with the accent color (for CLI output).
    pub fn accent_text(&self, text: &str) -> String {
        self.paint(self.accent, text)
    }

    /// Format text with the primary color (for CLI output).
    pub fn primary_text(&self, text: &str) -> String {
        self.paint(self.text_primary, text)
    }

    /// Format text with the secondary color (for CLI output).
    pub fn secondary_text(&self, text: &str) -> String {
        self.paint(self.text_secondary, text)
    }

    /// Format text with the error color (for CLI output).
    pub fn error_text(&self, text: &str) -> String {
        self.paint(self.error, text)
    }

    /// Format text with the success color (for CLI output).
    pub fn success_text(&self, text: &str) -> String {
        self.paint(self.success, text)
    }
}

/// ANSI reset sequence
pub const ANSI_RESET: &str = "\x1b[0m";

/// Convert a crossterm Color to an ANSI foreground escape code.
pub fn color_to_ansi(color: Color) -> &'static str {
    match color {
        Color::Black => "\x1b[30m",
        Color::DarkRed => "\x1b[31m",
        Color::DarkGreen => "\x1b[32m",
        Color::DarkYellow => "\x1b[33m",
        Color::DarkBlue => "\x1b[34m",
        Color::DarkMagenta => "\x1b[35m",
        Color::DarkCyan => "\x1b[36m",
        Color::Grey => "\x1b[37m",
        Color::DarkGrey => "\x1b[90m",
        Color::Red => "\x1b[91m",
        Color::Green => "\x1b[32m",
        Color::Yellow => "\x1b[93m",
        Color::Blue => "\x1b[94m",
        Color::Magenta => "\x1b[95m",
        Color::Cyan => "\x1b[96m",
        Color::White => "\x1b[97m",
        Color::Reset => "\x1b[0m",
        // For RGB and indexed colors, fall back to no color
        _ => "",
    }
}

/// Theme for the current process: plain when `NO_COLOR` is set.
pub fn current_theme() -> Theme {
    if std::env::var_os("NO_COLOR").is_some_and(|v| !v.is_empty()) {
        Theme::plain()
    } else {
        Theme::default()
    }
}
