//! Color themes.

use ratatui::style::Color;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub foreground: Color,
    pub muted: Color,
    pub highlight: Color,
    pub success: Color,
    pub error: Color,
    pub warning: Color,
    pub status: Color,
}

impl Theme {
    pub fn dark() -> Self {
        Self {
            foreground: Color::White,
            muted: Color::DarkGray,
            highlight: Color::Cyan,
            success: Color::Green,
            error: Color::Red,
            warning: Color::Yellow,
            status: Color::Magenta,
        }
    }

    pub fn light() -> Self {
        Self {
            foreground: Color::Black,
            muted: Color::Gray,
            highlight: Color::Blue,
            success: Color::Green,
            error: Color::Red,
            warning: Color::Yellow,
            status: Color::Magenta,
        }
    }

    /// `"light"` selects the light theme; anything else is dark.
    pub fn from_name(name: &str) -> Self {
        if name.eq_ignore_ascii_case("light") {
            Self::light()
        } else {
            Self::dark()
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}
