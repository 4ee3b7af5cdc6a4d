//! UI chrome colors. Swatches are drawn in their own colors.

use ratatui::style::Color;

#[derive(Debug, Clone, Copy)]
pub struct Colors {
    pub bg_primary: Color,
    pub bg_highlight: Color,
    pub fg_primary: Color,
    pub fg_secondary: Color,
    pub accent: Color,
    pub accent_alt: Color,
    pub border: Color,
    pub success: Color,
    pub error: Color,
}

impl Colors {
    /// Grayscale so the chrome never competes with the palette.
    pub const MONO: Self = Self {
        bg_primary: Color::Rgb(0, 0, 0),
        bg_highlight: Color::Rgb(48, 48, 48),
        fg_primary: Color::Rgb(255, 255, 255),
        fg_secondary: Color::Rgb(136, 136, 136),
        accent: Color::Rgb(255, 255, 255),
        accent_alt: Color::Rgb(200, 200, 200),
        border: Color::Rgb(64, 64, 64),
        success: Color::Rgb(200, 200, 200),
        error: Color::Rgb(255, 255, 255),
    };
}

impl Default for Colors {
    fn default() -> Self {
        Self::MONO
    }
}
