pub mod account;
pub mod generator;
pub mod help;
pub mod root;
pub mod saved;
pub mod sidebar;

use crate::color;
use ratatui::style::Color;

/// Terminal color for a hex value; invalid values render black.
pub(crate) fn swatch_color(value: &str) -> Color {
    match color::parse_rgb(value) {
        Some((r, g, b)) => Color::Rgb(r, g, b),
        None => Color::Rgb(0, 0, 0),
    }
}

pub(crate) fn truncate_str(s: &str, max_len: usize) -> String {
    if max_len == 0 {
        return String::new();
    }
    let char_count: usize = s.chars().count();
    if char_count <= max_len {
        s.to_string()
    } else if max_len > 3 {
        let truncated: String = s.chars().take(max_len - 3).collect();
        format!("{}...", truncated)
    } else {
        s.chars().take(max_len).collect()
    }
}
