//! Swatch type and color helpers.

use rand::Rng;
use uuid::Uuid;

pub const BLACK: &str = "#000000";
pub const WHITE: &str = "#FFFFFF";

const HEX_DIGITS: &[u8; 16] = b"0123456789ABCDEF";

pub type SwatchId = Uuid;

/// One color entry of a palette.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Swatch {
    pub id: SwatchId,
    pub value: String,
    pub locked: bool,
}

impl Swatch {
    /// Fresh unlocked swatch with a new id.
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            value: value.into(),
            locked: false,
        }
    }

    pub fn random() -> Self {
        Self::new(generate_random_color())
    }

    pub fn display_value(&self) -> String {
        display_hex(&self.value)
    }

    pub fn text_color(&self) -> &'static str {
        contrast_text_color(&self.value)
    }
}

/// `#RRGGBB` built from six independent uniform hex digits.
pub fn generate_random_color() -> String {
    let mut rng = rand::rng();
    let mut color = String::with_capacity(7);
    color.push('#');
    for _ in 0..6 {
        color.push(HEX_DIGITS[rng.random_range(0..16)] as char);
    }
    color
}

pub fn is_valid_hex(s: &str) -> bool {
    s.len() == 7 && s.starts_with('#') && s[1..].chars().all(|c| c.is_ascii_hexdigit())
}

pub fn parse_rgb(s: &str) -> Option<(u8, u8, u8)> {
    if !is_valid_hex(s) {
        return None;
    }
    let r = u8::from_str_radix(&s[1..3], 16).ok()?;
    let g = u8::from_str_radix(&s[3..5], 16).ok()?;
    let b = u8::from_str_radix(&s[5..7], 16).ok()?;
    Some((r, g, b))
}

/// Black or white overlay text, whichever reads better on `value`.
///
/// Brightness is `(299 R + 587 G + 114 B) / 1000`; above 128 gets black.
/// Anything that does not parse gets white.
pub fn contrast_text_color(value: &str) -> &'static str {
    let Some((r, g, b)) = parse_rgb(value) else {
        return WHITE;
    };
    let brightness = (r as u32 * 299 + g as u32 * 587 + b as u32 * 114) as f64 / 1000.0;
    if brightness > 128.0 { BLACK } else { WHITE }
}

pub fn display_hex(value: &str) -> String {
    value.to_ascii_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_color_format() {
        for _ in 0..200 {
            let c = generate_random_color();
            assert!(is_valid_hex(&c), "bad color {c}");
            assert_eq!(c, c.to_ascii_uppercase());
        }
    }

    #[test]
    fn test_contrast_extremes() {
        assert_eq!(contrast_text_color("#FFFFFF"), "#000000");
        assert_eq!(contrast_text_color("#000000"), "#FFFFFF");
    }

    #[test]
    fn test_contrast_threshold() {
        // 128 exactly is not "> 128"
        assert_eq!(contrast_text_color("#808080"), WHITE);
        assert_eq!(contrast_text_color("#818181"), BLACK);
        // pure green is bright, pure blue is dark
        assert_eq!(contrast_text_color("#00FF00"), BLACK);
        assert_eq!(contrast_text_color("#0000FF"), WHITE);
        assert_eq!(contrast_text_color("#ffff00"), BLACK);
    }

    #[test]
    fn test_contrast_invalid_input() {
        assert_eq!(contrast_text_color("not a color"), WHITE);
        assert_eq!(contrast_text_color("#FFF"), WHITE);
    }

    #[test]
    fn test_parse_and_display() {
        assert_eq!(parse_rgb("#aAbBcC"), Some((0xAA, 0xBB, 0xCC)));
        assert_eq!(parse_rgb("AABBCC"), None);
        assert_eq!(parse_rgb("#GGBBCC"), None);
        assert_eq!(display_hex("#aabbcc"), "#AABBCC");
    }

    #[test]
    fn test_new_swatch_is_unlocked_with_fresh_id() {
        let a = Swatch::new("#112233");
        let b = Swatch::new("#112233");
        assert!(!a.locked);
        assert_ne!(a.id, b.id);
        assert_eq!(a.text_color(), WHITE);
    }
}
