use super::{ClipboardConfig, Config, PaletteConfig, PathsConfig, UiConfig};

pub const PALETTE_SIZE: usize = crate::palette::DEFAULT_SIZE;
pub const COPY_FEEDBACK_MS: u64 = 2000;

pub fn defaults() -> Config {
    Config {
        paths: PathsConfig::default(),
        palette: PaletteConfig::default(),
        clipboard: ClipboardConfig::default(),
        ui: UiConfig::default(),
    }
}
