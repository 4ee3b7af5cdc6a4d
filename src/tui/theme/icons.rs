//! Nerd Font icons for TUI display
//! Requires a Nerd Font to be installed (https://www.nerdfonts.com)

#[derive(Debug, Clone)]
pub struct Icons {
    // Navigation
    pub generator: &'static str,
    pub saved: &'static str,
    pub account: &'static str,
    pub help: &'static str,

    // Swatch state
    pub lock: &'static str,
    pub unlock: &'static str,
    pub copy: &'static str,

    // Status
    pub save: &'static str,
    pub success: &'static str,
    pub error: &'static str,
    pub user: &'static str,

    pub selected: &'static str,
    pub unselected: &'static str,
}

impl Icons {
    pub const fn nerd() -> Self {
        Self {
            generator: "\u{f1fc}",      // nf-fa-paint_brush
            saved: "\u{f02e}",          // nf-fa-bookmark
            account: "\u{f007}",        // nf-fa-user
            help: "\u{f059}",           // nf-fa-question_circle

            lock: "\u{f023}",           // nf-fa-lock
            unlock: "\u{f09c}",         // nf-fa-unlock
            copy: "\u{f0c5}",           // nf-fa-copy

            save: "\u{f0c7}",           // nf-fa-floppy_o
            success: "\u{f00c}",        // nf-fa-check
            error: "\u{f00d}",          // nf-fa-times
            user: "\u{f2bd}",           // nf-fa-user_circle

            selected: "\u{f054}",       // nf-fa-chevron_right
            unselected: " ",
        }
    }
}

impl Default for Icons {
    fn default() -> Self {
        Self::nerd()
    }
}

pub struct LoadingSpinner;

impl LoadingSpinner {
    pub const BRAILLE: [&'static str; 8] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧"];

    pub fn frame(tick: u64) -> &'static str {
        let idx = (tick / 4) as usize % Self::BRAILLE.len();
        Self::BRAILLE[idx]
    }
}
