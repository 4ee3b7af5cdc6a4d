//! Help screen showing keybindings

use crate::app::state::AppState;
use crate::tui::theme::{get_theme, Theme};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
    Frame,
};

pub fn render(frame: &mut Frame, _state: &AppState, area: Rect) {
    let theme = get_theme();

    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let left_content = vec![
        section_header("Generator", &theme),
        keybind("h / Left", "Previous color", &theme),
        keybind("l / Right", "Next color", &theme),
        keybind("n", "New palette", &theme),
        keybind("r", "Regenerate unlocked colors", &theme),
        keybind("Space", "Lock / unlock color", &theme),
        keybind("+ / -", "More / fewer colors", &theme),
        keybind("c / Enter", "Copy color", &theme),
        keybind("C", "Copy whole palette", &theme),
        keybind("s", "Save palette", &theme),
        Line::default(),
        section_header("Saved palettes", &theme),
        keybind("j / k", "Select palette", &theme),
        keybind("h / l", "Select color", &theme),
        keybind("c / C", "Copy color / palette", &theme),
        keybind("d", "Delete palette", &theme),
        keybind("r / F5", "Refresh", &theme),
    ];

    let left_para = Paragraph::new(left_content).wrap(Wrap { trim: false });
    frame.render_widget(left_para, cols[0]);

    let right_content = vec![
        section_header("Account", &theme),
        keybind("Tab", "Switch field", &theme),
        keybind("Enter", "Sign in / create account", &theme),
        keybind("Ctrl+t", "Toggle sign in / sign up", &theme),
        keybind("o", "Sign out", &theme),
        Line::default(),
        section_header("General", &theme),
        keybind("Tab", "Next screen", &theme),
        keybind("1-3", "Go to screen", &theme),
        keybind("?", "This help", &theme),
        keybind("y / n", "Answer a prompt", &theme),
        keybind("q / Esc", "Quit", &theme),
    ];

    let right_para = Paragraph::new(right_content).wrap(Wrap { trim: false });
    frame.render_widget(right_para, cols[1]);
}

fn section_header(title: &str, theme: &Theme) -> Line<'static> {
    Line::from(vec![Span::styled(
        format!("━━ {} ━━", title),
        Style::default()
            .fg(theme.colors.accent)
            .add_modifier(Modifier::BOLD),
    )])
}

fn keybind(key: &str, desc: &str, theme: &Theme) -> Line<'static> {
    Line::from(vec![
        Span::styled("  ", Style::default()),
        Span::styled(
            format!("{:12}", key),
            Style::default()
                .fg(theme.colors.accent_alt)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(desc.to_string(), Style::default().fg(theme.colors.fg_primary)),
    ])
}
