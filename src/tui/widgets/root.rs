//! Root layout widget - orchestrates main layout structure

use crate::app::state::{AppState, Prompt, Screen, ToastKind};
use crate::tui::theme::get_theme;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Flex, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use super::{account, generator, help, saved, sidebar, truncate_str};

/// Main layout structure:
/// ┌──────────┬─────────────────────────────────────────┐
/// │  Menu    │           Main Content                  │
/// │          │      (Generator/Saved/Account/Help)     │
/// │ Generator│                                         │
/// │ Saved    │                                         │
/// │ Account  │                                         │
/// │ Help     │                                         │
/// ├──────────┴─────────────────────────────────────────┤
/// │ toast / status                                     │
/// └────────────────────────────────────────────────────┘
pub fn render(frame: &mut Frame, state: &AppState) {
    let root = frame.area();

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(8), Constraint::Length(3)])
        .split(root);

    let top_cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(22), Constraint::Min(40)])
        .split(rows[0]);

    sidebar::render(frame, state, top_cols[0]);
    render_main_content(frame, state, top_cols[1]);
    render_status_bar(frame, state, rows[1]);

    if let Some(prompt) = &state.prompt {
        render_prompt(frame, prompt, root);
    }
}

fn render_main_content(frame: &mut Frame, state: &AppState, area: Rect) {
    let theme = get_theme();
    let icons = &theme.icons;

    let title = match state.screen {
        Screen::Generator => format!(" {} Generator ", icons.generator),
        Screen::Saved => format!(" {} Saved palettes ", icons.saved),
        Screen::Account => format!(" {} Account ", icons.account),
        Screen::Help => format!(" {} Keybinds ", icons.help),
    };

    let main = Block::default()
        .borders(Borders::ALL)
        .border_set(theme.border_set())
        .border_style(Style::default().fg(theme.colors.border))
        .title(title)
        .title_style(Style::default().fg(theme.colors.accent));
    let inner = main.inner(area);
    frame.render_widget(main, area);

    let padded = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(1), Constraint::Min(1), Constraint::Length(1)])
        .split(inner)[1];

    match state.screen {
        Screen::Generator => generator::render(frame, state, padded),
        Screen::Saved => saved::render(frame, state, padded),
        Screen::Account => account::render(frame, state, padded),
        Screen::Help => help::render(frame, state, padded),
    }
}

fn render_status_bar(frame: &mut Frame, state: &AppState, area: Rect) {
    let theme = get_theme();
    let icons = &theme.icons;

    let block = Block::default()
        .borders(Borders::ALL)
        .border_set(theme.border_set())
        .border_style(Style::default().fg(theme.colors.border));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let width = inner.width as usize;
    let line = match &state.toast {
        Some(toast) if !toast.is_expired() => {
            let (prefix, color) = match toast.kind {
                ToastKind::Success => (icons.success, theme.colors.success),
                ToastKind::Error => (icons.error, theme.colors.error),
            };
            Line::from(vec![
                Span::styled(format!("{} ", prefix), Style::default().fg(color)),
                Span::styled(
                    truncate_str(&toast.message, width.saturating_sub(3)),
                    Style::default().fg(color).add_modifier(Modifier::BOLD),
                ),
            ])
        }
        _ => Line::from(Span::styled(
            truncate_str(&state.status, width),
            Style::default().fg(theme.colors.fg_secondary),
        )),
    };
    frame.render_widget(Paragraph::new(line), inner);
}

fn render_prompt(frame: &mut Frame, prompt: &Prompt, area: Rect) {
    let theme = get_theme();

    let (title, body, hint) = match prompt {
        Prompt::CopyManually(text) => (
            " Copy manually ",
            text.clone(),
            "No clipboard available. Select the text above.  Enter close",
        ),
        Prompt::ConfirmDelete { name, .. } => (
            " Delete palette ",
            format!("Delete \"{name}\"?"),
            "y / Enter delete   n / Esc cancel",
        ),
    };

    let popup = centered(area, 60, 7);
    frame.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_set(theme.border_set())
        .border_style(Style::default().fg(theme.colors.accent))
        .title(title)
        .title_style(
            Style::default()
                .fg(theme.colors.accent)
                .add_modifier(Modifier::BOLD),
        );

    let lines = vec![
        Line::default(),
        Line::from(Span::styled(
            body,
            Style::default()
                .fg(theme.colors.fg_primary)
                .add_modifier(Modifier::BOLD),
        )),
        Line::default(),
        Line::from(Span::styled(hint, Style::default().fg(theme.colors.fg_secondary))),
    ];

    let para = Paragraph::new(lines)
        .block(block)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: false });
    frame.render_widget(para, popup);
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let [row] = Layout::vertical([Constraint::Length(height)])
        .flex(Flex::Center)
        .areas(area);
    let [col] = Layout::horizontal([Constraint::Length(width.min(area.width))])
        .flex(Flex::Center)
        .areas(row);
    col
}
