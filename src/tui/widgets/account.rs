use crate::app::state::{AccountField, AccountMode, AppState};
use crate::tui::theme::{get_theme, LoadingSpinner, Theme};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub fn render(frame: &mut Frame, state: &AppState, area: Rect) {
    let theme = get_theme();
    let icons = &theme.icons;

    if let Some(user) = &state.user {
        let lines = vec![
            Line::from(vec![
                Span::styled(format!("{} ", icons.user), Style::default().fg(theme.colors.accent)),
                Span::styled(
                    user.display_name().to_string(),
                    Style::default()
                        .fg(theme.colors.fg_primary)
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::default(),
            Line::from(Span::styled(
                "o sign out",
                Style::default().fg(theme.colors.fg_secondary),
            )),
        ];
        frame.render_widget(Paragraph::new(lines), area);
        return;
    }

    let form = &state.account;
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(2),
            Constraint::Min(1),
        ])
        .split(area);

    let title = match form.mode {
        AccountMode::SignIn => "Sign in",
        AccountMode::SignUp => "Create account",
    };
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(
            title,
            Style::default()
                .fg(theme.colors.accent)
                .add_modifier(Modifier::BOLD),
        ))),
        rows[0],
    );

    let masked: String = "•".repeat(form.password.chars().count());
    render_input(frame, &theme, " Email ", &form.email, form.focus == AccountField::Email, rows[1]);
    render_input(frame, &theme, " Password ", &masked, form.focus == AccountField::Password, rows[2]);

    let status = if form.submitting {
        Line::from(Span::styled(
            format!("{} Please wait...", LoadingSpinner::frame(state.tick)),
            Style::default().fg(theme.colors.fg_secondary),
        ))
    } else if let Some(err) = &form.error {
        Line::from(vec![
            Span::styled(format!("{} ", icons.error), Style::default().fg(theme.colors.error)),
            Span::styled(err.clone(), Style::default().fg(theme.colors.error)),
        ])
    } else {
        Line::default()
    };
    frame.render_widget(Paragraph::new(status), rows[3]);

    let toggle = match form.mode {
        AccountMode::SignIn => "Ctrl+t create an account",
        AccountMode::SignUp => "Ctrl+t sign in instead",
    };
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(
            format!("Tab switch field  Enter submit  {toggle}  Esc back"),
            Style::default().fg(theme.colors.fg_secondary),
        ))),
        rows[4],
    );
}

fn render_input(frame: &mut Frame, theme: &Theme, title: &str, value: &str, focused: bool, area: Rect) {
    let border = if focused {
        theme.colors.accent
    } else {
        theme.colors.border
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_set(theme.border_set())
        .border_style(Style::default().fg(border))
        .title(title.to_string())
        .title_style(Style::default().fg(theme.colors.fg_secondary));

    let cursor = if focused { "▏" } else { "" };
    let para = Paragraph::new(Line::from(vec![
        Span::styled(value.to_string(), Style::default().fg(theme.colors.fg_primary)),
        Span::styled(cursor, Style::default().fg(theme.colors.accent)),
    ]))
    .block(block);
    frame.render_widget(para, area);
}
