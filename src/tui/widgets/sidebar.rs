use crate::app::state::{AppState, Screen};
use crate::tui::theme::get_theme;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState},
    Frame,
};

/// Menu entry; `screen` is `None` for the separator line.
struct MenuItem {
    icon: &'static str,
    label: &'static str,
    screen: Option<Screen>,
}

impl MenuItem {
    const fn item(icon: &'static str, label: &'static str, screen: Screen) -> Self {
        Self { icon, label, screen: Some(screen) }
    }

    const fn separator() -> Self {
        Self { icon: "", label: "", screen: None }
    }
}

pub fn render(frame: &mut Frame, state: &AppState, area: Rect) {
    let theme = get_theme();
    let icons = &theme.icons;

    let block = Block::default()
        .borders(Borders::ALL)
        .border_set(theme.border_set())
        .border_style(Style::default().fg(theme.colors.border))
        .title(" Paleta ")
        .title_style(Style::default().fg(theme.colors.accent));

    let menu_items = [
        MenuItem::item(icons.generator, "Generator", Screen::Generator),
        MenuItem::item(icons.saved, "Saved", Screen::Saved),
        MenuItem::separator(),
        MenuItem::item(icons.account, "Account", Screen::Account),
        MenuItem::item(icons.help, "Help", Screen::Help),
    ];

    let items: Vec<ListItem> = menu_items
        .iter()
        .map(|item| {
            let Some(screen) = item.screen else {
                return ListItem::new(Line::from(""));
            };
            let is_selected = screen == state.screen;

            let style = if is_selected {
                Style::default()
                    .fg(theme.colors.accent)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(theme.colors.fg_primary)
            };

            let icon_style = if is_selected {
                Style::default().fg(theme.colors.accent)
            } else {
                Style::default().fg(theme.colors.fg_secondary)
            };

            let prefix = if is_selected { icons.selected } else { icons.unselected };

            ListItem::new(Line::from(vec![
                Span::styled(prefix, icon_style),
                Span::raw(" "),
                Span::styled(item.icon, icon_style),
                Span::raw(" "),
                Span::styled(item.label, style),
            ]))
        })
        .collect();

    let list_idx = menu_items
        .iter()
        .position(|item| item.screen == Some(state.screen));

    let mut list_state = ListState::default();
    list_state.select(list_idx);

    let list = List::new(items)
        .block(block)
        .highlight_style(
            Style::default()
                .fg(theme.colors.bg_primary)
                .bg(theme.colors.accent)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("");

    frame.render_stateful_widget(list, area, &mut list_state);

    // Signed-in user on the last inner row
    if area.height > 4 {
        let (text, style) = match &state.user {
            Some(user) => (
                format!("{} {}", icons.user, user.display_name()),
                Style::default().fg(theme.colors.fg_secondary),
            ),
            None => ("not signed in".to_string(), Style::default().fg(theme.colors.fg_secondary)),
        };
        let row = Rect::new(area.x + 2, area.y + area.height - 2, area.width.saturating_sub(4), 1);
        let text = super::truncate_str(&text, row.width as usize);
        frame.render_widget(ratatui::widgets::Paragraph::new(Line::from(Span::styled(text, style))), row);
    }
}
