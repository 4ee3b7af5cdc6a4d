use super::{swatch_color, truncate_str};
use crate::app::state::AppState;
use crate::gateway::SavedPalette;
use crate::tui::theme::{get_theme, LoadingSpinner, Theme};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem, ListState, Paragraph},
    Frame,
};
use time::macros::format_description;

const NAME_WIDTH: usize = 22;

pub fn render(frame: &mut Frame, state: &AppState, area: Rect) {
    let theme = get_theme();
    let list = &state.saved;

    if state.user.is_none() {
        let msg = Paragraph::new(Line::from("Sign in on the Account screen to see saved palettes"))
            .style(Style::default().fg(theme.colors.fg_secondary));
        frame.render_widget(msg, area);
        return;
    }

    if list.loading && list.palettes.is_empty() {
        let spinner = LoadingSpinner::frame(state.tick);
        let loading = Paragraph::new(Line::from(format!("{spinner} Loading palettes...")))
            .style(Style::default().fg(theme.colors.fg_secondary));
        frame.render_widget(loading, area);
        return;
    }

    if list.palettes.is_empty() {
        let msg = if list.loaded {
            "No saved palettes yet. Press s on the generator to save one!"
        } else {
            "Press r to load your palettes"
        };
        let empty = Paragraph::new(Line::from(msg))
            .style(Style::default().fg(theme.colors.fg_secondary));
        frame.render_widget(empty, area);
        return;
    }

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Min(3), Constraint::Length(1)])
        .split(area);

    let count = match list.palettes.len() {
        1 => "1 palette".to_string(),
        n => format!("{n} palettes"),
    };
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(
            count,
            Style::default().fg(theme.colors.fg_secondary),
        ))),
        rows[0],
    );

    let visible_height = rows[1].height as usize;
    let scroll_offset = list.scroll_offset;

    let items: Vec<ListItem> = list
        .palettes
        .iter()
        .enumerate()
        .skip(scroll_offset)
        .take(visible_height)
        .map(|(i, p)| {
            let selected_color = (i == list.selected).then_some(list.color_selected);
            ListItem::new(palette_line(p, selected_color, state, &theme))
        })
        .collect();

    let mut list_state = ListState::default();
    list_state.select(Some(list.selected.saturating_sub(scroll_offset)));

    let widget = List::new(items)
        .highlight_style(Style::default().bg(theme.colors.bg_highlight))
        .highlight_symbol("\u{f054} ");
    frame.render_stateful_widget(widget, rows[1], &mut list_state);

    let hints = Line::from(Span::styled(
        "j/k select  h/l color  c copy  C copy all  d delete  r refresh",
        Style::default().fg(theme.colors.fg_secondary),
    ));
    frame.render_widget(Paragraph::new(hints), rows[2]);
}

fn palette_line(
    p: &SavedPalette,
    selected_color: Option<usize>,
    state: &AppState,
    theme: &Theme,
) -> Line<'static> {
    let name_style = if selected_color.is_some() {
        Style::default()
            .fg(theme.colors.accent)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(theme.colors.fg_primary)
    };

    let date = p
        .created_at
        .format(format_description!("[day]/[month]/[year] [hour]:[minute]"))
        .unwrap_or_default();

    let mut spans = vec![
        Span::styled(
            format!("{:width$}", truncate_str(&p.name, NAME_WIDTH), width = NAME_WIDTH),
            name_style,
        ),
        Span::raw(" "),
    ];

    for (i, value) in p.colors.iter().enumerate() {
        let mut style = Style::default().bg(swatch_color(value));
        let cell = if selected_color == Some(i) {
            style = style
                .fg(swatch_color(crate::color::contrast_text_color(value)))
                .add_modifier(Modifier::BOLD);
            " ◆ "
        } else if state.clipboard.feedback().is_copied(value) {
            style = style.fg(swatch_color(crate::color::contrast_text_color(value)));
            " ✓ "
        } else {
            "   "
        };
        spans.push(Span::styled(cell, style));
    }

    spans.push(Span::raw("  "));
    if let Some(i) = selected_color
        && let Some(value) = p.colors.get(i)
    {
        spans.push(Span::styled(
            crate::color::display_hex(value),
            Style::default().fg(theme.colors.accent_alt),
        ));
        spans.push(Span::raw("  "));
    }
    spans.push(Span::styled(date, Style::default().fg(theme.colors.fg_secondary)));

    Line::from(spans)
}
