//! Generator screen: the live palette as a row of colored columns.

use super::swatch_color;
use crate::app::state::AppState;
use crate::color::Swatch;
use crate::tui::theme::{get_theme, LoadingSpinner, Theme};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

pub fn render(frame: &mut Frame, state: &AppState, area: Rect) {
    let theme = get_theme();

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // count control + status
            Constraint::Min(5),    // swatches
            Constraint::Length(1), // cursor marker
            Constraint::Length(1), // hints
        ])
        .split(area);

    render_header(frame, state, &theme, rows[0]);

    let swatches = state.palette.swatches();
    if swatches.is_empty() {
        let empty = Paragraph::new(Line::from("Press n to generate a palette"))
            .style(Style::default().fg(theme.colors.fg_secondary))
            .alignment(Alignment::Center);
        frame.render_widget(empty, rows[1]);
        return;
    }

    let constraints = vec![Constraint::Ratio(1, swatches.len() as u32); swatches.len()];
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(constraints.clone())
        .split(rows[1]);
    let markers = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(constraints)
        .split(rows[2]);

    for (i, swatch) in swatches.iter().enumerate() {
        let copied = state.clipboard.feedback().is_copied(&swatch.value);
        render_swatch(frame, swatch, copied, &theme, cols[i]);

        if i == state.cursor {
            let marker = Paragraph::new(Line::from(Span::styled(
                "▲",
                Style::default()
                    .fg(theme.colors.accent)
                    .add_modifier(Modifier::BOLD),
            )))
            .alignment(Alignment::Center);
            frame.render_widget(marker, markers[i]);
        }
    }

    let hints = Line::from(Span::styled(
        "n new  r shuffle unlocked  space lock  c copy  C copy all  s save  +/- count",
        Style::default().fg(theme.colors.fg_secondary),
    ));
    frame.render_widget(Paragraph::new(hints), rows[3]);
}

fn render_header(frame: &mut Frame, state: &AppState, theme: &Theme, area: Rect) {
    let icons = &theme.icons;
    let palette = &state.palette;

    let mut spans = vec![
        Span::styled("Colors ", Style::default().fg(theme.colors.fg_secondary)),
        Span::styled("‹ ", Style::default().fg(theme.colors.fg_secondary)),
        Span::styled(
            palette.requested_size().to_string(),
            Style::default()
                .fg(theme.colors.accent)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(" ›", Style::default().fg(theme.colors.fg_secondary)),
    ];

    if palette.locked_count() > 0 {
        spans.push(Span::raw("   "));
        spans.push(Span::styled(
            format!("{} {}/{} locked", icons.lock, palette.locked_count(), palette.len()),
            Style::default().fg(theme.colors.accent_alt),
        ));
    }

    if state.saving {
        spans.push(Span::raw("   "));
        spans.push(Span::styled(
            format!("{} {} Saving...", icons.save, LoadingSpinner::frame(state.tick)),
            Style::default().fg(theme.colors.fg_secondary),
        ));
    } else if state.user.is_none() {
        spans.push(Span::raw("   "));
        spans.push(Span::styled(
            "sign in to save",
            Style::default().fg(theme.colors.fg_secondary),
        ));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_swatch(frame: &mut Frame, swatch: &Swatch, copied: bool, theme: &Theme, area: Rect) {
    let icons = &theme.icons;
    let bg = swatch_color(&swatch.value);
    let fg = swatch_color(swatch.text_color());
    let style = Style::default().bg(bg).fg(fg);

    let mut lines = vec![Line::default(); (area.height as usize / 2).saturating_sub(1)];
    lines.push(Line::from(Span::styled(
        swatch.display_value(),
        style.add_modifier(Modifier::BOLD),
    )));
    lines.push(Line::from(Span::styled(
        if swatch.locked {
            format!("{} LOCKED", icons.lock)
        } else {
            icons.unlock.to_string()
        },
        style,
    )));
    if copied {
        lines.push(Line::from(Span::styled(
            format!("{} Copied!", icons.copy),
            style,
        )));
    }

    let para = Paragraph::new(lines).style(style).alignment(Alignment::Center);
    frame.render_widget(para, area);
}
