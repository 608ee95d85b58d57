//! Filter sidebar: year range selector and entity multi-select.

use ratatui::layout::Rect;
use ratatui::style::Modifier;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::app::AppState;
use crate::theme;

/// Lines drawn above the entity list.
const HEADER_ROWS: usize = 5;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::panel_border(false))
        .title(" Filters ")
        .title_style(theme::panel_title(false));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let bounds = app.dataset.year_bounds();
    let years = app.filter.years;
    let mut lines: Vec<Line> = Vec::new();

    lines.push(Line::from(Span::styled(
        format!("Years ({}-{})", bounds.lo, bounds.hi),
        theme::accent_bold(),
    )));
    lines.push(year_line("From", years.lo, app.sidebar_cursor == 0));
    lines.push(year_line("To", years.hi, app.sidebar_cursor == 1));
    lines.push(Line::from(""));

    let entities = app.dataset.entities();
    lines.push(Line::from(vec![
        Span::styled("Entities ", theme::accent_bold()),
        Span::styled(
            format!("{}/{}", app.filter.entities.len(), entities.len()),
            theme::accent(),
        ),
    ]));

    // Keep the cursor row visible.
    let visible = (inner.height as usize).saturating_sub(HEADER_ROWS).max(1);
    let cursor_entity = app.sidebar_cursor.checked_sub(2);
    let offset = cursor_entity
        .map(|c| c.saturating_sub(visible - 1))
        .unwrap_or(0);

    for (i, name) in entities.iter().enumerate().skip(offset).take(visible) {
        let is_cursor = cursor_entity == Some(i);
        let is_selected = app.filter.is_selected(name);
        let check = if is_selected { "[x] " } else { "[ ] " };

        let style = if is_cursor {
            theme::accent().add_modifier(Modifier::REVERSED)
        } else if is_selected {
            theme::positive()
        } else {
            theme::muted()
        };
        lines.push(Line::from(vec![
            Span::styled(check, theme::muted()),
            Span::styled(name.as_str(), style),
        ]));
    }

    f.render_widget(Paragraph::new(lines), inner);
}

fn year_line(label: &str, year: i32, is_cursor: bool) -> Line<'static> {
    let style = if is_cursor {
        theme::accent().add_modifier(Modifier::REVERSED)
    } else {
        theme::accent()
    };
    Line::from(vec![
        Span::styled(format!("  {label:<5}"), theme::muted()),
        Span::styled(format!("◂ {year} ▸"), style),
    ])
}
