//! Tab 4 — Raw Data: the (entity, year) aggregate table.

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Cell, Paragraph, Row, Table};
use ratatui::Frame;

use impact_core::AggregateRow;
use impact_report::summary::group_thousands;

use crate::app::AppState;
use crate::theme;

const HEADERS: [&str; 7] = [
    "Entity", "Year", "Documents", "Citations", "Avg CNCI", "Elite", "% Elite",
];

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(2), Constraint::Length(1)])
        .split(area);

    let rows = &app.view.table;
    let (lo, hi) = cnci_range(rows);
    let visible = chunks[0].height.saturating_sub(1) as usize;
    let start = app.table_scroll.min(rows.len().saturating_sub(1));
    let end = (start + visible).min(rows.len());

    let header = Row::new(HEADERS.map(|h| Cell::from(h).style(theme::accent_bold())));
    let body = rows[start..end].iter().map(|r| {
        let shade = theme::greens(scale(r.avg_cnci, lo, hi));
        Row::new(vec![
            Cell::from(r.entity.clone()),
            Cell::from(r.year.map(|y| y.to_string()).unwrap_or_default()),
            Cell::from(group_thousands(r.documents)),
            Cell::from(group_thousands(r.citations)),
            Cell::from(format!("{:.2}", r.avg_cnci)).style(Style::default().fg(Color::Black).bg(shade)),
            Cell::from(r.elite_documents.to_string()),
            Cell::from(format!("{:.2}", r.pct_elite)),
        ])
        .style(theme::muted())
    });

    let widths = [
        Constraint::Min(16),
        Constraint::Length(6),
        Constraint::Length(11),
        Constraint::Length(11),
        Constraint::Length(9),
        Constraint::Length(7),
        Constraint::Length(8),
    ];
    let table = Table::new(body, widths).header(header).column_spacing(1);
    f.render_widget(table, chunks[0]);

    let footer = Line::from(vec![
        Span::styled(
            format!("rows {}-{} of {}", start + 1, end, rows.len()),
            theme::accent(),
        ),
        Span::styled("  [PgUp/PgDn]scroll [Home/End] [x]export", theme::muted()),
    ]);
    f.render_widget(Paragraph::new(footer), chunks[1]);
}

/// Min/max average CNCI over rows that have documents.
fn cnci_range(rows: &[AggregateRow]) -> (f64, f64) {
    rows.iter()
        .filter(|r| r.has_documents())
        .map(|r| r.avg_cnci)
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        })
}

fn scale(v: f64, lo: f64, hi: f64) -> f64 {
    if hi > lo {
        (v - lo) / (hi - lo)
    } else {
        1.0
    }
}
