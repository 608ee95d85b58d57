//! Overlay widgets: keyboard help and failed exports.

use ratatui::layout::{Constraint, Rect};
use ratatui::style::Modifier;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table};
use ratatui::Frame;

use crate::app::AppState;
use crate::theme;
use crate::ui::centered_rect;

pub fn render_help(f: &mut Frame, area: Rect) {
    let popup = centered_rect(70, 80, area);
    f.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::accent())
        .title(" Help [Esc]close ")
        .title_style(theme::accent_bold());

    let mut lines: Vec<Line> = Vec::new();

    section(&mut lines, "Global");
    key(&mut lines, "1-4", "Switch tab by number");
    key(&mut lines, "Tab / Shift+Tab", "Cycle tabs forward / back");
    key(&mut lines, "x", "Export table (CSV) and dashboard (JSON)");
    key(&mut lines, "e", "Show failed exports");
    key(&mut lines, "?", "Toggle this help");
    key(&mut lines, "q", "Quit");
    lines.push(Line::from(""));

    section(&mut lines, "Filters (sidebar)");
    key(&mut lines, "j / k", "Move cursor down / up");
    key(&mut lines, "h / l", "Move the focused year back / forward");
    key(&mut lines, "Space", "Toggle entity under cursor");
    key(&mut lines, "a", "Select all entities");
    key(&mut lines, "d", "Deselect all entities");
    key(&mut lines, "r", "Reset to full range and default entities");
    lines.push(Line::from(""));

    section(&mut lines, "Raw Data");
    key(&mut lines, "PgUp / PgDn", "Scroll table");
    key(&mut lines, "Home / End", "Jump to first / last row");
    lines.push(Line::from(""));

    section(&mut lines, "Metrics");
    key(&mut lines, "CNCI", "Citation impact vs world average (1.0)");
    key(&mut lines, "Avg CNCI", "Sum of CNCI x documents over sum of documents");
    key(&mut lines, "% Elite", "Share of documents in the global top 1%");

    f.render_widget(Paragraph::new(lines).block(block), popup);
}

/// Failed exports, newest first, one row each.
pub fn render_error_history(f: &mut Frame, area: Rect, app: &AppState) {
    let popup = centered_rect(80, 70, area);
    f.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::negative())
        .title(format!(
            " Failed Exports ({}) [Esc]close [j/k]scroll ",
            app.error_history.len()
        ))
        .title_style(theme::negative());

    if app.error_history.is_empty() {
        let text = Paragraph::new(Span::styled("No failed exports.", theme::muted())).block(block);
        f.render_widget(text, popup);
        return;
    }

    let header = Row::new(
        ["Time", "Years", "Entities", "Directory", "Error"]
            .map(|h| Cell::from(h).style(theme::accent_bold())),
    );
    let rows = app
        .error_history
        .iter()
        .enumerate()
        .skip(app.error_scroll)
        .map(|(i, failure)| {
            let style = if i == app.error_scroll {
                theme::negative().add_modifier(Modifier::BOLD)
            } else {
                theme::muted()
            };
            Row::new(vec![
                Cell::from(failure.timestamp.format("%H:%M:%S").to_string()),
                Cell::from(format!("{}-{}", failure.years.lo, failure.years.hi)),
                Cell::from(failure.entity_count.to_string()),
                Cell::from(failure.export_dir.display().to_string()),
                Cell::from(failure.message.clone()),
            ])
            .style(style)
        });

    let widths = [
        Constraint::Length(8),
        Constraint::Length(9),
        Constraint::Length(8),
        Constraint::Percentage(30),
        Constraint::Min(20),
    ];
    let table = Table::new(rows, widths).header(header).block(block);
    f.render_widget(table, popup);
}

fn section(lines: &mut Vec<Line<'_>>, title: &str) {
    lines.push(Line::from(Span::styled(title.to_string(), theme::accent_bold())));
}

fn key(lines: &mut Vec<Line<'_>>, keys: &str, desc: &str) {
    lines.push(Line::from(vec![
        Span::styled(format!("  {:>16}  ", keys), theme::accent()),
        Span::styled(desc.to_string(), theme::muted()),
    ]));
}
