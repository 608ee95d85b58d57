//! The four headline indicators.

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::app::AppState;
use crate::theme;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let s = &app.view.summary;
    let cards = [
        ("Total Documents", s.total_documents_label()),
        ("Avg Impact (CNCI)", s.avg_impact_label()),
        ("Top Producer", s.top_producer_label().to_string()),
        ("Active Countries", s.active_entities.to_string()),
    ];

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 4); 4])
        .split(area);

    for ((label, value), chunk) in cards.into_iter().zip(chunks.iter()) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(theme::muted())
            .title(Span::styled(format!(" {label} "), theme::muted()));
        let para = Paragraph::new(Line::from(Span::styled(value, theme::value()))).block(block);
        f.render_widget(para, *chunk);
    }
}
