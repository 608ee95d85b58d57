//! Bottom status bar — key hints, dataset fingerprint, last status message.

use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::app::{AppState, StatusLevel};
use crate::theme;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let mut spans: Vec<Span> = Vec::new();

    spans.push(Span::styled(" 1-4:Tabs x:Export ?:Help q:Quit", theme::muted()));
    spans.push(Span::raw(" | "));

    let short_hash: String = app.dataset.fingerprint().chars().take(8).collect();
    spans.push(Span::styled(
        format!("{} rows #{short_hash}", app.dataset.len()),
        theme::neutral(),
    ));
    spans.push(Span::raw(" | "));

    if let Some((msg, level)) = &app.status_message {
        let style = match level {
            StatusLevel::Info => theme::accent(),
            StatusLevel::Warning => theme::warning(),
            StatusLevel::Error => theme::negative(),
        };
        spans.push(Span::styled(msg.as_str(), style));
    }

    f.render_widget(Paragraph::new(Line::from(spans)), area);
}
