//! Top-level UI layout — sidebar, indicators, tab bar, active tab, status bar.

pub mod elite;
pub mod matrix;
pub mod metrics;
pub mod overlays;
pub mod sidebar;
pub mod status_bar;
pub mod table;
pub mod trends;

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Tabs};
use ratatui::Frame;

use crate::app::{AppState, Overlay, Tab};
use crate::theme;

const SIDEBAR_WIDTH: u16 = 30;

/// Draw the entire UI.
pub fn draw(f: &mut Frame, app: &AppState) {
    // Split: main area + 1-line status bar.
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1)])
        .split(f.area());
    let main_area = chunks[0];
    let status_area = chunks[1];

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(20)])
        .split(main_area);

    sidebar::render(f, columns[0], app);

    let content = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),
            Constraint::Length(1),
            Constraint::Min(5),
        ])
        .split(columns[1]);

    metrics::render(f, content[0], app);
    draw_tab_bar(f, content[1], app);
    draw_tab(f, content[2], app);

    status_bar::render(f, status_area, app);

    // Overlays on top.
    match app.overlay {
        Overlay::Help => overlays::render_help(f, main_area),
        Overlay::ErrorHistory => overlays::render_error_history(f, main_area, app),
        Overlay::None => {}
    }
}

fn draw_tab_bar(f: &mut Frame, area: Rect, app: &AppState) {
    let titles: Vec<Line> = Tab::ALL
        .iter()
        .map(|t| Line::from(format!("{} {}", t.index() + 1, t.label())))
        .collect();
    let tabs = Tabs::new(titles)
        .select(app.active_tab.index())
        .style(theme::muted())
        .highlight_style(theme::accent_bold())
        .divider(Span::styled("|", theme::muted()));
    f.render_widget(tabs, area);
}

/// Draw the active tab inside its border.
fn draw_tab(f: &mut Frame, area: Rect, app: &AppState) {
    let tab = app.active_tab;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::panel_border(true))
        .title(format!(" {} [{}] ", tab.label(), tab.index() + 1))
        .title_style(theme::panel_title(true));

    let inner = block.inner(area);
    f.render_widget(block, area);

    if app.view.is_empty() {
        render_empty(f, inner);
        return;
    }

    match tab {
        Tab::Trends => trends::render(f, inner, app),
        Tab::ImpactMatrix => matrix::render(f, inner, app),
        Tab::Elite => elite::render(f, inner, app),
        Tab::RawData => table::render(f, inner, app),
    }
}

fn render_empty(f: &mut Frame, area: Rect) {
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "No rows match the current filter.",
            theme::warning(),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Select entities in the sidebar with Space (or [a] for all) and check the year range.",
            theme::muted(),
        )),
    ];
    f.render_widget(Paragraph::new(lines), area);
}

/// Axis bounds with 5% padding; a degenerate range is widened to width 2.
pub(crate) fn padded_bounds(lo: f64, hi: f64) -> [f64; 2] {
    if !lo.is_finite() || !hi.is_finite() {
        return [0.0, 1.0];
    }
    if (hi - lo).abs() < f64::EPSILON {
        return [lo - 1.0, hi + 1.0];
    }
    let padding = (hi - lo) * 0.05;
    [lo - padding, hi + padding]
}

/// Compute a centered rect for overlays.
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
