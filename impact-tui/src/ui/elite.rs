//! Tab 3 — Elite: entities ranked by share of documents in the global top 1%.

use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Bar, BarChart, BarGroup, Block};
use ratatui::Frame;

use crate::app::AppState;
use crate::theme;

/// Bars carry integer heights; percentages are scaled by this before rounding.
const VALUE_SCALE: f64 = 100.0;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let chart = &app.view.elite_ranking;

    let bars: Vec<Bar> = chart
        .bars
        .iter()
        .map(|b| {
            let color = theme::viridis(b.color_scale);
            Bar::default()
                .value(bar_height(b.value))
                .text_value(format!("{:.2}", b.value))
                .label(Line::from(b.label.clone()))
                .style(Style::default().fg(color))
                .value_style(Style::default().fg(Color::Black).bg(color))
        })
        .collect();

    let block = Block::default()
        .title(Span::styled(format!(" {} ", chart.title), theme::accent_bold()))
        .title_bottom(Line::from(Span::styled(
            format!(" {} by {} ", chart.y_title, chart.x_title),
            theme::muted(),
        )));

    let widget = BarChart::default()
        .block(block)
        .data(BarGroup::default().bars(&bars))
        .bar_width(bar_width(area.width, bars.len()))
        .bar_gap(1);

    f.render_widget(widget, area);
}

pub(crate) fn bar_height(pct: f64) -> u64 {
    if pct.is_finite() && pct > 0.0 {
        (pct * VALUE_SCALE).round() as u64
    } else {
        0
    }
}

/// Spread the bars across the width, between 3 and 12 cells each.
pub(crate) fn bar_width(width: u16, bars: usize) -> u16 {
    let n = bars.max(1) as u16;
    (width.saturating_sub(n) / n).clamp(3, 12)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn heights_keep_two_decimals() {
        assert_eq!(bar_height(4.3333), 433);
        assert_eq!(bar_height(0.0), 0);
        assert_eq!(bar_height(f64::NAN), 0);
    }

    #[test]
    fn widths_are_clamped() {
        assert_eq!(bar_width(200, 2), 12);
        assert_eq!(bar_width(20, 50), 3);
        assert_eq!(bar_width(60, 5), 11);
    }
}
