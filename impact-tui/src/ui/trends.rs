//! Tab 1 — Trends: research volume and citation impact over time.

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::Style;
use ratatui::symbols;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Axis, Block, Chart, Dataset, GraphType, Paragraph};
use ratatui::Frame;

use impact_report::LineChart;

use crate::app::AppState;
use crate::theme;
use crate::ui::padded_bounds;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let halves = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    render_line_chart(f, halves[0], &app.view.volume_trend, |v| format!("{v:.0}"));
    render_line_chart(f, halves[1], &app.view.impact_trend, |v| format!("{v:.2}"));
}

/// One Braille line per series, plus dot markers on the observations when the
/// chart asks for them.
pub fn render_line_chart(f: &mut Frame, area: Rect, chart: &LineChart, fmt_y: fn(f64) -> String) {
    let block = Block::default().title(Span::styled(
        format!(" {} ", chart.title),
        theme::accent_bold(),
    ));

    let data: Vec<Vec<(f64, f64)>> = chart
        .series
        .iter()
        .map(|s| s.points.iter().map(|p| (p.x, p.y)).collect())
        .collect();

    let points = data.iter().flatten();
    let (x_lo, x_hi, y_lo, y_hi) = points.fold(
        (f64::INFINITY, f64::NEG_INFINITY, f64::INFINITY, f64::NEG_INFINITY),
        |(xl, xh, yl, yh), &(x, y)| (xl.min(x), xh.max(x), yl.min(y), yh.max(y)),
    );

    if !x_lo.is_finite() {
        let hint = Paragraph::new(Line::from(Span::styled(
            "No observations in the selected range.",
            theme::muted(),
        )))
        .block(block);
        f.render_widget(hint, area);
        return;
    }

    let mut datasets = Vec::with_capacity(data.len() * 2);
    for (i, (series, points)) in chart.series.iter().zip(&data).enumerate() {
        let style = Style::default().fg(theme::series_color(i));
        datasets.push(
            Dataset::default()
                .name(series.name.clone())
                .marker(symbols::Marker::Braille)
                .graph_type(GraphType::Line)
                .style(style)
                .data(points),
        );
        if chart.markers {
            datasets.push(
                Dataset::default()
                    .marker(symbols::Marker::Dot)
                    .graph_type(GraphType::Scatter)
                    .style(style)
                    .data(points),
            );
        }
    }

    let x_bounds = if x_lo == x_hi {
        [x_lo - 1.0, x_hi + 1.0]
    } else {
        [x_lo, x_hi]
    };
    let y_bounds = padded_bounds(y_lo, y_hi);

    let widget = Chart::new(datasets)
        .block(block)
        .x_axis(
            Axis::default()
                .title(Span::styled(chart.x_title.as_str(), theme::muted()))
                .style(theme::muted())
                .bounds(x_bounds)
                .labels(year_labels(x_bounds)),
        )
        .y_axis(
            Axis::default()
                .title(Span::styled(chart.y_title.as_str(), theme::muted()))
                .style(theme::muted())
                .bounds(y_bounds)
                .labels(vec![
                    Span::styled(fmt_y(y_bounds[0]), theme::muted()),
                    Span::styled(fmt_y((y_bounds[0] + y_bounds[1]) / 2.0), theme::muted()),
                    Span::styled(fmt_y(y_bounds[1]), theme::muted()),
                ]),
        );

    f.render_widget(widget, area);
}

fn year_labels(bounds: [f64; 2]) -> Vec<Span<'static>> {
    let lo = bounds[0].ceil() as i64;
    let hi = bounds[1].floor() as i64;
    let mid = (lo + hi) / 2;
    let mut years = vec![lo, mid, hi];
    years.dedup();
    years
        .into_iter()
        .map(|y| Span::styled(y.to_string(), theme::muted()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn year_labels_are_whole_years() {
        let labels: Vec<String> = year_labels([2015.0, 2021.0])
            .into_iter()
            .map(|s| s.content.into_owned())
            .collect();
        assert_eq!(labels, vec!["2015", "2018", "2021"]);
    }

    #[test]
    fn single_year_collapses_duplicate_labels() {
        let labels = year_labels([2020.0, 2020.0]);
        assert_eq!(labels.len(), 1);
    }
}
