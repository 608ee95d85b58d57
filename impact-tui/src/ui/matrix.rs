//! Tab 2 — Impact Matrix: volume vs impact per entity with mean reference lines.
//!
//! Terminals have no bubble sizes, so the elite-document count picks the
//! marker (dot, bar, block) and is repeated in the legend.

use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::symbols::Marker;
use ratatui::text::Span;
use ratatui::widgets::{Axis, Block, Chart, Dataset, GraphType};
use ratatui::Frame;

use impact_report::Orientation;

use crate::app::AppState;
use crate::theme;
use crate::ui::padded_bounds;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let chart = &app.view.impact_matrix;

    let xs = chart
        .bubbles
        .iter()
        .map(|b| b.x)
        .chain(chart.reference(Orientation::Vertical).map(|l| l.value));
    let ys = chart
        .bubbles
        .iter()
        .map(|b| b.y)
        .chain(chart.reference(Orientation::Horizontal).map(|l| l.value));
    let x_bounds = padded_bounds(
        xs.clone().fold(f64::INFINITY, f64::min),
        xs.fold(f64::NEG_INFINITY, f64::max),
    );
    let y_bounds = padded_bounds(
        ys.clone().fold(f64::INFINITY, f64::min),
        ys.fold(f64::NEG_INFINITY, f64::max),
    );

    let max_size = chart.bubbles.iter().map(|b| b.size).fold(0.0, f64::max);
    let points: Vec<[(f64, f64); 1]> = chart.bubbles.iter().map(|b| [(b.x, b.y)]).collect();
    let lines: Vec<[(f64, f64); 2]> = chart
        .reference_lines
        .iter()
        .map(|l| match l.orientation {
            Orientation::Vertical => [(l.value, y_bounds[0]), (l.value, y_bounds[1])],
            Orientation::Horizontal => [(x_bounds[0], l.value), (x_bounds[1], l.value)],
        })
        .collect();

    let mut datasets = Vec::with_capacity(points.len() + lines.len());
    for (line, data) in chart.reference_lines.iter().zip(&lines) {
        datasets.push(
            Dataset::default()
                .name(format!("{} {:.2}", line.label, line.value))
                .marker(Marker::Braille)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(theme::NEUTRAL))
                .data(data),
        );
    }
    for (i, (bubble, data)) in chart.bubbles.iter().zip(&points).enumerate() {
        datasets.push(
            Dataset::default()
                .name(format!("{} ({:.0})", bubble.entity, bubble.size))
                .marker(bubble_marker(bubble.size, max_size))
                .graph_type(GraphType::Scatter)
                .style(Style::default().fg(theme::series_color(i)))
                .data(data),
        );
    }

    let widget = Chart::new(datasets)
        .block(Block::default().title(Span::styled(
            format!(" {} ", chart.title),
            theme::accent_bold(),
        )))
        .x_axis(
            Axis::default()
                .title(Span::styled(chart.x_title.as_str(), theme::muted()))
                .style(theme::muted())
                .bounds(x_bounds)
                .labels(vec![
                    Span::styled(format!("{:.0}", x_bounds[0].max(0.0)), theme::muted()),
                    Span::styled(format!("{:.0}", x_bounds[1]), theme::muted()),
                ]),
        )
        .y_axis(
            Axis::default()
                .title(Span::styled(chart.y_title.as_str(), theme::muted()))
                .style(theme::muted())
                .bounds(y_bounds)
                .labels(vec![
                    Span::styled(format!("{:.2}", y_bounds[0]), theme::muted()),
                    Span::styled(format!("{:.2}", y_bounds[1]), theme::muted()),
                ]),
        );

    f.render_widget(widget, area);
}

/// Marker for a bubble of `size` relative to the largest on screen.
pub(crate) fn bubble_marker(size: f64, max_size: f64) -> Marker {
    if max_size <= 0.0 {
        return Marker::Dot;
    }
    let ratio = size / max_size;
    if ratio >= 2.0 / 3.0 {
        Marker::Block
    } else if ratio >= 1.0 / 3.0 {
        Marker::Bar
    } else {
        Marker::Dot
    }
}
