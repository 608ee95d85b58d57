//! Declarative chart specifications.
//!
//! Charts are plain serializable data built from aggregate rows. Renderers
//! (the terminal UI, or anything reading the JSON export) draw them; nothing
//! here touches the rows it was built from.

use impact_core::AggregateRow;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineSeries {
    pub name: String,
    pub points: Vec<Point>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineChart {
    pub title: String,
    pub x_title: String,
    pub y_title: String,
    pub markers: bool,
    pub series: Vec<LineSeries>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bubble {
    pub entity: String,
    pub x: f64,
    pub y: f64,
    pub size: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    /// Constant x.
    Vertical,
    /// Constant y.
    Horizontal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceLine {
    pub orientation: Orientation,
    pub value: f64,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BubbleChart {
    pub title: String,
    pub x_title: String,
    pub y_title: String,
    pub bubbles: Vec<Bubble>,
    pub reference_lines: Vec<ReferenceLine>,
}

impl BubbleChart {
    pub fn reference(&self, orientation: Orientation) -> Option<&ReferenceLine> {
        self.reference_lines
            .iter()
            .find(|l| l.orientation == orientation)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    pub label: String,
    pub value: f64,
    /// Position on the continuous colour scale, in [0, 1].
    pub color_scale: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarChart {
    pub title: String,
    pub x_title: String,
    pub y_title: String,
    pub bars: Vec<Bar>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ChartSpec {
    Line(LineChart),
    Bubble(BubbleChart),
    Bar(BarChart),
}

impl ChartSpec {
    pub fn title(&self) -> &str {
        match self {
            ChartSpec::Line(c) => &c.title,
            ChartSpec::Bubble(c) => &c.title,
            ChartSpec::Bar(c) => &c.title,
        }
    }
}

// ─── Builders ───────────────────────────────────────────────────────

/// Documents over year, one series per entity. Expects (entity, year) rows.
pub fn volume_trend(entity_year: &[AggregateRow]) -> LineChart {
    LineChart {
        title: "Growth in Research Volume".into(),
        x_title: "Year".into(),
        y_title: "Documents".into(),
        markers: true,
        series: series_by_entity(entity_year, |r| Some(r.documents)),
    }
}

/// Average CNCI over year, one series per entity. Zero-document years have no
/// defined CNCI and are left out of the series rather than drawn at zero.
pub fn impact_trend(entity_year: &[AggregateRow]) -> LineChart {
    LineChart {
        title: "Evolution of Citation Impact (CNCI)".into(),
        x_title: "Year".into(),
        y_title: "Category Normalized Citation Impact".into(),
        markers: true,
        series: series_by_entity(entity_year, |r| r.has_documents().then_some(r.avg_cnci)),
    }
}

/// Total documents vs overall CNCI per entity, sized by elite documents, with
/// mean reference lines. Expects entity-only rows.
pub fn impact_matrix(entity_rows: &[AggregateRow]) -> BubbleChart {
    let bubbles: Vec<Bubble> = entity_rows
        .iter()
        .map(|r| Bubble {
            entity: r.entity.clone(),
            x: r.documents,
            y: r.avg_cnci,
            size: r.elite_documents as f64,
        })
        .collect();

    let mut reference_lines = Vec::new();
    if let Some(avg_volume) = mean(entity_rows.iter().map(|r| r.documents)) {
        reference_lines.push(ReferenceLine {
            orientation: Orientation::Vertical,
            value: avg_volume,
            label: "Avg Volume".into(),
        });
    }
    let defined_impact = entity_rows
        .iter()
        .filter(|r| r.has_documents())
        .map(|r| r.avg_cnci);
    if let Some(avg_impact) = mean(defined_impact) {
        reference_lines.push(ReferenceLine {
            orientation: Orientation::Horizontal,
            value: avg_impact,
            label: "Avg Impact".into(),
        });
    }

    BubbleChart {
        title: "Impact Matrix (Bubble Size = # of Elite Papers)".into(),
        x_title: "Total Documents".into(),
        y_title: "Avg Citation Impact".into(),
        bubbles,
        reference_lines,
    }
}

/// % elite per entity in the given (ranked) order, with a colour-scale
/// position relative to the displayed range.
pub fn elite_ranking(ranked: &[AggregateRow]) -> BarChart {
    let lo = ranked.iter().map(|r| r.pct_elite).fold(f64::INFINITY, f64::min);
    let hi = ranked
        .iter()
        .map(|r| r.pct_elite)
        .fold(f64::NEG_INFINITY, f64::max);
    let span = hi - lo;

    let bars = ranked
        .iter()
        .map(|r| Bar {
            label: r.entity.clone(),
            value: r.pct_elite,
            color_scale: if span > 0.0 {
                (r.pct_elite - lo) / span
            } else {
                1.0
            },
        })
        .collect();

    BarChart {
        title: "Percentage of Documents in the Global Top 1%".into(),
        x_title: "Country".into(),
        y_title: "% Documents in Top 1%".into(),
        bars,
    }
}

fn series_by_entity<F>(rows: &[AggregateRow], value: F) -> Vec<LineSeries>
where
    F: Fn(&AggregateRow) -> Option<f64>,
{
    let mut series: Vec<LineSeries> = Vec::new();
    for row in rows {
        let Some(year) = row.year else { continue };
        if series.last().map(|s| s.name.as_str()) != Some(row.entity.as_str()) {
            series.push(LineSeries {
                name: row.entity.clone(),
                points: Vec::new(),
            });
        }
        if let (Some(y), Some(current)) = (value(row), series.last_mut()) {
            current.points.push(Point { x: year as f64, y });
        }
    }
    series
}

fn mean<I: Iterator<Item = f64>>(values: I) -> Option<f64> {
    let (sum, n) = values.fold((0.0, 0usize), |(s, n), v| (s + v, n + 1));
    (n > 0).then(|| sum / n as f64)
}
