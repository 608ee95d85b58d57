//! The render pipeline: Filter → Aggregator → Presenter.
//!
//! `DashboardView::build` is a pure function of (dataset, filter state). The
//! UI calls it again after every filter change; nothing is carried over from
//! the previous view.

use impact_core::aggregate::{by_entity, by_entity_year, elite_leadership};
use impact_core::{AggregateRow, Dataset, FilterState};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::charts::{self, BarChart, BubbleChart, ChartSpec, LineChart};
use crate::summary::SummaryMetrics;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardView {
    pub filter: FilterState,
    pub dataset_fingerprint: String,
    pub summary: SummaryMetrics,
    pub volume_trend: LineChart,
    pub impact_trend: LineChart,
    pub impact_matrix: BubbleChart,
    pub elite_ranking: BarChart,
    /// Raw (entity, year) aggregates, ordered by entity then year.
    pub table: Vec<AggregateRow>,
}

impl DashboardView {
    pub fn build(dataset: &Dataset, filter: &FilterState) -> Self {
        let rows = filter.apply(dataset.records());

        let table = by_entity_year(rows.iter().copied());
        let per_entity = by_entity(rows.iter().copied());
        let ranked = elite_leadership(rows.iter().copied());

        debug!(
            rows = rows.len(),
            groups = table.len(),
            entities = per_entity.len(),
            "view rebuilt"
        );

        Self {
            filter: filter.clone(),
            dataset_fingerprint: dataset.fingerprint().to_string(),
            summary: SummaryMetrics::compute(rows.iter().copied()),
            volume_trend: charts::volume_trend(&table),
            impact_trend: charts::impact_trend(&table),
            impact_matrix: charts::impact_matrix(&per_entity),
            elite_ranking: charts::elite_ranking(&ranked),
            table,
        }
    }

    /// True when the filter selected no rows.
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// The four charts in tab order.
    pub fn charts(&self) -> Vec<ChartSpec> {
        vec![
            ChartSpec::Line(self.volume_trend.clone()),
            ChartSpec::Line(self.impact_trend.clone()),
            ChartSpec::Bubble(self.impact_matrix.clone()),
            ChartSpec::Bar(self.elite_ranking.clone()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use impact_core::{Record, YearRange};

    fn dataset() -> Dataset {
        Dataset::from_records(
            vec![
                Record::new("US", 2020, 100.0, 500.0, 1.2, 5),
                Record::new("US", 2021, 200.0, 900.0, 0.9, 8),
                Record::new("China", 2021, 500.0, 1600.0, 0.95, 6),
            ],
            "mem.csv",
            "f00d",
        )
        .unwrap()
    }

    #[test]
    fn build_runs_the_whole_pipeline() {
        let ds = dataset();
        let filter = FilterState::new(YearRange::new(2020, 2021), ["US"]);
        let view = DashboardView::build(&ds, &filter);

        assert_eq!(view.summary.total_documents, 300.0);
        assert_eq!(view.summary.top_producer.as_deref(), Some("US"));
        assert_eq!(view.table.len(), 2);
        assert_eq!(view.volume_trend.series.len(), 1);
        assert_eq!(view.impact_matrix.bubbles.len(), 1);
        assert_eq!(view.elite_ranking.bars.len(), 1);
        assert!((view.elite_ranking.bars[0].value - 13.0 / 3.0).abs() < 1e-9);
        assert_eq!(view.dataset_fingerprint, "f00d");
    }

    #[test]
    fn empty_selection_builds_an_empty_view() {
        let ds = dataset();
        let filter = FilterState::new(YearRange::new(2020, 2021), Vec::<String>::new());
        let view = DashboardView::build(&ds, &filter);

        assert!(view.is_empty());
        assert_eq!(view.summary.total_documents, 0.0);
        assert_eq!(view.summary.top_producer_label(), "N/A");
        assert!(view.volume_trend.series.is_empty());
        assert!(view.impact_matrix.reference_lines.is_empty());
        assert!(view.elite_ranking.bars.is_empty());
        assert_eq!(view.charts().len(), 4);
    }

    #[test]
    fn rebuild_is_deterministic() {
        let ds = dataset();
        let filter = FilterState::initial(&ds, 5);
        assert_eq!(
            DashboardView::build(&ds, &filter),
            DashboardView::build(&ds, &filter)
        );
    }
}
