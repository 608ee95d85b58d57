//! Property tests over `DashboardView::build`.

use std::collections::BTreeSet;

use proptest::prelude::*;

use impact_core::{Dataset, FilterState, Record, YearRange};
use impact_report::{DashboardView, Orientation};

const NAMES: [&str; 5] = ["Brazil", "China", "India", "Japan", "US"];

// ─── Strategies (proptest) ──────────────────────────────────────────

fn record() -> impl Strategy<Value = Record> {
    (0..NAMES.len(), 2015..2021i32, 0u32..5_000, 0u32..50_000, 0.0..3.0f64, 0u64..50).prop_map(
        |(e, year, docs, cites, cnci, elite)| {
            let docs = docs as f64;
            Record::new(NAMES[e], year, docs, cites as f64, cnci, elite.min(docs as u64))
        },
    )
}

fn dataset() -> impl Strategy<Value = Dataset> {
    prop::collection::vec(record(), 1..60)
        .prop_map(|rows| Dataset::from_records(rows, "prop.csv", "p").unwrap())
}

fn filter() -> impl Strategy<Value = FilterState> {
    (
        2014..2022i32,
        2014..2022i32,
        prop::collection::btree_set(0..NAMES.len(), 0..=NAMES.len()),
    )
        .prop_map(|(lo, hi, picked)| {
            FilterState::new(YearRange::new(lo, hi), picked.into_iter().map(|i| NAMES[i]))
        })
}

proptest! {
    #[test]
    fn summary_agrees_with_table(ds in dataset(), f in filter()) {
        let view = DashboardView::build(&ds, &f);

        let table_docs: f64 = view.table.iter().map(|r| r.documents).sum();
        prop_assert!((view.summary.total_documents - table_docs).abs() < 1e-6);

        let active: BTreeSet<&str> = view.table.iter().map(|r| r.entity.as_str()).collect();
        prop_assert_eq!(view.summary.active_entities, active.len());
        prop_assert_eq!(view.impact_matrix.bubbles.len(), active.len());
        prop_assert_eq!(view.elite_ranking.bars.len(), active.len());

        if let Some(top) = &view.summary.top_producer {
            prop_assert!(active.contains(top.as_str()));
        } else {
            prop_assert!(view.is_empty());
        }
    }

    #[test]
    fn elite_bars_are_sorted_and_scaled(ds in dataset(), f in filter()) {
        let view = DashboardView::build(&ds, &f);
        let bars = &view.elite_ranking.bars;
        for pair in bars.windows(2) {
            prop_assert!(pair[0].value >= pair[1].value);
            if pair[0].value == pair[1].value {
                prop_assert!(pair[0].label < pair[1].label);
            }
        }
        for bar in bars {
            prop_assert!((0.0..=1.0).contains(&bar.color_scale));
            prop_assert!((0.0..=100.0).contains(&bar.value));
        }
    }

    #[test]
    fn reference_lines_exist_iff_entities_do(ds in dataset(), f in filter()) {
        let view = DashboardView::build(&ds, &f);
        let matrix = &view.impact_matrix;
        prop_assert_eq!(
            matrix.reference(Orientation::Vertical).is_some(),
            !matrix.bubbles.is_empty()
        );
        if let Some(v) = matrix.reference(Orientation::Vertical) {
            let lo = matrix.bubbles.iter().map(|b| b.x).fold(f64::INFINITY, f64::min);
            let hi = matrix.bubbles.iter().map(|b| b.x).fold(f64::NEG_INFINITY, f64::max);
            prop_assert!(lo - 1e-9 <= v.value && v.value <= hi + 1e-9);
        }
    }

    #[test]
    fn impact_is_a_weighted_mean_of_row_cnci(ds in dataset(), f in filter()) {
        let view = DashboardView::build(&ds, &f);
        let rows = f.apply(ds.records());
        let with_docs: Vec<f64> = rows.iter().filter(|r| r.documents > 0.0).map(|r| r.cnci).collect();
        if with_docs.is_empty() {
            prop_assert_eq!(view.summary.avg_impact, 0.0);
        } else {
            let lo = with_docs.iter().copied().fold(f64::INFINITY, f64::min);
            let hi = with_docs.iter().copied().fold(f64::NEG_INFINITY, f64::max);
            prop_assert!(lo - 1e-9 <= view.summary.avg_impact);
            prop_assert!(view.summary.avg_impact <= hi + 1e-9);
        }
    }
}
