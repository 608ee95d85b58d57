//! End-to-end: config → cached load → filter → view → export.

use std::io::Write;
use std::path::{Path, PathBuf};

use impact_core::{FilterState, YearRange};
use impact_report::{
    export_table_csv, export_view_json, import_view_json, save_export, ChartSpec, DashboardConfig, DashboardView,
    Orientation, NOT_AVAILABLE,
};

const CSV: &str = "\
Name,year,Web of Science Documents,Times Cited,Category Normalized Citation Impact,Documents in Top 1%
US,2020,100,500,1.2,5
US,2021,200,900,0.9,8
China,2020,400,1200,0.8,3
China,2021,500,1600,0.95,6
Germany,2020,150,700,1.1,2
";

fn write_fixture(dir: &tempfile::TempDir) -> PathBuf {
    let path = dir.path().join("pubs.csv");
    let mut f = std::fs::File::create(&path).unwrap();
    f.write_all(CSV.as_bytes()).unwrap();
    path
}

fn config_for(path: PathBuf) -> DashboardConfig {
    DashboardConfig {
        data_path: path,
        ..DashboardConfig::default()
    }
}

#[test]
fn initial_view_selects_every_entity_of_a_small_table() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_for(write_fixture(&dir));
    let ds = config.dataset_cache().get_or_load().unwrap();

    let filter = FilterState::initial(&ds, config.default_entity_count);
    assert_eq!(filter.years, YearRange::new(2020, 2021));
    assert_eq!(filter.entities.len(), 3);

    let view = DashboardView::build(&ds, &filter);
    assert_eq!(view.summary.total_documents, 1350.0);
    assert_eq!(view.summary.top_producer.as_deref(), Some("China"));
    assert_eq!(view.summary.active_entities, 3);
    assert_eq!(view.summary.total_documents_label(), "1,350");
}

#[test]
fn us_worked_example_through_the_view() {
    let dir = tempfile::tempdir().unwrap();
    let ds = config_for(write_fixture(&dir))
        .dataset_cache()
        .get_or_load()
        .unwrap();

    let view = DashboardView::build(&ds, &FilterState::new(YearRange::new(2020, 2021), ["US"]));
    assert_eq!(view.summary.total_documents, 300.0);
    assert!((view.summary.avg_impact - 1.0).abs() < 1e-9);
    assert_eq!(view.summary.avg_impact_label(), "1.00");

    let bar = &view.elite_ranking.bars[0];
    assert_eq!(bar.label, "US");
    assert!((bar.value - 13.0 / 300.0 * 100.0).abs() < 1e-9);

    let bubble = &view.impact_matrix.bubbles[0];
    assert_eq!((bubble.x, bubble.size), (300.0, 13.0));
}

#[test]
fn empty_entity_selection_shows_placeholders() {
    let dir = tempfile::tempdir().unwrap();
    let ds = config_for(write_fixture(&dir))
        .dataset_cache()
        .get_or_load()
        .unwrap();

    let filter = FilterState::new(ds.year_bounds(), Vec::<String>::new());
    let view = DashboardView::build(&ds, &filter);

    assert!(view.is_empty());
    assert_eq!(view.summary.total_documents_label(), "0");
    assert_eq!(view.summary.avg_impact_label(), "0.00");
    assert_eq!(view.summary.top_producer_label(), NOT_AVAILABLE);
    assert_eq!(view.summary.active_entities, 0);
    assert!(view.summary.total_documents.is_sign_positive());

    let json = export_view_json(&view, Path::new("publications.csv")).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
    let total = &parsed["view"]["summary"]["total_documents"];
    assert_eq!(total.to_string(), "0.0");

    for chart in view.charts() {
        match chart {
            ChartSpec::Line(c) => assert!(c.series.is_empty()),
            ChartSpec::Bubble(c) => assert!(c.bubbles.is_empty()),
            ChartSpec::Bar(c) => assert!(c.bars.is_empty()),
        }
    }
}

#[test]
fn narrowing_the_year_range_drops_rows() {
    let dir = tempfile::tempdir().unwrap();
    let ds = config_for(write_fixture(&dir))
        .dataset_cache()
        .get_or_load()
        .unwrap();

    let filter = FilterState::new(YearRange::new(2021, 2021), ["US", "China", "Germany"]);
    let view = DashboardView::build(&ds, &filter);

    // Germany has no 2021 row.
    assert_eq!(view.summary.active_entities, 2);
    assert_eq!(view.table.len(), 2);
    assert!(view.table.iter().all(|r| r.year == Some(2021)));
}

#[test]
fn elite_bars_are_ranked_descending() {
    let dir = tempfile::tempdir().unwrap();
    let ds = config_for(write_fixture(&dir))
        .dataset_cache()
        .get_or_load()
        .unwrap();

    let view = DashboardView::build(&ds, &FilterState::initial(&ds, 10));
    let labels: Vec<&str> = view.elite_ranking.bars.iter().map(|b| b.label.as_str()).collect();
    // US 4.33%, China 1.00%, Germany 1.33%
    assert_eq!(labels, vec!["US", "Germany", "China"]);

    let h = view.impact_matrix.reference(Orientation::Horizontal).unwrap();
    assert_eq!(h.label, "Avg Impact");
}

#[test]
fn export_bundle_round_trips() {
    let dir = tempfile::tempdir().unwrap();
    let data_path = write_fixture(&dir);
    let ds = config_for(data_path.clone())
        .dataset_cache()
        .get_or_load()
        .unwrap();
    let view = DashboardView::build(&ds, &FilterState::initial(&ds, 5));

    let out = save_export(&view, &data_path, dir.path()).unwrap();
    let json = std::fs::read_to_string(out.join("dashboard.json")).unwrap();
    let snapshot = import_view_json(&json).unwrap();
    assert_eq!(snapshot.data_path, data_path);
    assert_eq!(snapshot.view.filter, view.filter);
    assert_eq!(snapshot.view.dataset_fingerprint, ds.fingerprint());

    let csv = std::fs::read_to_string(out.join("aggregates.csv")).unwrap();
    assert_eq!(csv, export_table_csv(&view.table).unwrap());
}
