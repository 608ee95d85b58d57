//! Export — CSV aggregate table and JSON dashboard snapshot.
//!
//! - **CSV**: the raw (entity, year) aggregate table for spreadsheets
//! - **JSON**: the full view (filter, summary, chart specs, table) with a
//!   `schema_version`; unknown versions are rejected on import

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use chrono::{DateTime, Utc};
use impact_core::AggregateRow;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::view::DashboardView;

pub const SCHEMA_VERSION: u32 = 1;

/// A dashboard snapshot as written to `dashboard.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewExport {
    pub schema_version: u32,
    pub generated_at: DateTime<Utc>,
    pub data_path: PathBuf,
    pub view: DashboardView,
}

// ─── CSV export ─────────────────────────────────────────────────────

/// Export aggregate rows as CSV.
///
/// Columns: entity, year, documents, citations, weighted_cnci,
/// elite_documents, avg_cnci, pct_elite. `year` is empty for entity-only rows.
pub fn export_table_csv(rows: &[AggregateRow]) -> Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record([
        "entity",
        "year",
        "documents",
        "citations",
        "weighted_cnci",
        "elite_documents",
        "avg_cnci",
        "pct_elite",
    ])?;

    for r in rows {
        let record = [
            r.entity.clone(),
            r.year.map(|y| y.to_string()).unwrap_or_default(),
            format!("{:.0}", r.documents),
            format!("{:.0}", r.citations),
            format!("{:.4}", r.weighted_cnci),
            r.elite_documents.to_string(),
            format!("{:.4}", r.avg_cnci),
            format!("{:.4}", r.pct_elite),
        ];
        wtr.write_record(&record)?;
    }

    let data = wtr.into_inner().context("failed to flush CSV writer")?;
    String::from_utf8(data).context("CSV output is not valid UTF-8")
}

// ─── JSON export ────────────────────────────────────────────────────

pub fn export_view_json(view: &DashboardView, data_path: &Path) -> Result<String> {
    let snapshot = ViewExport {
        schema_version: SCHEMA_VERSION,
        generated_at: Utc::now(),
        data_path: data_path.to_path_buf(),
        view: view.clone(),
    };
    serde_json::to_string_pretty(&snapshot).context("failed to serialize dashboard view to JSON")
}

/// Parse a snapshot, rejecting schema versions newer than this build.
pub fn import_view_json(json: &str) -> Result<ViewExport> {
    let snapshot: ViewExport =
        serde_json::from_str(json).context("failed to deserialize dashboard snapshot")?;
    if snapshot.schema_version > SCHEMA_VERSION {
        bail!(
            "unsupported schema version {} (max supported: {})",
            snapshot.schema_version,
            SCHEMA_VERSION
        );
    }
    Ok(snapshot)
}

// ─── Export bundle ──────────────────────────────────────────────────

/// Write `aggregates.csv` and `dashboard.json` into a new
/// `dashboard_{timestamp}/` directory under `output_dir`.
///
/// Returns the path to the created directory.
pub fn save_export(view: &DashboardView, data_path: &Path, output_dir: &Path) -> Result<PathBuf> {
    let dirname = format!("dashboard_{}", chrono::Local::now().format("%Y%m%d_%H%M%S"));
    let export_dir = output_dir.join(dirname);
    std::fs::create_dir_all(&export_dir)
        .with_context(|| format!("failed to create {}", export_dir.display()))?;

    let csv = export_table_csv(&view.table)?;
    std::fs::write(export_dir.join("aggregates.csv"), csv).context("failed to write aggregates.csv")?;

    let json = export_view_json(view, data_path)?;
    std::fs::write(export_dir.join("dashboard.json"), json)
        .context("failed to write dashboard.json")?;

    info!(dir = %export_dir.display(), rows = view.table.len(), "export written");
    Ok(export_dir)
}
