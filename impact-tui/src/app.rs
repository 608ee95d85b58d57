//! Application state — single-owner, main-thread only.
//!
//! The dataset is loaded once before the UI starts and shared read-only. Every
//! filter change rebuilds the whole `DashboardView` from it.

use std::collections::VecDeque;
use std::path::PathBuf;
use std::sync::Arc;

use chrono::NaiveDateTime;
use tracing::{debug, info, warn};

use impact_core::{Dataset, FilterState, YearRange};
use impact_report::{save_export, DashboardConfig, DashboardView};

const ERROR_HISTORY_CAP: usize = 50;

/// Which tab is shown in the main area.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Trends,
    ImpactMatrix,
    Elite,
    RawData,
}

impl Tab {
    pub const ALL: [Tab; 4] = [Tab::Trends, Tab::ImpactMatrix, Tab::Elite, Tab::RawData];

    pub fn index(self) -> usize {
        match self {
            Tab::Trends => 0,
            Tab::ImpactMatrix => 1,
            Tab::Elite => 2,
            Tab::RawData => 3,
        }
    }

    pub fn from_index(i: usize) -> Option<Self> {
        Tab::ALL.get(i).copied()
    }

    pub fn label(self) -> &'static str {
        match self {
            Tab::Trends => "Trends",
            Tab::ImpactMatrix => "Impact Matrix",
            Tab::Elite => "Elite",
            Tab::RawData => "Raw Data",
        }
    }

    pub fn next(self) -> Tab {
        Tab::ALL[(self.index() + 1) % Tab::ALL.len()]
    }

    pub fn prev(self) -> Tab {
        Tab::ALL[(self.index() + Tab::ALL.len() - 1) % Tab::ALL.len()]
    }
}

/// Status message severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Warning,
    Error,
}

/// A failed export, with the filter that was active when it was attempted.
#[derive(Debug, Clone)]
pub struct ExportFailure {
    pub timestamp: NaiveDateTime,
    pub message: String,
    pub export_dir: PathBuf,
    pub years: YearRange,
    pub entity_count: usize,
}

/// Which overlay (if any) is shown on top.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overlay {
    None,
    Help,
    ErrorHistory,
}

/// One row of the sidebar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SidebarItem {
    YearFrom,
    YearTo,
    Entity(String),
}

/// Top-level application state.
pub struct AppState {
    // Navigation
    pub active_tab: Tab,
    pub running: bool,

    // Data
    pub dataset: Arc<Dataset>,
    pub filter: FilterState,
    pub view: DashboardView,
    default_entity_count: usize,

    // Sidebar: row 0 = from, row 1 = to, rows 2.. = entities
    pub sidebar_cursor: usize,
    pub table_scroll: usize,

    // Cross-cutting
    pub status_message: Option<(String, StatusLevel)>,
    pub error_history: VecDeque<ExportFailure>,
    pub error_scroll: usize,
    pub overlay: Overlay,

    pub export_dir: PathBuf,
}

impl AppState {
    pub fn new(dataset: Arc<Dataset>, config: &DashboardConfig) -> Self {
        let filter = FilterState::initial(&dataset, config.default_entity_count);
        let view = DashboardView::build(&dataset, &filter);
        Self {
            active_tab: Tab::Trends,
            running: true,
            dataset,
            filter,
            view,
            default_entity_count: config.default_entity_count,
            sidebar_cursor: 0,
            table_scroll: 0,
            status_message: None,
            error_history: VecDeque::with_capacity(ERROR_HISTORY_CAP),
            error_scroll: 0,
            overlay: Overlay::None,
            export_dir: config.export_dir.clone(),
        }
    }

    /// Re-run filter → aggregate → present for the current filter state.
    pub fn refresh(&mut self) {
        self.view = DashboardView::build(&self.dataset, &self.filter);
        self.table_scroll = self
            .table_scroll
            .min(self.view.table.len().saturating_sub(1));
        debug!(
            lo = self.filter.years.lo,
            hi = self.filter.years.hi,
            entities = self.filter.entities.len(),
            "filter changed"
        );
    }

    // ── Sidebar ──────────────────────────────────────────────────────

    pub fn sidebar_row_count(&self) -> usize {
        2 + self.dataset.entities().len()
    }

    pub fn cursor_item(&self) -> Option<SidebarItem> {
        match self.sidebar_cursor {
            0 => Some(SidebarItem::YearFrom),
            1 => Some(SidebarItem::YearTo),
            n => self
                .dataset
                .entities()
                .get(n - 2)
                .map(|e| SidebarItem::Entity(e.clone())),
        }
    }

    /// Move the start year by `delta`, staying within the data and at or
    /// below the end year.
    pub fn shift_year_from(&mut self, delta: i32) {
        let bounds = self.dataset.year_bounds();
        let years = &mut self.filter.years;
        let lo = (years.lo + delta).clamp(bounds.lo, years.hi);
        if lo != years.lo {
            years.lo = lo;
            self.refresh();
        }
    }

    /// Move the end year by `delta`, staying within the data and at or
    /// above the start year.
    pub fn shift_year_to(&mut self, delta: i32) {
        let bounds = self.dataset.year_bounds();
        let years = &mut self.filter.years;
        let hi = (years.hi + delta).clamp(years.lo, bounds.hi);
        if hi != years.hi {
            years.hi = hi;
            self.refresh();
        }
    }

    pub fn toggle_entity(&mut self, entity: &str) {
        let selected = self.filter.toggle_entity(entity);
        self.refresh();
        if selected {
            self.set_status(format!("Added {entity}"));
        } else {
            self.set_status(format!("Removed {entity}"));
        }
    }

    pub fn select_all(&mut self) {
        self.filter.entities = self.dataset.entities().iter().cloned().collect();
        self.refresh();
        self.set_status(format!("Selected all {} entities", self.filter.entities.len()));
    }

    pub fn clear_selection(&mut self) {
        self.filter.entities.clear();
        self.refresh();
        self.set_warning("Selection cleared: nothing to show");
    }

    /// Back to the start-up filter: full range, first N entities.
    pub fn reset_filter(&mut self) {
        self.filter = FilterState::initial(&self.dataset, self.default_entity_count);
        self.refresh();
        self.set_status("Filter reset");
    }

    // ── Export ───────────────────────────────────────────────────────

    pub fn export(&mut self) {
        if self.view.is_empty() {
            self.set_warning("Nothing to export: the selection is empty");
            return;
        }
        match save_export(&self.view, self.dataset.source(), &self.export_dir) {
            Ok(dir) => {
                info!(dir = %dir.display(), "dashboard exported");
                self.set_status(format!("Exported to {}", dir.display()));
            }
            Err(e) => {
                warn!(error = %e, "export failed");
                self.record_export_failure(format!("{e:#}"));
            }
        }
    }

    // ── Status ───────────────────────────────────────────────────────

    /// Newest first, capped at 50.
    pub fn record_export_failure(&mut self, message: String) {
        self.status_message = Some((format!("Export failed: {message}"), StatusLevel::Error));
        self.error_history.push_front(ExportFailure {
            timestamp: chrono::Local::now().naive_local(),
            message,
            export_dir: self.export_dir.clone(),
            years: self.filter.years,
            entity_count: self.filter.entities.len(),
        });
        self.error_history.truncate(ERROR_HISTORY_CAP);
    }

    pub fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = Some((msg.into(), StatusLevel::Info));
    }

    pub fn set_warning(&mut self, msg: impl Into<String>) {
        self.status_message = Some((msg.into(), StatusLevel::Warning));
    }
}
