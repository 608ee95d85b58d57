//! Impact Report — everything between the aggregated rows and a renderer.
//!
//! - `config`: TOML dashboard configuration
//! - `summary`: the four headline metrics
//! - `charts`: declarative line / bubble / bar chart specifications
//! - `view`: `DashboardView::build`, the full filter → aggregate → present pass
//! - `export`: CSV table and versioned JSON snapshot

pub mod charts;
pub mod config;
pub mod export;
pub mod summary;
pub mod view;

pub use charts::{BarChart, BubbleChart, ChartSpec, LineChart, Orientation};
pub use config::{ConfigError, DashboardConfig, DEFAULT_CONFIG_FILE};
pub use export::{export_table_csv, export_view_json, import_view_json, save_export, ViewExport};
pub use summary::{SummaryMetrics, NOT_AVAILABLE};
pub use view::DashboardView;
