//! Impact TUI — terminal dashboard over a research-output table.
//!
//! Layout:
//! - Sidebar: inclusive year range and entity multi-select
//! - Indicators: total documents, average impact, top producer, active count
//! - Tabs: 1 Trends, 2 Impact Matrix, 3 Elite, 4 Raw Data

pub mod app;
pub mod input;
pub mod theme;
pub mod ui;

pub use app::AppState;
pub use input::handle_key;
