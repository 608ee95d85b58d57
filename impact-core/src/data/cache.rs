//! Process-lifetime memo for the loaded dataset.
//!
//! The source file is static, so there is no invalidation: the first
//! successful load is kept until the process exits and every later call
//! hands out the same `Arc`.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use once_cell::sync::OnceCell;
use tracing::debug;

use crate::data::dataset::Dataset;
use crate::data::ingest::{ingest_csv, LoadError};
use crate::data::schema::ColumnMap;

pub struct DatasetCache {
    path: PathBuf,
    columns: ColumnMap,
    cell: OnceCell<Arc<Dataset>>,
}

impl DatasetCache {
    pub fn new(path: impl Into<PathBuf>, columns: ColumnMap) -> Self {
        Self {
            path: path.into(),
            columns,
            cell: OnceCell::new(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Return the memoized dataset, reading the source on first use.
    ///
    /// A failed load leaves the cell empty.
    pub fn get_or_load(&self) -> Result<Arc<Dataset>, LoadError> {
        if let Some(ds) = self.cell.get() {
            debug!(path = %self.path.display(), "dataset cache hit");
            return Ok(Arc::clone(ds));
        }
        self.cell
            .get_or_try_init(|| ingest_csv(&self.path, &self.columns).map(Arc::new))
            .map(Arc::clone)
    }

    pub fn is_loaded(&self) -> bool {
        self.cell.get().is_some()
    }
}
