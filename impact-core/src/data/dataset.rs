//! The loaded, immutable table.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use crate::data::ingest::LoadError;
use crate::domain::Record;
use crate::filter::YearRange;

/// Records plus the facts the UI needs about them: the closed entity set and
/// the year bounds. Never mutated after construction.
#[derive(Debug, Clone)]
pub struct Dataset {
    records: Vec<Record>,
    entities: Vec<String>,
    year_bounds: YearRange,
    source: PathBuf,
    fingerprint: String,
}

impl Dataset {
    /// Build a dataset. Fails on an empty record set, since an empty table has
    /// no year bounds to offer the range selector.
    pub fn from_records(
        records: Vec<Record>,
        source: impl Into<PathBuf>,
        fingerprint: impl Into<String>,
    ) -> Result<Self, LoadError> {
        let source = source.into();
        let lo = records.iter().map(|r| r.year).min();
        let hi = records.iter().map(|r| r.year).max();
        let (Some(lo), Some(hi)) = (lo, hi) else {
            return Err(LoadError::EmptyDataset { path: source });
        };

        let entities: BTreeSet<&str> = records.iter().map(|r| r.entity.as_str()).collect();
        let entities = entities.into_iter().map(String::from).collect();

        Ok(Self {
            records,
            entities,
            year_bounds: YearRange::new(lo, hi),
            source,
            fingerprint: fingerprint.into(),
        })
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Distinct entity names, sorted ascending.
    pub fn entities(&self) -> &[String] {
        &self.entities
    }

    pub fn year_bounds(&self) -> YearRange {
        self.year_bounds
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    /// BLAKE3 hex digest of the source bytes.
    pub fn fingerprint(&self) -> &str {
        &self.fingerprint
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entities_are_sorted_and_deduplicated() {
        let records = vec![
            Record::new("US", 2021, 1.0, 1.0, 1.0, 0),
            Record::new("China", 2019, 1.0, 1.0, 1.0, 0),
            Record::new("US", 2020, 1.0, 1.0, 1.0, 0),
        ];
        let ds = Dataset::from_records(records, "mem.csv", "abc").unwrap();
        assert_eq!(ds.entities(), &["China".to_string(), "US".to_string()]);
        assert_eq!(ds.year_bounds(), YearRange::new(2019, 2021));
        assert_eq!(ds.len(), 3);
    }

    #[test]
    fn empty_records_is_an_error() {
        let err = Dataset::from_records(Vec::new(), "mem.csv", "abc").unwrap_err();
        assert!(matches!(err, LoadError::EmptyDataset { .. }));
    }
}
