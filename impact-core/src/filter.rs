//! Row filter: inclusive year range AND entity membership.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::data::Dataset;
use crate::domain::Record;

/// Inclusive year range. `lo > hi` is a valid, empty range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearRange {
    pub lo: i32,
    pub hi: i32,
}

impl YearRange {
    pub fn new(lo: i32, hi: i32) -> Self {
        Self { lo, hi }
    }

    pub fn contains(&self, year: i32) -> bool {
        self.lo <= year && year <= self.hi
    }

    pub fn is_empty(&self) -> bool {
        self.lo > self.hi
    }

    /// Intersect with `bounds`, keeping `lo <= hi` when the two overlap.
    pub fn clamp_to(self, bounds: YearRange) -> YearRange {
        let lo = self.lo.clamp(bounds.lo, bounds.hi);
        let hi = self.hi.clamp(bounds.lo, bounds.hi);
        YearRange::new(lo.min(hi), hi.max(lo))
    }
}

/// The user-controlled filter state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterState {
    pub years: YearRange,
    pub entities: BTreeSet<String>,
}

impl FilterState {
    pub fn new<I, S>(years: YearRange, entities: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            years,
            entities: entities.into_iter().map(Into::into).collect(),
        }
    }

    /// Full year span and the first `default_count` entities in sorted order.
    pub fn initial(dataset: &Dataset, default_count: usize) -> Self {
        Self::new(
            dataset.year_bounds(),
            dataset.entities().iter().take(default_count).cloned(),
        )
    }

    pub fn matches(&self, record: &Record) -> bool {
        self.years.contains(record.year) && self.entities.contains(&record.entity)
    }

    /// Rows passing the filter, in source order. An empty entity selection
    /// selects nothing.
    pub fn apply<'a>(&self, records: &'a [Record]) -> Vec<&'a Record> {
        if self.entities.is_empty() || self.years.is_empty() {
            return Vec::new();
        }
        records.iter().filter(|r| self.matches(r)).collect()
    }

    pub fn is_selected(&self, entity: &str) -> bool {
        self.entities.contains(entity)
    }

    /// Flip one entity's membership. Returns the new membership.
    pub fn toggle_entity(&mut self, entity: &str) -> bool {
        if self.entities.remove(entity) {
            false
        } else {
            self.entities.insert(entity.to_string());
            true
        }
    }

    pub fn clamp_to(&mut self, bounds: YearRange) {
        self.years = self.years.clamp_to(bounds);
    }
}
