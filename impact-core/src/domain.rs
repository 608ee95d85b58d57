//! Domain types: source records and aggregate rows.
//!
//! CNCI is a per-document ratio and is not additive. Every record therefore
//! carries `weighted_cnci = cnci * documents`, which *is* additive, and every
//! average CNCI in the system is recomputed from summed weighted values.

use serde::{Deserialize, Serialize};

/// One (entity, year) observation from the source table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub entity: String,
    pub year: i32,
    pub documents: f64,
    pub citations: f64,
    /// Category Normalized Citation Impact (1.0 = world average).
    pub cnci: f64,
    /// Documents ranked in the global top 1% by citations.
    pub elite_documents: u64,
    /// `cnci * documents`, derived once at load time.
    pub weighted_cnci: f64,
}

impl Record {
    /// Build a record and derive its weighted CNCI.
    pub fn new(
        entity: impl Into<String>,
        year: i32,
        documents: f64,
        citations: f64,
        cnci: f64,
        elite_documents: u64,
    ) -> Self {
        Self {
            entity: entity.into(),
            year,
            documents,
            citations,
            cnci,
            elite_documents,
            weighted_cnci: cnci * documents,
        }
    }
}

/// A group of records collapsed to sums plus derived ratios.
///
/// `year` is `Some` for (entity, year) groups and `None` for entity-only
/// groups.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateRow {
    pub entity: String,
    pub year: Option<i32>,
    pub documents: f64,
    pub citations: f64,
    pub weighted_cnci: f64,
    pub elite_documents: u64,
    /// `weighted_cnci / documents`, or 0.0 for a zero-document group.
    pub avg_cnci: f64,
    /// `elite_documents / documents * 100`, or 0.0 for a zero-document group.
    pub pct_elite: f64,
}

impl AggregateRow {
    pub fn has_documents(&self) -> bool {
        self.documents > 0.0
    }
}

/// `numerator / denominator`, resolving an empty or non-positive denominator
/// to 0.0 instead of NaN or infinity.
pub fn ratio_or_zero(numerator: f64, denominator: f64) -> f64 {
    if denominator > 0.0 {
        numerator / denominator
    } else {
        0.0
    }
}
