//! Group-by aggregation over filtered records.
//!
//! Sums come first, ratios after: average CNCI is always
//! `sum(weighted_cnci) / sum(documents)` over the group, never a mean of the
//! per-row CNCI values.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use crate::domain::{ratio_or_zero, AggregateRow, Record};

/// Running sums for one group.
#[derive(Debug, Clone, Copy, Default)]
struct Sums {
    documents: f64,
    citations: f64,
    weighted_cnci: f64,
    elite_documents: u64,
}

impl Sums {
    fn add_record(&mut self, r: &Record) {
        self.documents += r.documents;
        self.citations += r.citations;
        self.weighted_cnci += r.weighted_cnci;
        self.elite_documents += r.elite_documents;
    }

    fn add_row(&mut self, r: &AggregateRow) {
        self.documents += r.documents;
        self.citations += r.citations;
        self.weighted_cnci += r.weighted_cnci;
        self.elite_documents += r.elite_documents;
    }

    fn finish(self, entity: &str, year: Option<i32>) -> AggregateRow {
        AggregateRow {
            entity: entity.to_string(),
            year,
            documents: self.documents,
            citations: self.citations,
            weighted_cnci: self.weighted_cnci,
            elite_documents: self.elite_documents,
            avg_cnci: ratio_or_zero(self.weighted_cnci, self.documents),
            pct_elite: ratio_or_zero(self.elite_documents as f64, self.documents) * 100.0,
        }
    }
}

/// Group by (entity, year). Rows come out ordered by entity, then year.
pub fn by_entity_year<'a, I>(rows: I) -> Vec<AggregateRow>
where
    I: IntoIterator<Item = &'a Record>,
{
    let mut groups: BTreeMap<(&str, i32), Sums> = BTreeMap::new();
    for r in rows {
        groups
            .entry((r.entity.as_str(), r.year))
            .or_default()
            .add_record(r);
    }
    groups
        .into_iter()
        .map(|((entity, year), sums)| sums.finish(entity, Some(year)))
        .collect()
}

/// Group by entity only. Rows come out ordered by entity.
pub fn by_entity<'a, I>(rows: I) -> Vec<AggregateRow>
where
    I: IntoIterator<Item = &'a Record>,
{
    let mut groups: BTreeMap<&str, Sums> = BTreeMap::new();
    for r in rows {
        groups.entry(r.entity.as_str()).or_default().add_record(r);
    }
    groups
        .into_iter()
        .map(|(entity, sums)| sums.finish(entity, None))
        .collect()
}

/// Entity aggregates ranked by % elite descending, ties by name ascending.
pub fn elite_leadership<'a, I>(rows: I) -> Vec<AggregateRow>
where
    I: IntoIterator<Item = &'a Record>,
{
    let mut out = by_entity(rows);
    out.sort_by(compare_elite);
    out
}

/// Re-sum (entity, year) rows across years into entity rows.
pub fn collapse_years(rows: &[AggregateRow]) -> Vec<AggregateRow> {
    let mut groups: BTreeMap<&str, Sums> = BTreeMap::new();
    for r in rows {
        groups.entry(r.entity.as_str()).or_default().add_row(r);
    }
    groups
        .into_iter()
        .map(|(entity, sums)| sums.finish(entity, None))
        .collect()
}

fn compare_elite(a: &AggregateRow, b: &AggregateRow) -> Ordering {
    b.pct_elite
        .total_cmp(&a.pct_elite)
        .then_with(|| a.entity.cmp(&b.entity))
}
