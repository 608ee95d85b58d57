//! Top-line indicators computed from the filtered (ungrouped) rows.

use std::collections::BTreeSet;

use impact_core::aggregate::by_entity;
use impact_core::domain::ratio_or_zero;
use impact_core::Record;
use serde::{Deserialize, Serialize};

/// Placeholder shown when a metric has no data behind it.
pub const NOT_AVAILABLE: &str = "N/A";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryMetrics {
    pub total_documents: f64,
    /// Document-weighted CNCI over all filtered rows; 0.0 when there are no
    /// documents.
    pub avg_impact: f64,
    /// Entity with the largest summed documents (ties: first by name).
    pub top_producer: Option<String>,
    /// Distinct entities present in the filtered rows.
    pub active_entities: usize,
}

impl SummaryMetrics {
    pub fn compute<'a, I>(rows: I) -> Self
    where
        I: IntoIterator<Item = &'a Record>,
    {
        let rows: Vec<&Record> = rows.into_iter().collect();

        // Fold from +0.0: an empty f64 `sum()` yields -0.0.
        let total_documents = rows.iter().fold(0.0, |acc, r| acc + r.documents);
        let total_weighted = rows.iter().fold(0.0, |acc, r| acc + r.weighted_cnci);
        let active_entities = rows
            .iter()
            .map(|r| r.entity.as_str())
            .collect::<BTreeSet<_>>()
            .len();

        // `by_entity` is name-ordered, so keeping the first strict maximum
        // resolves ties alphabetically.
        let mut top: Option<(String, f64)> = None;
        for row in by_entity(rows.iter().copied()) {
            let better = top
                .as_ref()
                .map_or(true, |(_, best)| row.documents > *best);
            if better {
                top = Some((row.entity, row.documents));
            }
        }

        Self {
            total_documents,
            avg_impact: ratio_or_zero(total_weighted, total_documents),
            top_producer: top.map(|(entity, _)| entity),
            active_entities,
        }
    }

    pub fn top_producer_label(&self) -> &str {
        self.top_producer.as_deref().unwrap_or(NOT_AVAILABLE)
    }

    /// Total documents with thousands separators, no decimals.
    pub fn total_documents_label(&self) -> String {
        group_thousands(self.total_documents)
    }

    pub fn avg_impact_label(&self) -> String {
        format!("{:.2}", self.avg_impact)
    }
}

/// Format a non-negative count as `1,234,567`.
pub fn group_thousands(value: f64) -> String {
    let value = if value > 0.0 { value } else { 0.0 };
    let digits = format!("{:.0}", value);
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn worked_example() {
        let rows = vec![
            Record::new("US", 2020, 100.0, 500.0, 1.2, 5),
            Record::new("US", 2021, 200.0, 900.0, 0.9, 8),
        ];
        let s = SummaryMetrics::compute(&rows);
        assert_eq!(s.total_documents, 300.0);
        assert!((s.avg_impact - 1.0).abs() < 1e-9);
        assert_eq!(s.top_producer_label(), "US");
        assert_eq!(s.active_entities, 1);
    }

    #[test]
    fn empty_rows_use_placeholders() {
        let s = SummaryMetrics::compute(Vec::<&Record>::new());
        assert_eq!(s.total_documents, 0.0);
        assert!(s.total_documents.is_sign_positive());
        assert_eq!(s.avg_impact, 0.0);
        assert!(s.avg_impact.is_sign_positive());
        assert_eq!(s.top_producer, None);
        assert_eq!(s.top_producer_label(), NOT_AVAILABLE);
        assert_eq!(s.active_entities, 0);
        assert_eq!(s.total_documents_label(), "0");
        assert_eq!(s.avg_impact_label(), "0.00");
    }

    #[test]
    fn top_producer_sums_across_years_and_breaks_ties_by_name() {
        let rows = vec![
            Record::new("Japan", 2020, 60.0, 0.0, 1.0, 0),
            Record::new("Japan", 2021, 60.0, 0.0, 1.0, 0),
            Record::new("France", 2020, 100.0, 0.0, 1.0, 0),
            Record::new("Canada", 2020, 120.0, 0.0, 1.0, 0),
        ];
        let s = SummaryMetrics::compute(&rows);
        assert_eq!(s.top_producer.as_deref(), Some("Canada"));
        assert_eq!(s.active_entities, 3);
    }

    #[test]
    fn zero_document_rows_do_not_produce_nan() {
        let rows = vec![Record::new("Tuvalu", 2020, 0.0, 0.0, 0.0, 0)];
        let s = SummaryMetrics::compute(&rows);
        assert_eq!(s.avg_impact, 0.0);
        assert_eq!(s.top_producer.as_deref(), Some("Tuvalu"));
    }

    #[test]
    fn thousands_grouping() {
        assert_eq!(group_thousands(0.0), "0");
        assert_eq!(group_thousands(-0.0), "0");
        assert_eq!(group_thousands(-0.4), "0");
        assert_eq!(group_thousands(f64::NAN), "0");
        assert_eq!(group_thousands(999.0), "999");
        assert_eq!(group_thousands(1000.0), "1,000");
        assert_eq!(group_thousands(1234567.4), "1,234,567");
    }
}
