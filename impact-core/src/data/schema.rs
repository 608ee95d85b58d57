use polars::prelude::*;
use serde::{Deserialize, Serialize};

/// Canonical column names used after ingest, independent of the source headers.
pub const ENTITY: &str = "entity";
pub const YEAR: &str = "year";
pub const DOCUMENTS: &str = "documents";
pub const CITATIONS: &str = "citations";
pub const CNCI: &str = "cnci";
pub const ELITE_DOCUMENTS: &str = "elite_documents";
pub const WEIGHTED_CNCI: &str = "Weighted_CNCI";

/// Source column names for the six required measures.
///
/// Defaults match the export format of the publications table the dashboard
/// was built for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnMap {
    pub entity: String,
    pub year: String,
    pub documents: String,
    pub citations: String,
    pub cnci: String,
    pub elite_documents: String,
}

impl Default for ColumnMap {
    fn default() -> Self {
        Self {
            entity: "Name".into(),
            year: "year".into(),
            documents: "Web of Science Documents".into(),
            citations: "Times Cited".into(),
            cnci: "Category Normalized Citation Impact".into(),
            elite_documents: "Documents in Top 1%".into(),
        }
    }
}

impl ColumnMap {
    /// (canonical name, source name) pairs in table order.
    pub fn pairs(&self) -> [(&'static str, &str); 6] {
        [
            (ENTITY, self.entity.as_str()),
            (YEAR, self.year.as_str()),
            (DOCUMENTS, self.documents.as_str()),
            (CITATIONS, self.citations.as_str()),
            (CNCI, self.cnci.as_str()),
            (ELITE_DOCUMENTS, self.elite_documents.as_str()),
        ]
    }

    /// Parse types for the source columns. Measures are always read as
    /// floats so a late fractional value cannot break type inference.
    pub fn source_dtypes(&self) -> Schema {
        Schema::from_iter(vec![
            Field::new(self.entity.as_str().into(), DataType::String),
            Field::new(self.year.as_str().into(), DataType::Int64),
            Field::new(self.documents.as_str().into(), DataType::Float64),
            Field::new(self.citations.as_str().into(), DataType::Float64),
            Field::new(self.cnci.as_str().into(), DataType::Float64),
            Field::new(self.elite_documents.as_str().into(), DataType::Float64),
        ])
    }

    /// Check that every required source column is present.
    pub fn validate(&self, actual: &Schema) -> Result<(), SchemaError> {
        for (_, source) in self.pairs() {
            if !actual.contains(source) {
                return Err(SchemaError::MissingColumn(source.to_string()));
            }
        }
        Ok(())
    }

    /// Source name for a canonical column.
    pub fn source_name(&self, canonical: &str) -> Option<&str> {
        self.pairs()
            .into_iter()
            .find(|(c, _)| *c == canonical)
            .map(|(_, s)| s)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    #[error("Missing required column: {0}")]
    MissingColumn(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_frame() -> DataFrame {
        df!(
            "Name" => &["US"],
            "year" => &[2020i64],
            "Web of Science Documents" => &[100.0],
            "Times Cited" => &[500.0],
            "Category Normalized Citation Impact" => &[1.2],
            "Documents in Top 1%" => &[5i64],
        )
        .unwrap()
    }

    #[test]
    fn validate_accepts_default_headers() {
        let df = full_frame();
        assert!(ColumnMap::default().validate(df.schema()).is_ok());
    }

    #[test]
    fn validate_rejects_missing_column() {
        let df = full_frame().drop("Times Cited").unwrap();
        let err = ColumnMap::default().validate(df.schema()).unwrap_err();
        assert!(matches!(err, SchemaError::MissingColumn(ref c) if c == "Times Cited"));
    }

    #[test]
    fn source_name_maps_canonical_columns() {
        let map = ColumnMap::default();
        assert_eq!(map.source_name(DOCUMENTS), Some("Web of Science Documents"));
        assert_eq!(map.source_name("nope"), None);
    }

    #[test]
    fn source_dtypes_pin_measures_to_float() {
        let dtypes = ColumnMap::default().source_dtypes();
        assert_eq!(dtypes.len(), 6);
        assert_eq!(dtypes.get("year"), Some(&DataType::Int64));
        assert_eq!(dtypes.get("Documents in Top 1%"), Some(&DataType::Float64));
        assert_eq!(dtypes.get("Name"), Some(&DataType::String));
    }
}
