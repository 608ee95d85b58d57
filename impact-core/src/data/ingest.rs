//! CSV ingest: read the source table once, derive the weighted-CNCI column,
//! and materialize validated records.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use polars::prelude::*;
use tracing::{debug, info};

use crate::data::dataset::Dataset;
use crate::data::schema::{
    ColumnMap, SchemaError, CITATIONS, CNCI, DOCUMENTS, ELITE_DOCUMENTS, ENTITY, WEIGHTED_CNCI,
    YEAR,
};
use crate::domain::Record;

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("data file not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Ingest failed: {0}")]
    IngestFailed(String),

    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error("invalid value in column '{column}' at data row {row}: {reason}")]
    InvalidValue {
        row: usize,
        column: String,
        reason: String,
    },

    #[error("data file {} contains no rows", path.display())]
    EmptyDataset { path: PathBuf },
}

/// Load a CSV into a [`Dataset`].
///
/// Every required column must be present and every value must parse to a
/// finite, non-negative number (names excepted). Any violation fails the
/// whole load; there is no partial dataset.
pub fn ingest_csv(path: &Path, columns: &ColumnMap) -> Result<Dataset, LoadError> {
    if !path.is_file() {
        return Err(LoadError::NotFound {
            path: path.to_path_buf(),
        });
    }

    let bytes = std::fs::read(path).map_err(|source| LoadError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let fingerprint = blake3::hash(&bytes).to_hex().to_string();

    // Headers are checked before the dtype overwrite is applied; polars
    // matches an overwrite by position when a name is absent.
    let header = csv_reader(path)
        .finish()
        .and_then(|mut lf| lf.collect_schema())
        .map_err(|e| LoadError::IngestFailed(e.to_string()))?;
    columns.validate(&header)?;

    let raw = csv_reader(path)
        .with_dtype_overwrite(Some(Arc::new(columns.source_dtypes())))
        .finish()
        .and_then(|lf| lf.collect())
        .map_err(|e| LoadError::IngestFailed(e.to_string()))?;
    debug!(rows = raw.height(), columns = raw.width(), "parsed source table");

    let enriched = enrich(raw, columns).map_err(|e| LoadError::IngestFailed(e.to_string()))?;
    let records = to_records(&enriched, columns)?;
    let dataset = Dataset::from_records(records, path, fingerprint)?;

    info!(
        path = %path.display(),
        rows = dataset.len(),
        entities = dataset.entities().len(),
        fingerprint = &dataset.fingerprint()[..12],
        "dataset loaded"
    );
    Ok(dataset)
}

/// No type inference: unmapped columns stay text, mapped ones are pinned.
fn csv_reader(path: &Path) -> LazyCsvReader {
    LazyCsvReader::new(path)
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
}

/// Rename to canonical columns, cast measures, and add `Weighted_CNCI`.
fn enrich(raw: DataFrame, columns: &ColumnMap) -> PolarsResult<DataFrame> {
    raw.lazy()
        .select([
            col(columns.entity.as_str()).cast(DataType::String).alias(ENTITY),
            col(columns.year.as_str()).cast(DataType::Int32).alias(YEAR),
            col(columns.documents.as_str())
                .cast(DataType::Float64)
                .alias(DOCUMENTS),
            col(columns.citations.as_str())
                .cast(DataType::Float64)
                .alias(CITATIONS),
            col(columns.cnci.as_str()).cast(DataType::Float64).alias(CNCI),
            col(columns.elite_documents.as_str())
                .cast(DataType::Float64)
                .alias(ELITE_DOCUMENTS),
        ])
        .with_column((col(CNCI) * col(DOCUMENTS)).alias(WEIGHTED_CNCI))
        .collect()
}

fn to_records(df: &DataFrame, columns: &ColumnMap) -> Result<Vec<Record>, LoadError> {
    let polars_err = |e: PolarsError| LoadError::IngestFailed(e.to_string());

    let entity = df.column(ENTITY).and_then(|c| c.str()).map_err(polars_err)?;
    let year = df.column(YEAR).and_then(|c| c.i32()).map_err(polars_err)?;
    let documents = df.column(DOCUMENTS).and_then(|c| c.f64()).map_err(polars_err)?;
    let citations = df.column(CITATIONS).and_then(|c| c.f64()).map_err(polars_err)?;
    let cnci = df.column(CNCI).and_then(|c| c.f64()).map_err(polars_err)?;
    let elite = df
        .column(ELITE_DOCUMENTS)
        .and_then(|c| c.f64())
        .map_err(polars_err)?;
    let weighted = df
        .column(WEIGHTED_CNCI)
        .and_then(|c| c.f64())
        .map_err(polars_err)?;

    let mut records = Vec::with_capacity(df.height());
    for i in 0..df.height() {
        let row = i + 1;
        let name = required(entity.get(i), row, columns, ENTITY)?;
        let docs = measure(documents.get(i), row, columns, DOCUMENTS)?;
        let elite_documents = measure(elite.get(i), row, columns, ELITE_DOCUMENTS)?;
        if elite_documents.fract() != 0.0 {
            return Err(invalid(row, columns, ELITE_DOCUMENTS, "not a whole number"));
        }
        if elite_documents > docs {
            return Err(invalid(row, columns, ELITE_DOCUMENTS, "exceeds document count"));
        }

        records.push(Record {
            entity: name.to_string(),
            year: required(year.get(i), row, columns, YEAR)?,
            documents: docs,
            citations: measure(citations.get(i), row, columns, CITATIONS)?,
            cnci: measure(cnci.get(i), row, columns, CNCI)?,
            elite_documents: elite_documents as u64,
            weighted_cnci: measure(weighted.get(i), row, columns, WEIGHTED_CNCI)?,
        });
    }
    Ok(records)
}

fn required<T>(
    value: Option<T>,
    row: usize,
    columns: &ColumnMap,
    canonical: &str,
) -> Result<T, LoadError> {
    value.ok_or_else(|| invalid(row, columns, canonical, "missing or unparsable"))
}

fn measure(
    value: Option<f64>,
    row: usize,
    columns: &ColumnMap,
    canonical: &str,
) -> Result<f64, LoadError> {
    let v = required(value, row, columns, canonical)?;
    if !v.is_finite() {
        return Err(invalid(row, columns, canonical, "not a finite number"));
    }
    if v < 0.0 {
        return Err(invalid(row, columns, canonical, "negative value"));
    }
    Ok(v)
}

fn invalid(row: usize, columns: &ColumnMap, canonical: &str, reason: &str) -> LoadError {
    LoadError::InvalidValue {
        row,
        column: columns.source_name(canonical).unwrap_or(canonical).to_string(),
        reason: reason.to_string(),
    }
}
