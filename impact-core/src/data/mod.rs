//! Data loading and caching

pub mod cache;
pub mod dataset;
pub mod ingest;
pub mod schema;

pub use cache::DatasetCache;
pub use dataset::Dataset;
pub use ingest::{ingest_csv, LoadError};
pub use schema::{ColumnMap, SchemaError};
