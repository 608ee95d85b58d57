//! Impact Core — data model, loader, filter and aggregation for national
//! research-output metrics.
//!
//! - Domain types (records, aggregate rows)
//! - CSV loader with derived weighted-CNCI column and a process-lifetime memo
//! - Year-range / entity filter
//! - (entity, year) and entity-only aggregation, elite-share ranking

pub mod aggregate;
pub mod data;
pub mod domain;
pub mod filter;

pub use data::{ColumnMap, Dataset, DatasetCache, LoadError, SchemaError};
pub use domain::{AggregateRow, Record};
pub use filter::{FilterState, YearRange};

#[cfg(test)]
mod tests {
    use super::*;

    /// The memoized dataset is shared read-only; it must cross threads freely.
    #[allow(dead_code)]
    fn assert_send_sync() {
        fn require_send<T: Send>() {}
        fn require_sync<T: Sync>() {}

        require_send::<Dataset>();
        require_sync::<Dataset>();
        require_send::<DatasetCache>();
        require_sync::<DatasetCache>();
        require_send::<FilterState>();
        require_sync::<FilterState>();
        require_send::<AggregateRow>();
        require_sync::<AggregateRow>();
    }
}
