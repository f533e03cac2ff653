//! Catalog-side entities consumed by the profiler.
//!
//! These types mirror the metadata catalog's JSON representation (camelCase
//! field names, hyphenated enum values) so that tables fetched from the
//! catalog can be deserialized directly with `serde_json`.

mod profiler_config;
mod table;

pub use profiler_config::{
    PartitionIntervalType, PartitionIntervalUnit, PartitionProfilerConfig, TableProfilerConfig,
};
pub use table::{DatabaseServiceType, IntervalType, Table, TablePartition};
