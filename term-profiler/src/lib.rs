//! # Term Profiler - partition resolution and result reporting
//!
//! Term Profiler holds the decision logic that sits between a metadata catalog
//! and a warehouse profiling run:
//!
//! - **Partition resolution**: given a [`Table`](entity::Table) with its
//!   declared partitioning and an optional user override, work out which
//!   partition column and time window (or value list, or integer range) the
//!   profiling query should be restricted to.
//! - **Result reporting**: render the per-table profile and test results into a
//!   stable, human-readable report and keep track of which tables were written.
//!
//! Metric computation, warehouse connectivity and run orchestration live
//! outside this crate.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use term_profiler::prelude::*;
//! use term_profiler::results::{ColumnProfile, TableProfile};
//!
//! # fn main() -> Result<()> {
//! let table = Table::new("bigquery_source.bigquery.db.events", DatabaseServiceType::BigQuery)
//!     .with_partition(TablePartition::new(["e"], IntervalType::IngestionTime, Some("DAY")));
//!
//! let resolver = PartitionResolver::new();
//! if let Some(details) = resolver.resolve(&table)? {
//!     if let Some(filter) = details.filter() {
//!         println!("WHERE {}", filter.to_sql()?);
//!     }
//! }
//!
//! let record = ProfileAndTests::new(
//!     TableProfile::new(&table.fully_qualified_name, MetricResults::new().with("rowCount", 100))
//!         .with_column(ColumnProfile::new("e", MetricResults::new().with("nullCount", 0))),
//! );
//!
//! let sink = FileSink::open(FileSinkConfig::new("/tmp/profiler/report.txt"))?;
//! let status = with_sink(sink, |sink| {
//!     sink.write_record(&record)?;
//!     Ok(sink.status())
//! })?;
//! assert_eq!(status.records_count(), 1);
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! - **`entity`**: catalog-side table, partition and override types
//! - **`partition`**: resolver, per-dialect strategies and scan filters
//! - **`results`**: metric values, validations and per-table result bundles
//! - **`sink`**: the report formatter, the file sink and scoped sink handling
//! - **`logging`**: logging configuration and subscriber setup

pub mod entity;
pub mod error;
pub mod logging;
pub mod partition;
pub mod prelude;
pub mod results;
pub mod sink;
