//! Table entity and its declared partition shape.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::TableProfilerConfig;

/// The warehouse dialect a table is served from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DatabaseServiceType {
    BigQuery,
    Redshift,
    Snowflake,
    Postgres,
    Mysql,
    Mssql,
    Oracle,
    Hive,
    Trino,
    Databricks,
    Athena,
    Clickhouse,
}

impl DatabaseServiceType {
    /// Returns true if the warehouse injects ingestion-time pseudo-columns
    /// (`_PARTITIONTIME`, `_PARTITIONDATE`) into partitioned tables.
    pub fn has_partition_pseudo_columns(&self) -> bool {
        matches!(self, DatabaseServiceType::BigQuery)
    }
}

impl fmt::Display for DatabaseServiceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self:?}")
    }
}

/// How the source system partitions a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IntervalType {
    /// Partitioned on a declared DATE/TIMESTAMP column
    #[serde(rename = "TIME-UNIT", alias = "TIME_UNIT")]
    TimeUnit,
    /// Partitioned on the load time, exposed through pseudo-columns
    #[serde(rename = "INGESTION-TIME", alias = "INGESTION_TIME")]
    IngestionTime,
    /// Partitioned on integer ranges of a declared column
    #[serde(rename = "INTEGER-RANGE", alias = "INTEGER_RANGE")]
    IntegerRange,
}

/// Partition metadata declared by source-system introspection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TablePartition {
    /// Partition column names
    #[serde(default)]
    pub columns: Vec<String>,
    /// Kind of partitioning
    pub interval_type: IntervalType,
    /// Raw interval granularity as reported by the source, e.g. `"DAY"` or `"HOUR"`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interval: Option<String>,
}

impl TablePartition {
    /// Creates a partition declaration.
    pub fn new<I, S>(columns: I, interval_type: IntervalType, interval: Option<&str>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
            interval_type,
            interval: interval.map(str::to_string),
        }
    }
}

/// A warehouse table as described by the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Table {
    pub fully_qualified_name: String,
    pub service_type: DatabaseServiceType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table_partition: Option<TablePartition>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table_profiler_config: Option<TableProfilerConfig>,
}

impl Table {
    /// Creates an unpartitioned table with no profiler override.
    pub fn new(fully_qualified_name: impl Into<String>, service_type: DatabaseServiceType) -> Self {
        Self {
            fully_qualified_name: fully_qualified_name.into(),
            service_type,
            table_partition: None,
            table_profiler_config: None,
        }
    }

    /// Sets the declared partition.
    pub fn with_partition(mut self, partition: TablePartition) -> Self {
        self.table_partition = Some(partition);
        self
    }

    /// Sets the profiler configuration override.
    pub fn with_profiler_config(mut self, config: TableProfilerConfig) -> Self {
        self.table_profiler_config = Some(config);
        self
    }
}
