//! Dialect-specific derivation of partition defaults.

use tracing::warn;

use super::options::PartitionOptions;
use crate::entity::{DatabaseServiceType, IntervalType, PartitionIntervalUnit, TablePartition};
use crate::error::{ProfilerError, Result};

/// Pseudo-column exposing the ingestion timestamp of hourly partitions.
pub const PARTITION_TIME_COLUMN: &str = "_PARTITIONTIME";

/// Pseudo-column exposing the ingestion date of daily (and coarser) partitions.
pub const PARTITION_DATE_COLUMN: &str = "_PARTITIONDATE";

/// Interval unit applied when neither the declaration nor the override sets one.
pub const DEFAULT_INTERVAL_UNIT: PartitionIntervalUnit = PartitionIntervalUnit::Day;

/// Number of interval units applied when neither the declaration nor the override sets one.
pub const DEFAULT_INTERVAL: u32 = 30;

/// How a dialect turns a declared partition into partition options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PartitionStrategy {
    /// Warehouse-native partitioning with ingestion-time pseudo-columns.
    NativePseudoColumns,
    /// Declared partitions are ignored; only user overrides apply.
    OverrideOnly,
}

impl PartitionStrategy {
    /// Selects the strategy for a dialect.
    pub fn for_dialect(service_type: DatabaseServiceType) -> Self {
        if service_type.has_partition_pseudo_columns() {
            PartitionStrategy::NativePseudoColumns
        } else {
            PartitionStrategy::OverrideOnly
        }
    }

    /// Derives defaults from the declared partition, or `None` when the
    /// dialect does not use the declaration.
    pub fn declared_defaults(
        &self,
        table: &str,
        partition: Option<&TablePartition>,
    ) -> Result<Option<PartitionOptions>> {
        match (self, partition) {
            (PartitionStrategy::NativePseudoColumns, Some(partition)) => {
                native_defaults(table, partition).map(Some)
            }
            _ => Ok(None),
        }
    }
}

fn native_defaults(table: &str, partition: &TablePartition) -> Result<PartitionOptions> {
    match partition.interval_type {
        IntervalType::IngestionTime => {
            let column = match partition.interval.as_deref() {
                Some("HOUR") => PARTITION_TIME_COLUMN,
                _ => PARTITION_DATE_COLUMN,
            };
            Ok(PartitionOptions {
                column_name: Some(column.to_string()),
                interval_type: Some(partition.interval_type.into()),
                interval_unit: Some(DEFAULT_INTERVAL_UNIT),
                interval: Some(DEFAULT_INTERVAL),
                ..PartitionOptions::default()
            })
        }
        IntervalType::TimeUnit => Ok(PartitionOptions {
            column_name: Some(first_column(table, partition)?),
            interval_type: Some(partition.interval_type.into()),
            interval_unit: Some(DEFAULT_INTERVAL_UNIT),
            interval: Some(DEFAULT_INTERVAL),
            ..PartitionOptions::default()
        }),
        IntervalType::IntegerRange => Ok(PartitionOptions {
            column_name: Some(first_column(table, partition)?),
            interval_type: Some(partition.interval_type.into()),
            ..PartitionOptions::default()
        }),
    }
}

fn first_column(table: &str, partition: &TablePartition) -> Result<String> {
    // TODO: multi-column declarations only partition on the first column until
    // the catalog defines how several time-unit columns combine.
    if partition.columns.len() > 1 {
        warn!(
            table = %table,
            columns = ?partition.columns,
            "Multiple partition columns declared, using the first one"
        );
    }
    partition.columns.first().cloned().ok_or_else(|| {
        ProfilerError::invalid_partition(
            table,
            format!(
                "{:?} partition declares no partition column",
                partition.interval_type
            ),
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strategy_for_dialect() {
        assert_eq!(
            PartitionStrategy::for_dialect(DatabaseServiceType::BigQuery),
            PartitionStrategy::NativePseudoColumns
        );
        assert_eq!(
            PartitionStrategy::for_dialect(DatabaseServiceType::Redshift),
            PartitionStrategy::OverrideOnly
        );
    }

    #[test]
    fn test_override_only_ignores_declaration() {
        let partition = TablePartition::new(["datetime"], IntervalType::TimeUnit, Some("DAY"));
        let defaults = PartitionStrategy::OverrideOnly
            .declared_defaults("t1", Some(&partition))
            .unwrap();
        assert!(defaults.is_none());
    }

    #[test]
    fn test_ingestion_time_picks_pseudo_column() {
        let strategy = PartitionStrategy::NativePseudoColumns;
        let hourly = TablePartition::new(["e"], IntervalType::IngestionTime, Some("HOUR"));
        let daily = TablePartition::new(["e"], IntervalType::IngestionTime, Some("DAY"));
        let monthly = TablePartition::new(["e"], IntervalType::IngestionTime, Some("MONTH"));

        let column = |p: &TablePartition| {
            strategy
                .declared_defaults("t1", Some(p))
                .unwrap()
                .unwrap()
                .column_name
                .unwrap()
        };
        assert_eq!(column(&hourly), PARTITION_TIME_COLUMN);
        assert_eq!(column(&daily), PARTITION_DATE_COLUMN);
        assert_eq!(column(&monthly), PARTITION_DATE_COLUMN);
    }

    #[test]
    fn test_time_unit_uses_first_column() {
        let partition = TablePartition::new(["a", "b"], IntervalType::TimeUnit, Some("DAY"));
        let defaults = PartitionStrategy::NativePseudoColumns
            .declared_defaults("t1", Some(&partition))
            .unwrap()
            .unwrap();
        assert_eq!(defaults.column_name.as_deref(), Some("a"));
        assert_eq!(defaults.interval, Some(DEFAULT_INTERVAL));
    }

    #[test]
    fn test_time_unit_without_columns_is_rejected() {
        let partition = TablePartition::new(Vec::<String>::new(), IntervalType::TimeUnit, None);
        let err = PartitionStrategy::NativePseudoColumns
            .declared_defaults("t1", Some(&partition))
            .unwrap_err();
        assert!(err.is_partition_config());
    }
}
