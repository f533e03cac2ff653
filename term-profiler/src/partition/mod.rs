//! Partition resolution for table profiling.
//!
//! A profiling query should only scan the recent part of a partitioned table.
//! The [`PartitionResolver`] reconciles what the warehouse declares about a
//! table's partitioning with the user's [`PartitionProfilerConfig`] override
//! and produces a single [`PartitionDetails`] descriptor, which
//! [`PartitionDetails::filter`] turns into a scan predicate.
//!
//! [`PartitionProfilerConfig`]: crate::entity::PartitionProfilerConfig

mod filter;
mod options;
mod resolver;
mod strategy;

pub use filter::{quote_identifier, PartitionFilter};
pub use options::PartitionOptions;
pub use resolver::PartitionResolver;
pub use strategy::{
    PartitionStrategy, DEFAULT_INTERVAL, DEFAULT_INTERVAL_UNIT, PARTITION_DATE_COLUMN,
    PARTITION_TIME_COLUMN,
};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::entity::{PartitionIntervalType, PartitionIntervalUnit};

/// Effective, dialect-resolved partition descriptor for one profiling run.
///
/// Built by [`PartitionOptions::into_details`], which guarantees a non-empty
/// column name and that discrete values never coexist with interval fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartitionDetails {
    pub enable_partitioning: bool,
    pub partition_column_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub partition_interval_type: Option<PartitionIntervalType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub partition_interval_unit: Option<PartitionIntervalUnit>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub partition_interval: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub partition_values: Option<Vec<Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub partition_integer_range_start: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub partition_integer_range_end: Option<i64>,
}

impl PartitionDetails {
    /// Builds the scan filter described by this descriptor.
    ///
    /// Returns `None` when partitioning is disabled or the descriptor names a
    /// column without any bound (an override that only sets the column).
    pub fn filter(&self) -> Option<PartitionFilter> {
        if !self.enable_partitioning {
            return None;
        }
        let column = self.partition_column_name.clone();

        if let Some(values) = &self.partition_values {
            return Some(PartitionFilter::Values {
                column,
                values: values.clone(),
            });
        }

        if let (Some(start), Some(end)) = (
            self.partition_integer_range_start,
            self.partition_integer_range_end,
        ) {
            return Some(PartitionFilter::IntegerRange { column, start, end });
        }

        match (self.partition_interval_unit, self.partition_interval) {
            (Some(unit), Some(interval)) => Some(PartitionFilter::TimeWindow {
                column,
                unit,
                interval,
            }),
            _ => None,
        }
    }
}
