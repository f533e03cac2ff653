//! User-supplied profiler overrides attached to a table.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

use super::IntervalType;

/// Granularity of a time-based partition boundary.
///
/// Parsing is case-sensitive: `"DAY"` is a unit, `"day"` is not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PartitionIntervalUnit {
    Hour,
    Day,
    Month,
    Year,
}

impl PartitionIntervalUnit {
    /// Returns the unit as it appears in configuration and SQL.
    pub fn as_str(&self) -> &'static str {
        match self {
            PartitionIntervalUnit::Hour => "HOUR",
            PartitionIntervalUnit::Day => "DAY",
            PartitionIntervalUnit::Month => "MONTH",
            PartitionIntervalUnit::Year => "YEAR",
        }
    }
}

impl FromStr for PartitionIntervalUnit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "HOUR" => Ok(PartitionIntervalUnit::Hour),
            "DAY" => Ok(PartitionIntervalUnit::Day),
            "MONTH" => Ok(PartitionIntervalUnit::Month),
            "YEAR" => Ok(PartitionIntervalUnit::Year),
            other => Err(format!(
                "unrecognized partition interval unit '{other}' (expected HOUR, DAY, MONTH or YEAR)"
            )),
        }
    }
}

impl fmt::Display for PartitionIntervalUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Partitioning scheme of an effective partition descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PartitionIntervalType {
    #[serde(rename = "TIME-UNIT", alias = "TIME_UNIT")]
    TimeUnit,
    #[serde(rename = "INGESTION-TIME", alias = "INGESTION_TIME")]
    IngestionTime,
    #[serde(rename = "INTEGER-RANGE", alias = "INTEGER_RANGE")]
    IntegerRange,
    /// Discrete list of partition values
    #[serde(rename = "COLUMN-VALUE", alias = "COLUMN_VALUE")]
    ColumnValue,
}

impl From<IntervalType> for PartitionIntervalType {
    fn from(value: IntervalType) -> Self {
        match value {
            IntervalType::TimeUnit => PartitionIntervalType::TimeUnit,
            IntervalType::IngestionTime => PartitionIntervalType::IngestionTime,
            IntervalType::IntegerRange => PartitionIntervalType::IntegerRange,
        }
    }
}

fn enabled_by_default() -> bool {
    true
}

/// Partition override supplied by the user.
///
/// Every field is optional; present fields replace whatever the resolver would
/// otherwise derive from the declared partition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartitionProfilerConfig {
    #[serde(default = "enabled_by_default")]
    pub enable_partitioning: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub partition_column_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub partition_interval_type: Option<PartitionIntervalType>,
    /// Raw unit string, validated at resolve time
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub partition_interval_unit: Option<String>,
    /// Number of interval units to look back
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub partition_interval: Option<u32>,
    /// Discrete partition values; exclusive with every interval field
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub partition_values: Option<Vec<Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub partition_integer_range_start: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub partition_integer_range_end: Option<i64>,
}

impl Default for PartitionProfilerConfig {
    fn default() -> Self {
        Self {
            enable_partitioning: true,
            partition_column_name: None,
            partition_interval_type: None,
            partition_interval_unit: None,
            partition_interval: None,
            partition_values: None,
            partition_integer_range_start: None,
            partition_integer_range_end: None,
        }
    }
}

impl PartitionProfilerConfig {
    /// Creates an enabled override with no fields set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an override that turns partitioning off.
    pub fn disabled() -> Self {
        Self {
            enable_partitioning: false,
            ..Self::default()
        }
    }

    /// Sets the partition column name.
    pub fn with_column(mut self, column: impl Into<String>) -> Self {
        self.partition_column_name = Some(column.into());
        self
    }

    /// Sets the partition interval type.
    pub fn with_interval_type(mut self, interval_type: PartitionIntervalType) -> Self {
        self.partition_interval_type = Some(interval_type);
        self
    }

    /// Sets the raw interval unit.
    pub fn with_interval_unit(mut self, unit: impl Into<String>) -> Self {
        self.partition_interval_unit = Some(unit.into());
        self
    }

    /// Sets the number of interval units.
    pub fn with_interval(mut self, interval: u32) -> Self {
        self.partition_interval = Some(interval);
        self
    }

    /// Sets the discrete partition values.
    pub fn with_values<I, V>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.partition_values = Some(values.into_iter().map(Into::into).collect());
        self
    }

    /// Sets the integer range bounds.
    pub fn with_integer_range(mut self, start: i64, end: i64) -> Self {
        self.partition_integer_range_start = Some(start);
        self.partition_integer_range_end = Some(end);
        self
    }
}

/// Profiler settings a user attaches to a table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableProfilerConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub partitioning: Option<PartitionProfilerConfig>,
}

impl TableProfilerConfig {
    /// Creates a profiler configuration carrying a partition override.
    pub fn with_partitioning(partitioning: PartitionProfilerConfig) -> Self {
        Self {
            partitioning: Some(partitioning),
        }
    }
}
