//! Per-field partition options and the override merge.

use serde_json::Value;

use super::PartitionDetails;
use crate::entity::{PartitionIntervalType, PartitionIntervalUnit, PartitionProfilerConfig};
use crate::error::{ProfilerError, Result};

/// Partition settings where every field carries its own presence.
///
/// Dialect strategies produce one of these from the declared partition, the
/// user override produces another, and [`PartitionOptions::merge`] combines
/// them field by field before [`PartitionOptions::into_details`] checks the
/// descriptor invariants.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PartitionOptions {
    pub column_name: Option<String>,
    pub interval_type: Option<PartitionIntervalType>,
    pub interval_unit: Option<PartitionIntervalUnit>,
    pub interval: Option<u32>,
    pub values: Option<Vec<Value>>,
    pub range_start: Option<i64>,
    pub range_end: Option<i64>,
}

impl PartitionOptions {
    /// Parses a user override, validating the unit and the values/interval exclusion.
    pub fn from_override(table: &str, config: &PartitionProfilerConfig) -> Result<Self> {
        let interval_unit = config
            .partition_interval_unit
            .as_deref()
            .map(|unit| {
                unit.parse::<PartitionIntervalUnit>()
                    .map_err(|message| ProfilerError::invalid_partition(table, message))
            })
            .transpose()?;

        let options = Self {
            column_name: config.partition_column_name.clone(),
            interval_type: config.partition_interval_type,
            interval_unit,
            interval: config.partition_interval,
            values: config
                .partition_values
                .clone()
                .filter(|values| !values.is_empty()),
            range_start: config.partition_integer_range_start,
            range_end: config.partition_integer_range_end,
        };
        options.check_exclusive(table)?;
        Ok(options)
    }

    /// Returns true if any interval-family field is set.
    pub fn has_interval_fields(&self) -> bool {
        self.interval_unit.is_some()
            || self.interval.is_some()
            || self.range_start.is_some()
            || self.range_end.is_some()
    }

    /// Overlays `overrides` on top of `self`.
    ///
    /// Each present override field wins individually. Discrete values bypass
    /// interval defaulting entirely: the merged options carry no interval fields.
    pub fn merge(self, overrides: PartitionOptions) -> PartitionOptions {
        let column_name = overrides.column_name.or(self.column_name);

        if let Some(values) = overrides.values {
            return PartitionOptions {
                column_name,
                interval_type: overrides
                    .interval_type
                    .or(Some(PartitionIntervalType::ColumnValue)),
                values: Some(values),
                ..PartitionOptions::default()
            };
        }

        PartitionOptions {
            column_name,
            interval_type: overrides.interval_type.or(self.interval_type),
            interval_unit: overrides.interval_unit.or(self.interval_unit),
            interval: overrides.interval.or(self.interval),
            values: self.values,
            range_start: overrides.range_start.or(self.range_start),
            range_end: overrides.range_end.or(self.range_end),
        }
    }

    /// Validates the options and produces an enabled descriptor.
    pub fn into_details(self, table: &str) -> Result<PartitionDetails> {
        self.check_exclusive(table)?;

        let column_name = match self.column_name {
            Some(name) if !name.trim().is_empty() => name,
            _ => {
                return Err(ProfilerError::invalid_partition(
                    table,
                    "a partition column name is required when partitioning is enabled",
                ))
            }
        };

        if self.interval_type == Some(PartitionIntervalType::IntegerRange) {
            match (self.range_start, self.range_end) {
                (Some(start), Some(end)) if start > end => {
                    return Err(ProfilerError::invalid_partition(
                        table,
                        format!("integer range start {start} is greater than end {end}"),
                    ))
                }
                (Some(_), Some(_)) => {}
                _ => {
                    return Err(ProfilerError::invalid_partition(
                        table,
                        "integer range partitioning requires partitionIntegerRangeStart and partitionIntegerRangeEnd",
                    ))
                }
            }
        }

        Ok(PartitionDetails {
            enable_partitioning: true,
            partition_column_name: column_name,
            partition_interval_type: self.interval_type,
            partition_interval_unit: self.interval_unit,
            partition_interval: self.interval,
            partition_values: self.values,
            partition_integer_range_start: self.range_start,
            partition_integer_range_end: self.range_end,
        })
    }

    fn check_exclusive(&self, table: &str) -> Result<()> {
        if self.values.is_some() && self.has_interval_fields() {
            return Err(ProfilerError::invalid_partition(
                table,
                "partitionValues cannot be combined with interval or integer range fields",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn day_defaults(column: &str) -> PartitionOptions {
        PartitionOptions {
            column_name: Some(column.to_string()),
            interval_type: Some(PartitionIntervalType::TimeUnit),
            interval_unit: Some(PartitionIntervalUnit::Day),
            interval: Some(30),
            ..PartitionOptions::default()
        }
    }

    #[test]
    fn test_merge_field_by_field() {
        let overrides = PartitionOptions {
            interval: Some(3),
            ..PartitionOptions::default()
        };
        let merged = day_defaults("e").merge(overrides);

        assert_eq!(merged.column_name.as_deref(), Some("e"));
        assert_eq!(merged.interval_unit, Some(PartitionIntervalUnit::Day));
        assert_eq!(merged.interval, Some(3));
    }

    #[test]
    fn test_merge_values_drop_interval_defaults() {
        let overrides = PartitionOptions {
            values: Some(vec![json!("2022-01-01")]),
            ..PartitionOptions::default()
        };
        let merged = day_defaults("e").merge(overrides);

        assert_eq!(merged.column_name.as_deref(), Some("e"));
        assert_eq!(merged.interval_type, Some(PartitionIntervalType::ColumnValue));
        assert!(!merged.has_interval_fields());
        assert_eq!(merged.values, Some(vec![json!("2022-01-01")]));
    }

    #[test]
    fn test_from_override_rejects_unknown_unit() {
        let config = PartitionProfilerConfig::new()
            .with_column("e")
            .with_interval_unit("day");
        let err = PartitionOptions::from_override("t1", &config).unwrap_err();
        assert!(err.is_partition_config());
        assert!(err.to_string().contains("'day'"));
    }

    #[test]
    fn test_from_override_rejects_values_with_interval() {
        let config = PartitionProfilerConfig::new()
            .with_column("e")
            .with_interval(1)
            .with_values(["a", "b"]);
        assert!(PartitionOptions::from_override("t1", &config)
            .unwrap_err()
            .is_partition_config());
    }

    #[test]
    fn test_from_override_treats_empty_values_as_absent() {
        let config = PartitionProfilerConfig::new()
            .with_column("e")
            .with_interval(1)
            .with_values(Vec::<Value>::new());
        let options = PartitionOptions::from_override("t1", &config).unwrap();
        assert!(options.values.is_none());
    }

    #[test]
    fn test_into_details_requires_column() {
        let err = PartitionOptions::default().into_details("t1").unwrap_err();
        assert!(err.is_partition_config());

        let blank = PartitionOptions {
            column_name: Some("  ".to_string()),
            ..PartitionOptions::default()
        };
        assert!(blank.into_details("t1").is_err());
    }

    #[test]
    fn test_into_details_checks_integer_range() {
        let missing = PartitionOptions {
            column_name: Some("id".to_string()),
            interval_type: Some(PartitionIntervalType::IntegerRange),
            range_start: Some(0),
            ..PartitionOptions::default()
        };
        assert!(missing.clone().into_details("t1").is_err());

        let inverted = PartitionOptions {
            range_start: Some(100),
            range_end: Some(0),
            ..missing.clone()
        };
        assert!(inverted.into_details("t1").is_err());

        let details = PartitionOptions {
            range_end: Some(100),
            ..missing
        }
        .into_details("t1")
        .unwrap();
        assert!(details.enable_partitioning);
        assert_eq!(details.partition_integer_range_end, Some(100));
    }
}
