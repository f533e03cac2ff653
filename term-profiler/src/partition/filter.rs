//! Scan predicates derived from partition descriptors.

use chrono::{DateTime, Duration, Months, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

use super::strategy::{PARTITION_DATE_COLUMN, PARTITION_TIME_COLUMN};
use crate::entity::PartitionIntervalUnit;
use crate::error::{ProfilerError, Result};

/// BigQuery's column name limit.
const MAX_IDENTIFIER_LENGTH: usize = 300;

/// A predicate restricting a profiling scan to selected partitions.
#[derive(Debug, Clone, PartialEq)]
pub enum PartitionFilter {
    /// Rows whose partition column falls in the last `interval` units.
    TimeWindow {
        column: String,
        unit: PartitionIntervalUnit,
        interval: u32,
    },
    /// Rows whose partition column is one of the listed values.
    Values { column: String, values: Vec<Value> },
    /// Rows whose partition column lies in `[start, end]`.
    IntegerRange { column: String, start: i64, end: i64 },
}

impl PartitionFilter {
    /// Returns the partition column the filter applies to.
    pub fn column(&self) -> &str {
        match self {
            PartitionFilter::TimeWindow { column, .. }
            | PartitionFilter::Values { column, .. }
            | PartitionFilter::IntegerRange { column, .. } => column,
        }
    }

    /// Renders the filter as a BigQuery standard SQL predicate.
    ///
    /// Windows on `_PARTITIONTIME` compare against a TIMESTAMP bound and
    /// windows on `_PARTITIONDATE` against a DATE bound, whatever the unit.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use term_profiler::entity::PartitionIntervalUnit;
    /// use term_profiler::partition::PartitionFilter;
    ///
    /// let filter = PartitionFilter::TimeWindow {
    ///     column: "_PARTITIONDATE".to_string(),
    ///     unit: PartitionIntervalUnit::Day,
    ///     interval: 30,
    /// };
    /// assert_eq!(
    ///     filter.to_sql().unwrap(),
    ///     "`_PARTITIONDATE` >= DATE_SUB(CURRENT_DATE(), INTERVAL 30 DAY)"
    /// );
    /// ```
    pub fn to_sql(&self) -> Result<String> {
        let column = quote_identifier(self.column())?;
        match self {
            PartitionFilter::TimeWindow {
                column: name,
                unit,
                interval,
            } => {
                let bound = match unit {
                    PartitionIntervalUnit::Hour => {
                        format!("TIMESTAMP_SUB(CURRENT_TIMESTAMP(), INTERVAL {interval} HOUR)")
                    }
                    _ => format!("DATE_SUB(CURRENT_DATE(), INTERVAL {interval} {unit})"),
                };
                // pseudo-columns have a fixed type, so the bound is cast to match it
                let bound = match (name.as_str(), unit) {
                    (PARTITION_TIME_COLUMN, PartitionIntervalUnit::Hour) => bound,
                    (PARTITION_TIME_COLUMN, _) => format!("TIMESTAMP({bound})"),
                    (PARTITION_DATE_COLUMN, PartitionIntervalUnit::Hour) => format!("DATE({bound})"),
                    _ => bound,
                };
                Ok(format!("{column} >= {bound}"))
            }
            PartitionFilter::Values { values, .. } => {
                let literals = values
                    .iter()
                    .map(sql_literal)
                    .collect::<Result<Vec<_>>>()?;
                Ok(format!("{column} IN ({})", literals.join(", ")))
            }
            PartitionFilter::IntegerRange { start, end, .. } => {
                Ok(format!("{column} BETWEEN {start} AND {end}"))
            }
        }
    }

    /// Computes the lower bound of a time window relative to `now`.
    ///
    /// Months and years use calendar arithmetic. Returns `None` for non-time
    /// filters or when the bound is out of range.
    pub fn window_start(&self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        let PartitionFilter::TimeWindow { unit, interval, .. } = self else {
            return None;
        };
        let interval = *interval;
        match unit {
            PartitionIntervalUnit::Hour => now.checked_sub_signed(Duration::hours(interval.into())),
            PartitionIntervalUnit::Day => now.checked_sub_signed(Duration::days(interval.into())),
            PartitionIntervalUnit::Month => now.checked_sub_months(Months::new(interval)),
            PartitionIntervalUnit::Year => interval
                .checked_mul(12)
                .and_then(|months| now.checked_sub_months(Months::new(months))),
        }
    }
}

/// Validates a column identifier and quotes it with backticks.
pub fn quote_identifier(identifier: &str) -> Result<String> {
    static IDENTIFIER_REGEX: Lazy<Regex> = Lazy::new(|| {
        #[allow(clippy::expect_used)]
        Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*(\.[A-Za-z_][A-Za-z0-9_]*)*$")
            .expect("Hard-coded regex pattern should be valid")
    });

    if identifier.len() > MAX_IDENTIFIER_LENGTH {
        return Err(ProfilerError::InvalidIdentifier(format!(
            "partition column name too long (max {MAX_IDENTIFIER_LENGTH} characters)"
        )));
    }
    if !IDENTIFIER_REGEX.is_match(identifier) {
        return Err(ProfilerError::InvalidIdentifier(format!(
            "'{identifier}' must start with a letter or underscore and contain only letters, numbers, underscores and dots"
        )));
    }
    Ok(format!("`{identifier}`"))
}

fn sql_literal(value: &Value) -> Result<String> {
    match value {
        Value::String(s) => Ok(format!("'{}'", s.replace('\'', "''"))),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(true) => Ok("TRUE".to_string()),
        Value::Bool(false) => Ok("FALSE".to_string()),
        other => Err(ProfilerError::Configuration(format!(
            "unsupported partition value {other}"
        ))),
    }
}
