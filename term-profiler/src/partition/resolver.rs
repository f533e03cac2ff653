//! Resolution of a table's effective partition descriptor.

use tracing::{instrument, warn};

use super::options::PartitionOptions;
use super::strategy::PartitionStrategy;
use super::PartitionDetails;
use crate::entity::{PartitionProfilerConfig, Table};
use crate::error::Result;
use crate::log_partition;
use crate::logging::LogConfig;

/// Resolves the partition descriptor used to scope a table's profiling query.
///
/// Resolution order:
///
/// 1. An override with `enablePartitioning = false` disables partitioning.
/// 2. No declared partition and no override: no partitioning.
/// 3. The dialect's [`PartitionStrategy`] derives defaults from the declared
///    partition. Dialects without pseudo-columns derive nothing, so their
///    override is returned as-is and, without one, no partitioning applies.
/// 4. Override fields replace the derived defaults one by one.
///
/// # Examples
///
/// ```rust
/// use term_profiler::entity::{DatabaseServiceType, IntervalType, Table, TablePartition};
/// use term_profiler::partition::PartitionResolver;
///
/// let table = Table::new("svc.db.schema.events", DatabaseServiceType::BigQuery)
///     .with_partition(TablePartition::new(["e"], IntervalType::IngestionTime, Some("HOUR")));
///
/// let details = PartitionResolver::new().resolve(&table).unwrap().unwrap();
/// assert_eq!(details.partition_column_name, "_PARTITIONTIME");
/// assert_eq!(details.partition_interval, Some(30));
/// ```
#[derive(Debug, Clone, Default)]
pub struct PartitionResolver {
    log_config: LogConfig,
}

impl PartitionResolver {
    /// Creates a resolver with the default logging configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a resolver with a custom logging configuration.
    pub fn with_log_config(log_config: LogConfig) -> Self {
        Self { log_config }
    }

    /// Resolves partitioning using the override stored on the table itself.
    pub fn resolve(&self, table: &Table) -> Result<Option<PartitionDetails>> {
        let override_config = table
            .table_profiler_config
            .as_ref()
            .and_then(|config| config.partitioning.as_ref());
        self.resolve_with(table, override_config)
    }

    /// Resolves partitioning with an explicit override.
    #[instrument(skip(self, table, override_config), fields(
        table = %table.fully_qualified_name,
        service_type = %table.service_type,
    ))]
    pub fn resolve_with(
        &self,
        table: &Table,
        override_config: Option<&PartitionProfilerConfig>,
    ) -> Result<Option<PartitionDetails>> {
        let fqn = table.fully_qualified_name.as_str();

        let overrides = match override_config {
            Some(config) if !config.enable_partitioning => {
                log_partition!(self.log_config, table = %fqn, "Partitioning disabled by override");
                return Ok(None);
            }
            Some(config) => Some(
                PartitionOptions::from_override(fqn, config).map_err(|e| {
                    warn!(table = %fqn, error = %e, "Rejected partition override");
                    e
                })?,
            ),
            None => None,
        };

        if table.table_partition.is_none() && overrides.is_none() {
            log_partition!(self.log_config, table = %fqn, "Table is not partitioned");
            return Ok(None);
        }

        let strategy = PartitionStrategy::for_dialect(table.service_type);
        let defaults = strategy.declared_defaults(fqn, table.table_partition.as_ref())?;

        let options = match (defaults, overrides) {
            (Some(defaults), Some(overrides)) => defaults.merge(overrides),
            (Some(defaults), None) => defaults,
            (None, Some(overrides)) => overrides,
            (None, None) => {
                log_partition!(
                    self.log_config,
                    table = %fqn,
                    strategy = ?strategy,
                    "Declared partition not used by this dialect"
                );
                return Ok(None);
            }
        };

        let details = options.into_details(fqn).map_err(|e| {
            warn!(table = %fqn, error = %e, "Invalid partition configuration");
            e
        })?;

        log_partition!(
            self.log_config,
            table = %fqn,
            column = %details.partition_column_name,
            interval_type = ?details.partition_interval_type,
            interval_unit = ?details.partition_interval_unit,
            interval = ?details.partition_interval,
            "Resolved partition details"
        );

        Ok(Some(details))
    }
}
