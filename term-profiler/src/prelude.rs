//! Prelude for commonly used types and traits in term-profiler.

pub use crate::entity::{
    DatabaseServiceType, IntervalType, PartitionProfilerConfig, Table, TablePartition,
    TableProfilerConfig,
};
pub use crate::error::{ErrorContext, ProfilerError, Result};
pub use crate::logging::LogConfig;
pub use crate::partition::{PartitionDetails, PartitionFilter, PartitionResolver};
pub use crate::results::{MetricResults, MetricValue, ProfileAndTests};
pub use crate::sink::{with_sink, FileSink, FileSinkConfig, Sink, SinkStatus};
