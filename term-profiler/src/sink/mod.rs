//! Output sinks for profile and test results.
//!
//! A sink is opened once per run, receives one [`ProfileAndTests`] record per
//! table through [`Sink::write_record`], and is closed exactly once. Use
//! [`with_sink`] to guarantee the close happens even when the write loop fails.

mod file;
mod report;

pub use file::{FileSink, FileSinkConfig, TERMINATING_MARKER};
pub use report::{fields_with_line_breaks, ReportConfig, ReportFormatter};

use serde::Serialize;
use tracing::warn;

use crate::error::Result;
use crate::results::ProfileAndTests;

/// Progress of a sink over one run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SinkStatus {
    /// Fully qualified names of the tables written, in write order
    pub records: Vec<String>,
    pub warnings: Vec<String>,
    pub failures: Vec<String>,
}

impl SinkStatus {
    /// Registers a written record.
    pub fn records_written(&mut self, record: impl Into<String>) {
        self.records.push(record.into());
    }

    /// Registers a warning about a record.
    pub fn warning(&mut self, key: &str, reason: &str) {
        self.warnings.push(format!("{key}: {reason}"));
    }

    /// Registers a record that could not be written.
    pub fn failure(&mut self, key: &str, reason: &str) {
        self.failures.push(format!("{key}: {reason}"));
    }

    /// Number of records written.
    pub fn records_count(&self) -> usize {
        self.records.len()
    }

    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }
}

/// A destination for per-table results.
///
/// Implementations hold unsynchronized mutable state; callers profiling
/// tables concurrently must serialize access to a given sink.
pub trait Sink {
    /// Writes one record.
    fn write_record(&mut self, record: &ProfileAndTests) -> Result<()>;

    /// Returns a snapshot of the sink's progress.
    fn status(&self) -> SinkStatus;

    /// Finalizes the output and releases the underlying resource.
    fn close(&mut self) -> Result<()>;
}

/// Runs `body` against `sink` and closes the sink afterwards, whatever the
/// outcome of `body`.
///
/// An error from `body` takes precedence over an error from `close`.
///
/// # Examples
///
/// ```rust,no_run
/// use term_profiler::results::ProfileAndTests;
/// use term_profiler::sink::{with_sink, FileSink, FileSinkConfig, Sink};
///
/// # fn records() -> Vec<ProfileAndTests> { Vec::new() }
/// let sink = FileSink::open(FileSinkConfig::new("/tmp/profiler/report.txt"))?;
/// let status = with_sink(sink, |sink| {
///     for record in records() {
///         sink.write_record(&record)?;
///     }
///     Ok(sink.status())
/// })?;
/// println!("wrote {} tables", status.records_count());
/// # Ok::<(), term_profiler::error::ProfilerError>(())
/// ```
pub fn with_sink<S, F, T>(mut sink: S, body: F) -> Result<T>
where
    S: Sink,
    F: FnOnce(&mut S) -> Result<T>,
{
    let outcome = body(&mut sink);
    let closed = sink.close();

    match outcome {
        Ok(value) => closed.map(|()| value),
        Err(e) => {
            if let Err(close_error) = closed {
                warn!(error = %close_error, "Failed to close sink after an aborted run");
            }
            Err(e)
        }
    }
}
