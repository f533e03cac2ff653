//! Sink writing profile reports to a local text file.

use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{info, instrument, warn};

use super::report::{fields_with_line_breaks, ReportConfig, ReportFormatter};
use super::{Sink, SinkStatus};
use crate::error::{ProfilerError, Result};
use crate::log_sink_write;
use crate::logging::{truncate_field, LogConfig};
use crate::results::ProfileAndTests;

/// Appended by [`FileSink::close`]. A report without it comes from a run that
/// did not finish.
pub const TERMINATING_MARKER: &str = "\n]";

/// Configuration for [`FileSink`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileSinkConfig {
    /// Output path; missing parent directories are created
    pub filename: PathBuf,
    /// Render the test results section
    #[serde(default = "default_include_tests")]
    pub include_tests: bool,
}

fn default_include_tests() -> bool {
    true
}

impl FileSinkConfig {
    pub fn new(filename: impl Into<PathBuf>) -> Self {
        Self {
            filename: filename.into(),
            include_tests: true,
        }
    }

    /// Sets whether test results are rendered.
    pub fn with_tests(mut self, include: bool) -> Self {
        self.include_tests = include;
        self
    }
}

/// Writes one text block per table into a single file.
///
/// The file is truncated on [`open`](FileSink::open). Records are separated by
/// a blank line and [`close`](Sink::close) appends [`TERMINATING_MARKER`].
/// Closing twice, or writing after close, fails with
/// [`ProfilerError::SinkIo`].
#[derive(Debug)]
pub struct FileSink {
    path: PathBuf,
    writer: Option<BufWriter<File>>,
    formatter: ReportFormatter,
    wrote_something: bool,
    status: SinkStatus,
    log_config: LogConfig,
}

impl FileSink {
    /// Opens the sink, creating parent directories and truncating the file.
    #[instrument(skip(config), fields(path = %config.filename.display()))]
    pub fn open(config: FileSinkConfig) -> Result<Self> {
        let path = config.filename;

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            if !parent.is_dir() {
                fs::create_dir_all(parent).map_err(|e| ProfilerError::sink_io(&path, e))?;
            }
        }

        let file = File::create(&path).map_err(|e| ProfilerError::sink_io(&path, e))?;
        info!(path = %path.display(), "Opened file sink");

        let report_config = ReportConfig {
            include_tests: config.include_tests,
        };
        Ok(Self {
            path,
            writer: Some(BufWriter::new(file)),
            formatter: ReportFormatter::with_config(report_config),
            wrote_something: false,
            status: SinkStatus::default(),
            log_config: LogConfig::default(),
        })
    }

    /// Opens the sink from an untyped configuration block.
    ///
    /// ```rust,no_run
    /// use term_profiler::sink::FileSink;
    ///
    /// let sink = FileSink::create(serde_json::json!({"filename": "/tmp/profiler.txt"}))?;
    /// # Ok::<(), term_profiler::error::ProfilerError>(())
    /// ```
    pub fn create(config: serde_json::Value) -> Result<Self> {
        let config: FileSinkConfig = serde_json::from_value(config)
            .map_err(|e| ProfilerError::Configuration(format!("invalid file sink config: {e}")))?;
        Self::open(config)
    }

    /// Sets the logging configuration.
    pub fn with_log_config(mut self, log_config: LogConfig) -> Self {
        self.log_config = log_config;
        self
    }

    /// Output path of the sink.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns true until the sink has been closed.
    pub fn is_open(&self) -> bool {
        self.writer.is_some()
    }

    fn writer(&mut self) -> Result<&mut BufWriter<File>> {
        let path = &self.path;
        self.writer
            .as_mut()
            .ok_or_else(|| ProfilerError::sink_io(path, closed_error()))
    }

    /// Writes `block`, preceded by the record separator unless it is the first.
    ///
    /// If the separator lands but the block write fails, the file keeps a
    /// trailing blank line and `wrote_something` is left unchanged.
    fn write_block(&mut self, block: &str) -> Result<()> {
        let separator = self.wrote_something;
        let path = self.path.clone();
        let writer = self.writer()?;
        if separator {
            writer
                .write_all(b"\n")
                .map_err(|e| ProfilerError::sink_io(&path, e))?;
        }
        writer
            .write_all(block.as_bytes())
            .map_err(|e| ProfilerError::sink_io(&path, e))
    }
}

fn closed_error() -> io::Error {
    io::Error::new(io::ErrorKind::BrokenPipe, "file sink is already closed")
}

impl Sink for FileSink {
    fn write_record(&mut self, record: &ProfileAndTests) -> Result<()> {
        let table = record.table_name().to_string();

        for field in fields_with_line_breaks(record, self.formatter.config()) {
            warn!(
                table = %table,
                field = %truncate_field(&field, self.log_config.max_field_length),
                "Value contains a line break, report layout will break"
            );
            self.status
                .warning(&table, &format!("{field} contains a line break"));
        }

        let block = self.formatter.format(record)?;
        if let Err(e) = self.write_block(&block) {
            self.status.failure(&table, &e.to_string());
            return Err(e);
        }

        self.wrote_something = true;
        self.status.records_written(table.as_str());
        log_sink_write!(self.log_config, table = %table, bytes = block.len(), "Wrote profile record");
        Ok(())
    }

    fn status(&self) -> SinkStatus {
        self.status.clone()
    }

    fn close(&mut self) -> Result<()> {
        let mut writer = self
            .writer
            .take()
            .ok_or_else(|| ProfilerError::sink_io(&self.path, closed_error()))?;

        writer
            .write_all(TERMINATING_MARKER.as_bytes())
            .and_then(|()| writer.flush())
            .map_err(|e| ProfilerError::sink_io(&self.path, e))?;

        info!(
            path = %self.path.display(),
            records = self.status.records_count(),
            "Closed file sink"
        );
        Ok(())
    }
}

impl Drop for FileSink {
    fn drop(&mut self) {
        if self.writer.is_some() {
            warn!(
                path = %self.path.display(),
                "File sink dropped without close, report has no terminating marker"
            );
        }
    }
}
