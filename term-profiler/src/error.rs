//! Error types for the Term profiler.
//!
//! All fallible operations in this crate return [`ProfilerError`] through the
//! [`Result`] alias. Partition resolution surfaces configuration problems
//! immediately; the report sink surfaces I/O problems and never retries.

use std::path::PathBuf;

use thiserror::Error;

/// The main error type for the Term profiler.
#[derive(Error, Debug)]
pub enum ProfilerError {
    /// A partition override is malformed or contradictory.
    #[error("Invalid partition configuration for '{table}': {message}")]
    InvalidPartitionConfig {
        /// Fully qualified name of the table being resolved
        table: String,
        /// Detailed error message
        message: String,
    },

    /// Error related to sink or entity configuration.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The report sink could not create, open or write its output.
    #[error("Sink I/O error on '{}': {source}", path.display())]
    SinkIo {
        /// Target path of the sink
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Error from serialization/deserialization operations.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// A column name cannot be embedded in a partition predicate.
    #[error("Invalid identifier: {0}")]
    InvalidIdentifier(String),

    /// Generic internal error for unexpected conditions.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// A type alias for `Result<T, ProfilerError>`.
pub type Result<T> = std::result::Result<T, ProfilerError>;

impl ProfilerError {
    /// Creates a new partition configuration error for the given table.
    pub fn invalid_partition(table: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidPartitionConfig {
            table: table.into(),
            message: message.into(),
        }
    }

    /// Creates a new sink I/O error.
    pub fn sink_io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::SinkIo {
            path: path.into(),
            source,
        }
    }

    /// Returns true if this error was raised while resolving partitions.
    pub fn is_partition_config(&self) -> bool {
        matches!(self, Self::InvalidPartitionConfig { .. })
    }

    /// Returns true if this error came from the report sink.
    pub fn is_sink_io(&self) -> bool {
        matches!(self, Self::SinkIo { .. })
    }
}

impl From<serde_json::Error> for ProfilerError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

impl From<std::fmt::Error> for ProfilerError {
    fn from(err: std::fmt::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

/// Extension trait for adding context to errors.
pub trait ErrorContext<T> {
    /// Adds context to an error.
    fn context(self, msg: &str) -> Result<T>;

    /// Adds context with a lazy message.
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T, E> ErrorContext<T> for std::result::Result<T, E>
where
    E: Into<ProfilerError>,
{
    fn context(self, msg: &str) -> Result<T> {
        self.with_context(|| msg.to_string())
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| {
            let msg = f();
            match e.into() {
                ProfilerError::Internal(inner) => ProfilerError::Internal(format!("{msg}: {inner}")),
                other => ProfilerError::Internal(format!("{msg}: {other}")),
            }
        })
    }
}
