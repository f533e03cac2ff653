//! Logging utilities and configuration for the Term profiler.
//!
//! Partition resolution and report writing are invoked once per table, so the
//! per-table events are gated behind [`LogConfig`] flags to keep large runs quiet.

use tracing::Level;

/// Logging configuration for profiler components.
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Level the per-table events are emitted at
    pub base_level: Level,
    /// Whether to log each partition resolution decision
    pub log_partition_details: bool,
    /// Whether to log each record written by a sink
    pub log_sink_writes: bool,
    /// Maximum length for logged field values (to prevent huge logs)
    pub max_field_length: usize,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            base_level: Level::DEBUG,
            log_partition_details: true,
            log_sink_writes: false,
            max_field_length: 256,
        }
    }
}

impl LogConfig {
    /// Creates a verbose configuration that surfaces every per-table event at INFO.
    pub fn verbose() -> Self {
        Self {
            base_level: Level::INFO,
            log_partition_details: true,
            log_sink_writes: true,
            max_field_length: 1024,
        }
    }

    /// Creates a minimal configuration for production with lowest overhead.
    pub fn production() -> Self {
        Self {
            base_level: Level::WARN,
            log_partition_details: false,
            log_sink_writes: false,
            max_field_length: 128,
        }
    }

    /// Creates a balanced configuration suitable for most use cases.
    pub fn balanced() -> Self {
        Self::default()
    }
}

/// Macro for conditional partition resolution logging, at the configured base level.
#[macro_export]
macro_rules! log_partition {
    ($config:expr, $($arg:tt)*) => {
        if $config.log_partition_details {
            $crate::log_at_level!($config.base_level, $($arg)*);
        }
    };
}

/// Macro for conditional sink write logging, at the configured base level.
#[macro_export]
macro_rules! log_sink_write {
    ($config:expr, $($arg:tt)*) => {
        if $config.log_sink_writes {
            $crate::log_at_level!($config.base_level, $($arg)*);
        }
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! log_at_level {
    ($level:expr, $($arg:tt)*) => {{
        let level: tracing::Level = $level;
        if level == tracing::Level::ERROR {
            tracing::error!($($arg)*);
        } else if level == tracing::Level::WARN {
            tracing::warn!($($arg)*);
        } else if level == tracing::Level::INFO {
            tracing::info!($($arg)*);
        } else if level == tracing::Level::DEBUG {
            tracing::debug!($($arg)*);
        } else {
            tracing::trace!($($arg)*);
        }
    }};
}

/// Truncates a string to the maximum field length if needed.
pub fn truncate_field(value: &str, max_length: usize) -> String {
    if value.len() <= max_length {
        return value.to_string();
    }
    let mut cut = max_length;
    while !value.is_char_boundary(cut) {
        cut -= 1;
    }
    format!("{}...(truncated)", &value[..cut])
}

/// Utilities for setting up structured logging.
pub mod setup {
    use tracing::Level;

    /// Configuration for the profiler's logging setup.
    #[derive(Debug, Clone)]
    pub struct LoggingConfig {
        /// Log level for the application
        pub level: Level,
        /// Log level for profiler components specifically
        pub profiler_level: Level,
        /// Whether to use JSON output format
        pub json_format: bool,
        /// Environment filter override
        pub env_filter: Option<String>,
    }

    impl Default for LoggingConfig {
        fn default() -> Self {
            Self {
                level: Level::INFO,
                profiler_level: Level::DEBUG,
                json_format: false,
                env_filter: None,
            }
        }
    }

    impl LoggingConfig {
        /// Creates a configuration for production use.
        pub fn production() -> Self {
            Self {
                level: Level::WARN,
                profiler_level: Level::INFO,
                json_format: true,
                env_filter: None,
            }
        }

        /// Creates a configuration for development use.
        pub fn development() -> Self {
            Self {
                level: Level::DEBUG,
                profiler_level: Level::DEBUG,
                json_format: false,
                env_filter: None,
            }
        }

        /// Sets whether to use JSON output format.
        pub fn with_json_format(mut self, json: bool) -> Self {
            self.json_format = json;
            self
        }

        /// Sets a custom environment filter.
        pub fn with_env_filter(mut self, filter: impl Into<String>) -> Self {
            self.env_filter = Some(filter.into());
            self
        }

        /// Builds the environment filter string.
        pub fn env_filter(&self) -> String {
            if let Some(ref filter) = self.env_filter {
                filter.clone()
            } else {
                format!(
                    "{},term_profiler={}",
                    self.level.as_str().to_lowercase(),
                    self.profiler_level.as_str().to_lowercase()
                )
            }
        }
    }

    /// Initializes logging. `RUST_LOG` takes precedence over the configured filter.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// use term_profiler::logging::setup::{init_logging, LoggingConfig};
    ///
    /// init_logging(LoggingConfig::development().with_json_format(true)).unwrap();
    /// ```
    pub fn init_logging(config: LoggingConfig) -> Result<(), Box<dyn std::error::Error>> {
        use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

        let env_filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(config.env_filter()));

        let fmt_layer = if config.json_format {
            tracing_subscriber::fmt::layer().json().boxed()
        } else {
            tracing_subscriber::fmt::layer().boxed()
        };

        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .try_init()?;

        Ok(())
    }
}


#[cfg(test)]
mod tests {
    use super::setup::LoggingConfig;
    use super::*;

    #[test]
    fn test_log_config_defaults() {
        let config = LogConfig::default();
        assert_eq!(config.base_level, Level::DEBUG);
        assert!(config.log_partition_details);
        assert!(!config.log_sink_writes);
        assert_eq!(config.max_field_length, 256);
    }

    #[test]
    fn test_log_config_production() {
        let config = LogConfig::production();
        assert_eq!(config.base_level, Level::WARN);
        assert!(!config.log_partition_details);
        assert!(!config.log_sink_writes);
    }

    #[test]
    fn test_macros_emit_at_base_level() {
        let logs = test_support::capture_logs(|| {
            log_partition!(LogConfig::verbose(), column = "e", "partition at info");
            log_partition!(LogConfig::balanced(), column = "e", "partition at debug");
            log_partition!(LogConfig::production(), column = "e", "partition suppressed");
            log_sink_write!(LogConfig::default(), "write suppressed");
            log_sink_write!(LogConfig::verbose(), "write at info");
        });

        let line = |message: &str| logs.lines().find(|l| l.contains(message)).map(str::to_string);
        assert!(line("partition at info").unwrap().contains("INFO"));
        assert!(line("partition at debug").unwrap().contains("DEBUG"));
        assert!(line("write at info").unwrap().contains("INFO"));
        assert!(line("partition suppressed").is_none());
        assert!(line("write suppressed").is_none());
    }

    #[test]
    fn test_truncate_field() {
        assert_eq!(truncate_field("hello", 10), "hello");
        assert_eq!(
            truncate_field("this is a very long text that should be truncated", 10),
            "this is a ...(truncated)"
        );
        // never splits a multi-byte character
        assert_eq!(truncate_field("ééé", 3), "é...(truncated)");
    }

    #[test]
    fn test_env_filter() {
        assert_eq!(LoggingConfig::default().env_filter(), "info,term_profiler=debug");
        assert_eq!(
            LoggingConfig::default().with_env_filter("warn").env_filter(),
            "warn"
        );
    }
}
