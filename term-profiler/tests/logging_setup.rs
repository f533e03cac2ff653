//! Global subscriber installation.

use term_profiler::logging::setup::{init_logging, LoggingConfig};

#[test]
fn test_init_logging_installs_a_single_global_subscriber() {
    let config = LoggingConfig::production().with_env_filter("warn,term_profiler=info");
    assert_eq!(config.env_filter(), "warn,term_profiler=info");
    assert!(config.json_format);

    init_logging(config).unwrap();
    assert!(init_logging(LoggingConfig::development()).is_err());
}
