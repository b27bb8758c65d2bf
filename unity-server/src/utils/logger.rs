//! Logging Infrastructure
//!
//! Structured logging setup for development and production environments.

/// Initialize the logger with the configured level
///
/// `RUST_LOG` takes precedence over the configured level when set.
pub fn init_logger(log_level: &str) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_file(false)
        .with_line_number(false)
        .with_thread_ids(false)
        .with_target(false)
        .init();
}
