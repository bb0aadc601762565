//! Tracing subscriber setup.
//!
//! Console output for development, JSON structured logging for production.
//! The engine itself only emits `tracing` events; installing a subscriber is
//! left to the embedding application.

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, fmt};

use crate::config::LoggingConfig;

/// Tracing output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TracingFormat {
    /// Human-readable console output.
    Console,
    /// JSON structured logging.
    Json,
}

impl TracingFormat {
    /// Parse a format name; anything but "json" is console.
    pub fn from_name(name: &str) -> Self {
        match name {
            "json" => TracingFormat::Json,
            _ => TracingFormat::Console,
        }
    }
}

/// Tracing configuration.
#[derive(Debug, Clone)]
pub struct TracingConfig {
    /// Log level filter (e.g., "info", "debug", "qbridge_translate=trace").
    pub log_level: String,
    /// Output format.
    pub format: TracingFormat,
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            format: TracingFormat::Console,
        }
    }
}

impl TracingConfig {
    /// Create a new tracing config.
    pub fn new(log_level: impl Into<String>, format: TracingFormat) -> Self {
        Self {
            log_level: log_level.into(),
            format,
        }
    }

    /// Create config from environment variables.
    ///
    /// - `RUST_LOG`: log level (default: "info")
    /// - `QBRIDGE_LOG_FORMAT`: "console" or "json" (default: "console")
    pub fn from_env() -> Self {
        let log_level = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
        let format = std::env::var("QBRIDGE_LOG_FORMAT")
            .map_or(TracingFormat::Console, |f| TracingFormat::from_name(&f));

        Self { log_level, format }
    }
}

impl From<&LoggingConfig> for TracingConfig {
    fn from(logging: &LoggingConfig) -> Self {
        Self::new(logging.level.clone(), TracingFormat::from_name(&logging.format))
    }
}

/// Install the global tracing subscriber.
///
/// Fails if a global subscriber is already set.
pub fn init_tracing(config: TracingConfig) -> Result<(), Box<dyn std::error::Error>> {
    let env_filter = EnvFilter::try_new(&config.log_level)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let fmt_layer = match config.format {
        TracingFormat::Console => fmt::layer()
            .with_target(true)
            .with_thread_ids(false)
            .with_file(true)
            .with_line_number(true)
            .boxed(),
        TracingFormat::Json => fmt::layer()
            .with_target(true)
            .with_thread_ids(true)
            .with_file(true)
            .with_line_number(true)
            .json()
            .boxed(),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    tracing::info!("Tracing initialized");
    Ok(())
}

/// Initialize tracing with configuration from the environment.
pub fn init_default_tracing() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing(TracingConfig::from_env())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = TracingConfig::default();
        assert_eq!(config.log_level, "info");
        assert_eq!(config.format, TracingFormat::Console);
    }

    #[test]
    fn test_from_logging_config() {
        let logging = LoggingConfig {
            level: "debug".to_string(),
            format: "json".to_string(),
        };
        let config = TracingConfig::from(&logging);
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.format, TracingFormat::Json);
    }

    #[test]
    fn test_global_subscriber_installs_once() {
        assert!(init_tracing(TracingConfig::new("warn", TracingFormat::Json)).is_ok());
        assert!(init_default_tracing().is_err());
    }

    #[test]
    fn test_format_names() {
        assert_eq!(TracingFormat::from_name("json"), TracingFormat::Json);
        assert_eq!(TracingFormat::from_name("console"), TracingFormat::Console);
        assert_eq!(TracingFormat::from_name("pretty"), TracingFormat::Console);
    }
}
