//! Engine configuration.
//!
//! Supports loading configuration from:
//! 1. Configuration files (YAML)
//! 2. Environment variables (with QBRIDGE_ prefix)
//!
//! Configuration precedence (highest to lowest):
//! 1. Environment variables
//! 2. Configuration file
//! 3. Default values

use std::path::Path;

use serde::{Deserialize, Serialize};

use qbridge_ir::{Device, IrResult};

use crate::error::ConfigError;
use crate::rules::EXTENSIONS;

/// Complete engine configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Target device to translate onto
    #[serde(default)]
    pub device: Option<DeviceConfig>,

    /// Rule extensions merged over the common ruleset
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,

    /// Log the cause of masked unknown-gate errors
    #[serde(default = "default_true")]
    pub log_masked_causes: bool,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Target device description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DeviceConfig {
    /// `num_qubits` line qubits.
    Line {
        /// Device name
        #[serde(default = "default_line_name")]
        name: String,
        /// Number of qubits
        num_qubits: u32,
    },
    /// A `rows` by `cols` grid, row-major.
    Grid {
        /// Device name
        #[serde(default = "default_grid_name")]
        name: String,
        /// Number of rows
        rows: i32,
        /// Number of columns
        cols: i32,
    },
}

impl DeviceConfig {
    /// Build the described device.
    pub fn build(&self) -> IrResult<Device> {
        match self {
            DeviceConfig::Line { name, num_qubits } => Device::line(name.clone(), *num_qubits),
            DeviceConfig::Grid { name, rows, cols } => Device::grid(name.clone(), *rows, *cols),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level: "trace", "debug", "info", "warn", "error"
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format: "console" or "json"
    #[serde(default = "default_log_format")]
    pub format: String,
}

// Default value functions
fn default_extensions() -> Vec<String> {
    vec!["xmon".to_string()]
}

fn default_true() -> bool {
    true
}

fn default_line_name() -> String {
    "line".to_string()
}

fn default_grid_name() -> String {
    "grid".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "console".to_string()
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            device: None,
            extensions: default_extensions(),
            log_masked_causes: true,
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl EngineConfig {
    /// Load configuration from a YAML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path.as_ref())?;
        Self::from_yaml_str(&contents)
    }

    /// Parse and validate configuration from YAML text.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let config: EngineConfig = serde_yaml_ng::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Defaults overridden by environment variables.
    pub fn from_env() -> Self {
        EngineConfig::default().merge_env()
    }

    /// Load configuration with the following precedence:
    /// 1. Load from file if provided
    /// 2. Apply environment variable overrides
    pub fn load(config_file: Option<&Path>) -> Result<Self, ConfigError> {
        let config = match config_file {
            Some(path) => Self::from_file(path)?,
            None => EngineConfig::default(),
        };

        let config = config.merge_env();
        config.validate()?;
        Ok(config)
    }

    /// Merge process environment variables into this configuration.
    ///
    /// - `QBRIDGE_EXTENSIONS`: comma-separated extension names, may be empty
    /// - `QBRIDGE_LOG_MASKED`: "true" or "false"
    /// - `QBRIDGE_LOG_LEVEL`, `QBRIDGE_LOG_FORMAT`
    /// - `QBRIDGE_DEVICE_LINE`: qubit count of a line device
    #[must_use]
    pub fn merge_env(self) -> Self {
        self.merge_vars(|key| std::env::var(key).ok())
    }

    /// Merge variables from `lookup` into this configuration.
    ///
    /// Variables that are absent, or fail to parse, leave the corresponding
    /// fields unchanged.
    #[must_use]
    pub fn merge_vars(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(v) = lookup("QBRIDGE_EXTENSIONS") {
            self.extensions = v
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from)
                .collect();
        }
        if let Some(v) = lookup("QBRIDGE_LOG_MASKED") {
            if let Ok(val) = v.parse() {
                self.log_masked_causes = val;
            }
        }

        // Logging
        if let Some(v) = lookup("QBRIDGE_LOG_LEVEL") {
            self.logging.level = v;
        }
        if let Some(v) = lookup("QBRIDGE_LOG_FORMAT") {
            self.logging.format = v;
        }

        // Device
        if let Some(v) = lookup("QBRIDGE_DEVICE_LINE") {
            if let Ok(num_qubits) = v.parse() {
                self.device = Some(DeviceConfig::Line {
                    name: default_line_name(),
                    num_qubits,
                });
            }
        }

        self
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for name in &self.extensions {
            if !EXTENSIONS.contains(&name.as_str()) {
                return Err(ConfigError::Invalid(format!(
                    "Unknown ruleset extension: {name}"
                )));
            }
        }

        match &self.device {
            Some(DeviceConfig::Line { num_qubits: 0, .. }) => {
                return Err(ConfigError::Invalid(
                    "num_qubits must be greater than 0".to_string(),
                ));
            }
            Some(DeviceConfig::Grid { rows, cols, .. }) if *rows <= 0 || *cols <= 0 => {
                return Err(ConfigError::Invalid(format!(
                    "Grid dimensions must be positive, got {rows}x{cols}"
                )));
            }
            _ => {}
        }

        // Validate log level
        match self.logging.level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            other => {
                return Err(ConfigError::Invalid(format!("Invalid log level: {other}")));
            }
        }

        // Validate log format
        match self.logging.format.as_str() {
            "console" | "json" => {}
            other => {
                return Err(ConfigError::Invalid(format!(
                    "Invalid log format: {other}"
                )));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qbridge_ir::TargetQubit;
    use std::collections::HashMap;

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = EngineConfig::default();
        assert!(config.device.is_none());
        assert_eq!(config.extensions, vec!["xmon"]);
        assert!(config.log_masked_causes);
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.logging.format, "console");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_yaml_parsing() {
        let yaml = r#"
device:
  kind: grid
  name: foxtail
  rows: 2
  cols: 11
extensions: []
log_masked_causes: false
logging:
  level: debug
  format: json
"#;
        let config = EngineConfig::from_yaml_str(yaml).unwrap();
        assert!(config.extensions.is_empty());
        assert!(!config.log_masked_causes);
        assert_eq!(config.logging.format, "json");

        let device = config.device.unwrap().build().unwrap();
        assert_eq!(device.name, "foxtail");
        assert_eq!(device.num_qubits(), 22);
    }

    #[test]
    fn test_yaml_defaults_fill_missing_fields() {
        let config = EngineConfig::from_yaml_str("device:\n  kind: line\n  num_qubits: 3\n").unwrap();
        assert_eq!(config.extensions, vec!["xmon"]);
        assert_eq!(config.logging, LoggingConfig::default());

        let device = config.device.unwrap().build().unwrap();
        assert_eq!(device.name, "line");
        assert_eq!(device.qubits(), TargetQubit::line_range(3).as_slice());
    }

    #[test]
    fn test_yaml_parse_error() {
        let err = EngineConfig::from_yaml_str("device: [not, a, device]").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_validation() {
        let mut config = EngineConfig::default();
        config.extensions.push("sycamore".into());
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        let mut config = EngineConfig::default();
        config.device = Some(DeviceConfig::Line {
            name: "empty".into(),
            num_qubits: 0,
        });
        assert!(config.validate().is_err());

        let mut config = EngineConfig::default();
        config.device = Some(DeviceConfig::Grid {
            name: "flat".into(),
            rows: 0,
            cols: 4,
        });
        assert!(config.validate().is_err());

        let mut config = EngineConfig::default();
        config.logging.level = "verbose".into();
        assert!(config.validate().is_err());

        let mut config = EngineConfig::default();
        config.logging.format = "xml".into();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_merge_vars_overrides() {
        let config = EngineConfig::default().merge_vars(vars(&[
            ("QBRIDGE_EXTENSIONS", ""),
            ("QBRIDGE_LOG_MASKED", "false"),
            ("QBRIDGE_LOG_LEVEL", "trace"),
            ("QBRIDGE_DEVICE_LINE", "5"),
        ]));

        assert!(config.extensions.is_empty());
        assert!(!config.log_masked_causes);
        assert_eq!(config.logging.level, "trace");
        assert_eq!(config.logging.format, "console");
        assert_eq!(
            config.device,
            Some(DeviceConfig::Line {
                name: "line".into(),
                num_qubits: 5
            })
        );
    }

    #[test]
    fn test_merge_vars_ignores_unparsable_values() {
        let config = EngineConfig::default().merge_vars(vars(&[
            ("QBRIDGE_LOG_MASKED", "sometimes"),
            ("QBRIDGE_DEVICE_LINE", "many"),
        ]));
        assert!(config.log_masked_causes);
        assert!(config.device.is_none());
    }
}
