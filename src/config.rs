// Copyright 2026 QubitOS Contributors
// SPDX-License-Identifier: Apache-2.0

//! Configuration management.
//!
//! Configuration is loaded from multiple sources with the following priority
//! (later sources override earlier ones):
//!
//! 1. Built-in defaults
//! 2. mrseq.yaml file
//! 3. Environment variables (QUBITOS_*)
//! 4. CLI arguments

use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;

use crate::error::{Error, Result};

/// Default config file locations, searched in order.
const DEFAULT_PATHS: &[&str] = &["mrseq.yaml", "mrseq.yml", "/etc/qubitos/mrseq.yaml"];

/// Main configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Validation settings
    #[serde(default)]
    pub validation: ValidationConfig,

    /// Sequence settings
    #[serde(default)]
    pub sequence: SequenceConfig,
}

impl Config {
    /// Load configuration from file and environment.
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        let mut config = Config::default();

        if let Some(path) = config_path {
            if path.exists() {
                config = Self::from_file(path)?;
            }
        } else {
            for path in DEFAULT_PATHS {
                let path = Path::new(path);
                if path.exists() {
                    config = Self::from_file(path)?;
                    break;
                }
            }
        }

        config.apply_env_overrides();

        Ok(config)
    }

    fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_yaml::from_str(&content)?)
    }

    /// Apply environment variable overrides.
    fn apply_env_overrides(&mut self) {
        if let Ok(val) = env::var("QUBITOS_LOG_LEVEL") {
            self.logging.level = val;
        }
        if let Ok(val) = env::var("QUBITOS_LOG_FORMAT") {
            self.logging.format = val;
        }
        if let Ok(val) = env::var("QUBITOS_STRICT_VALIDATION") {
            self.validation.strict = val.to_lowercase() == "true" || val == "1";
        }
        if let Ok(val) = env::var("QUBITOS_MRSEQ_BACKEND") {
            self.sequence.backend = val;
        }
    }

    /// Validate configuration.
    pub fn validate(&self) -> Result<()> {
        if !matches!(self.logging.format.as_str(), "pretty" | "json") {
            return Err(Error::Config(format!(
                "unknown log format '{}', expected 'pretty' or 'json'",
                self.logging.format
            )));
        }
        if self.sequence.backend.trim().is_empty() {
            return Err(Error::Config("sequence backend cannot be empty".into()));
        }
        if let Some(version) = &self.sequence.default_version {
            if version.trim().is_empty() {
                return Err(Error::Config(
                    "default sequence version cannot be empty".into(),
                ));
            }
        }
        if !self.validation.strict {
            tracing::warn!(
                "Strict validation is off; sequence issues are reported as warnings only"
            );
        }
        Ok(())
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format (pretty, json)
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String {
    "info".into()
}

fn default_log_format() -> String {
    "pretty".into()
}

/// Validation configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationConfig {
    /// Fail on any sequence issue instead of warning
    #[serde(default = "default_true")]
    pub strict: bool,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self { strict: true }
    }
}

fn default_true() -> bool {
    true
}

/// Sequence configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SequenceConfig {
    /// Registered spectrometer supplying the parameter catalog
    #[serde(default = "default_backend")]
    pub backend: String,

    /// Version stamped on new sequences (crate version if unset)
    #[serde(default)]
    pub default_version: Option<String>,
}

impl Default for SequenceConfig {
    fn default() -> Self {
        Self {
            backend: default_backend(),
            default_version: None,
        }
    }
}

fn default_backend() -> String {
    crate::backend::GenericSpectrometer::NAME.into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.logging.format, "pretty");
        assert!(config.validation.strict);
        assert_eq!(config.sequence.backend, "generic");
        assert!(config.sequence.default_version.is_none());
    }

    #[test]
    fn test_config_validation() {
        let config = Config::default();
        assert!(config.validate().is_ok());

        let mut bad_config = Config::default();
        bad_config.logging.format = "xml".into();
        let msg = bad_config.validate().unwrap_err().to_string();
        assert!(msg.contains("log format"));
    }

    #[test]
    fn test_validate_empty_backend() {
        let mut config = Config::default();
        config.sequence.backend = "  ".into();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_empty_default_version() {
        let mut config = Config::default();
        config.sequence.default_version = Some(String::new());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_non_strict_still_passes() {
        let mut config = Config::default();
        config.validation.strict = false;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_load_from_file() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            f,
            r#"
logging:
  format: json
sequence:
  backend: bench
  default_version: "0.0.1"
"#
        )
        .unwrap();

        let config = Config::load(Some(f.path())).unwrap();
        assert_eq!(config.logging.format, "json");
        assert_eq!(config.sequence.backend, "bench");
        assert_eq!(config.sequence.default_version.as_deref(), Some("0.0.1"));
    }

    #[test]
    fn test_config_load_nonexistent_file() {
        // A missing explicit path falls back to defaults
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.yaml");
        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.logging.format, "pretty");
        assert!(config.sequence.default_version.is_none());
    }

    #[test]
    fn test_config_load_invalid_yaml() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        writeln!(f, "{{{{not: valid: yaml::::").unwrap();

        let result = Config::load(Some(f.path()));
        assert!(matches!(result, Err(Error::Serialization(_))));
    }

    #[test]
    fn test_env_overrides() {
        // One test touches the environment so parallel tests do not race
        let mut config = Config::default();
        std::env::set_var("QUBITOS_LOG_LEVEL", "debug");
        std::env::set_var("QUBITOS_MRSEQ_BACKEND", "bench");
        std::env::set_var("QUBITOS_STRICT_VALIDATION", "false");
        config.apply_env_overrides();
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.sequence.backend, "bench");
        assert!(!config.validation.strict);

        std::env::set_var("QUBITOS_STRICT_VALIDATION", "1");
        config.apply_env_overrides();
        assert!(config.validation.strict);

        std::env::remove_var("QUBITOS_LOG_LEVEL");
        std::env::remove_var("QUBITOS_MRSEQ_BACKEND");
        std::env::remove_var("QUBITOS_STRICT_VALIDATION");
    }
}
