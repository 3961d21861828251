//! Configuration management for the inspector.
//!
//! Configuration is loaded from a TOML file. Every field has a default, so a
//! partial (or empty) file is valid, and a missing file is created with the
//! defaults on first load.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::info;

fn default_tag() -> String {
    "[Inspector]".to_string()
}

fn default_enabled() -> bool {
    true
}

fn default_level() -> String {
    "info".to_string()
}

/// Inspector configuration loaded from a TOML file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InspectorConfig {
    /// Reporter configuration settings
    #[serde(default)]
    pub reporter: ReporterSettings,
    /// Logging configuration settings
    #[serde(default)]
    pub logging: LoggingSettings,
}

/// Reporter configuration.
///
/// Controls how failures are announced in the log and how long a tracked
/// call may wait for its report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReporterSettings {
    /// Prefix for every log line written by the logging report handler
    #[serde(default = "default_tag")]
    pub tag: String,
    /// Whether reports are delivered at all. Failures are still wrapped when disabled.
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Upper bound for a single delivery in milliseconds (0 waits forever)
    #[serde(default)]
    pub timeout_ms: u64,
}

impl ReporterSettings {
    /// Delivery timeout, if one is configured.
    pub fn timeout(&self) -> Option<Duration> {
        (self.timeout_ms > 0).then(|| Duration::from_millis(self.timeout_ms))
    }
}

impl Default for ReporterSettings {
    fn default() -> Self {
        Self {
            tag: default_tag(),
            enabled: default_enabled(),
            timeout_ms: 0,
        }
    }
}

/// Logging system configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// Log level filter (trace, debug, info, warn, error)
    #[serde(default = "default_level")]
    pub level: String,
    /// Whether to output logs in JSON format
    #[serde(default)]
    pub json_format: bool,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_level(),
            json_format: false,
        }
    }
}

impl InspectorConfig {
    /// Loads configuration from a TOML file.
    ///
    /// If the file doesn't exist, a default configuration file is written to
    /// `path` and the defaults are returned.
    pub async fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        if path.exists() {
            let content = tokio::fs::read_to_string(path).await?;
            Self::from_toml_str(&content)
        } else {
            let default_config = Self::default();
            let toml_content = toml::to_string_pretty(&default_config)?;
            tokio::fs::write(path, toml_content).await?;
            info!("Created default inspector configuration file: {}", path.display());
            Ok(default_config)
        }
    }

    /// Parses configuration from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_config_default() {
        let config = InspectorConfig::default();

        assert_eq!(config.reporter.tag, "[Inspector]");
        assert!(config.reporter.enabled);
        assert_eq!(config.reporter.timeout_ms, 0);
        assert_eq!(config.reporter.timeout(), None);

        assert_eq!(config.logging.level, "info");
        assert!(!config.logging.json_format);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config = InspectorConfig::from_toml_str(
            r#"
            [reporter]
            timeout_ms = 2500
            "#,
        )
        .unwrap();

        assert_eq!(config.reporter.tag, "[Inspector]");
        assert!(config.reporter.enabled);
        assert_eq!(config.reporter.timeout(), Some(Duration::from_millis(2500)));
        assert_eq!(config.logging, LoggingSettings::default());
    }

    #[test]
    fn test_empty_config_is_default() {
        let config = InspectorConfig::from_toml_str("").unwrap();
        assert_eq!(config, InspectorConfig::default());
    }

    #[test]
    fn test_invalid_config_is_parse_error() {
        let result = InspectorConfig::from_toml_str("[reporter]\nenabled = \"sometimes\"");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[tokio::test]
    async fn test_load_creates_default_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("inspector.toml");

        let config = InspectorConfig::load_from_file(&path).await.unwrap();
        assert_eq!(config, InspectorConfig::default());
        assert!(path.exists());

        let written = tokio::fs::read_to_string(&path).await.unwrap();
        assert!(written.contains("[reporter]"));
        assert!(written.contains("[logging]"));
    }

    #[tokio::test]
    async fn test_load_existing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("inspector.toml");
        tokio::fs::write(
            &path,
            "[reporter]\ntag = \"[Economy]\"\nenabled = false\n\n[logging]\nlevel = \"debug\"\njson_format = true\n",
        )
        .await
        .unwrap();

        let config = InspectorConfig::load_from_file(&path).await.unwrap();
        assert_eq!(config.reporter.tag, "[Economy]");
        assert!(!config.reporter.enabled);
        assert_eq!(config.logging.level, "debug");
        assert!(config.logging.json_format);
    }
}
