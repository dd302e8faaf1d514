//! Dashboard configuration.
//!
//! Values come from, in increasing precedence: built-in defaults, an optional
//! `gearguard.toml` file, and `GEARGUARD_*` environment variables.

use crate::domain::BoardConfig;
use crate::error::{GearGuardError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

/// Which data source backs the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataSourceKind {
    /// In-memory backend emulation
    Mock,
    /// The maintenance REST API
    #[default]
    Live,
}

impl FromStr for DataSourceKind {
    type Err = GearGuardError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "mock" => Ok(Self::Mock),
            "live" => Ok(Self::Live),
            other => Err(GearGuardError::ConfigError(format!(
                "invalid data source '{}', expected mock or live",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardConfig {
    #[serde(default)]
    pub data_source: DataSourceKind,

    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// JSON fixture for the mock source; the built-in seed data is used when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fixture_path: Option<PathBuf>,

    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default)]
    pub log_json: bool,

    #[serde(default)]
    pub board: BoardConfig,
}

fn default_api_base_url() -> String {
    "http://localhost:8000/api".to_string()
}

fn default_request_timeout_secs() -> u64 {
    10
}

fn default_log_level() -> String {
    "info".to_string()
}

const MAX_REQUEST_TIMEOUT_SECS: u64 = 300;

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_source: DataSourceKind::default(),
            api_base_url: default_api_base_url(),
            request_timeout_secs: default_request_timeout_secs(),
            fixture_path: None,
            log_level: default_log_level(),
            log_json: false,
            board: BoardConfig::default(),
        }
    }
}

impl DashboardConfig {
    pub const FILE_NAME: &'static str = "gearguard.toml";

    /// Loads configuration from `path` (if it exists) and the process environment.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, an environment
    /// override is malformed, or the resulting values fail validation.
    pub fn load(path: &Path) -> Result<Self> {
        Self::load_with(path, |key| std::env::var(key).ok())
    }

    /// Like [`load`](Self::load), reading overrides through `lookup` instead of the process environment
    pub fn load_with<F>(path: &Path, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = if path.exists() {
            let content = std::fs::read_to_string(path)?;
            Self::from_toml(&content)?
        } else {
            tracing::debug!(path = %path.display(), "No config file, using defaults");
            Self::default()
        };

        config.apply_env_overrides(lookup)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content)
            .map_err(|e| GearGuardError::ConfigError(format!("invalid config file: {}", e)))
    }

    /// Applies `GEARGUARD_*` overrides read through `lookup`.
    ///
    /// Supported variables:
    /// - `GEARGUARD_DATA_SOURCE` (mock/live)
    /// - `GEARGUARD_API_BASE_URL`
    /// - `GEARGUARD_REQUEST_TIMEOUT_SECS`
    /// - `GEARGUARD_FIXTURE_PATH`
    /// - `GEARGUARD_LOG_LEVEL`
    /// - `GEARGUARD_LOG_JSON` (true/false)
    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup("GEARGUARD_DATA_SOURCE") {
            self.data_source = value.parse()?;
        }
        if let Some(value) = lookup("GEARGUARD_API_BASE_URL") {
            self.api_base_url = value;
        }
        if let Some(value) = lookup("GEARGUARD_REQUEST_TIMEOUT_SECS") {
            self.request_timeout_secs = value.trim().parse().map_err(|_| {
                GearGuardError::ConfigError(format!(
                    "GEARGUARD_REQUEST_TIMEOUT_SECS must be a number, got '{}'",
                    value
                ))
            })?;
        }
        if let Some(value) = lookup("GEARGUARD_FIXTURE_PATH") {
            self.fixture_path = Some(PathBuf::from(value));
        }
        if let Some(value) = lookup("GEARGUARD_LOG_LEVEL") {
            self.log_level = value;
        }
        if let Some(value) = lookup("GEARGUARD_LOG_JSON") {
            self.log_json = match value.trim().to_lowercase().as_str() {
                "1" | "true" | "yes" => true,
                "0" | "false" | "no" => false,
                _ => {
                    return Err(GearGuardError::ConfigError(format!(
                        "GEARGUARD_LOG_JSON must be true or false, got '{}'",
                        value
                    )))
                }
            };
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.api_base_url.starts_with("http://") || self.api_base_url.starts_with("https://"))
        {
            return Err(GearGuardError::ConfigError(format!(
                "api_base_url must be an http(s) URL, got '{}'",
                self.api_base_url
            )));
        }
        if self.request_timeout_secs == 0 || self.request_timeout_secs > MAX_REQUEST_TIMEOUT_SECS {
            return Err(GearGuardError::ConfigError(format!(
                "request_timeout_secs must be between 1 and {}",
                MAX_REQUEST_TIMEOUT_SECS
            )));
        }
        self.board.validate()
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = DashboardConfig::default();
        assert_eq!(config.data_source, DataSourceKind::Live);
        assert_eq!(config.request_timeout(), Duration::from_secs(10));
        assert_eq!(config.board.columns.len(), 4);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = DashboardConfig::from_toml(
            r#"
            data_source = "mock"
            request_timeout_secs = 30
            "#,
        )
        .unwrap();

        assert_eq!(config.data_source, DataSourceKind::Mock);
        assert_eq!(config.request_timeout_secs, 30);
        assert_eq!(config.api_base_url, "http://localhost:8000/api");
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_toml_board_columns() {
        let config = DashboardConfig::from_toml(
            r#"
            [board]
            name = "Workshop"

            [[board.columns]]
            title = "Inbox"
            status = "NEW"
            color = "blue"

            [[board.columns]]
            title = "Bench"
            status = "IN_PROGRESS"
            color = "yellow"
            "#,
        )
        .unwrap();

        assert_eq!(config.board.name, "Workshop");
        assert_eq!(config.board.columns[0].title, "Inbox");
        assert!(config.board.resolve_drop_target("REPAIRED").is_none());
    }

    #[test]
    fn test_invalid_toml() {
        assert!(DashboardConfig::from_toml("data_source = \"carrier pigeon\"").is_err());
        assert!(DashboardConfig::from_toml("request_timeout_secs = [").is_err());
    }

    #[test]
    fn test_env_overrides() {
        let mut config = DashboardConfig::default();
        config
            .apply_env_overrides(env(&[
                ("GEARGUARD_DATA_SOURCE", "Mock"),
                ("GEARGUARD_API_BASE_URL", "https://maintenance.example.com/api"),
                ("GEARGUARD_REQUEST_TIMEOUT_SECS", "25"),
                ("GEARGUARD_LOG_LEVEL", "debug"),
                ("GEARGUARD_LOG_JSON", "yes"),
                ("GEARGUARD_FIXTURE_PATH", "/srv/gearguard/fixture.json"),
            ]))
            .unwrap();

        assert_eq!(config.data_source, DataSourceKind::Mock);
        assert_eq!(config.api_base_url, "https://maintenance.example.com/api");
        assert_eq!(config.request_timeout_secs, 25);
        assert_eq!(config.log_level, "debug");
        assert!(config.log_json);
        assert_eq!(
            config.fixture_path,
            Some(PathBuf::from("/srv/gearguard/fixture.json"))
        );
    }

    #[test]
    fn test_malformed_env_overrides() {
        let mut config = DashboardConfig::default();
        assert!(config
            .apply_env_overrides(env(&[("GEARGUARD_REQUEST_TIMEOUT_SECS", "soon")]))
            .is_err());
        assert!(config
            .apply_env_overrides(env(&[("GEARGUARD_DATA_SOURCE", "fax")]))
            .is_err());
        assert!(config
            .apply_env_overrides(env(&[("GEARGUARD_LOG_JSON", "maybe")]))
            .is_err());
    }

    #[test]
    fn test_validation() {
        let config = DashboardConfig {
            api_base_url: "ftp://files".to_string(),
            ..DashboardConfig::default()
        };
        assert!(config.validate().is_err());

        let config = DashboardConfig {
            request_timeout_secs: 0,
            ..DashboardConfig::default()
        };
        assert!(config.validate().is_err());

        let config = DashboardConfig {
            request_timeout_secs: 301,
            ..DashboardConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_from_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(DashboardConfig::FILE_NAME);
        std::fs::write(&path, "data_source = \"mock\"\nlog_level = \"warn\"\n").unwrap();

        let config = DashboardConfig::load_with(&path, env(&[])).unwrap();
        assert_eq!(config.data_source, DataSourceKind::Mock);
        assert_eq!(config.log_level, "warn");

        let config =
            DashboardConfig::load_with(&path, env(&[("GEARGUARD_LOG_LEVEL", "debug")])).unwrap();
        assert_eq!(config.log_level, "debug");
    }

    #[test]
    fn test_load_without_file_uses_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(DashboardConfig::FILE_NAME);

        let config = DashboardConfig::load_with(&path, env(&[])).unwrap();
        assert_eq!(config, DashboardConfig::default());
    }

    #[test]
    fn test_load_rejects_invalid_file_values() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(DashboardConfig::FILE_NAME);
        std::fs::write(&path, "api_base_url = \"localhost\"\n").unwrap();

        assert!(DashboardConfig::load_with(&path, env(&[])).is_err());

        // Overrides are validated too
        std::fs::write(&path, "data_source = \"mock\"\n").unwrap();
        assert!(DashboardConfig::load_with(
            &path,
            env(&[("GEARGUARD_REQUEST_TIMEOUT_SECS", "0")])
        )
        .is_err());
    }
}
