//! Configuration management for financeflow
//!
//! This module handles loading, validation, and management of
//! financeflow configuration from YAML files.

pub mod error;

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub use error::{ConfigError, ConfigResult};

// ==================== Configuration Types ====================

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,
    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

/// Ledger backend configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Base URL every backend path is resolved against
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Optional request timeout; no timeout when absent
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: None,
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:8860".to_string()
}

/// Notification settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationConfig {
    /// Seconds a notification stays visible
    #[serde(default = "default_ttl_secs")]
    pub ttl_secs: u64,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            ttl_secs: default_ttl_secs(),
        }
    }
}

fn default_ttl_secs() -> u64 {
    5
}

/// Account list display settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountsConfig {
    /// Entries shown in the "Recently Added Accounts" panel
    #[serde(default = "default_recent_limit")]
    pub recent_limit: usize,
}

impl Default for AccountsConfig {
    fn default() -> Self {
        Self {
            recent_limit: default_recent_limit(),
        }
    }
}

fn default_recent_limit() -> usize {
    5
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level: debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Server settings
    #[serde(default)]
    pub server: ServerConfig,
    /// Ledger backend settings
    #[serde(default)]
    pub backend: BackendConfig,
    /// Notification settings
    #[serde(default)]
    pub notifications: NotificationConfig,
    /// Account list settings
    #[serde(default)]
    pub accounts: AccountsConfig,
    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a YAML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => ConfigError::FileNotFound {
                path: path.display().to_string(),
            },
            _ => ConfigError::IoError,
        })?;

        let config = Self::from_yaml(&content)?;
        log::debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Load configuration for startup.
    ///
    /// Recoverable errors fall back to defaults and are handed back so they
    /// can be reported once logging is up.
    pub fn load_with_fallback(path: impl AsRef<Path>) -> ConfigResult<(Self, Option<ConfigError>)> {
        match Self::load(path) {
            Ok(config) => Ok((config, None)),
            Err(e) if e.severity().is_recoverable() => Ok((Self::default(), Some(e))),
            Err(e) => Err(e),
        }
    }

    /// Parse and validate configuration from YAML text
    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_yaml::from_str(content).map_err(|_| ConfigError::InvalidYaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> ConfigResult<()> {
        if self.server.port == 0 {
            return Err(ConfigError::InvalidValue {
                field: "server.port".to_string(),
                reason: "Port must be greater than 0".to_string(),
            });
        }

        let base_url = self.backend.base_url.trim();
        if base_url.is_empty() {
            return Err(ConfigError::MissingField {
                field: "backend.base_url".to_string(),
            });
        }
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(ConfigError::InvalidValue {
                field: "backend.base_url".to_string(),
                reason: "Base URL must start with http:// or https://".to_string(),
            });
        }

        if self.backend.timeout_secs == Some(0) {
            return Err(ConfigError::InvalidValue {
                field: "backend.timeout_secs".to_string(),
                reason: "Timeout must be greater than 0 when set".to_string(),
            });
        }

        if self.notifications.ttl_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "notifications.ttl_secs".to_string(),
                reason: "Notification lifetime must be greater than 0".to_string(),
            });
        }

        if self.accounts.recent_limit == 0 {
            return Err(ConfigError::InvalidValue {
                field: "accounts.recent_limit".to_string(),
                reason: "Recent account limit must be greater than 0".to_string(),
            });
        }

        Ok(())
    }

    /// Generate a default configuration file
    pub fn generate_default() -> &'static str {
        include_str!("../templates/default_config.yaml")
    }

    /// Address the HTTP server binds to
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Notification lifetime
    pub fn notification_ttl(&self) -> Duration {
        Duration::from_secs(self.notifications.ttl_secs)
    }

    /// Backend request timeout, if one is configured
    pub fn backend_timeout(&self) -> Option<Duration> {
        self.backend.timeout_secs.map(Duration::from_secs)
    }

    /// Default path of the configuration file
    pub fn default_path() -> PathBuf {
        PathBuf::from("config.yaml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConfigErrorCode;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.backend.base_url, "http://localhost:8860");
        assert_eq!(config.notification_ttl(), Duration::from_secs(5));
        assert_eq!(config.accounts.recent_limit, 5);
        assert!(config.backend_timeout().is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_yaml_uses_defaults() {
        let config = Config::from_yaml("backend:\n  base_url: \"http://ledger:9000\"\n").unwrap();
        assert_eq!(config.backend.base_url, "http://ledger:9000");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.notifications.ttl_secs, 5);
    }

    #[test]
    fn test_generated_default_parses() {
        let config = Config::from_yaml(Config::generate_default()).unwrap();
        assert_eq!(config.bind_address(), "127.0.0.1:8080");
        assert_eq!(config.backend.base_url, "http://localhost:8860");
    }

    #[test]
    fn test_invalid_yaml() {
        let err = Config::from_yaml("server: [unterminated").unwrap_err();
        assert_eq!(err.code(), ConfigErrorCode::InvalidYaml);
    }

    #[test]
    fn test_rejects_zero_port() {
        let err = Config::from_yaml("server:\n  port: 0\n").unwrap_err();
        assert_eq!(err.code(), ConfigErrorCode::InvalidValue);
    }

    #[test]
    fn test_rejects_non_http_base_url() {
        let err = Config::from_yaml("backend:\n  base_url: \"ftp://ledger\"\n").unwrap_err();
        assert_eq!(err.code(), ConfigErrorCode::InvalidValue);

        let err = Config::from_yaml("backend:\n  base_url: \"  \"\n").unwrap_err();
        assert_eq!(err.code(), ConfigErrorCode::MissingField);
    }

    #[test]
    fn test_rejects_zero_ttl() {
        let err = Config::from_yaml("notifications:\n  ttl_secs: 0\n").unwrap_err();
        assert_eq!(err.code(), ConfigErrorCode::InvalidValue);
    }

    #[test]
    fn test_missing_file_is_reported_by_load() {
        let err = Config::load("/nonexistent/financeflow/config.yaml").unwrap_err();
        assert_eq!(err.code(), ConfigErrorCode::FileNotFound);
    }

    #[test]
    fn test_startup_falls_back_on_missing_file() {
        let (config, fallback) = Config::load_with_fallback("/nonexistent/financeflow/config.yaml").unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(fallback.map(|e| e.code()), Some(ConfigErrorCode::FileNotFound));
    }

    #[test]
    fn test_startup_stops_on_invalid_file() {
        let path = std::env::temp_dir().join(format!("financeflow-invalid-{}.yaml", std::process::id()));
        std::fs::write(&path, "server:\n  port: 0\n").unwrap();
        let result = Config::load_with_fallback(&path);
        std::fs::remove_file(&path).unwrap();

        let err = result.unwrap_err();
        assert_eq!(err.code(), ConfigErrorCode::InvalidValue);
        assert!(!err.severity().is_recoverable());
    }
}
