//! # Check Configuration
//!
//! YAML-based configuration for the Ambari check, with environment-specific
//! sections and environment variable overrides.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use ambari_check::config::ConfigManager;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let manager = ConfigManager::load()?;
//! let config = manager.config();
//! println!("Polling {} ({} services)", config.base_url(), config.services.len());
//! # Ok(())
//! # }
//! ```
//!
//! ## File layout
//!
//! ```yaml
//! url: http://ambari.example.com:8080
//! username: admin
//! password: admin
//! collect_service_status: true
//! services:
//!   HDFS:
//!     components: [NAMENODE, DATANODE]
//!     metric_headers: [cpu, dfs]
//!
//! production:
//!   timeout_ms: 30000
//! ```

pub mod error;
pub mod loader;

use reqwest::Url;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;
use tracing::debug;

use crate::client::Credentials;

pub use error::{ConfigResult, ConfigurationError};
pub use loader::ConfigManager;

fn default_timeout_ms() -> u64 {
    10_000
}

fn default_true() -> bool {
    true
}

/// Root configuration for one Ambari server
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AmbariConfig {
    /// Base endpoint of the Ambari server (scheme, host, port)
    pub url: String,

    #[serde(default)]
    pub username: String,

    #[serde(default)]
    pub password: String,

    /// HTTP timeout applied to every request
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Extra tags prepended to every submission
    #[serde(default)]
    pub tags: Vec<String>,

    #[serde(default = "default_true")]
    pub collect_host_metrics: bool,

    #[serde(default = "default_true")]
    pub collect_service_metrics: bool,

    #[serde(default)]
    pub collect_service_status: bool,

    /// Services to poll, keyed by Ambari service name (e.g. `HDFS`)
    #[serde(default)]
    pub services: BTreeMap<String, ServiceConfig>,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Per-service component and metric category whitelists
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct ServiceConfig {
    /// Component names to collect (matched against Ambari's upper-case names)
    pub components: Vec<String>,

    /// Top-level metric categories to collect for each component
    #[serde(default)]
    pub metric_headers: Vec<String>,
}

impl ServiceConfig {
    pub fn component_whitelist(&self) -> Vec<String> {
        self.components.iter().map(|c| c.to_uppercase()).collect()
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// Filter directive used when `RUST_LOG` is unset
    pub level: Option<String>,
    /// Directory for JSON log files; console only when unset
    pub directory: Option<PathBuf>,
}

impl Default for AmbariConfig {
    fn default() -> Self {
        Self {
            url: "http://localhost:8080".to_string(),
            username: String::new(),
            password: String::new(),
            timeout_ms: default_timeout_ms(),
            tags: Vec::new(),
            collect_host_metrics: true,
            collect_service_metrics: true,
            collect_service_status: false,
            services: BTreeMap::new(),
            logging: LoggingConfig::default(),
        }
    }
}

impl AmbariConfig {
    /// Base endpoint without a trailing slash
    pub fn base_url(&self) -> &str {
        self.url.trim_end_matches('/')
    }

    pub fn credentials(&self) -> Credentials {
        Credentials::new(self.username.clone(), self.password.clone())
    }

    /// Validate values that serde cannot check on its own
    pub fn validate(&self) -> ConfigResult<()> {
        if self.url.trim().is_empty() {
            return Err(ConfigurationError::missing_required_field(
                "url",
                "ambari configuration",
            ));
        }

        let parsed = Url::parse(self.base_url()).map_err(|e| {
            ConfigurationError::invalid_value("url", self.url.clone(), e.to_string())
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ConfigurationError::invalid_value(
                "url",
                self.url.clone(),
                "scheme must be http or https",
            ));
        }

        if self.timeout_ms == 0 {
            return Err(ConfigurationError::invalid_value(
                "timeout_ms",
                "0",
                "timeout must be greater than zero",
            ));
        }

        for (service, service_config) in &self.services {
            if service_config.components.is_empty() {
                return Err(ConfigurationError::validation_error(format!(
                    "service '{service}' lists no components"
                )));
            }
        }

        Ok(())
    }

    /// Apply `AMBARI_*` environment variable overrides
    pub fn apply_env_overrides(&mut self) -> ConfigResult<()> {
        if let Ok(url) = std::env::var("AMBARI_URL") {
            debug!("Overriding url from AMBARI_URL");
            self.url = url;
        }
        if let Ok(username) = std::env::var("AMBARI_USERNAME") {
            self.username = username;
        }
        if let Ok(password) = std::env::var("AMBARI_PASSWORD") {
            self.password = password;
        }
        if let Ok(timeout) = std::env::var("AMBARI_TIMEOUT_MS") {
            self.timeout_ms = timeout.parse().map_err(|_| {
                ConfigurationError::environment_override_error(
                    "AMBARI_TIMEOUT_MS",
                    format!("'{timeout}' is not a number of milliseconds"),
                )
            })?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hdfs() -> ServiceConfig {
        ServiceConfig {
            components: vec!["namenode".to_string(), "DATANODE".to_string()],
            metric_headers: vec!["cpu".to_string()],
        }
    }

    #[test]
    fn test_defaults() {
        let config = AmbariConfig::default();
        assert_eq!(config.timeout_ms, 10_000);
        assert!(config.collect_host_metrics);
        assert!(config.collect_service_metrics);
        assert!(!config.collect_service_status);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_base_url_trims_trailing_slash() {
        let config = AmbariConfig {
            url: "http://ambari:8080/".to_string(),
            ..Default::default()
        };
        assert_eq!(config.base_url(), "http://ambari:8080");
    }

    #[test]
    fn test_component_whitelist_is_uppercased() {
        assert_eq!(hdfs().component_whitelist(), vec!["NAMENODE", "DATANODE"]);
    }

    #[test]
    fn test_validation_failures() {
        let empty_url = AmbariConfig {
            url: " ".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            empty_url.validate(),
            Err(ConfigurationError::MissingRequiredField { .. })
        ));

        let bad_scheme = AmbariConfig {
            url: "ftp://ambari".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            bad_scheme.validate(),
            Err(ConfigurationError::InvalidValue { .. })
        ));

        let zero_timeout = AmbariConfig {
            timeout_ms: 0,
            ..Default::default()
        };
        assert!(zero_timeout.validate().is_err());

        let mut no_components = AmbariConfig::default();
        no_components
            .services
            .insert("HDFS".to_string(), ServiceConfig::default());
        assert!(matches!(
            no_components.validate(),
            Err(ConfigurationError::ValidationError { .. })
        ));

        let mut valid = AmbariConfig::default();
        valid.services.insert("HDFS".to_string(), hdfs());
        assert!(valid.validate().is_ok());
    }

    #[test]
    fn test_deserialize_minimal_yaml() {
        let config: AmbariConfig = serde_yaml::from_str("url: http://ambari:8080").unwrap();
        assert_eq!(config.url, "http://ambari:8080");
        assert!(config.services.is_empty());
        assert!(config.collect_host_metrics);
    }
}
