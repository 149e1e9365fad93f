//! Configuration file
//!
//! ```json
//! {
//!   "http": { "host": "127.0.0.1", "port": 4000, "cors_origins": ["http://localhost:3000"] },
//!   "storage": { "backend": "file", "path": "./students.json" },
//!   "logging": { "level": "info" }
//! }
//! ```
//!
//! Every section and field is optional and falls back to its default.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::errors::{CliError, CliResult};
use crate::http_server::HttpServerConfig;
use crate::observability::Severity;
use crate::store::StorageConfig;

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub http: HttpServerConfig,

    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Logger settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Minimum severity written (default: info)
    #[serde(default)]
    pub level: Severity,
}

impl Config {
    /// Load configuration from file
    pub fn load(path: &Path) -> CliResult<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| CliError::config_error(format!("Failed to read config: {}", e)))?;

        let config = Self::parse(&content)?;
        Ok(config)
    }

    /// Parse and validate configuration text
    pub fn parse(content: &str) -> CliResult<Self> {
        let config: Config = serde_json::from_str(content)
            .map_err(|e| CliError::config_error(format!("Invalid config JSON: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Load from `path`, or use defaults when no path is given
    pub fn load_or_default(path: Option<&Path>) -> CliResult<Self> {
        match path {
            Some(p) => Self::load(p),
            None => Ok(Self::default()),
        }
    }

    fn validate(&self) -> CliResult<()> {
        self.http
            .validate()
            .map_err(|e| CliError::config_error(e.to_string()))?;

        if let StorageConfig::File { path } = &self.storage {
            if path.as_os_str().is_empty() {
                return Err(CliError::config_error("storage.path must not be empty"));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::TempDir;

    #[test]
    fn test_empty_object_is_default() {
        let config = Config::parse("{}").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.storage, StorageConfig::Memory);
        assert_eq!(config.logging.level, Severity::Info);
    }

    #[test]
    fn test_full_config() {
        let config = Config::parse(
            r#"{
                "http": {"host": "127.0.0.1", "port": 8080, "cors_origins": []},
                "storage": {"backend": "file", "path": "data/students.json"},
                "logging": {"level": "warn"}
            }"#,
        )
        .unwrap();

        assert_eq!(config.http.listen_addr().unwrap().to_string(), "127.0.0.1:8080");
        assert!(config.http.cors_origins.is_empty());
        assert_eq!(
            config.storage,
            StorageConfig::File {
                path: PathBuf::from("data/students.json")
            }
        );
        assert_eq!(config.logging.level, Severity::Warn);
    }

    #[test]
    fn test_rejects_blank_host() {
        let err = Config::parse(r#"{"http": {"host": " "}}"#).unwrap_err();
        assert_eq!(err.code_str(), "ENROLL_CLI_CONFIG_ERROR");
    }

    #[test]
    fn test_rejects_bad_cors_origin() {
        let err = Config::parse(r#"{"http": {"cors_origins": ["localhost:3000"]}}"#).unwrap_err();
        assert!(err.message().contains("localhost:3000"));
    }

    #[test]
    fn test_rejects_unknown_backend() {
        assert!(Config::parse(r#"{"storage": {"backend": "mongo"}}"#).is_err());
    }

    #[test]
    fn test_load_missing_file() {
        let tmp = TempDir::new().unwrap();
        let err = Config::load(&tmp.path().join("nope.json")).unwrap_err();
        assert!(err.message().contains("Failed to read config"));
    }

    #[test]
    fn test_written_default_reads_back() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("enrolldb.json");
        fs::write(&path, serde_json::to_string_pretty(&Config::default()).unwrap()).unwrap();
        assert_eq!(Config::load(&path).unwrap(), Config::default());
    }
}
