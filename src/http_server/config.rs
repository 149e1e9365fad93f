//! Listener and CORS settings for the student API
//!
//! The admin UI is served from its own origin, so browser calls need CORS.
//! `host` must be an IP literal; no name resolution happens at startup.

use std::net::{IpAddr, SocketAddr};

use axum::http::HeaderValue;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

/// Port the API listens on unless configured otherwise
pub const DEFAULT_PORT: u16 = 4000;

/// Origins of the admin UI dev server
const ADMIN_UI_ORIGINS: [&str; 2] = ["http://localhost:3000", "http://127.0.0.1:3000"];

/// Rejected `http` settings
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HttpConfigError {
    #[error("http.host '{0}' is not an IP address")]
    InvalidHost(String),

    #[error("http.cors_origins entry '{0}' is not an http(s) origin")]
    InvalidOrigin(String),
}

/// `http` section of the configuration file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpServerConfig {
    /// Listen address (default: loopback only)
    pub host: String,

    pub port: u16,

    /// Browser origins allowed to call the API. Empty allows any origin.
    pub cors_origins: Vec<String>,
}

impl Default for HttpServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: DEFAULT_PORT,
            cors_origins: ADMIN_UI_ORIGINS.iter().map(|o| o.to_string()).collect(),
        }
    }
}

impl HttpServerConfig {
    /// Address the listener binds to
    pub fn listen_addr(&self) -> Result<SocketAddr, HttpConfigError> {
        let ip: IpAddr = self
            .host
            .trim()
            .parse()
            .map_err(|_| HttpConfigError::InvalidHost(self.host.clone()))?;
        Ok(SocketAddr::new(ip, self.port))
    }

    /// Check the listen address and every CORS origin
    pub fn validate(&self) -> Result<(), HttpConfigError> {
        self.listen_addr()?;
        for origin in &self.cors_origins {
            origin_header(origin)?;
        }
        Ok(())
    }

    /// CORS for the configured origins. Entries that fail validation are
    /// left out, so a bad list never widens access.
    pub fn cors_layer(&self) -> CorsLayer {
        let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);
        if self.cors_origins.is_empty() {
            return layer.allow_origin(Any);
        }

        let origins: Vec<HeaderValue> = self
            .cors_origins
            .iter()
            .filter_map(|o| origin_header(o).ok())
            .collect();
        layer.allow_origin(AllowOrigin::list(origins))
    }
}

/// Browsers send origins without a trailing slash
fn origin_header(origin: &str) -> Result<HeaderValue, HttpConfigError> {
    let trimmed = origin.trim().trim_end_matches('/');
    let has_scheme = trimmed.starts_with("http://") || trimmed.starts_with("https://");
    if !has_scheme {
        return Err(HttpConfigError::InvalidOrigin(origin.to_string()));
    }
    HeaderValue::from_str(trimmed).map_err(|_| HttpConfigError::InvalidOrigin(origin.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_allow_admin_ui_on_loopback() {
        let config = HttpServerConfig::default();
        assert_eq!(config.listen_addr().unwrap().to_string(), "127.0.0.1:4000");
        assert!(config.cors_origins.contains(&"http://localhost:3000".to_string()));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_ipv6_host() {
        let config = HttpServerConfig {
            host: "::1".to_string(),
            port: 8080,
            ..Default::default()
        };
        assert_eq!(config.listen_addr().unwrap().to_string(), "[::1]:8080");
    }

    #[test]
    fn test_hostname_is_rejected() {
        let config = HttpServerConfig {
            host: "localhost".to_string(),
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(HttpConfigError::InvalidHost("localhost".to_string()))
        );
    }

    #[test]
    fn test_origin_needs_scheme() {
        let config = HttpServerConfig {
            cors_origins: vec!["https://admin.school.example/".to_string(), "admin.local".to_string()],
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(HttpConfigError::InvalidOrigin("admin.local".to_string()))
        );
        assert_eq!(
            origin_header("https://admin.school.example/").unwrap(),
            "https://admin.school.example"
        );
    }

    #[test]
    fn test_missing_fields_take_defaults() {
        let config: HttpServerConfig = serde_json::from_str(r#"{"port": 9000}"#).unwrap();
        assert_eq!(config.port, 9000);
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.cors_origins.len(), 2);
    }
}
