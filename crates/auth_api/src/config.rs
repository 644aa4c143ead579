//! Service configuration loaded from the environment.
//!
//! # Environment Variables
//!
//! - `API_HOST`: Host to bind to (default: 0.0.0.0)
//! - `API_PORT`: Port to listen on (default: 8200)
//! - `AUTH_DEFAULT_LEASE_TTL`: Host default lease TTL (default: 24h)
//! - `AUTH_MAX_LEASE_TTL`: Host max lease TTL (default: 768h)
//! - `GITHUB_REQUEST_TIMEOUT`: Timeout per GitHub request (default: 10s)
//! - `AUTH_OPERATOR_TOKEN`: Bearer token required on the configuration and
//!   mapping endpoints (default: unset, which rejects every operator request)
//!
//! Durations accept the same forms as configuration writes: `"1h"`, `"90m"`
//! or bare seconds.

use std::env;
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use auth_handler::{duration::parse_duration_field, SystemView};
use github_client::GitHubIdentityProvider;
use secrecy::SecretString;

use crate::DEFAULT_PORT;

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_MAX_LEASE_TTL: Duration = Duration::from_secs(768 * 60 * 60);

/// Errors raised while loading the service configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {name}: {message}")]
    InvalidValue { name: &'static str, message: String },

    #[error("AUTH_DEFAULT_LEASE_TTL ({default_secs}s) exceeds AUTH_MAX_LEASE_TTL ({max_secs}s)")]
    DefaultExceedsMax { default_secs: u64, max_secs: u64 },
}

/// Runtime configuration for the API server.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub host: String,
    pub port: u16,
    pub default_lease_ttl: Duration,
    pub max_lease_ttl: Duration,
    pub github_request_timeout: Duration,

    /// Bearer token operators present to manage configuration and mappings.
    pub operator_token: Option<SecretString>,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            default_lease_ttl: SystemView::DEFAULT_LEASE_TTL,
            max_lease_ttl: DEFAULT_MAX_LEASE_TTL,
            github_request_timeout: GitHubIdentityProvider::DEFAULT_TIMEOUT,
            operator_token: None,
        }
    }
}

impl ServiceConfig {
    /// Load configuration from environment variables, falling back to defaults.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` when a variable is set but cannot be parsed, or
    /// when the default lease TTL exceeds the max lease TTL.
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let host = env::var("API_HOST").unwrap_or(defaults.host);
        host.parse::<IpAddr>().map_err(|e| ConfigError::InvalidValue {
            name: "API_HOST",
            message: e.to_string(),
        })?;

        let port = match env::var("API_PORT") {
            Ok(raw) => raw.trim().parse::<u16>().map_err(|e| ConfigError::InvalidValue {
                name: "API_PORT",
                message: e.to_string(),
            })?,
            Err(_) => defaults.port,
        };

        let default_lease_ttl = duration_var("AUTH_DEFAULT_LEASE_TTL")?
            .unwrap_or(defaults.default_lease_ttl);
        let max_lease_ttl = duration_var("AUTH_MAX_LEASE_TTL")?.unwrap_or(defaults.max_lease_ttl);
        let github_request_timeout = duration_var("GITHUB_REQUEST_TIMEOUT")?
            .unwrap_or(defaults.github_request_timeout);

        let operator_token = env::var("AUTH_OPERATOR_TOKEN")
            .ok()
            .map(|raw| raw.trim().to_string())
            .filter(|raw| !raw.is_empty())
            .map(SecretString::from);

        if default_lease_ttl > max_lease_ttl {
            return Err(ConfigError::DefaultExceedsMax {
                default_secs: default_lease_ttl.as_secs(),
                max_secs: max_lease_ttl.as_secs(),
            });
        }

        Ok(Self {
            host,
            port,
            default_lease_ttl,
            max_lease_ttl,
            github_request_timeout,
            operator_token,
        })
    }

    /// The lease limits handed to the authentication engine.
    pub fn system_view(&self) -> SystemView {
        SystemView::new(self.default_lease_ttl, self.max_lease_ttl)
    }

    /// The socket address to bind.
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        let ip = self
            .host
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidValue {
                name: "API_HOST",
                message: e.to_string(),
            })?;
        Ok(SocketAddr::from((ip, self.port)))
    }
}

fn duration_var(name: &'static str) -> Result<Option<Duration>, ConfigError> {
    let raw = match env::var(name) {
        Ok(raw) => raw,
        Err(_) => return Ok(None),
    };

    parse_duration_field(name, Some(&raw)).map_err(|e| ConfigError::InvalidValue {
        name,
        message: e.to_string(),
    })
}
