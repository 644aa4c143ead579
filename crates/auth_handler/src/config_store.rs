//! Backend configuration persistence.
//!
//! There is exactly one configuration, stored under [`ConfigStore::STORAGE_KEY`].
//! Writes are validated in full before anything is persisted, so a rejected
//! write leaves the previous configuration untouched.

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};
use url::Url;

use crate::duration::parse_duration_field;
use crate::storage::{get_json, put_json};
use crate::{AuthError, AuthResult, LeaseNegotiator, Storage, SystemView};

#[cfg(test)]
#[path = "config_store_tests.rs"]
mod tests;

/// The persisted backend configuration.
///
/// A zero `ttl` or `max_ttl` means "unset"; the host limits apply at login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackendConfig {
    /// GitHub organization whose members may log in.
    pub organization: String,

    /// API base URL for GitHub Enterprise. `None` means public GitHub.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,

    #[serde(with = "crate::duration::seconds", default)]
    pub ttl: Duration,

    #[serde(with = "crate::duration::seconds", default)]
    pub max_ttl: Duration,
}

/// Raw operator input for a configuration write.
///
/// Durations are kept as strings here and parsed by [`ConfigStore::write_config`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigWriteRequest {
    pub organization: String,
    pub base_url: Option<String>,
    pub ttl: Option<String>,
    pub max_ttl: Option<String>,
}

impl ConfigWriteRequest {
    pub fn new(organization: impl Into<String>) -> Self {
        Self {
            organization: organization.into(),
            ..Self::default()
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn with_ttl(mut self, ttl: impl Into<String>) -> Self {
        self.ttl = Some(ttl.into());
        self
    }

    pub fn with_max_ttl(mut self, max_ttl: impl Into<String>) -> Self {
        self.max_ttl = Some(max_ttl.into());
        self
    }
}

/// Reads and writes the backend configuration.
#[derive(Debug, Clone)]
pub struct ConfigStore {
    storage: Arc<dyn Storage>,
    lease: LeaseNegotiator,
}

impl ConfigStore {
    /// Storage key holding the configuration.
    pub const STORAGE_KEY: &'static str = "config";

    pub fn new(storage: Arc<dyn Storage>, system: SystemView) -> Self {
        Self {
            storage,
            lease: LeaseNegotiator::new(system),
        }
    }

    /// Validate and persist a configuration, replacing any previous one.
    ///
    /// # Errors
    ///
    /// * `AuthError::Validation` - empty organization, malformed base URL,
    ///   unparseable durations or durations above the host max lease TTL
    /// * `AuthError::Storage` - the host storage failed
    pub async fn write_config(&self, request: ConfigWriteRequest) -> AuthResult<BackendConfig> {
        let config = self.build_config(request)?;

        put_json(self.storage.as_ref(), Self::STORAGE_KEY, &config).await?;

        info!(
            organization = %config.organization,
            base_url = config.base_url.as_deref().unwrap_or("default"),
            ttl_secs = config.ttl.as_secs(),
            max_ttl_secs = config.max_ttl.as_secs(),
            "Backend configuration written"
        );

        Ok(config)
    }

    /// Read the stored configuration. `Ok(None)` when nothing has been written.
    pub async fn read_config(&self) -> AuthResult<Option<BackendConfig>> {
        get_json(self.storage.as_ref(), Self::STORAGE_KEY).await
    }

    /// Remove the stored configuration. Logins fail until a new one is written.
    pub async fn delete_config(&self) -> AuthResult<()> {
        self.storage.delete(Self::STORAGE_KEY).await?;
        debug!("Backend configuration deleted");
        Ok(())
    }

    fn build_config(&self, request: ConfigWriteRequest) -> AuthResult<BackendConfig> {
        let organization = request.organization.trim();
        if organization.is_empty() {
            return Err(AuthError::Validation("organization must be set".to_string()));
        }

        let base_url = match request.base_url.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(raw) => Some(validate_base_url(raw)?),
        };

        let ttl = parse_duration_field("ttl", request.ttl.as_deref())?.unwrap_or_default();
        let max_ttl =
            parse_duration_field("max_ttl", request.max_ttl.as_deref())?.unwrap_or_default();

        self.lease.validate(ttl, max_ttl)?;

        Ok(BackendConfig {
            organization: organization.to_string(),
            base_url,
            ttl,
            max_ttl,
        })
    }
}

fn validate_base_url(raw: &str) -> AuthResult<String> {
    let parsed = Url::parse(raw)
        .map_err(|e| AuthError::Validation(format!("invalid base_url '{}': {}", raw, e)))?;

    match parsed.scheme() {
        "http" | "https" => Ok(raw.to_string()),
        other => Err(AuthError::Validation(format!(
            "invalid base_url '{}': unsupported scheme '{}'",
            raw, other
        ))),
    }
}
