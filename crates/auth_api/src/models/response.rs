//! HTTP response type definitions
//!
//! These types are created from domain results and sent to HTTP clients.

use auth_handler::{AuthenticationResult, BackendConfig};
use serde::{Deserialize, Serialize};

#[cfg(test)]
#[path = "response_tests.rs"]
mod tests;

/// The stored backend configuration.
///
/// Unset durations are reported as `0`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigResponse {
    pub organization: String,
    pub base_url: Option<String>,
    pub ttl_seconds: u64,
    pub max_ttl_seconds: u64,
}

impl From<BackendConfig> for ConfigResponse {
    fn from(config: BackendConfig) -> Self {
        Self {
            organization: config.organization,
            base_url: config.base_url,
            ttl_seconds: config.ttl.as_secs(),
            max_ttl_seconds: config.max_ttl.as_secs(),
        }
    }
}

/// A single mapping, in the comma-separated wire form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MappingResponse {
    pub value: String,
}

/// The keys that have a mapping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MappingListResponse {
    pub keys: Vec<String>,
}

/// Audit metadata attached to an issued credential.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginMetadata {
    pub username: String,
    pub org: String,
}

/// HTTP response for a successful login or renewal.
///
/// # Example
///
/// ```json
/// {
///   "identity": "octocat",
///   "policies": ["root"],
///   "ttl_seconds": 3600,
///   "metadata": { "username": "octocat", "org": "acme" }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginResponse {
    pub identity: String,
    pub policies: Vec<String>,
    pub ttl_seconds: u64,
    pub metadata: LoginMetadata,
}

impl From<AuthenticationResult> for LoginResponse {
    fn from(result: AuthenticationResult) -> Self {
        let ttl_seconds = result.ttl_seconds();
        Self {
            metadata: LoginMetadata {
                username: result.identity.clone(),
                org: result.organization,
            },
            identity: result.identity,
            policies: result.policies,
            ttl_seconds,
        }
    }
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthCheckResponse {
    /// Service status: "healthy" or "unhealthy"
    pub status: String,

    /// Service version
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    /// Current timestamp (ISO 8601)
    pub timestamp: String,

    /// Error message (if unhealthy)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}
