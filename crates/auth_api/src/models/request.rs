//! HTTP request type definitions
//!
//! HTTP request types accept flexible input and are translated to domain types
//! at the API boundary. Validation happens in `auth_handler`, so fields here
//! are mostly optional strings.

use auth_handler::ConfigWriteRequest;
use serde::{Deserialize, Serialize};

#[cfg(test)]
#[path = "request_tests.rs"]
mod tests;

/// A duration field that accepts either a string (`"1h"`) or whole seconds (`3600`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DurationInput {
    Seconds(u64),
    Text(String),
}

impl DurationInput {
    /// The string form understood by the duration parser.
    pub fn into_raw(self) -> String {
        match self {
            DurationInput::Seconds(secs) => secs.to_string(),
            DurationInput::Text(text) => text,
        }
    }
}

/// HTTP request to write the backend configuration.
///
/// # Example
///
/// ```json
/// {
///   "organization": "acme",
///   "base_url": "https://github.example.com/api/v3/",
///   "ttl": "1h",
///   "max_ttl": 7200
/// }
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WriteConfigRequest {
    /// Organization whose members may log in
    #[serde(default)]
    pub organization: String,

    /// GitHub Enterprise API base URL
    #[serde(default)]
    pub base_url: Option<String>,

    #[serde(default)]
    pub ttl: Option<DurationInput>,

    #[serde(default)]
    pub max_ttl: Option<DurationInput>,
}

impl From<WriteConfigRequest> for ConfigWriteRequest {
    fn from(request: WriteConfigRequest) -> Self {
        ConfigWriteRequest {
            organization: request.organization,
            base_url: request.base_url,
            ttl: request.ttl.map(DurationInput::into_raw),
            max_ttl: request.max_ttl.map(DurationInput::into_raw),
        }
    }
}

/// HTTP request to write a team or user mapping.
///
/// `value` is a comma-separated policy list, e.g. `"admin,dev"`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MappingWriteRequest {
    #[serde(default)]
    pub value: String,
}

/// HTTP request to log in with a GitHub personal access token.
#[derive(Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub token: String,
}

/// HTTP request to renew a credential.
#[derive(Clone, Serialize, Deserialize)]
pub struct RenewRequest {
    #[serde(default)]
    pub token: String,

    /// Policies the credential was originally issued with
    #[serde(default)]
    pub policies: Vec<String>,
}

impl std::fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginRequest")
            .field("token", &"<REDACTED>")
            .finish()
    }
}

impl std::fmt::Debug for RenewRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RenewRequest")
            .field("token", &"<REDACTED>")
            .field("policies", &self.policies)
            .finish()
    }
}
