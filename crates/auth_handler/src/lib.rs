//! Authentication and authorization core for GitHub team-based logins.
//!
//! This crate decides whether a GitHub personal access token may log in, which
//! policies the resulting credential carries and how long that credential lives.
//!
//! ## Architecture
//!
//! - [`ConfigStore`] holds the single backend configuration (organization, API
//!   base URL, ttl, max_ttl).
//! - [`PolicyMappingStore`] maps team names (and user logins) to policy sets,
//!   including the reserved `default` team entry.
//! - [`LeaseNegotiator`] validates ttl values at write time and computes the
//!   credential lifetime at login time.
//! - [`AuthenticationEngine`] orchestrates a login against an
//!   [`github_client::IdentityProvider`].
//!
//! All state lives behind the [`Storage`] contract, which the host implements.
//! [`InMemoryStorage`] is provided for development and tests.

pub mod config_store;
pub mod duration;
pub mod engine;
pub mod lease;
pub mod policy_map;
pub mod storage;
pub mod system_view;

pub use config_store::{BackendConfig, ConfigStore, ConfigWriteRequest};
pub use engine::{AuthenticationEngine, AuthenticationResult, DEFAULT_MAPPING_KEY};
pub use lease::LeaseNegotiator;
pub use policy_map::{MappingKind, PolicyMappingStore, PolicySet};
pub use storage::{InMemoryStorage, Storage};
pub use system_view::SystemView;

#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;

/// Result type for authentication operations
pub type AuthResult<T> = std::result::Result<T, AuthError>;

/// Errors that can occur during authentication/authorization operations
///
/// Variants separate caller mistakes (`Validation`, `InvalidCredentials`,
/// `PermissionDenied`) from system conditions (`NotConfigured`, `Upstream`,
/// `Storage`) so an enclosing RPC layer can pick status codes.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    /// Malformed or out-of-bound input to a configuration or mapping write.
    #[error("{0}")]
    Validation(String),

    /// A login was attempted before the backend was configured.
    #[error("backend not configured")]
    NotConfigured,

    /// GitHub could not be reached or answered with an error. Transient.
    #[error("GitHub API error: {0}")]
    Upstream(String),

    /// GitHub rejected the supplied token.
    #[error("Invalid credentials provided")]
    InvalidCredentials,

    /// The caller authenticated to GitHub but is not entitled to log in.
    #[error("{0}")]
    PermissionDenied(String),

    /// The host storage failed or held an unreadable entry.
    #[error("Storage error: {0}")]
    Storage(String),
}

impl AuthError {
    /// True when retrying the same request later may succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, AuthError::Upstream(_))
    }

    /// True when the error was caused by the caller's input or identity.
    pub fn is_caller_error(&self) -> bool {
        matches!(
            self,
            AuthError::Validation(_)
                | AuthError::InvalidCredentials
                | AuthError::PermissionDenied(_)
        )
    }
}

impl From<github_client::Error> for AuthError {
    fn from(err: github_client::Error) -> Self {
        match err {
            github_client::Error::Unauthorized => AuthError::InvalidCredentials,
            other => AuthError::Upstream(other.to_string()),
        }
    }
}

impl From<serde_json::Error> for AuthError {
    fn from(err: serde_json::Error) -> Self {
        AuthError::Storage(format!("failed to decode stored entry: {}", err))
    }
}
