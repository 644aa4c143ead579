//! GitHub login REST API
//!
//! This crate exposes the GitHub team-to-policy authentication backend over
//! HTTP. Operators write the backend configuration and the team and user
//! mappings; callers exchange a GitHub personal access token for a policy set
//! and a credential TTL.
//!
//! # Architecture
//!
//! This crate exists in the HTTP layer and handles:
//! - HTTP request/response translation
//! - Error mapping from `AuthError` to HTTP status codes
//! - Operator authentication for configuration and mapping writes
//! - Request tracing and login metrics
//! - Routing and server configuration
//!
//! The dependency flows: HTTP API → `auth_handler` → `github_client`, never the reverse.

use std::sync::Arc;

use auth_handler::AuthenticationEngine;
use secrecy::SecretString;

pub mod config;
pub mod errors;
pub mod handlers;
pub mod metrics;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod server;

// Re-export key types for convenience
pub use config::{ConfigError, ServiceConfig};
pub use errors::{ApiError, ErrorResponse};
pub use metrics::{LoginMetrics, LoginOutcome, NoOpLoginMetrics, PrometheusLoginMetrics};
pub use models::{request, response};
pub use server::ApiServer;

/// API version
pub const API_VERSION: &str = "v1";

/// Default API port
pub const DEFAULT_PORT: u16 = 8200;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Login orchestration plus the configuration and mapping stores.
    pub engine: AuthenticationEngine,

    /// Login outcome counters.
    pub metrics: Arc<dyn LoginMetrics>,

    /// Bearer token guarding the configuration and mapping endpoints. When
    /// unset those endpoints reject every request.
    pub operator_token: Option<SecretString>,
}

impl AppState {
    /// Create new application state
    pub fn new(engine: AuthenticationEngine, metrics: Arc<dyn LoginMetrics>) -> Self {
        Self {
            engine,
            metrics,
            operator_token: None,
        }
    }

    /// Require `token` on the configuration and mapping endpoints.
    pub fn with_operator_token(mut self, token: SecretString) -> Self {
        self.operator_token = Some(token);
        self
    }
}
