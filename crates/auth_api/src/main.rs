//! GitHub login API server
//!
//! Main binary for running the API server. Configuration comes from the
//! environment; see [`auth_api::ServiceConfig`]. `RUST_LOG` sets the log
//! filter (default: info).

use std::sync::Arc;

use auth_api::{ApiServer, AppState, PrometheusLoginMetrics, ServiceConfig, API_VERSION};
use auth_handler::{AuthenticationEngine, InMemoryStorage};
use github_client::GitHubIdentityProvider;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = ServiceConfig::from_env()?;

    let engine = AuthenticationEngine::new(
        Arc::new(InMemoryStorage::new()),
        Arc::new(GitHubIdentityProvider::new(config.github_request_timeout)),
        config.system_view(),
    );
    let metrics = PrometheusLoginMetrics::new(prometheus::Registry::new())
        .map_err(|e| anyhow::anyhow!("Failed to register metrics: {}", e))?;
    let mut state = AppState::new(engine, Arc::new(metrics));
    match config.operator_token.clone() {
        Some(token) => state = state.with_operator_token(token),
        None => tracing::warn!(
            "AUTH_OPERATOR_TOKEN is not set; configuration and mapping endpoints are disabled"
        ),
    }

    tracing::info!("Starting GitHub login API server");
    tracing::info!("API version: {}", API_VERSION);
    tracing::info!(
        default_lease_ttl_secs = config.default_lease_ttl.as_secs(),
        max_lease_ttl_secs = config.max_lease_ttl.as_secs(),
        github_timeout_ms = config.github_request_timeout.as_millis() as u64,
        "Lease limits loaded"
    );

    let server = ApiServer::new(config, state);

    // Start server with graceful shutdown
    server.serve().await
}
