//! HTTP routing configuration
//!
//! # Route Structure
//!
//! All routes are prefixed with `/v1`. The configuration and mapping routes
//! require the operator Bearer token; the rest are open.
//!
//! - POST|GET|DELETE  /v1/config - Backend configuration
//! - GET              /v1/map/teams - List team mappings
//! - PUT|POST|GET|DELETE /v1/map/teams/:team - Team mapping
//! - GET              /v1/map/users - List user mappings
//! - PUT|POST|GET|DELETE /v1/map/users/:user - User mapping
//! - POST             /v1/login - Log in with a GitHub token
//! - POST             /v1/login/renew - Renew a credential
//! - GET              /v1/health - Health check
//! - GET              /v1/metrics - Prometheus metrics

use axum::{
    http::{header, Method},
    middleware,
    routing::{get, post},
    Router,
};
use std::time::Duration;
use tower_http::{
    cors::CorsLayer,
    timeout::TimeoutLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};

use crate::{handlers, middleware as api_middleware, AppState, API_VERSION};

#[cfg(test)]
#[path = "routes_tests.rs"]
mod tests;

/// Create the complete API router with all routes configured.
///
/// This function sets up:
/// - All endpoint routes
/// - Operator authentication on configuration and mapping routes
/// - CORS configuration
/// - Request tracing
/// - Timeout handling
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE, header::ACCEPT])
        .allow_credentials(false)
        .max_age(Duration::from_secs(3600));

    // Headers are not included in spans; login callers may send tokens in them.
    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new())
        .on_response(DefaultOnResponse::new());

    // Configure request timeout (30 seconds)
    let timeout_layer = TimeoutLayer::new(Duration::from_secs(30));

    let operator_routes = Router::new()
        .route(
            "/config",
            get(handlers::read_config)
                .post(handlers::write_config)
                .delete(handlers::delete_config),
        )
        .nest("/map", mapping_routes())
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            api_middleware::operator_auth_middleware,
        ));

    let api_v1 = Router::new()
        .merge(operator_routes)
        .route("/login", post(handlers::login))
        .route("/login/renew", post(handlers::renew))
        .route("/health", get(handlers::health_check))
        .route("/metrics", get(handlers::metrics))
        .layer(middleware::from_fn(api_middleware::tracing_middleware))
        .layer(timeout_layer)
        .layer(trace_layer)
        .layer(cors)
        .with_state(state);

    Router::new().nest(&format!("/{}", API_VERSION), api_v1)
}

/// Mapping routes (nested under /map)
fn mapping_routes() -> Router<AppState> {
    Router::new()
        .route("/teams", get(handlers::list_team_mappings))
        .route(
            "/teams/:team",
            get(handlers::read_team_mapping)
                .put(handlers::write_team_mapping)
                .post(handlers::write_team_mapping)
                .delete(handlers::delete_team_mapping),
        )
        .route("/users", get(handlers::list_user_mappings))
        .route(
            "/users/:user",
            get(handlers::read_user_mapping)
                .put(handlers::write_user_mapping)
                .post(handlers::write_user_mapping)
                .delete(handlers::delete_user_mapping),
        )
}
