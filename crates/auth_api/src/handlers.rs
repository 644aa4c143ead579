//! HTTP request handlers
//!
//! Each handler:
//! 1. Extracts HTTP request data (path params, body)
//! 2. Translates HTTP types to domain types
//! 3. Calls `auth_handler`
//! 4. Translates domain results to HTTP responses
//! 5. Returns `Result<_, ApiError>`

use auth_handler::MappingKind;
use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};

use crate::{
    errors::ApiError,
    metrics::LoginOutcome,
    models::{request::*, response::*},
    AppState,
};

#[cfg(test)]
#[path = "handlers_tests.rs"]
mod tests;

/// POST /v1/config
///
/// Validate and store the backend configuration.
pub async fn write_config(
    State(state): State<AppState>,
    Json(request): Json<WriteConfigRequest>,
) -> Result<Json<ConfigResponse>, ApiError> {
    let config = state
        .engine
        .config_store()
        .write_config(request.into())
        .await?;

    Ok(Json(config.into()))
}

/// GET /v1/config
pub async fn read_config(
    State(state): State<AppState>,
) -> Result<Json<ConfigResponse>, ApiError> {
    let config = state
        .engine
        .config_store()
        .read_config()
        .await?
        .ok_or_else(|| ApiError::not_found("backend not configured"))?;

    Ok(Json(config.into()))
}

/// DELETE /v1/config
pub async fn delete_config(State(state): State<AppState>) -> Result<StatusCode, ApiError> {
    state.engine.config_store().delete_config().await?;
    Ok(StatusCode::NO_CONTENT)
}

/// PUT|POST /v1/map/teams/:team
pub async fn write_team_mapping(
    State(state): State<AppState>,
    Path(team): Path<String>,
    Json(request): Json<MappingWriteRequest>,
) -> Result<StatusCode, ApiError> {
    write_mapping(&state, MappingKind::Teams, &team, &request.value).await
}

/// GET /v1/map/teams/:team
pub async fn read_team_mapping(
    State(state): State<AppState>,
    Path(team): Path<String>,
) -> Result<Json<MappingResponse>, ApiError> {
    read_mapping(&state, MappingKind::Teams, &team).await
}

/// DELETE /v1/map/teams/:team
pub async fn delete_team_mapping(
    State(state): State<AppState>,
    Path(team): Path<String>,
) -> Result<StatusCode, ApiError> {
    delete_mapping(&state, MappingKind::Teams, &team).await
}

/// GET /v1/map/teams
pub async fn list_team_mappings(
    State(state): State<AppState>,
) -> Result<Json<MappingListResponse>, ApiError> {
    list_mappings(&state, MappingKind::Teams).await
}

/// PUT|POST /v1/map/users/:user
pub async fn write_user_mapping(
    State(state): State<AppState>,
    Path(user): Path<String>,
    Json(request): Json<MappingWriteRequest>,
) -> Result<StatusCode, ApiError> {
    write_mapping(&state, MappingKind::Users, &user, &request.value).await
}

/// GET /v1/map/users/:user
pub async fn read_user_mapping(
    State(state): State<AppState>,
    Path(user): Path<String>,
) -> Result<Json<MappingResponse>, ApiError> {
    read_mapping(&state, MappingKind::Users, &user).await
}

/// DELETE /v1/map/users/:user
pub async fn delete_user_mapping(
    State(state): State<AppState>,
    Path(user): Path<String>,
) -> Result<StatusCode, ApiError> {
    delete_mapping(&state, MappingKind::Users, &user).await
}

/// GET /v1/map/users
pub async fn list_user_mappings(
    State(state): State<AppState>,
) -> Result<Json<MappingListResponse>, ApiError> {
    list_mappings(&state, MappingKind::Users).await
}

async fn write_mapping(
    state: &AppState,
    kind: MappingKind,
    name: &str,
    policies: &str,
) -> Result<StatusCode, ApiError> {
    state
        .engine
        .mappings(kind)
        .write_mapping(name, policies)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn read_mapping(
    state: &AppState,
    kind: MappingKind,
    name: &str,
) -> Result<Json<MappingResponse>, ApiError> {
    let policies = state
        .engine
        .mappings(kind)
        .read_mapping(name)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("no {} mapping for '{}'", kind, name)))?;

    Ok(Json(MappingResponse {
        value: policies.to_value_string(),
    }))
}

async fn delete_mapping(
    state: &AppState,
    kind: MappingKind,
    name: &str,
) -> Result<StatusCode, ApiError> {
    state.engine.mappings(kind).delete_mapping(name).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn list_mappings(
    state: &AppState,
    kind: MappingKind,
) -> Result<Json<MappingListResponse>, ApiError> {
    let keys = state.engine.mappings(kind).list_mappings().await?;
    Ok(Json(MappingListResponse { keys }))
}

/// POST /v1/login
///
/// Exchange a GitHub personal access token for policies and a TTL.
/// Unauthenticated.
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let result = state.engine.login(&request.token).await;
    state.metrics.record_login(LoginOutcome::of(&result));

    Ok(Json(result?.into()))
}

/// POST /v1/login/renew
///
/// Re-check a token before extending a credential issued with `policies`.
pub async fn renew(
    State(state): State<AppState>,
    Json(request): Json<RenewRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let result = state.engine.renew(&request.token, &request.policies).await;
    state.metrics.record_login(LoginOutcome::of(&result));

    Ok(Json(result?.into()))
}

/// GET /v1/metrics
///
/// Prometheus text exposition of the login counters.
pub async fn metrics(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let body = state
        .metrics
        .render()
        .map_err(|e| ApiError::internal(format!("metrics encoding failed: {}", e)))?;

    Ok((
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        body,
    ))
}

/// GET /v1/health
///
/// Health check endpoint.
pub async fn health_check() -> Json<HealthCheckResponse> {
    Json(HealthCheckResponse {
        status: "healthy".to_string(),
        version: Some(env!("CARGO_PKG_VERSION").to_string()),
        timestamp: chrono::Utc::now().to_rfc3339(),
        error: None,
    })
}
