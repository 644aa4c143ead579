//! Authentication and tracing middleware
//!
//! This module provides middleware for:
//! - Operator bearer token checks on the configuration and mapping endpoints
//! - Request IDs and request logging
//!
//! Every request gets a request ID, taken from the caller's `x-request-id`
//! header when it is present and generated otherwise. The ID is logged at the
//! start and end of the request and echoed back in the response headers.

use axum::{
    extract::{Request, State},
    http::{HeaderMap, HeaderValue, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use secrecy::ExposeSecret;
use serde_json::json;

use crate::errors::{ErrorDetails, ErrorResponse};
use crate::AppState;

#[cfg(test)]
#[path = "middleware_tests.rs"]
mod tests;

/// Header carrying the request ID.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Request tracing middleware.
///
/// Adds request ID and logging context for observability. Request bodies are
/// never logged, so tokens in login payloads stay out of the logs.
pub async fn tracing_middleware(request: Request, next: Next) -> Response {
    let request_id = request
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .filter(|value| !value.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());

    tracing::info!(
        request_id = %request_id,
        method = %request.method(),
        uri = %request.uri(),
        "Request started"
    );

    let mut response = next.run(request).await;

    tracing::info!(
        request_id = %request_id,
        status = %response.status(),
        "Request completed"
    );

    if let Ok(value) = HeaderValue::from_str(&request_id) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }

    response
}

/// Operator authentication middleware.
///
/// Requires `Authorization: Bearer <token>` matching the configured operator
/// token. Login, renewal and health endpoints are mounted outside this layer
/// because a login is how callers obtain a credential in the first place.
///
/// Returns 401 if:
/// - no operator token is configured
/// - Authorization header is missing
/// - the header is not a Bearer token
/// - the token does not match
pub async fn operator_auth_middleware(
    State(state): State<AppState>,
    headers: HeaderMap,
    request: Request,
    next: Next,
) -> Result<Response, OperatorAuthError> {
    let expected = state
        .operator_token
        .as_ref()
        .ok_or(OperatorAuthError::NotConfigured)?;

    let auth_header = headers
        .get("authorization")
        .and_then(|h| h.to_str().ok())
        .ok_or(OperatorAuthError::MissingToken)?;

    let token = extract_bearer_token(auth_header)?;

    if !tokens_match(token, expected.expose_secret()) {
        tracing::warn!(
            method = %request.method(),
            uri = %request.uri(),
            "Rejected operator request with invalid token"
        );
        return Err(OperatorAuthError::InvalidToken);
    }

    Ok(next.run(request).await)
}

/// Extract Bearer token from Authorization header.
///
/// Expected format: "Bearer <token>"
fn extract_bearer_token(auth_header: &str) -> Result<&str, OperatorAuthError> {
    let parts: Vec<&str> = auth_header.split_whitespace().collect();

    if parts.len() != 2 {
        return Err(OperatorAuthError::InvalidFormat);
    }

    if !parts[0].eq_ignore_ascii_case("bearer") {
        return Err(OperatorAuthError::InvalidScheme);
    }

    Ok(parts[1])
}

/// Compare without returning early on the first differing byte.
fn tokens_match(presented: &str, expected: &str) -> bool {
    let (presented, expected) = (presented.as_bytes(), expected.as_bytes());
    if presented.len() != expected.len() {
        return false;
    }
    presented
        .iter()
        .zip(expected)
        .fold(0u8, |acc, (a, b)| acc | (a ^ b))
        == 0
}

/// Operator authentication errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperatorAuthError {
    /// The server has no operator token configured
    NotConfigured,

    /// Authorization header is missing
    MissingToken,

    /// Authorization header format is invalid
    InvalidFormat,

    /// Authorization scheme is not "Bearer"
    InvalidScheme,

    /// The token does not match the operator token
    InvalidToken,
}

impl IntoResponse for OperatorAuthError {
    fn into_response(self) -> Response {
        let (message, details) = match self {
            OperatorAuthError::NotConfigured => (
                "Operator endpoints are disabled. Set AUTH_OPERATOR_TOKEN to enable them.",
                None,
            ),
            OperatorAuthError::MissingToken => (
                "Authentication required. Provide the operator token as a Bearer token.",
                Some(json!({
                    "header": "Authorization",
                    "scheme": "Bearer"
                })),
            ),
            OperatorAuthError::InvalidFormat => (
                "Invalid Authorization header format. Expected: 'Bearer <token>'",
                Some(json!({
                    "header": "Authorization",
                    "expected_format": "Bearer <token>"
                })),
            ),
            OperatorAuthError::InvalidScheme => (
                "Invalid authorization scheme. Only 'Bearer' tokens are supported.",
                Some(json!({
                    "header": "Authorization",
                    "supported_schemes": ["Bearer"]
                })),
            ),
            OperatorAuthError::InvalidToken => ("Invalid operator token.", None),
        };

        let body = ErrorResponse {
            error: ErrorDetails {
                code: "AuthenticationError".to_string(),
                message: message.to_string(),
                details,
            },
        };

        (StatusCode::UNAUTHORIZED, Json(body)).into_response()
    }
}
