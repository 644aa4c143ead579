//! Error handling and HTTP error conversion
//!
//! Domain errors from `auth_handler` are converted to HTTP responses with
//! appropriate status codes and error messages. This conversion happens at the
//! HTTP boundary and never exposes storage internals.
//!
//! | `AuthError`          | Status |
//! |----------------------|--------|
//! | `Validation`         | 400    |
//! | `InvalidCredentials` | 401    |
//! | `PermissionDenied`   | 403    |
//! | `NotConfigured`      | 412    |
//! | `Storage`            | 500    |
//! | `Upstream`           | 502    |

use auth_handler::AuthError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

#[cfg(test)]
#[path = "errors_tests.rs"]
mod tests;

/// Standard error response for all API errors.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    /// Error details
    pub error: ErrorDetails,
}

/// Error details structure
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorDetails {
    /// Machine-readable error code
    pub code: String,

    /// Human-readable error message
    pub message: String,

    /// Additional context (optional, type varies by error)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

/// Axum response wrapper for API errors
///
/// # Example
///
/// ```rust,ignore
/// async fn handler(State(state): State<AppState>) -> Result<Json<ConfigResponse>, ApiError> {
///     let config = state.engine.config_store().read_config().await?;
///     ...
/// }
/// ```
#[derive(Debug)]
pub enum ApiError {
    /// A domain error from the authentication backend.
    Auth(AuthError),

    /// The requested entry does not exist.
    NotFound(String),

    /// A failure inside the HTTP layer itself.
    Internal(String),
}

impl ApiError {
    /// Create a not found error
    pub fn not_found(message: impl Into<String>) -> Self {
        ApiError::NotFound(message.into())
    }

    /// Create an internal server error
    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::Internal(message.into())
    }

    /// The HTTP status this error maps to.
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Auth(err) => auth_error_status(err),
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Build the response body for this error.
    pub fn to_response(&self) -> ErrorResponse {
        let (code, message) = match self {
            ApiError::Auth(err) => (auth_error_code(err), public_message(err)),
            ApiError::NotFound(message) => ("NotFound", message.clone()),
            ApiError::Internal(_) => ("InternalError", "An internal error occurred".to_string()),
        };

        let details = match self {
            ApiError::Auth(err) if err.is_retryable() => {
                Some(serde_json::json!({ "retryable": true }))
            }
            _ => None,
        };

        ErrorResponse {
            error: ErrorDetails {
                code: code.to_string(),
                message,
                details,
            },
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        ApiError::Auth(err)
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::Auth(err) => write!(f, "{}", err),
            ApiError::NotFound(message) | ApiError::Internal(message) => f.write_str(message),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        // Log error server-side
        log_error(&self, status);

        (status, Json(self.to_response())).into_response()
    }
}

fn auth_error_status(err: &AuthError) -> StatusCode {
    match err {
        AuthError::Validation(_) => StatusCode::BAD_REQUEST,
        AuthError::InvalidCredentials => StatusCode::UNAUTHORIZED,
        AuthError::PermissionDenied(_) => StatusCode::FORBIDDEN,
        AuthError::NotConfigured => StatusCode::PRECONDITION_FAILED,
        AuthError::Upstream(_) => StatusCode::BAD_GATEWAY,
        AuthError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn auth_error_code(err: &AuthError) -> &'static str {
    match err {
        AuthError::Validation(_) => "ValidationError",
        AuthError::InvalidCredentials => "AuthenticationError",
        AuthError::PermissionDenied(_) => "PermissionDenied",
        AuthError::NotConfigured => "ConfigurationError",
        AuthError::Upstream(_) => "UpstreamError",
        AuthError::Storage(_) => "InternalError",
    }
}

fn public_message(err: &AuthError) -> String {
    match err {
        AuthError::Storage(_) => "An internal error occurred".to_string(),
        other => other.to_string(),
    }
}

/// Log error with appropriate level.
///
/// Errors caused by the caller's input or identity are expected traffic and
/// stay at info; everything else points at this service or GitHub.
fn log_error(error: &ApiError, status: StatusCode) {
    match error {
        ApiError::Auth(err) if err.is_caller_error() => {
            tracing::info!("API error: {} - {}", status, error);
        }
        ApiError::NotFound(_) => {
            tracing::info!("API error: {} - {}", status, error);
        }
        ApiError::Auth(AuthError::NotConfigured) => {
            tracing::warn!("API error: {} - {}", status, error);
        }
        _ => {
            tracing::error!("API error: {} - {}", status, error);
        }
    }
}
