//! Tests for error handling and HTTP conversion

use super::*;

#[test]
fn test_auth_error_status_mapping() {
    let cases = [
        (AuthError::Validation("bad ttl".into()), StatusCode::BAD_REQUEST),
        (AuthError::InvalidCredentials, StatusCode::UNAUTHORIZED),
        (
            AuthError::PermissionDenied("user is not in required org".into()),
            StatusCode::FORBIDDEN,
        ),
        (AuthError::NotConfigured, StatusCode::PRECONDITION_FAILED),
        (AuthError::Upstream("timeout".into()), StatusCode::BAD_GATEWAY),
        (AuthError::Storage("poisoned".into()), StatusCode::INTERNAL_SERVER_ERROR),
    ];

    for (err, expected) in cases {
        assert_eq!(ApiError::from(err.clone()).status(), expected, "for {err:?}");
    }
}

#[test]
fn test_permission_denied_message_is_returned_to_caller() {
    let response =
        ApiError::from(AuthError::PermissionDenied("user is not in required org".into()))
            .to_response();

    assert_eq!(response.error.code, "PermissionDenied");
    assert_eq!(response.error.message, "user is not in required org");
    assert!(response.error.details.is_none());
}

#[test]
fn test_storage_details_are_not_exposed() {
    let response =
        ApiError::from(AuthError::Storage("lock poisoned at 0xdead".into())).to_response();

    assert_eq!(response.error.code, "InternalError");
    assert!(!response.error.message.contains("0xdead"));
}

#[test]
fn test_not_found_error() {
    let error = ApiError::not_found("no mapping for team 'dev'");

    assert_eq!(error.status(), StatusCode::NOT_FOUND);
    assert_eq!(error.to_response().error.message, "no mapping for team 'dev'");
}

#[test]
fn test_internal_error_hides_message() {
    let error = ApiError::internal("encoder exploded");

    assert_eq!(error.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        error.to_response().error.message,
        "An internal error occurred"
    );
}

#[test]
fn test_error_response_serializes_camel_case() {
    let json =
        serde_json::to_value(ApiError::from(AuthError::NotConfigured).to_response()).unwrap();

    assert_eq!(
        json,
        serde_json::json!({
            "error": {
                "code": "ConfigurationError",
                "message": "backend not configured"
            }
        })
    );
}

#[test]
fn test_into_response_sets_status() {
    let response = ApiError::from(AuthError::InvalidCredentials).into_response();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[test]
fn test_upstream_errors_are_marked_retryable() {
    let upstream = ApiError::from(AuthError::Upstream("timed out".into())).to_response();
    let denied = ApiError::from(AuthError::PermissionDenied("no".into())).to_response();

    assert_eq!(
        upstream.error.details,
        Some(serde_json::json!({ "retryable": true }))
    );
    assert!(denied.error.details.is_none());
}
