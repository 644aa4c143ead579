use super::*;

#[test]
fn test_outcome_classification() {
    let cases = [
        (Ok(()), LoginOutcome::Success),
        (Err(AuthError::Validation("x".into())), LoginOutcome::InvalidRequest),
        (Err(AuthError::NotConfigured), LoginOutcome::NotConfigured),
        (Err(AuthError::InvalidCredentials), LoginOutcome::InvalidCredentials),
        (Err(AuthError::PermissionDenied("x".into())), LoginOutcome::Denied),
        (Err(AuthError::Upstream("x".into())), LoginOutcome::UpstreamError),
        (Err(AuthError::Storage("x".into())), LoginOutcome::InternalError),
    ];

    for (result, expected) in cases {
        assert_eq!(LoginOutcome::of(&result), expected, "for {result:?}");
    }
}

#[test]
fn test_prometheus_counts_by_outcome() {
    let metrics = PrometheusLoginMetrics::new(Registry::new()).unwrap();

    metrics.record_login(LoginOutcome::Success);
    metrics.record_login(LoginOutcome::Success);
    metrics.record_login(LoginOutcome::Denied);

    assert_eq!(metrics.login_count(LoginOutcome::Success), 2);
    assert_eq!(metrics.login_count(LoginOutcome::Denied), 1);
    assert_eq!(metrics.login_count(LoginOutcome::UpstreamError), 0);
}

#[test]
fn test_render_uses_text_format() {
    let metrics = PrometheusLoginMetrics::new(Registry::new()).unwrap();
    metrics.record_login(LoginOutcome::InvalidCredentials);

    let text = metrics.render().unwrap();

    assert!(text.contains("# TYPE github_auth_logins_total counter"));
    assert!(text.contains("github_auth_logins_total{outcome=\"invalid_credentials\"} 1"));
}

#[test]
fn test_duplicate_registration_fails() {
    let registry = Registry::new();
    let _first = PrometheusLoginMetrics::new(registry.clone()).unwrap();

    assert!(PrometheusLoginMetrics::new(registry).is_err());
}

#[test]
fn test_noop_renders_nothing() {
    let metrics = NoOpLoginMetrics::new();
    metrics.record_login(LoginOutcome::Success);

    assert_eq!(metrics.render().unwrap(), "");
}
