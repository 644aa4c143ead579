//! Tests for environment configuration

use super::*;
use secrecy::ExposeSecret;
use serial_test::serial;

const VARS: [&str; 6] = [
    "API_HOST",
    "API_PORT",
    "AUTH_DEFAULT_LEASE_TTL",
    "AUTH_MAX_LEASE_TTL",
    "GITHUB_REQUEST_TIMEOUT",
    "AUTH_OPERATOR_TOKEN",
];

fn clear_env() {
    for var in VARS {
        env::remove_var(var);
    }
}

#[test]
#[serial]
fn test_defaults_when_environment_is_empty() {
    clear_env();

    let config = ServiceConfig::from_env().unwrap();

    assert_eq!(config.host, "0.0.0.0");
    assert_eq!(config.port, 8200);
    assert_eq!(config.default_lease_ttl, Duration::from_secs(24 * 60 * 60));
    assert_eq!(config.max_lease_ttl, Duration::from_secs(768 * 60 * 60));
    assert_eq!(config.github_request_timeout, Duration::from_secs(10));
    assert!(config.operator_token.is_none());
}

#[test]
#[serial]
fn test_values_are_read_from_environment() {
    clear_env();
    env::set_var("API_HOST", "127.0.0.1");
    env::set_var("API_PORT", "9000");
    env::set_var("AUTH_DEFAULT_LEASE_TTL", "1h");
    env::set_var("AUTH_MAX_LEASE_TTL", "48h");
    env::set_var("GITHUB_REQUEST_TIMEOUT", "3");
    env::set_var("AUTH_OPERATOR_TOKEN", " s3cret ");

    let config = ServiceConfig::from_env().unwrap();
    clear_env();

    assert_eq!(config.host, "127.0.0.1");
    assert_eq!(config.port, 9000);
    assert_eq!(
        config.system_view(),
        SystemView::new(Duration::from_secs(3600), Duration::from_secs(48 * 3600))
    );
    assert_eq!(config.github_request_timeout, Duration::from_secs(3));
    assert_eq!(
        config.operator_token.as_ref().map(|t| t.expose_secret()),
        Some("s3cret")
    );
    assert!(!format!("{config:?}").contains("s3cret"));
    assert_eq!(
        config.socket_addr().unwrap(),
        "127.0.0.1:9000".parse::<SocketAddr>().unwrap()
    );
}

#[test]
#[serial]
fn test_invalid_port_fails() {
    clear_env();
    env::set_var("API_PORT", "not-a-port");

    let result = ServiceConfig::from_env();
    clear_env();

    assert!(matches!(
        result,
        Err(ConfigError::InvalidValue { name: "API_PORT", .. })
    ));
}

#[test]
#[serial]
fn test_invalid_duration_fails() {
    clear_env();
    env::set_var("AUTH_MAX_LEASE_TTL", "forever");

    let result = ServiceConfig::from_env();
    clear_env();

    assert!(matches!(
        result,
        Err(ConfigError::InvalidValue { name: "AUTH_MAX_LEASE_TTL", .. })
    ));
}

#[test]
#[serial]
fn test_default_above_max_fails() {
    clear_env();
    env::set_var("AUTH_DEFAULT_LEASE_TTL", "72h");
    env::set_var("AUTH_MAX_LEASE_TTL", "48h");

    let result = ServiceConfig::from_env();
    clear_env();

    assert!(matches!(result, Err(ConfigError::DefaultExceedsMax { .. })));
}

#[test]
#[serial]
fn test_blank_operator_token_is_unset() {
    clear_env();
    env::set_var("AUTH_OPERATOR_TOKEN", "   ");

    let config = ServiceConfig::from_env().unwrap();
    clear_env();

    assert!(config.operator_token.is_none());
}
