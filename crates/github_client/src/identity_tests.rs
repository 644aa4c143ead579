//! Tests for the GitHub identity provider.

use super::*;
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn credentials_for(mock_server: &MockServer) -> TokenCredentials {
    TokenCredentials::new("ghp_test_token").with_base_url(Some(mock_server.uri()))
}

async fn mount_teams(mock_server: &MockServer, teams: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path("/user/teams"))
        .respond_with(ResponseTemplate::new(200).set_body_json(teams))
        .mount(mock_server)
        .await;
}

#[test]
fn test_credentials_debug_redacts_token() {
    let credentials = TokenCredentials::new("ghp_super_secret")
        .with_base_url(Some("https://ghe.example.com/api/v3/".to_string()));

    let rendered = format!("{:?}", credentials);

    assert!(!rendered.contains("ghp_super_secret"));
    assert!(rendered.contains("<REDACTED>"));
    assert!(rendered.contains("ghe.example.com"));
}

#[test]
fn test_credentials_default_to_public_api() {
    let credentials = TokenCredentials::new("token");

    assert!(credentials.base_url().is_none());
}

#[test]
fn test_default_timeout() {
    let provider = GitHubIdentityProvider::default();

    assert_eq!(
        provider.request_timeout(),
        GitHubIdentityProvider::DEFAULT_TIMEOUT
    );
}

#[tokio::test]
async fn test_resolve_identity_returns_login() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/user"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "login": "octocat",
            "id": 1
        })))
        .mount(&mock_server)
        .await;

    let provider = GitHubIdentityProvider::default();

    let login = provider
        .resolve_identity(&credentials_for(&mock_server))
        .await
        .expect("Expected login");

    assert_eq!(login, "octocat");
}

#[tokio::test]
async fn test_list_organizations_returns_logins() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/user/orgs"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"login": "acme", "id": 1},
            {"login": "Globex", "id": 2}
        ])))
        .mount(&mock_server)
        .await;

    let provider = GitHubIdentityProvider::default();

    let orgs = provider
        .list_organizations(&credentials_for(&mock_server))
        .await
        .expect("Expected organizations");

    assert_eq!(orgs, vec!["acme".to_string(), "Globex".to_string()]);
}

#[tokio::test]
async fn test_list_teams_filters_by_organization_case_insensitively() {
    let mock_server = MockServer::start().await;

    mount_teams(
        &mock_server,
        json!([
            {
                "id": 1,
                "name": "Owners",
                "slug": "owners",
                "organization": {"login": "ACME", "id": 1}
            },
            {
                "id": 2,
                "name": "Ops",
                "slug": "ops",
                "organization": {"login": "globex", "id": 2}
            },
            {
                "id": 3,
                "name": "Platform Team",
                "slug": "platform-team",
                "organization": {"login": "acme", "id": 1}
            }
        ]),
    )
    .await;

    let provider = GitHubIdentityProvider::default();

    let teams = provider
        .list_teams(&credentials_for(&mock_server), "acme")
        .await
        .expect("Expected teams");

    assert_eq!(
        teams,
        vec![
            "Owners".to_string(),
            "owners".to_string(),
            "Platform Team".to_string(),
            "platform-team".to_string(),
        ]
    );
}

#[tokio::test]
async fn test_list_teams_for_organization_without_membership() {
    let mock_server = MockServer::start().await;

    mount_teams(
        &mock_server,
        json!([
            {"id": 2, "name": "Ops", "slug": "ops", "organization": {"login": "globex", "id": 2}}
        ]),
    )
    .await;

    let provider = GitHubIdentityProvider::default();

    let teams = provider
        .list_teams(&credentials_for(&mock_server), "acme")
        .await
        .expect("Expected empty team list");

    assert!(teams.is_empty());
}

#[tokio::test]
async fn test_slow_upstream_times_out() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/user"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"login": "octocat", "id": 1}))
                .set_delay(Duration::from_millis(500)),
        )
        .mount(&mock_server)
        .await;

    let provider = GitHubIdentityProvider::new(Duration::from_millis(50));

    let result = provider
        .resolve_identity(&credentials_for(&mock_server))
        .await;

    assert!(
        matches!(result, Err(Error::Timeout(d)) if d == Duration::from_millis(50)),
        "Expected timeout, got {result:?}"
    );
}

#[tokio::test]
async fn test_rejected_token_surfaces_unauthorized() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/user"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "message": "Bad credentials",
            "documentation_url": "https://docs.github.com/rest"
        })))
        .mount(&mock_server)
        .await;

    let provider = GitHubIdentityProvider::default();

    let result = provider
        .resolve_identity(&credentials_for(&mock_server))
        .await;

    assert!(matches!(result, Err(Error::Unauthorized)));
}
