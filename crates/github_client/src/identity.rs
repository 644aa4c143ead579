//! Identity lookups against GitHub for a personal access token.
//!
//! [`IdentityProvider`] is the seam the authentication engine depends on. It answers
//! three questions for a token: who it belongs to, which organizations that user
//! is in, and which teams the user holds inside one organization.
//! [`GitHubIdentityProvider`] answers them over the GitHub REST API, bounding every
//! request with a timeout.

use async_trait::async_trait;
use secrecy::SecretString;
use std::future::Future;
use std::time::Duration;
use tracing::{debug, instrument, warn};

use crate::{create_token_client, Error, GitHubClient};

#[cfg(test)]
#[path = "identity_tests.rs"]
mod tests;

/// A token together with the API endpoint it should be presented to.
pub struct TokenCredentials {
    token: SecretString,
    base_url: Option<String>,
}

impl TokenCredentials {
    /// Creates credentials for the public GitHub API.
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: SecretString::from(token.into()),
            base_url: None,
        }
    }

    /// Targets a GitHub Enterprise API endpoint instead of the public API.
    pub fn with_base_url(mut self, base_url: Option<String>) -> Self {
        self.base_url = base_url;
        self
    }

    /// The token to authenticate with.
    pub fn token(&self) -> &SecretString {
        &self.token
    }

    /// The API base URL, if one was configured.
    pub fn base_url(&self) -> Option<&str> {
        self.base_url.as_deref()
    }
}

impl std::fmt::Debug for TokenCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenCredentials")
            .field("token", &"<REDACTED>")
            .field("base_url", &self.base_url)
            .finish()
    }
}

/// Identity provider interface
///
/// Resolves the identity behind a token and its memberships. Failures are
/// transport or API failures; deciding whether a membership grants access is
/// left to the caller.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Resolve the login name of the user the token authenticates as.
    ///
    /// # Errors
    /// Returns `Error::Unauthorized` if the token is rejected.
    async fn resolve_identity(&self, credentials: &TokenCredentials) -> Result<String, Error>;

    /// List the logins of every organization the user belongs to.
    async fn list_organizations(&self, credentials: &TokenCredentials)
        -> Result<Vec<String>, Error>;

    /// List the teams the user holds in `organization`.
    ///
    /// Each team contributes its name and, when different, its slug.
    /// Organization matching ignores ASCII case.
    async fn list_teams(
        &self,
        credentials: &TokenCredentials,
        organization: &str,
    ) -> Result<Vec<String>, Error>;
}

/// GitHub REST implementation of [`IdentityProvider`].
///
/// A fresh client is built for each call because every call carries its own
/// token. Each upstream request is bounded by `request_timeout`; a request that
/// exceeds it is dropped, which cancels it.
///
/// # Examples
///
/// ```rust,no_run
/// use github_client::{GitHubIdentityProvider, IdentityProvider, TokenCredentials};
/// use std::time::Duration;
///
/// # async fn example() -> Result<(), github_client::Error> {
/// let provider = GitHubIdentityProvider::new(Duration::from_secs(5));
/// let credentials = TokenCredentials::new("ghp_example");
///
/// let login = provider.resolve_identity(&credentials).await?;
/// let teams = provider.list_teams(&credentials, "acme").await?;
/// println!("{} holds {} team(s)", login, teams.len());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct GitHubIdentityProvider {
    request_timeout: Duration,
}

impl GitHubIdentityProvider {
    /// Timeout applied when none is configured.
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

    /// Create a provider whose upstream requests time out after `request_timeout`.
    pub fn new(request_timeout: Duration) -> Self {
        Self { request_timeout }
    }

    /// The per-request timeout.
    pub fn request_timeout(&self) -> Duration {
        self.request_timeout
    }

    fn client_for(&self, credentials: &TokenCredentials) -> Result<GitHubClient, Error> {
        let octocrab = create_token_client(credentials.token(), credentials.base_url())?;
        Ok(GitHubClient::new(octocrab))
    }

    async fn bounded<T, F>(&self, request: F) -> Result<T, Error>
    where
        F: Future<Output = Result<T, Error>>,
    {
        match tokio::time::timeout(self.request_timeout, request).await {
            Ok(result) => result,
            Err(_) => {
                warn!(
                    timeout_ms = self.request_timeout.as_millis() as u64,
                    "GitHub request timed out"
                );
                Err(Error::Timeout(self.request_timeout))
            }
        }
    }
}

impl Default for GitHubIdentityProvider {
    fn default() -> Self {
        Self::new(Self::DEFAULT_TIMEOUT)
    }
}

#[async_trait]
impl IdentityProvider for GitHubIdentityProvider {
    #[instrument(skip(self))]
    async fn resolve_identity(&self, credentials: &TokenCredentials) -> Result<String, Error> {
        let client = self.client_for(credentials)?;
        let user = self.bounded(client.get_authenticated_user()).await?;
        Ok(user.login)
    }

    #[instrument(skip(self))]
    async fn list_organizations(
        &self,
        credentials: &TokenCredentials,
    ) -> Result<Vec<String>, Error> {
        let client = self.client_for(credentials)?;
        let orgs = self.bounded(client.list_user_organizations()).await?;
        Ok(orgs.into_iter().map(|org| org.login).collect())
    }

    #[instrument(skip(self))]
    async fn list_teams(
        &self,
        credentials: &TokenCredentials,
        organization: &str,
    ) -> Result<Vec<String>, Error> {
        let client = self.client_for(credentials)?;
        let teams = self.bounded(client.list_user_teams()).await?;

        let mut names: Vec<String> = Vec::new();
        for team in teams
            .iter()
            .filter(|team| team.organization.is_named(organization))
        {
            for id in team.identifiers() {
                if !names.contains(&id) {
                    names.push(id);
                }
            }
        }

        debug!(
            organization = organization,
            team_count = names.len(),
            "Filtered teams to organization"
        );
        Ok(names)
    }
}
