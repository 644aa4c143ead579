//! Crate for asking the GitHub REST API who a token belongs to.
//!
//! This crate provides a client authenticated with a personal access token that can
//! resolve the token's user, the organizations that user belongs to and the teams
//! the user holds. GitHub Enterprise installations are supported by pointing the
//! client at a different API base URL.

use octocrab::{Octocrab, Result as OctocrabResult};
use secrecy::{ExposeSecret, SecretString};
use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, error, info, instrument, warn};

pub mod errors;
pub use errors::Error;

pub mod identity;
pub use identity::{GitHubIdentityProvider, IdentityProvider, TokenCredentials};

pub mod models;

// Reference the tests module in the separate file
#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;

/// Public GitHub API endpoint used when no base URL is configured.
pub const DEFAULT_API_BASE_URL: &str = "https://api.github.com";

/// Number of items requested per page from list endpoints.
const PAGE_SIZE: usize = 100;

/// Upper bound on pages followed for a single list call.
const MAX_PAGES: u32 = 50;

#[derive(Debug, Serialize)]
struct PageParams {
    per_page: usize,
    page: u32,
}

/// A client for interacting with the GitHub API, authenticated with a personal token.
#[derive(Debug)]
pub struct GitHubClient {
    client: Octocrab,
}

impl GitHubClient {
    /// Creates a new `GitHubClient` from an authenticated `Octocrab` instance.
    ///
    /// Use [`create_token_client`] to build the `Octocrab` instance.
    pub fn new(client: Octocrab) -> Self {
        Self { client }
    }

    /// Fetches the user the token authenticates as.
    ///
    /// # Errors
    ///
    /// Returns `Error::Unauthorized` if GitHub rejects the token, or another
    /// variant describing the failed request.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// # use github_client::{create_token_client, GitHubClient};
    /// # use secrecy::SecretString;
    /// # async fn example() -> Result<(), github_client::Error> {
    /// let token = SecretString::from("ghp_example".to_string());
    /// let client = GitHubClient::new(create_token_client(&token, None)?);
    ///
    /// let user = client.get_authenticated_user().await?;
    /// println!("Token belongs to {}", user.login);
    /// # Ok(())
    /// # }
    /// ```
    #[instrument(skip(self))]
    pub async fn get_authenticated_user(&self) -> Result<models::User, Error> {
        debug!("Fetching authenticated user");

        let result: OctocrabResult<models::User> = self.client.get("/user", None::<&()>).await;
        match result {
            Ok(user) => {
                info!(login = %user.login, "Resolved authenticated user");
                Ok(user)
            }
            Err(e) => {
                log_octocrab_error("Failed to get authenticated user", &e);
                Err(convert_octocrab_error(e))
            }
        }
    }

    /// Lists every organization the authenticated user is a member of.
    ///
    /// All pages of `GET /user/orgs` are followed.
    ///
    /// # Errors
    ///
    /// Returns an error if any page request fails.
    #[instrument(skip(self))]
    pub async fn list_user_organizations(&self) -> Result<Vec<models::Organization>, Error> {
        let orgs: Vec<models::Organization> = self.get_all_pages("/user/orgs").await?;

        info!(count = orgs.len(), "Retrieved organizations for user");
        Ok(orgs)
    }

    /// Lists every team the authenticated user holds, across all organizations.
    ///
    /// All pages of `GET /user/teams` are followed. Callers filter by
    /// organization using [`models::Team::organization`].
    ///
    /// # Errors
    ///
    /// Returns an error if any page request fails.
    #[instrument(skip(self))]
    pub async fn list_user_teams(&self) -> Result<Vec<models::Team>, Error> {
        let teams: Vec<models::Team> = self.get_all_pages("/user/teams").await?;

        info!(count = teams.len(), "Retrieved teams for user");
        Ok(teams)
    }

    async fn get_all_pages<T>(&self, route: &str) -> Result<Vec<T>, Error>
    where
        T: DeserializeOwned,
    {
        let mut items = Vec::new();

        for page in 1..=MAX_PAGES {
            let params = PageParams {
                per_page: PAGE_SIZE,
                page,
            };

            debug!(route = route, page = page, "Requesting page");
            let result: OctocrabResult<Vec<T>> = self.client.get(route, Some(&params)).await;
            let batch = match result {
                Ok(batch) => batch,
                Err(e) => {
                    log_octocrab_error(&format!("Failed to list {}", route), &e);
                    return Err(convert_octocrab_error(e));
                }
            };

            let len = batch.len();
            items.extend(batch);
            if len < PAGE_SIZE {
                return Ok(items);
            }
        }

        warn!(
            route = route,
            max_pages = MAX_PAGES,
            "Stopped following pages at the page limit"
        );
        Ok(items)
    }
}

/// Creates an `Octocrab` client authenticated with a personal access token.
///
/// # Arguments
///
/// * `token` - The personal access token.
/// * `base_url` - Optional API base URL for GitHub Enterprise, for example
///   `https://github.example.com/api/v3/`. `None` uses [`DEFAULT_API_BASE_URL`].
///
/// # Errors
///
/// Returns `Error::InvalidBaseUrl` if the base URL cannot be used as a URI, or
/// `Error::AuthError` if the client cannot be built.
#[instrument(skip(token))]
pub fn create_token_client(
    token: &SecretString,
    base_url: Option<&str>,
) -> Result<Octocrab, Error> {
    let mut builder = Octocrab::builder();

    if let Some(url) = base_url {
        builder = builder.base_uri(url).map_err(|e| {
            error!(base_url = url, error = %e, "Failed to parse GitHub API base URL");
            Error::InvalidBaseUrl(url.to_string())
        })?;
    }

    builder
        .personal_token(token.expose_secret().to_string())
        .build()
        .map_err(|e| {
            error!(error = %e, "Failed to build Octocrab client with personal token");
            Error::AuthError(format!("Failed to build the GitHub client. Error was: {}", e))
        })
}

fn convert_octocrab_error(e: octocrab::Error) -> Error {
    match e {
        octocrab::Error::GitHub { source, .. } => {
            let status = source.status_code.as_u16();
            match status {
                401 => Error::Unauthorized,
                404 => Error::NotFound,
                429 => Error::RateLimitExceeded,
                403 if source.message.to_lowercase().contains("rate limit") => {
                    Error::RateLimitExceeded
                }
                _ => Error::ApiError {
                    status,
                    message: source.message,
                },
            }
        }
        _ => Error::InvalidResponse,
    }
}

fn log_octocrab_error(message: &str, e: &octocrab::Error) {
    match e {
        octocrab::Error::GitHub { source, .. } => error!(
            status = source.status_code.as_u16(),
            error_message = source.message,
            "{}. Received an error from GitHub",
            message
        ),
        octocrab::Error::UriParse { source, .. } => error!(
            error_message = source.to_string(),
            "{}. Failed to parse URI.",
            message
        ),
        octocrab::Error::Uri { source, .. } => error!(
            error_message = source.to_string(),
            "{}, Failed to parse URI.",
            message
        ),
        octocrab::Error::InvalidHeaderValue { source, .. } => error!(
            error_message = source.to_string(),
            "{}. One of the header values was invalid.",
            message
        ),
        _ => error!(error_message = e.to_string(), message),
    };
}
