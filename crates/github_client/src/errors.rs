//! Error types for GitHub client operations.
//!
//! This module defines the error types that can occur when asking the GitHub API
//! who a token belongs to and which organizations and teams that identity is part of.
//! None of these errors are security decisions; they describe why the identity
//! lookup itself could not be completed.

#[cfg(test)]
#[path = "errors_tests.rs"]
mod tests;

/// Errors that can occur during GitHub client operations.
///
/// ## Examples
///
/// ```rust,ignore
/// use github_client::Error;
///
/// match provider.resolve_identity(&credentials).await {
///     Ok(login) => println!("Token belongs to {}", login),
///     Err(Error::Unauthorized) => eprintln!("GitHub rejected the token"),
///     Err(Error::Timeout(after)) => eprintln!("GitHub did not answer within {:?}", after),
///     Err(err) => eprintln!("Other error: {}", err),
/// }
/// ```
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// GitHub answered with an error status that has no dedicated variant.
    ///
    /// Carries the HTTP status code and the message from the GitHub error body.
    #[error("GitHub API request failed with status {status}: {message}")]
    ApiError { status: u16, message: String },

    /// The GitHub client could not be constructed.
    ///
    /// This error occurs when the token cannot be attached to the client or the
    /// underlying HTTP client fails to build.
    #[error("Failed to authenticate or initialize GitHub client: {0}")]
    AuthError(String),

    /// The configured API base URL is not a usable URI.
    #[error("Invalid GitHub API base URL '{0}'")]
    InvalidBaseUrl(String),

    /// Error deserializing the response from GitHub.
    #[error("Failed to deserialize GitHub response: {0}")]
    Deserialization(#[from] serde_json::Error),

    /// The request did not reach GitHub or the response could not be read.
    ///
    /// Covers connection failures, TLS errors and malformed response bodies.
    #[error("Invalid response format")]
    InvalidResponse,

    /// The requested resource was not found.
    #[error("Resource not found")]
    NotFound,

    /// GitHub API rate limit has been exceeded.
    ///
    /// The caller should back off before retrying.
    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    /// The request did not complete within the configured timeout.
    #[error("GitHub API request timed out after {0:?}")]
    Timeout(std::time::Duration),

    /// GitHub rejected the token (HTTP 401).
    #[error("GitHub rejected the supplied token")]
    Unauthorized,
}

impl Error {
    /// Returns the HTTP status GitHub answered with, if the error came from a response.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::ApiError { status, .. } => Some(*status),
            Error::NotFound => Some(404),
            Error::RateLimitExceeded => Some(429),
            Error::Unauthorized => Some(401),
            _ => None,
        }
    }
}
