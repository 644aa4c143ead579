//! # Models
//!
//! This module contains the data models returned by the GitHub identity endpoints.
//!
//! Only the fields needed to answer "who is this token, which organizations is it
//! in, and which teams does it hold" are modelled. Every other field in the GitHub
//! payloads is ignored during deserialization.

use serde::{Deserialize, Serialize};

#[cfg(test)]
#[path = "models_tests.rs"]
mod tests;

/// Represents the GitHub user account a token authenticates as.
///
/// # Examples
///
/// ```rust
/// use github_client::models::User;
///
/// let user = User {
///     id: 12345,
///     login: "octocat".to_string(),
/// };
///
/// println!("User: {} (ID: {})", user.login, user.id);
/// ```
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct User {
    /// The unique numeric ID of the user
    #[serde(default)]
    pub id: u64,
    /// The login name of the user
    pub login: String,
}

/// Represents a GitHub organization as listed by `GET /user/orgs`.
///
/// # Examples
///
/// ```rust
/// use github_client::models::Organization;
///
/// let org = Organization {
///     id: 1,
///     login: "acme".to_string(),
/// };
/// assert!(org.is_named("ACME"));
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Organization {
    /// The unique numeric ID of the organization
    #[serde(default)]
    pub id: u64,
    /// The login (URL name) of the organization
    pub login: String,
}

impl Organization {
    /// Returns true when the organization login matches `name`, ignoring ASCII case.
    pub fn is_named(&self, name: &str) -> bool {
        self.login.eq_ignore_ascii_case(name)
    }
}

/// Represents a team membership as listed by `GET /user/teams`.
///
/// A team carries both a display name (`"Platform Owners"`) and a URL slug
/// (`"platform-owners"`), and always names the organization it belongs to.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Team {
    /// The unique numeric ID of the team
    #[serde(default)]
    pub id: u64,
    /// The display name of the team
    pub name: String,
    /// The URL-safe slug of the team
    #[serde(default)]
    pub slug: String,
    /// The organization the team belongs to
    pub organization: Organization,
}

impl Team {
    /// Returns the identifiers a team can be referred to by: its name and, when
    /// it differs, its slug.
    pub fn identifiers(&self) -> Vec<String> {
        let mut ids = vec![self.name.clone()];
        if !self.slug.is_empty() && self.slug != self.name {
            ids.push(self.slug.clone());
        }
        ids
    }
}
