//! Team and user to policy mappings.
//!
//! Each mapping is stored under `map/<kind>/<key>` as a JSON list of policy
//! names. Keys are case-insensitive: they are trimmed and lowercased before
//! every read and write. Policy names are opaque and keep their case.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info};

use crate::storage::{get_json, put_json};
use crate::{AuthError, AuthResult, Storage};

#[cfg(test)]
#[path = "policy_map_tests.rs"]
mod tests;

/// A de-duplicated, sorted set of policy names.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PolicySet(BTreeSet<String>);

impl PolicySet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a policy list such as `"admin, dev ops"`.
    ///
    /// Items are separated by commas and whitespace. Empty items are dropped.
    pub fn parse(raw: &str) -> Self {
        raw.split(|c: char| c == ',' || c.is_whitespace())
            .filter(|item| !item.is_empty())
            .map(str::to_string)
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn contains(&self, policy: &str) -> bool {
        self.0.contains(policy)
    }

    /// Union `other` into this set.
    pub fn extend(&mut self, other: PolicySet) {
        self.0.extend(other.0);
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// Render as the comma-separated wire form, e.g. `"admin,dev"`.
    pub fn to_value_string(&self) -> String {
        self.iter().collect::<Vec<_>>().join(",")
    }

    pub fn into_vec(self) -> Vec<String> {
        self.0.into_iter().collect()
    }
}

impl<S: Into<String>> FromIterator<S> for PolicySet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

impl fmt::Display for PolicySet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_value_string())
    }
}

/// The namespace a mapping store operates in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MappingKind {
    /// GitHub team names and slugs.
    Teams,
    /// GitHub user logins.
    Users,
}

impl MappingKind {
    pub fn storage_prefix(&self) -> &'static str {
        match self {
            MappingKind::Teams => "map/teams/",
            MappingKind::Users => "map/users/",
        }
    }

    fn subject(&self) -> &'static str {
        match self {
            MappingKind::Teams => "team",
            MappingKind::Users => "user",
        }
    }
}

impl fmt::Display for MappingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MappingKind::Teams => f.write_str("teams"),
            MappingKind::Users => f.write_str("users"),
        }
    }
}

/// Reads and writes mappings in one namespace.
#[derive(Debug, Clone)]
pub struct PolicyMappingStore {
    storage: Arc<dyn Storage>,
    kind: MappingKind,
}

impl PolicyMappingStore {
    pub fn new(storage: Arc<dyn Storage>, kind: MappingKind) -> Self {
        Self { storage, kind }
    }

    /// Replace the policies mapped to `name`.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Validation` when the name is empty or contains `/`,
    /// or when `policies` holds no policy names.
    pub async fn write_mapping(&self, name: &str, policies: &str) -> AuthResult<PolicySet> {
        let key = self.storage_key(name)?;

        let set = PolicySet::parse(policies);
        if set.is_empty() {
            return Err(AuthError::Validation(format!(
                "at least one policy is required for {} '{}'",
                self.kind.subject(),
                name.trim()
            )));
        }

        put_json(self.storage.as_ref(), &key, &set).await?;

        info!(
            kind = %self.kind,
            key = %key,
            policies = %set,
            "Policy mapping written"
        );

        Ok(set)
    }

    /// Look up the policies mapped to `name`. `Ok(None)` when there is no mapping.
    pub async fn read_mapping(&self, name: &str) -> AuthResult<Option<PolicySet>> {
        let key = self.storage_key(name)?;
        get_json(self.storage.as_ref(), &key).await
    }

    /// Remove the mapping for `name`. Removing an absent mapping succeeds.
    pub async fn delete_mapping(&self, name: &str) -> AuthResult<()> {
        let key = self.storage_key(name)?;
        self.storage.delete(&key).await?;
        debug!(kind = %self.kind, key = %key, "Policy mapping deleted");
        Ok(())
    }

    /// List the normalized keys that currently have a mapping, sorted.
    pub async fn list_mappings(&self) -> AuthResult<Vec<String>> {
        self.storage.list(self.kind.storage_prefix()).await
    }

    fn storage_key(&self, name: &str) -> AuthResult<String> {
        let normalized = normalize_key(name);

        if normalized.is_empty() {
            return Err(AuthError::Validation(format!(
                "{} name must not be empty",
                self.kind.subject()
            )));
        }
        if normalized.contains('/') {
            return Err(AuthError::Validation(format!(
                "{} name '{}' must not contain '/'",
                self.kind.subject(),
                name.trim()
            )));
        }

        Ok(format!("{}{}", self.kind.storage_prefix(), normalized))
    }
}

/// Normalize a mapping key: trimmed and lowercased.
pub fn normalize_key(name: &str) -> String {
    name.trim().to_lowercase()
}
