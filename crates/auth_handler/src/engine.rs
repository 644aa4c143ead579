//! Login orchestration.
//!
//! A login resolves the token's user, checks membership in the configured
//! organization, collects the policies mapped to the user's teams (plus the
//! reserved `default` team entry and any user mapping) and negotiates the
//! credential TTL. A login never writes to storage.

use github_client::{IdentityProvider, TokenCredentials};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

use crate::{
    AuthError, AuthResult, ConfigStore, LeaseNegotiator, MappingKind, PolicyMappingStore,
    PolicySet, Storage, SystemView,
};

#[cfg(test)]
#[path = "engine_tests.rs"]
mod tests;

/// Team mapping key whose policies apply to every authenticated member.
pub const DEFAULT_MAPPING_KEY: &str = "default";

/// The outcome of a successful login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticationResult {
    /// The GitHub login of the authenticated user.
    pub identity: String,
    /// The organization the user was checked against.
    pub organization: String,
    /// Sorted, de-duplicated policies. Never empty.
    pub policies: Vec<String>,
    /// Team names and slugs the user holds in the organization.
    pub teams: Vec<String>,
    pub ttl: Duration,
}

impl AuthenticationResult {
    pub fn ttl_seconds(&self) -> u64 {
        self.ttl.as_secs()
    }
}

/// Decides whether a GitHub token may log in and what it is granted.
#[derive(Clone)]
pub struct AuthenticationEngine {
    config: ConfigStore,
    teams: PolicyMappingStore,
    users: PolicyMappingStore,
    lease: LeaseNegotiator,
    identity: Arc<dyn IdentityProvider>,
}

impl AuthenticationEngine {
    pub fn new(
        storage: Arc<dyn Storage>,
        identity: Arc<dyn IdentityProvider>,
        system: SystemView,
    ) -> Self {
        Self {
            config: ConfigStore::new(storage.clone(), system),
            teams: PolicyMappingStore::new(storage.clone(), MappingKind::Teams),
            users: PolicyMappingStore::new(storage, MappingKind::Users),
            lease: LeaseNegotiator::new(system),
            identity,
        }
    }

    pub fn config_store(&self) -> &ConfigStore {
        &self.config
    }

    pub fn team_mappings(&self) -> &PolicyMappingStore {
        &self.teams
    }

    pub fn user_mappings(&self) -> &PolicyMappingStore {
        &self.users
    }

    /// The mapping store for `kind`.
    pub fn mappings(&self, kind: MappingKind) -> &PolicyMappingStore {
        match kind {
            MappingKind::Teams => &self.teams,
            MappingKind::Users => &self.users,
        }
    }

    /// Authenticate `token` and compute its policies and TTL.
    ///
    /// # Errors
    ///
    /// * `AuthError::Validation` - the token is empty
    /// * `AuthError::NotConfigured` - no configuration has been written
    /// * `AuthError::InvalidCredentials` - GitHub rejected the token
    /// * `AuthError::Upstream` - GitHub failed or timed out
    /// * `AuthError::PermissionDenied` - not an organization member, or no
    ///   mapping grants any policy
    #[instrument(skip(self, token))]
    pub async fn login(&self, token: &str) -> AuthResult<AuthenticationResult> {
        let token = token.trim();
        if token.is_empty() {
            return Err(AuthError::Validation(
                "token is a required parameter".to_string(),
            ));
        }

        let config = self
            .config
            .read_config()
            .await?
            .ok_or(AuthError::NotConfigured)?;

        let credentials = TokenCredentials::new(token).with_base_url(config.base_url.clone());

        let identity = self.identity.resolve_identity(&credentials).await?;
        debug!(user = %identity, "Resolved token identity");

        let organizations = self.identity.list_organizations(&credentials).await?;
        if !organizations
            .iter()
            .any(|org| org.eq_ignore_ascii_case(&config.organization))
        {
            warn!(
                user = %identity,
                organization = %config.organization,
                "User is not a member of the required organization"
            );
            return Err(AuthError::PermissionDenied(
                "user is not in required org".to_string(),
            ));
        }

        let teams = self
            .identity
            .list_teams(&credentials, &config.organization)
            .await?;

        let policies = self.collect_policies(&identity, &teams).await?;
        if policies.is_empty() {
            warn!(
                user = %identity,
                team_count = teams.len(),
                "No mapping grants any policy"
            );
            return Err(AuthError::PermissionDenied(
                "user is not in any team mapped to this application and no default policy is set"
                    .to_string(),
            ));
        }

        let ttl = self.lease.negotiate(&config);

        info!(
            user = %identity,
            organization = %config.organization,
            policies = %policies,
            ttl_secs = ttl.as_secs(),
            "Login succeeded"
        );

        Ok(AuthenticationResult {
            identity,
            organization: config.organization,
            policies: policies.into_vec(),
            teams,
            ttl,
        })
    }

    /// Re-authenticate `token` for a credential issued with `previous_policies`.
    ///
    /// Renewal is refused when the policies the token would receive now differ
    /// from the ones it was issued with.
    #[instrument(skip(self, token, previous_policies))]
    pub async fn renew(
        &self,
        token: &str,
        previous_policies: &[String],
    ) -> AuthResult<AuthenticationResult> {
        let result = self.login(token).await?;

        let previous: PolicySet = previous_policies.iter().map(String::as_str).collect();
        let current: PolicySet = result.policies.iter().map(String::as_str).collect();
        if previous != current {
            warn!(
                user = %result.identity,
                previous = %previous,
                current = %current,
                "Renewal refused, policies changed"
            );
            return Err(AuthError::PermissionDenied(
                "policies do not match".to_string(),
            ));
        }

        Ok(result)
    }

    async fn collect_policies(&self, login: &str, teams: &[String]) -> AuthResult<PolicySet> {
        let mut policies = PolicySet::new();

        for team in teams
            .iter()
            .map(String::as_str)
            .chain(std::iter::once(DEFAULT_MAPPING_KEY))
        {
            // Team names like "a/b" cannot be keys; skip rather than fail the login.
            if team.contains('/') || team.trim().is_empty() {
                continue;
            }
            if let Some(set) = self.teams.read_mapping(team).await? {
                debug!(team = team, policies = %set, "Matched team mapping");
                policies.extend(set);
            }
        }

        if let Some(set) = self.users.read_mapping(login).await? {
            debug!(user = login, policies = %set, "Matched user mapping");
            policies.extend(set);
        }

        Ok(policies)
    }
}

impl std::fmt::Debug for AuthenticationEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthenticationEngine")
            .field("config", &self.config)
            .field("lease", &self.lease)
            .finish_non_exhaustive()
    }
}
