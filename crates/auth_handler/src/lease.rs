//! Credential lifetime negotiation.
//!
//! Write time: a configuration's ttl and max_ttl, once unset values are resolved
//! to the host defaults, must not exceed the host's max lease TTL. The boundary
//! is inclusive.
//!
//! Login time: the issued TTL is the configured ttl (or the host default when
//! unset), capped by the configured max_ttl (or the host max when unset) and by
//! the host max.

use std::time::Duration;
use tracing::warn;

use crate::duration::display;
use crate::{AuthError, AuthResult, BackendConfig, SystemView};

#[cfg(test)]
#[path = "lease_tests.rs"]
mod tests;

/// Computes and validates credential lifetimes against the host limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LeaseNegotiator {
    system: SystemView,
}

impl LeaseNegotiator {
    pub fn new(system: SystemView) -> Self {
        Self { system }
    }

    pub fn system_view(&self) -> SystemView {
        self.system
    }

    /// Resolve a configured ttl, treating zero as "use the host default".
    pub fn effective_ttl(&self, ttl: Duration) -> Duration {
        if ttl.is_zero() {
            self.system.default_lease_ttl()
        } else {
            ttl
        }
    }

    /// Resolve a configured max_ttl, treating zero as "use the host max".
    pub fn effective_max_ttl(&self, max_ttl: Duration) -> Duration {
        if max_ttl.is_zero() {
            self.system.max_lease_ttl()
        } else {
            max_ttl
        }
    }

    /// Check configuration ttl values against the host ceiling.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Validation` when either resolved value exceeds the
    /// host max lease TTL. `ttl <= max_ttl` is not required here.
    pub fn validate(&self, ttl: Duration, max_ttl: Duration) -> AuthResult<()> {
        let ceiling = self.system.max_lease_ttl();

        if self.effective_ttl(ttl) > ceiling {
            return Err(AuthError::Validation(format!(
                "\"ttl\" value of {} exceeds the system max lease TTL of {}",
                display(self.effective_ttl(ttl)),
                display(ceiling)
            )));
        }

        if self.effective_max_ttl(max_ttl) > ceiling {
            return Err(AuthError::Validation(format!(
                "\"max_ttl\" value of {} exceeds the system max lease TTL of {}",
                display(self.effective_max_ttl(max_ttl)),
                display(ceiling)
            )));
        }

        Ok(())
    }

    /// Compute the TTL of a credential issued under `config`.
    pub fn negotiate(&self, config: &BackendConfig) -> Duration {
        let ttl = self.effective_ttl(config.ttl);
        let cap = self
            .effective_max_ttl(config.max_ttl)
            .min(self.system.max_lease_ttl());

        if ttl > cap {
            warn!(
                ttl_secs = ttl.as_secs(),
                cap_secs = cap.as_secs(),
                "Configured ttl exceeds max_ttl, issuing capped lease"
            );
            return cap;
        }

        ttl
    }
}
