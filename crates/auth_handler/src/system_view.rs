//! Host lease limits.
//!
//! The hosting platform decides how long any credential may live. Those limits
//! are handed to the backend once, at construction, and are read-only afterwards.

use std::time::Duration;

#[cfg(test)]
#[path = "system_view_tests.rs"]
mod tests;

/// Lease limits supplied by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SystemView {
    default_lease_ttl: Duration,
    max_lease_ttl: Duration,
}

impl SystemView {
    /// Default lease TTL used when the host does not supply one (24 hours).
    pub const DEFAULT_LEASE_TTL: Duration = Duration::from_secs(24 * 60 * 60);

    /// Max lease TTL used when the host does not supply one (32 days).
    pub const MAX_LEASE_TTL: Duration = Duration::from_secs(32 * 24 * 60 * 60);

    /// Create a view with explicit limits.
    pub fn new(default_lease_ttl: Duration, max_lease_ttl: Duration) -> Self {
        Self {
            default_lease_ttl,
            max_lease_ttl,
        }
    }

    /// TTL applied when a configuration leaves its own ttl unset.
    pub fn default_lease_ttl(&self) -> Duration {
        self.default_lease_ttl
    }

    /// The system-wide ceiling no credential may exceed.
    pub fn max_lease_ttl(&self) -> Duration {
        self.max_lease_ttl
    }
}

impl Default for SystemView {
    fn default() -> Self {
        Self::new(Self::DEFAULT_LEASE_TTL, Self::MAX_LEASE_TTL)
    }
}
