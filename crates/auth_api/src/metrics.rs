//! Login metrics
//!
//! Recording is abstracted behind [`LoginMetrics`] so handlers do not depend on
//! a metrics backend. [`PrometheusLoginMetrics`] records to a Prometheus
//! registry; [`NoOpLoginMetrics`] discards everything.

use prometheus::{Encoder, IntCounterVec, Opts, Registry, TextEncoder};

use auth_handler::AuthError;

#[cfg(test)]
#[path = "metrics_tests.rs"]
mod tests;

/// Name of the login counter.
pub const LOGINS_TOTAL: &str = "github_auth_logins_total";

/// The outcome label recorded for a login or renewal attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginOutcome {
    Success,
    InvalidRequest,
    NotConfigured,
    InvalidCredentials,
    Denied,
    UpstreamError,
    InternalError,
}

impl LoginOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            LoginOutcome::Success => "success",
            LoginOutcome::InvalidRequest => "invalid_request",
            LoginOutcome::NotConfigured => "not_configured",
            LoginOutcome::InvalidCredentials => "invalid_credentials",
            LoginOutcome::Denied => "denied",
            LoginOutcome::UpstreamError => "upstream_error",
            LoginOutcome::InternalError => "internal_error",
        }
    }

    /// Classify the result of a login.
    pub fn of<T>(result: &Result<T, AuthError>) -> Self {
        match result {
            Ok(_) => LoginOutcome::Success,
            Err(AuthError::Validation(_)) => LoginOutcome::InvalidRequest,
            Err(AuthError::NotConfigured) => LoginOutcome::NotConfigured,
            Err(AuthError::InvalidCredentials) => LoginOutcome::InvalidCredentials,
            Err(AuthError::PermissionDenied(_)) => LoginOutcome::Denied,
            Err(AuthError::Upstream(_)) => LoginOutcome::UpstreamError,
            Err(AuthError::Storage(_)) => LoginOutcome::InternalError,
        }
    }
}

/// Abstraction for recording login metrics.
///
/// All implementations must be thread-safe.
pub trait LoginMetrics: Send + Sync {
    /// Records one login attempt with its outcome.
    fn record_login(&self, outcome: LoginOutcome);

    /// Renders the collected metrics in the Prometheus text format.
    fn render(&self) -> Result<String, prometheus::Error>;
}

/// Prometheus metrics collector for logins.
///
/// # Metrics
/// - `github_auth_logins_total{outcome}` (Counter)
pub struct PrometheusLoginMetrics {
    registry: Registry,
    logins: IntCounterVec,
}

impl PrometheusLoginMetrics {
    /// Creates the collector and registers its metrics with `registry`.
    ///
    /// # Errors
    /// Returns an error if the metrics are already registered.
    pub fn new(registry: Registry) -> Result<Self, prometheus::Error> {
        let logins = IntCounterVec::new(
            Opts::new(LOGINS_TOTAL, "GitHub login attempts by outcome"),
            &["outcome"],
        )?;
        registry.register(Box::new(logins.clone()))?;

        Ok(Self { registry, logins })
    }

    /// Current count for `outcome`.
    pub fn login_count(&self, outcome: LoginOutcome) -> u64 {
        self.logins.with_label_values(&[outcome.as_str()]).get()
    }
}

impl LoginMetrics for PrometheusLoginMetrics {
    fn record_login(&self, outcome: LoginOutcome) {
        self.logins.with_label_values(&[outcome.as_str()]).inc();
    }

    fn render(&self) -> Result<String, prometheus::Error> {
        let mut buffer = Vec::new();
        TextEncoder::new().encode(&self.registry.gather(), &mut buffer)?;
        String::from_utf8(buffer).map_err(|e| prometheus::Error::Msg(e.to_string()))
    }
}

/// No-op metrics implementation for tests or when metrics are disabled.
#[derive(Debug, Default)]
pub struct NoOpLoginMetrics;

impl NoOpLoginMetrics {
    pub fn new() -> Self {
        Self
    }
}

impl LoginMetrics for NoOpLoginMetrics {
    fn record_login(&self, _outcome: LoginOutcome) {}

    fn render(&self) -> Result<String, prometheus::Error> {
        Ok(String::new())
    }
}
