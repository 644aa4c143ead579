//! Duration parsing for operator-supplied ttl values.
//!
//! Accepted forms:
//! - empty string: unset
//! - a bare non-negative integer: seconds (`"3600"`)
//! - a humantime duration: `"1h"`, `"90m"`, `"24h0m0s"`, `"1h 30m"`
//!
//! Values are stored as whole seconds, so fractional seconds are rejected.

use std::time::Duration;

use crate::{AuthError, AuthResult};

#[cfg(test)]
#[path = "duration_tests.rs"]
mod tests;

/// Parse an optional duration field.
///
/// Returns `Ok(None)` when the value is absent or blank.
///
/// # Errors
///
/// Returns `AuthError::Validation` naming `field` when the value cannot be
/// parsed or is not a whole number of seconds.
pub fn parse_duration_field(field: &str, raw: Option<&str>) -> AuthResult<Option<Duration>> {
    let value = match raw.map(str::trim) {
        None | Some("") => return Ok(None),
        Some(value) => value,
    };

    let parsed = if value.bytes().all(|b| b.is_ascii_digit()) {
        value
            .parse::<u64>()
            .map(Duration::from_secs)
            .map_err(|e| invalid_value(field, value, e))?
    } else {
        humantime::parse_duration(value).map_err(|e| invalid_value(field, value, e))?
    };

    if parsed.subsec_nanos() != 0 {
        return Err(AuthError::Validation(format!(
            "invalid '{}' value '{}': must be a whole number of seconds",
            field, value
        )));
    }

    Ok(Some(parsed))
}

fn invalid_value(field: &str, value: &str, err: impl std::fmt::Display) -> AuthError {
    AuthError::Validation(format!("invalid '{}' value '{}': {}", field, value, err))
}

/// Render a duration for messages, e.g. `48h` as `2days`.
pub fn display(duration: Duration) -> String {
    humantime::format_duration(duration).to_string()
}

/// Serde adapter storing a `Duration` as whole seconds.
pub mod seconds {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u64(value.as_secs())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        u64::deserialize(deserializer).map(Duration::from_secs)
    }
}
