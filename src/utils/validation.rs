//! Configuration field validation primitives.
//!
//! Environment and config fields are validated once at startup; these
//! helpers produce field-named `config.invalid_value` errors so the
//! offending key is always visible to the operator.

use crate::error::{Error, Result};

/// Require a string to be non-empty after trimming.
///
/// Returns the trimmed string on success.
pub fn require_non_empty<'a>(value: &'a str, field: &str) -> Result<&'a str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(Error::config_invalid_value(
            field,
            Some(value.to_string()),
            "must not be empty",
        ))
    } else {
        Ok(trimmed)
    }
}

/// Require a string to be at least `min` characters after trimming.
pub fn require_min_len<'a>(value: &'a str, field: &str, min: usize) -> Result<&'a str> {
    let trimmed = value.trim();
    if trimmed.chars().count() < min {
        Err(Error::config_invalid_value(
            field,
            Some(value.to_string()),
            format!("must be at least {} characters", min),
        ))
    } else {
        Ok(trimmed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    #[test]
    fn require_non_empty_passes_and_trims() {
        assert_eq!(require_non_empty("  production  ", "APP_ENV").unwrap(), "production");
    }

    #[test]
    fn require_non_empty_fails_for_whitespace_only() {
        let err = require_non_empty("   ", "APP_ENV").unwrap_err();
        assert_eq!(err.code, ErrorCode::ConfigInvalidValue);
        assert_eq!(err.details["key"], "APP_ENV");
    }

    #[test]
    fn require_min_len_passes_at_boundary() {
        assert_eq!(require_min_len("/srv/", "PROJECT_ROOT", 5).unwrap(), "/srv/");
    }

    #[test]
    fn require_min_len_fails_below_boundary() {
        let err = require_min_len("/a", "PROJECT_ROOT", 5).unwrap_err();
        assert_eq!(err.code, ErrorCode::ConfigInvalidValue);
        assert_eq!(err.details["problem"], "must be at least 5 characters");
    }

    #[test]
    fn require_min_len_counts_trimmed_chars() {
        let err = require_min_len("  ab  ", "API_PROJECT_ROOT", 3).unwrap_err();
        assert_eq!(err.details["key"], "API_PROJECT_ROOT");
    }
}
