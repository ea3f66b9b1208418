//! Validation helper functions for configuration types.

use crate::core::errors::{HelloworldError, Result};

/// Validate that a usize value is greater than zero.
pub fn validate_positive_usize(value: usize, field: &str) -> Result<()> {
    if value == 0 {
        return Err(HelloworldError::validation_field(
            format!("{} must be greater than 0", field),
            field,
        ));
    }
    Ok(())
}

/// Validate that a u64 value is greater than zero.
pub fn validate_positive_u64(value: u64, field: &str) -> Result<()> {
    if value == 0 {
        return Err(HelloworldError::validation_field(
            format!("{} must be greater than 0", field),
            field,
        ));
    }
    Ok(())
}

/// Validate that a usize value is within a bounded range (inclusive).
pub fn validate_bounded_usize(value: usize, min: usize, max: usize, field: &str) -> Result<()> {
    if value < min || value > max {
        return Err(HelloworldError::validation_field(
            format!("{} must be between {} and {}", field, min, max),
            field,
        ));
    }
    Ok(())
}

/// Validate that a string is not empty after trimming.
pub fn validate_non_empty(value: &str, field: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(HelloworldError::validation_field(
            format!("{} must not be empty", field),
            field,
        ));
    }
    Ok(())
}

/// Validate that a string parses as an absolute http(s) URL.
pub fn validate_http_url(value: &str, field: &str) -> Result<()> {
    let parsed = url::Url::parse(value).map_err(|e| {
        HelloworldError::validation_field(format!("{} is not a valid URL: {}", field, e), field)
    })?;

    match parsed.scheme() {
        "http" | "https" => Ok(()),
        other => Err(HelloworldError::validation_field(
            format!("{} must use http or https, got '{}'", field, other),
            field,
        )),
    }
}
