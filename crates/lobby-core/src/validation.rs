//! Field validation shared by every surface.

use std::sync::LazyLock;

use regex::Regex;

use crate::errors::CoreError;

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles")
});

/// Trim and lowercase an email, rejecting empty or malformed input.
///
/// # Errors
///
/// Returns `CoreError::Validation` if the address is blank or does not look
/// like `local@domain.tld`.
pub fn normalize_email(raw: &str) -> Result<String, CoreError> {
    let email = raw.trim().to_lowercase();
    if email.is_empty() {
        return Err(CoreError::validation("Please enter your email address"));
    }
    if !EMAIL_PATTERN.is_match(&email) {
        return Err(CoreError::validation("Please enter a valid email address"));
    }
    Ok(email)
}

/// Trim a required text field.
///
/// # Errors
///
/// Returns `CoreError::Validation` naming `field` if the trimmed value is empty.
pub fn require_text(field: &str, value: &str) -> Result<String, CoreError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(CoreError::validation(format!("{field} is required")));
    }
    Ok(trimmed.to_string())
}

/// Trim an optional text field; blank becomes `None`.
#[must_use]
pub fn optional_text(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(String::from)
}
