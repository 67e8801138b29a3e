//! E-mail validation
//!
//! Deliberately loose: one `@`, a dot in the domain part, no whitespace.
//! Good enough to catch typos in an inline edit field.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::constants::{EMAIL_REQUIRED_MESSAGE, INVALID_EMAIL_MESSAGE};

static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    #[allow(clippy::expect_used)]
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("EMAIL_REGEX pattern is valid")
});

/// Whether `value` (trimmed) has the `local@domain.tld` shape.
pub fn is_email(value: &str) -> bool {
    EMAIL_REGEX.is_match(value.trim())
}

/// Validate a required e-mail field, returning the message to show on error.
pub fn validate_email(value: &str) -> Result<(), &'static str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(EMAIL_REQUIRED_MESSAGE);
    }
    if !is_email(trimmed) {
        return Err(INVALID_EMAIL_MESSAGE);
    }
    Ok(())
}
