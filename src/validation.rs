//! Input validation for lead edits and store keys.

use crate::error::{ConsoleError, Result};
use regex::Regex;
use std::sync::LazyLock;

/// Maximum allowed length for a local store key.
pub const MAX_KEY_LENGTH: usize = 64;

/// Characters forbidden in store keys, which double as filenames.
const FORBIDDEN_KEY_CHARS: &[char] = &['/', '\\', ':', '*', '?', '"', '<', '>', '|', '\0'];

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles")
});

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

/// Validates the email of an edited lead.
pub fn validate_email(email: &str) -> Result<()> {
    if is_valid_email(email) {
        Ok(())
    } else {
        Err(ConsoleError::Validation("Invalid email format.".to_string()))
    }
}

/// Validates a local store key so it is safe to use as a filename.
pub fn validate_key(key: &str) -> Result<()> {
    if key.is_empty() {
        return Err(ConsoleError::Validation("Key cannot be empty".to_string()));
    }
    if key.len() > MAX_KEY_LENGTH {
        return Err(ConsoleError::Validation(format!(
            "Key exceeds maximum length of {} characters",
            MAX_KEY_LENGTH
        )));
    }
    if key.contains("..") {
        return Err(ConsoleError::Validation(
            "Key cannot contain '..' (path traversal)".to_string(),
        ));
    }
    for c in FORBIDDEN_KEY_CHARS {
        if key.contains(*c) {
            return Err(ConsoleError::Validation(format!(
                "Key cannot contain '{}'",
                c.escape_default()
            )));
        }
    }
    Ok(())
}
