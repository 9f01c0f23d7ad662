//! Helpers for required text and id fields of multipart submissions.

use crate::error::CoreError;
use crate::types::DbId;

/// A trimmed, non-empty text value, or `"<name> is required."`.
pub fn required_text(name: &str, value: Option<&str>) -> Result<String, CoreError> {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v.to_string()),
        _ => Err(CoreError::validation(format!("{name} is required."))),
    }
}

/// A positive integer id, or a validation error naming the field.
pub fn required_id(name: &str, value: Option<&str>) -> Result<DbId, CoreError> {
    let raw = required_text(name, value)?;
    parse_id(name, &raw)
}

/// Parse a positive integer id.
pub fn parse_id(name: &str, raw: &str) -> Result<DbId, CoreError> {
    match raw.trim().parse::<DbId>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(CoreError::validation(format!(
            "{name} must be a positive integer, got '{raw}'."
        ))),
    }
}

/// Interpret a form flag: `true`, `1`, `yes`, `on` (any case) are true.
pub fn parse_flag(value: Option<&str>) -> bool {
    value.is_some_and(|v| {
        matches!(
            v.trim().to_ascii_lowercase().as_str(),
            "true" | "1" | "yes" | "on"
        )
    })
}
