//! Tag name normalization and validation.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::CoreError;

/// Color assigned to tags created without one.
pub const DEFAULT_TAG_COLOR: &str = "#6B7280";

pub const TAG_NAME_MIN_LEN: usize = 2;
pub const TAG_NAME_MAX_LEN: usize = 100;

static HEX_COLOR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^#[0-9A-Fa-f]{6}$").expect("valid regex"));

/// Normalize a tag name for storage and lookup: trimmed, lowercase.
pub fn normalize_tag_name(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Validate a (normalized) tag name length.
pub fn validate_tag_name(name: &str) -> Result<(), CoreError> {
    let len = name.chars().count();
    if !(TAG_NAME_MIN_LEN..=TAG_NAME_MAX_LEN).contains(&len) {
        return Err(CoreError::Validation(format!(
            "tag name must be between {TAG_NAME_MIN_LEN} and {TAG_NAME_MAX_LEN} characters"
        )));
    }
    Ok(())
}

/// Normalize, validate, and de-duplicate a list of tag names from a request
/// body, keeping first-seen order.
pub fn normalize_tag_names<S: AsRef<str>>(names: &[S]) -> Result<Vec<String>, CoreError> {
    let mut normalized: Vec<String> = Vec::with_capacity(names.len());
    for name in names {
        let name = normalize_tag_name(name.as_ref());
        validate_tag_name(&name)?;
        if !normalized.contains(&name) {
            normalized.push(name);
        }
    }
    Ok(normalized)
}

/// Validate a `#RRGGBB` color code.
pub fn validate_color(color: &str) -> Result<(), CoreError> {
    if HEX_COLOR_RE.is_match(color) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "color must be a hex code like #FF5733, got '{color}'"
        )))
    }
}
