//! Recipe difficulty levels and the input checks that do not fit a
//! `validator` attribute on the request DTOs.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Difficulty
// ---------------------------------------------------------------------------

/// How demanding a recipe is to cook. Stored as lowercase text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }

    /// Parse a difficulty name, ignoring case and surrounding whitespace.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "medium" => Some(Difficulty::Medium),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Checks
// ---------------------------------------------------------------------------

/// An image URL, when given and non-empty, must be absolute http(s).
pub fn validate_image_url(url: Option<&str>) -> Result<(), CoreError> {
    match url.map(str::trim) {
        None | Some("") => Ok(()),
        Some(u) if u.starts_with("http://") || u.starts_with("https://") => Ok(()),
        Some(_) => Err(CoreError::Validation(
            "image_url must start with http:// or https://".to_string(),
        )),
    }
}

/// Require a difficulty name to be one of the known levels.
pub fn parse_difficulty(value: &str) -> Result<Difficulty, CoreError> {
    Difficulty::parse(value).ok_or_else(|| {
        let allowed: Vec<&str> = Difficulty::ALL.iter().map(|d| d.as_str()).collect();
        CoreError::Validation(format!(
            "difficulty must be one of: {}",
            allowed.join(", ")
        ))
    })
}
