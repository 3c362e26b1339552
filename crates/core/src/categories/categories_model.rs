//! Category domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Grouping label shared across all users. Todos reference categories but
/// never mutate them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub color: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCategory {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
}

/// Full-state category update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryUpdate {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
}

/// Validates a display color as a `#RRGGBB` hex code.
pub fn is_valid_color_code(value: &str) -> bool {
    let Some(hex) = value.strip_prefix('#') else {
        return false;
    };
    hex.len() == 6 && hex.chars().all(|c| c.is_ascii_hexdigit())
}

#[cfg(test)]
mod tests {
    use super::is_valid_color_code;

    #[test]
    fn color_code_accepts_six_digit_hex() {
        assert!(is_valid_color_code("#1a2B3c"));
        assert!(is_valid_color_code("#000000"));
        assert!(is_valid_color_code("#FFFFFF"));
    }

    #[test]
    fn color_code_rejects_malformed_values() {
        assert!(!is_valid_color_code("1a2b3c"));
        assert!(!is_valid_color_code("#1a2b3"));
        assert!(!is_valid_color_code("#1a2b3cd"));
        assert!(!is_valid_color_code("#1a2b3g"));
        assert!(!is_valid_color_code(""));
    }
}
