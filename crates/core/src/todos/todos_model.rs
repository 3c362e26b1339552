use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    pub fn as_db_str(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        }
    }

    pub fn from_db_str(value: &str) -> Self {
        match value {
            "low" => Priority::Low,
            "high" => Priority::High,
            // Unknown values degrade to the default rather than failing reads.
            _ => Priority::Medium,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    pub id: i64,
    pub user_id: String,
    pub category_id: Option<i64>,
    pub title: String,
    pub description: Option<String>,
    pub is_completed: bool,
    pub due_date: Option<DateTime<Utc>>,
    pub priority: Priority,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Server clock at the last persisted create or accepted update.
    pub last_synced_at: Option<DateTime<Utc>>,
    /// Client-device clock captured when the row was last written.
    pub client_updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTodo {
    pub user_id: String,
    #[serde(default)]
    pub category_id: Option<i64>,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub is_completed: bool,
    #[serde(default)]
    pub due_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub priority: Priority,
    pub client_updated_at: DateTime<Utc>,
}

/// Full-state replacement for a single todo. Fields left `None` clear the
/// stored value rather than preserving it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoUpdate {
    pub id: i64,
    pub user_id: String,
    #[serde(default)]
    pub category_id: Option<i64>,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub is_completed: bool,
    #[serde(default)]
    pub due_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub priority: Priority,
    pub client_updated_at: DateTime<Utc>,
}

/// Filter set for listing todos. All populated filters are ANDed together;
/// an empty query returns every todo the user owns.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoQuery {
    #[serde(default)]
    pub category_id: Option<i64>,
    #[serde(default)]
    pub is_completed: Option<bool>,
    #[serde(default)]
    pub priority: Option<Priority>,
    /// Inclusive upper bound on `due_date`. Rows without a due date never match.
    #[serde(default)]
    pub due_before: Option<DateTime<Utc>>,
    /// Inclusive lower bound on `due_date`. Rows without a due date never match.
    #[serde(default)]
    pub due_after: Option<DateTime<Utc>>,
    /// Inclusive lower bound on `client_updated_at`, for incremental pulls.
    #[serde(default)]
    pub last_synced_after: Option<DateTime<Utc>>,
}
