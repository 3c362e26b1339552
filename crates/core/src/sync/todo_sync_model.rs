use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::todos::{Priority, Todo};

/// One offline mutation captured on a client device. A record without an
/// `id` is a creation; with an `id` it is an update, or a deletion when
/// `is_deleted` is set.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoChangeRecord {
    /// Device-local identifier, echoed back untouched for client bookkeeping.
    #[serde(default)]
    pub client_id: Option<String>,
    #[serde(default)]
    pub id: Option<i64>,
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
    #[serde(default)]
    pub is_deleted: bool,
}

/// Wire envelope for one sync call, as a transport layer hands it over.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoSyncRequest {
    pub user_id: String,
    pub todos: Vec<TodoChangeRecord>,
    /// The client's view of when it last synced. Logged for diagnostics;
    /// the reconciliation itself does not consume it.
    #[serde(default)]
    pub last_sync_timestamp: Option<DateTime<Utc>>,
}

/// Result of reconciling one batch. `synced` holds the post-write server
/// rows for accepted entries, `conflicts` the untouched server rows for
/// rejected ones, each in batch submission order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoSyncOutcome {
    pub synced: Vec<Todo>,
    pub conflicts: Vec<Todo>,
}

/// Pure last-write-wins decision for a single todo.
/// Rule:
/// 1. A strictly newer server row beats the client write.
/// 2. Equal timestamps favor the client, so re-sending an accepted
///    write stays idempotent.
pub fn client_write_wins(
    server_updated_at: DateTime<Utc>,
    client_updated_at: DateTime<Utc>,
) -> bool {
    client_updated_at >= server_updated_at
}

/// Distinct category ids referenced across a batch, for existence checks.
pub fn referenced_category_ids(entries: &[TodoChangeRecord]) -> Vec<i64> {
    let mut ids: Vec<i64> = entries.iter().filter_map(|e| e.category_id).collect();
    ids.sort_unstable();
    ids.dedup();
    ids
}
