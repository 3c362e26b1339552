use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::todo_sync_model::{TodoChangeRecord, TodoSyncOutcome};
use crate::errors::Result;

#[async_trait]
pub trait TodoSyncServiceTrait: Send + Sync {
    /// Reconciles a batch of offline changes against the server state.
    /// Conflicts are reported in the outcome, never as errors.
    async fn reconcile(
        &self,
        user_id: &str,
        entries: Vec<TodoChangeRecord>,
        last_sync_timestamp: Option<DateTime<Utc>>,
    ) -> Result<TodoSyncOutcome>;
}
