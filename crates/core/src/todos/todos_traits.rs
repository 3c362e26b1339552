use async_trait::async_trait;

use super::todos_model::{NewTodo, Todo, TodoQuery, TodoUpdate};
use crate::errors::Result;
use crate::sync::{TodoChangeRecord, TodoSyncOutcome};

/// Persistence seam for todos. Every operation that touches a row by id is
/// scoped to the owning user; rows belonging to other users behave as absent.
#[async_trait]
pub trait TodoRepositoryTrait: Send + Sync {
    fn get_todo(&self, todo_id: i64, user_id: &str) -> Result<Option<Todo>>;
    fn query_todos(&self, user_id: &str, query: &TodoQuery) -> Result<Vec<Todo>>;
    async fn insert_new_todo(&self, new_todo: NewTodo) -> Result<Todo>;
    async fn update_todo(&self, update: TodoUpdate) -> Result<Todo>;
    /// Returns whether a row was actually removed.
    async fn delete_todo(&self, todo_id: i64, user_id: &str) -> Result<bool>;
    /// Applies a full reconciliation batch in a single transaction.
    async fn apply_sync_batch(
        &self,
        user_id: String,
        entries: Vec<TodoChangeRecord>,
    ) -> Result<TodoSyncOutcome>;
}

#[async_trait]
pub trait TodoServiceTrait: Send + Sync {
    fn get_todo(&self, todo_id: i64, user_id: &str) -> Result<Todo>;
    fn query_todos(&self, user_id: &str, query: &TodoQuery) -> Result<Vec<Todo>>;
    async fn create_todo(&self, new_todo: NewTodo) -> Result<Todo>;
    async fn update_todo(&self, update: TodoUpdate) -> Result<Todo>;
    async fn delete_todo(&self, todo_id: i64, user_id: &str) -> Result<bool>;
}
