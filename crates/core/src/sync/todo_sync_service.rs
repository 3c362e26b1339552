use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use log::debug;

use super::todo_sync_model::{referenced_category_ids, TodoChangeRecord, TodoSyncOutcome};
use super::todo_sync_traits::TodoSyncServiceTrait;
use crate::categories::CategoryRepositoryTrait;
use crate::errors::{Error, Result};
use crate::todos::TodoRepositoryTrait;
use crate::users::UserRepositoryTrait;

/// Reconciles offline todo batches. Validation happens up front so a bad
/// batch is rejected whole; the per-entry writes then run inside a single
/// transaction owned by the repository.
pub struct TodoSyncService {
    user_repo: Arc<dyn UserRepositoryTrait>,
    category_repo: Arc<dyn CategoryRepositoryTrait>,
    todo_repo: Arc<dyn TodoRepositoryTrait>,
}

impl TodoSyncService {
    pub fn new(
        user_repo: Arc<dyn UserRepositoryTrait>,
        category_repo: Arc<dyn CategoryRepositoryTrait>,
        todo_repo: Arc<dyn TodoRepositoryTrait>,
    ) -> Self {
        Self {
            user_repo,
            category_repo,
            todo_repo,
        }
    }

    fn validate_entries(entries: &[TodoChangeRecord]) -> Result<()> {
        for entry in entries {
            // Deletions carry whatever title the device last had; only
            // surviving rows need a usable one.
            if !entry.is_deleted && entry.title.trim().is_empty() {
                return Err(Error::Validation("Todo title cannot be empty".to_string()));
            }
        }
        Ok(())
    }

    fn ensure_categories_exist(&self, entries: &[TodoChangeRecord]) -> Result<()> {
        let referenced = referenced_category_ids(entries);
        if referenced.is_empty() {
            return Ok(());
        }
        let existing = self.category_repo.existing_category_ids(&referenced)?;
        let missing: Vec<i64> = referenced
            .into_iter()
            .filter(|id| !existing.contains(id))
            .collect();
        if missing.is_empty() {
            Ok(())
        } else {
            let ids = missing
                .iter()
                .map(i64::to_string)
                .collect::<Vec<_>>()
                .join(", ");
            Err(Error::NotFound(format!("Categories not found: {}", ids)))
        }
    }
}

#[async_trait]
impl TodoSyncServiceTrait for TodoSyncService {
    async fn reconcile(
        &self,
        user_id: &str,
        entries: Vec<TodoChangeRecord>,
        last_sync_timestamp: Option<DateTime<Utc>>,
    ) -> Result<TodoSyncOutcome> {
        self.user_repo
            .get_user(user_id)?
            .ok_or_else(|| Error::NotFound(format!("User {} not found", user_id)))?;
        Self::validate_entries(&entries)?;
        self.ensure_categories_exist(&entries)?;

        if entries.is_empty() {
            return Ok(TodoSyncOutcome::default());
        }

        debug!(
            "Reconciling {} todo change(s) for user {} (client last sync: {:?})",
            entries.len(),
            user_id,
            last_sync_timestamp
        );
        let outcome = self
            .todo_repo
            .apply_sync_batch(user_id.to_string(), entries)
            .await?;
        debug!(
            "Reconciled batch for user {}: {} synced, {} conflict(s)",
            user_id,
            outcome.synced.len(),
            outcome.conflicts.len()
        );
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use chrono::Utc;

    use super::*;
    use crate::categories::{Category, CategoryUpdate, NewCategory};
    use crate::todos::{NewTodo, Priority, Todo, TodoQuery, TodoUpdate};
    use crate::users::{AuthMethod, NewUser, User};

    struct StaticUserRepo {
        known_id: String,
    }

    #[async_trait]
    impl UserRepositoryTrait for StaticUserRepo {
        fn get_user(&self, user_id: &str) -> Result<Option<User>> {
            if user_id == self.known_id {
                Ok(Some(User {
                    id: user_id.to_string(),
                    email: format!("{user_id}@example.com"),
                    name: "Test".to_string(),
                    avatar: None,
                    auth_method: AuthMethod::Email,
                    is_admin: false,
                    created_at: Utc::now(),
                    updated_at: Utc::now(),
                }))
            } else {
                Ok(None)
            }
        }

        fn get_user_by_email(&self, _email: &str) -> Result<Option<User>> {
            Ok(None)
        }

        async fn create_user(&self, _new_user: NewUser) -> Result<User> {
            unimplemented!("not used by sync service tests")
        }
    }

    struct StaticCategoryRepo {
        known_ids: Vec<i64>,
    }

    #[async_trait]
    impl CategoryRepositoryTrait for StaticCategoryRepo {
        fn load_categories(&self) -> Result<Vec<Category>> {
            Ok(Vec::new())
        }

        fn get_category(&self, _category_id: i64) -> Result<Option<Category>> {
            Ok(None)
        }

        fn existing_category_ids(&self, category_ids: &[i64]) -> Result<Vec<i64>> {
            Ok(category_ids
                .iter()
                .copied()
                .filter(|id| self.known_ids.contains(id))
                .collect())
        }

        async fn insert_new_category(&self, _new_category: NewCategory) -> Result<Category> {
            unimplemented!("not used by sync service tests")
        }

        async fn update_category(&self, _update: CategoryUpdate) -> Result<Category> {
            unimplemented!("not used by sync service tests")
        }

        async fn delete_category(&self, _category_id: i64) -> Result<usize> {
            unimplemented!("not used by sync service tests")
        }
    }

    #[derive(Default)]
    struct RecordingTodoRepo {
        batches: Mutex<Vec<(String, usize)>>,
    }

    #[async_trait]
    impl TodoRepositoryTrait for RecordingTodoRepo {
        fn get_todo(&self, _todo_id: i64, _user_id: &str) -> Result<Option<Todo>> {
            Ok(None)
        }

        fn query_todos(&self, _user_id: &str, _query: &TodoQuery) -> Result<Vec<Todo>> {
            Ok(Vec::new())
        }

        async fn insert_new_todo(&self, _new_todo: NewTodo) -> Result<Todo> {
            unimplemented!("not used by sync service tests")
        }

        async fn update_todo(&self, _update: TodoUpdate) -> Result<Todo> {
            unimplemented!("not used by sync service tests")
        }

        async fn delete_todo(&self, _todo_id: i64, _user_id: &str) -> Result<bool> {
            unimplemented!("not used by sync service tests")
        }

        async fn apply_sync_batch(
            &self,
            user_id: String,
            entries: Vec<TodoChangeRecord>,
        ) -> Result<TodoSyncOutcome> {
            self.batches
                .lock()
                .expect("lock")
                .push((user_id, entries.len()));
            Ok(TodoSyncOutcome::default())
        }
    }

    fn service(todo_repo: Arc<RecordingTodoRepo>) -> TodoSyncService {
        TodoSyncService::new(
            Arc::new(StaticUserRepo {
                known_id: "user-1".to_string(),
            }),
            Arc::new(StaticCategoryRepo {
                known_ids: vec![3, 7],
            }),
            todo_repo,
        )
    }

    fn change(title: &str) -> TodoChangeRecord {
        TodoChangeRecord {
            client_id: None,
            id: None,
            category_id: None,
            title: title.to_string(),
            description: None,
            is_completed: false,
            due_date: None,
            priority: Priority::Medium,
            client_updated_at: Utc::now(),
            is_deleted: false,
        }
    }

    #[tokio::test]
    async fn reconcile_rejects_unknown_user() {
        let repo = Arc::new(RecordingTodoRepo::default());
        let service = service(repo.clone());

        let err = service
            .reconcile("ghost", vec![change("Buy milk")], None)
            .await
            .expect_err("unknown user");
        assert!(matches!(err, Error::NotFound(_)));
        assert!(repo.batches.lock().expect("lock").is_empty());
    }

    #[tokio::test]
    async fn reconcile_rejects_missing_categories_before_dispatch() {
        let repo = Arc::new(RecordingTodoRepo::default());
        let service = service(repo.clone());

        let mut entry = change("Buy milk");
        entry.category_id = Some(42);
        let err = service
            .reconcile("user-1", vec![change("Walk dog"), entry], None)
            .await
            .expect_err("missing category");
        match err {
            Error::NotFound(message) => assert!(message.contains("42")),
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(repo.batches.lock().expect("lock").is_empty());
    }

    #[tokio::test]
    async fn reconcile_rejects_blank_titles_before_dispatch() {
        let repo = Arc::new(RecordingTodoRepo::default());
        let service = service(repo.clone());

        let err = service
            .reconcile("user-1", vec![change("Buy milk"), change("  ")], None)
            .await
            .expect_err("blank title");
        assert!(matches!(err, Error::Validation(_)));
        assert!(repo.batches.lock().expect("lock").is_empty());
    }

    #[tokio::test]
    async fn deleted_entries_skip_title_validation() {
        let repo = Arc::new(RecordingTodoRepo::default());
        let service = service(repo.clone());

        let mut entry = change("");
        entry.id = Some(1);
        entry.is_deleted = true;
        service
            .reconcile("user-1", vec![entry], None)
            .await
            .expect("deletions need no title");
        assert_eq!(
            repo.batches.lock().expect("lock").as_slice(),
            &[("user-1".to_string(), 1)]
        );
    }

    #[tokio::test]
    async fn empty_batch_short_circuits() {
        let repo = Arc::new(RecordingTodoRepo::default());
        let service = service(repo.clone());

        let outcome = service
            .reconcile("user-1", Vec::new(), None)
            .await
            .expect("empty batch");
        assert!(outcome.synced.is_empty());
        assert!(outcome.conflicts.is_empty());
        assert!(repo.batches.lock().expect("lock").is_empty());
    }
}
