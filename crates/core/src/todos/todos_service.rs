use std::sync::Arc;

use async_trait::async_trait;
use log::debug;

use super::todos_model::{NewTodo, Todo, TodoQuery, TodoUpdate};
use super::todos_traits::{TodoRepositoryTrait, TodoServiceTrait};
use crate::categories::CategoryRepositoryTrait;
use crate::errors::{Error, Result};
use crate::users::UserRepositoryTrait;

/// Direct (non-sync) todo operations for a single signed-in user.
pub struct TodoService {
    todo_repo: Arc<dyn TodoRepositoryTrait>,
    user_repo: Arc<dyn UserRepositoryTrait>,
    category_repo: Arc<dyn CategoryRepositoryTrait>,
}

impl TodoService {
    pub fn new(
        todo_repo: Arc<dyn TodoRepositoryTrait>,
        user_repo: Arc<dyn UserRepositoryTrait>,
        category_repo: Arc<dyn CategoryRepositoryTrait>,
    ) -> Self {
        Self {
            todo_repo,
            user_repo,
            category_repo,
        }
    }

    fn validate_title(title: &str) -> Result<()> {
        if title.trim().is_empty() {
            return Err(Error::Validation("Todo title cannot be empty".to_string()));
        }
        Ok(())
    }

    fn ensure_user_exists(&self, user_id: &str) -> Result<()> {
        self.user_repo
            .get_user(user_id)?
            .ok_or_else(|| Error::NotFound(format!("User {} not found", user_id)))?;
        Ok(())
    }

    fn ensure_category_exists(&self, category_id: Option<i64>) -> Result<()> {
        if let Some(category_id) = category_id {
            self.category_repo
                .get_category(category_id)?
                .ok_or_else(|| Error::NotFound(format!("Category {} not found", category_id)))?;
        }
        Ok(())
    }
}

#[async_trait]
impl TodoServiceTrait for TodoService {
    fn get_todo(&self, todo_id: i64, user_id: &str) -> Result<Todo> {
        self.todo_repo
            .get_todo(todo_id, user_id)?
            .ok_or_else(|| Error::NotFound(format!("Todo {} not found", todo_id)))
    }

    // Reads never re-validate the user; an unknown user simply owns no rows.
    fn query_todos(&self, user_id: &str, query: &TodoQuery) -> Result<Vec<Todo>> {
        self.todo_repo.query_todos(user_id, query)
    }

    async fn create_todo(&self, new_todo: NewTodo) -> Result<Todo> {
        Self::validate_title(&new_todo.title)?;
        self.ensure_user_exists(&new_todo.user_id)?;
        self.ensure_category_exists(new_todo.category_id)?;
        let todo = self.todo_repo.insert_new_todo(new_todo).await?;
        debug!("Created todo {} for user {}", todo.id, todo.user_id);
        Ok(todo)
    }

    async fn update_todo(&self, update: TodoUpdate) -> Result<Todo> {
        Self::validate_title(&update.title)?;
        self.ensure_category_exists(update.category_id)?;
        self.todo_repo.update_todo(update).await
    }

    async fn delete_todo(&self, todo_id: i64, user_id: &str) -> Result<bool> {
        self.todo_repo.delete_todo(todo_id, user_id).await
    }
}
