use opentodo_core::errors::{Error, Result};
use opentodo_core::sync::{client_write_wins, TodoChangeRecord, TodoSyncOutcome};
use opentodo_core::todos::{NewTodo, Todo, TodoQuery, TodoRepositoryTrait, TodoUpdate};

use super::model::{utc, NewTodoDB, TodoDB};
use crate::db::{get_connection, WriteHandle};
use crate::errors::StorageError;
use crate::schema::todos;
use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel::r2d2::{self, Pool};
use diesel::SqliteConnection;

use std::sync::Arc;

pub struct TodoRepository {
    pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
    writer: WriteHandle,
}

impl TodoRepository {
    pub fn new(
        pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
        writer: WriteHandle,
    ) -> Self {
        TodoRepository { pool, writer }
    }
}

#[async_trait]
impl TodoRepositoryTrait for TodoRepository {
    fn get_todo(&self, todo_id: i64, user_id: &str) -> Result<Option<Todo>> {
        let mut conn = get_connection(&self.pool)?;
        let todo_db = todos::table
            .find(todo_id)
            .filter(todos::user_id.eq(user_id))
            .first::<TodoDB>(&mut conn)
            .optional()
            .map_err(StorageError::from)?;
        Ok(todo_db.map(Todo::from))
    }

    fn query_todos(&self, user_id: &str, query: &TodoQuery) -> Result<Vec<Todo>> {
        let mut conn = get_connection(&self.pool)?;
        let mut statement = todos::table.filter(todos::user_id.eq(user_id)).into_boxed();
        if let Some(category_id) = query.category_id {
            statement = statement.filter(todos::category_id.eq(category_id));
        }
        if let Some(is_completed) = query.is_completed {
            statement = statement.filter(todos::is_completed.eq(is_completed));
        }
        if let Some(priority) = query.priority {
            statement = statement.filter(todos::priority.eq(priority.as_db_str()));
        }
        // Bounds on due_date are inclusive; rows without a due date fall out
        // of the comparison on their own.
        if let Some(due_before) = query.due_before {
            statement = statement.filter(todos::due_date.le(due_before.naive_utc()));
        }
        if let Some(due_after) = query.due_after {
            statement = statement.filter(todos::due_date.ge(due_after.naive_utc()));
        }
        if let Some(last_synced_after) = query.last_synced_after {
            statement =
                statement.filter(todos::client_updated_at.ge(last_synced_after.naive_utc()));
        }
        let todos_db = statement
            .order(todos::id.asc())
            .load::<TodoDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(todos_db.into_iter().map(Todo::from).collect())
    }

    async fn insert_new_todo(&self, new_todo: NewTodo) -> Result<Todo> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Todo> {
                let new_todo_db: NewTodoDB = new_todo.into();
                let result_db = diesel::insert_into(todos::table)
                    .values(&new_todo_db)
                    .returning(TodoDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                Ok(Todo::from(result_db))
            })
            .await
    }

    async fn update_todo(&self, update: TodoUpdate) -> Result<Todo> {
        let TodoUpdate {
            id: todo_id,
            user_id,
            category_id: new_category_id,
            title: new_title,
            description: new_description,
            is_completed: new_is_completed,
            due_date: new_due_date,
            priority: new_priority,
            client_updated_at: client_clock,
        } = update;

        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Todo> {
                let current = todos::table
                    .find(todo_id)
                    .filter(todos::user_id.eq(&user_id))
                    .first::<TodoDB>(conn)
                    .optional()
                    .map_err(StorageError::from)?;
                if current.is_none() {
                    return Err(Error::NotFound(format!("Todo {} not found", todo_id)));
                }

                let now = Utc::now().naive_utc();
                diesel::update(todos::table.find(todo_id))
                    .set((
                        todos::category_id.eq(new_category_id),
                        todos::title.eq(new_title),
                        todos::description.eq(new_description),
                        todos::is_completed.eq(new_is_completed),
                        todos::due_date.eq(new_due_date.map(|d| d.naive_utc())),
                        todos::priority.eq(new_priority.as_db_str()),
                        todos::updated_at.eq(now),
                        todos::last_synced_at.eq(Some(now)),
                        todos::client_updated_at.eq(client_clock.naive_utc()),
                    ))
                    .execute(conn)
                    .map_err(StorageError::from)?;
                let result_db = todos::table
                    .find(todo_id)
                    .first::<TodoDB>(conn)
                    .map_err(StorageError::from)?;
                Ok(Todo::from(result_db))
            })
            .await
    }

    async fn delete_todo(&self, todo_id: i64, user_id: &str) -> Result<bool> {
        let user_id = user_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<bool> {
                let affected = diesel::delete(
                    todos::table
                        .find(todo_id)
                        .filter(todos::user_id.eq(user_id)),
                )
                .execute(conn)
                .map_err(StorageError::from)?;
                Ok(affected > 0)
            })
            .await
    }

    /// Replays a whole batch inside one transaction. Any hard failure
    /// (missing row, foreign key clash) aborts and rolls back every entry;
    /// losing a timestamp race is not a failure and lands in `conflicts`.
    async fn apply_sync_batch(
        &self,
        user_id: String,
        entries: Vec<TodoChangeRecord>,
    ) -> Result<TodoSyncOutcome> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<TodoSyncOutcome> {
                let now = Utc::now().naive_utc();
                let mut outcome = TodoSyncOutcome::default();

                for entry in entries {
                    if entry.is_deleted {
                        let Some(todo_id) = entry.id else {
                            // Created and deleted offline; never persisted here.
                            continue;
                        };
                        let affected = diesel::delete(
                            todos::table
                                .find(todo_id)
                                .filter(todos::user_id.eq(&user_id)),
                        )
                        .execute(conn)
                        .map_err(StorageError::from)?;
                        if affected == 0 {
                            return Err(Error::NotFound(format!("Todo {} not found", todo_id)));
                        }
                        continue;
                    }

                    let client_clock = entry.client_updated_at.naive_utc();
                    match entry.id {
                        Some(todo_id) => {
                            let current = todos::table
                                .find(todo_id)
                                .filter(todos::user_id.eq(&user_id))
                                .first::<TodoDB>(conn)
                                .optional()
                                .map_err(StorageError::from)?;
                            let Some(current) = current else {
                                return Err(Error::NotFound(format!(
                                    "Todo {} not found",
                                    todo_id
                                )));
                            };

                            if !client_write_wins(utc(current.updated_at), entry.client_updated_at)
                            {
                                outcome.conflicts.push(Todo::from(current));
                                continue;
                            }

                            diesel::update(todos::table.find(todo_id))
                                .set((
                                    todos::category_id.eq(entry.category_id),
                                    todos::title.eq(entry.title),
                                    todos::description.eq(entry.description),
                                    todos::is_completed.eq(entry.is_completed),
                                    todos::due_date.eq(entry.due_date.map(|d| d.naive_utc())),
                                    todos::priority.eq(entry.priority.as_db_str()),
                                    // Accepted sync writes carry the device clock so an
                                    // identical re-send stays a tie, not a conflict.
                                    todos::updated_at.eq(client_clock),
                                    todos::last_synced_at.eq(Some(now)),
                                    todos::client_updated_at.eq(client_clock),
                                ))
                                .execute(conn)
                                .map_err(StorageError::from)?;
                            let result_db = todos::table
                                .find(todo_id)
                                .first::<TodoDB>(conn)
                                .map_err(StorageError::from)?;
                            outcome.synced.push(Todo::from(result_db));
                        }
                        None => {
                            let new_todo_db = NewTodoDB {
                                user_id: user_id.clone(),
                                category_id: entry.category_id,
                                title: entry.title,
                                description: entry.description,
                                is_completed: entry.is_completed,
                                due_date: entry.due_date.map(|d| d.naive_utc()),
                                priority: entry.priority.as_db_str().to_string(),
                                created_at: now,
                                updated_at: client_clock,
                                last_synced_at: Some(now),
                                client_updated_at: client_clock,
                            };
                            let result_db = diesel::insert_into(todos::table)
                                .values(&new_todo_db)
                                .returning(TodoDB::as_returning())
                                .get_result(conn)
                                .map_err(StorageError::from)?;
                            outcome.synced.push(Todo::from(result_db));
                        }
                    }
                }

                Ok(outcome)
            })
            .await
    }
}
