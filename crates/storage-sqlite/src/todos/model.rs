use chrono::{DateTime, NaiveDateTime, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use opentodo_core::todos::{NewTodo, Priority, Todo};

#[derive(
    Queryable,
    Identifiable,
    Insertable,
    AsChangeset,
    Selectable,
    Debug,
    Clone,
    Serialize,
    Deserialize,
)]
#[diesel(table_name = crate::schema::todos)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct TodoDB {
    pub id: i64,
    pub user_id: String,
    pub category_id: Option<i64>,
    pub title: String,
    pub description: Option<String>,
    pub is_completed: bool,
    pub due_date: Option<NaiveDateTime>,
    pub priority: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
    pub last_synced_at: Option<NaiveDateTime>,
    pub client_updated_at: NaiveDateTime,
}

/// Insert row. The id column stays with SQLite's rowid allocator.
#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = crate::schema::todos)]
pub struct NewTodoDB {
    pub user_id: String,
    pub category_id: Option<i64>,
    pub title: String,
    pub description: Option<String>,
    pub is_completed: bool,
    pub due_date: Option<NaiveDateTime>,
    pub priority: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
    pub last_synced_at: Option<NaiveDateTime>,
    pub client_updated_at: NaiveDateTime,
}

pub(super) fn utc(naive: NaiveDateTime) -> DateTime<Utc> {
    DateTime::from_naive_utc_and_offset(naive, Utc)
}

impl From<TodoDB> for Todo {
    fn from(db: TodoDB) -> Self {
        Todo {
            id: db.id,
            user_id: db.user_id,
            category_id: db.category_id,
            title: db.title,
            description: db.description,
            is_completed: db.is_completed,
            due_date: db.due_date.map(utc),
            priority: Priority::from_db_str(&db.priority),
            created_at: utc(db.created_at),
            updated_at: utc(db.updated_at),
            last_synced_at: db.last_synced_at.map(utc),
            client_updated_at: utc(db.client_updated_at),
        }
    }
}

impl From<NewTodo> for NewTodoDB {
    fn from(new_todo: NewTodo) -> Self {
        let now = Utc::now().naive_utc();
        NewTodoDB {
            user_id: new_todo.user_id,
            category_id: new_todo.category_id,
            title: new_todo.title,
            description: new_todo.description,
            is_completed: new_todo.is_completed,
            due_date: new_todo.due_date.map(|d| d.naive_utc()),
            priority: new_todo.priority.as_db_str().to_string(),
            created_at: now,
            updated_at: now,
            last_synced_at: Some(now),
            client_updated_at: new_todo.client_updated_at.naive_utc(),
        }
    }
}
