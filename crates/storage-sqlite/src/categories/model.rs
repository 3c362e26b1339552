use chrono::{DateTime, NaiveDateTime, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use opentodo_core::categories::{Category, NewCategory};

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
#[diesel(table_name = crate::schema::categories)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct CategoryDB {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub color: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Insert row. The id column stays with SQLite's rowid allocator.
#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = crate::schema::categories)]
pub struct NewCategoryDB {
    pub name: String,
    pub description: Option<String>,
    pub color: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

fn utc(naive: NaiveDateTime) -> DateTime<Utc> {
    DateTime::from_naive_utc_and_offset(naive, Utc)
}

impl From<CategoryDB> for Category {
    fn from(db: CategoryDB) -> Self {
        Category {
            id: db.id,
            name: db.name,
            description: db.description,
            color: db.color,
            created_at: utc(db.created_at),
            updated_at: utc(db.updated_at),
        }
    }
}

impl From<NewCategory> for NewCategoryDB {
    fn from(new_category: NewCategory) -> Self {
        let now = Utc::now().naive_utc();
        NewCategoryDB {
            name: new_category.name,
            description: new_category.description,
            color: new_category.color,
            created_at: now,
            updated_at: now,
        }
    }
}
