use chrono::{DateTime, NaiveDateTime, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use opentodo_core::users::{AuthMethod, NewUser, User};

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
#[diesel(table_name = crate::schema::users)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct UserDB {
    pub id: String,
    pub email: String,
    pub name: String,
    pub avatar: Option<String>,
    pub auth_method: String,
    pub is_admin: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = crate::schema::users)]
pub struct NewUserDB {
    pub id: Option<String>,
    pub email: String,
    pub name: String,
    pub avatar: Option<String>,
    pub auth_method: String,
    pub is_admin: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

fn utc(naive: NaiveDateTime) -> DateTime<Utc> {
    DateTime::from_naive_utc_and_offset(naive, Utc)
}

impl From<UserDB> for User {
    fn from(db: UserDB) -> Self {
        User {
            id: db.id,
            email: db.email,
            name: db.name,
            avatar: db.avatar,
            auth_method: AuthMethod::from_db_str(&db.auth_method),
            is_admin: db.is_admin,
            created_at: utc(db.created_at),
            updated_at: utc(db.updated_at),
        }
    }
}

impl From<NewUser> for NewUserDB {
    fn from(new_user: NewUser) -> Self {
        let now = Utc::now().naive_utc();
        NewUserDB {
            id: None,
            email: new_user.email,
            name: new_user.name,
            avatar: new_user.avatar,
            auth_method: new_user.auth_method.as_db_str().to_string(),
            is_admin: new_user.is_admin,
            created_at: now,
            updated_at: now,
        }
    }
}
