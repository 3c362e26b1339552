use opentodo_core::categories::{Category, CategoryRepositoryTrait, CategoryUpdate, NewCategory};
use opentodo_core::errors::{Error, Result};

use super::model::{CategoryDB, NewCategoryDB};
use crate::db::{get_connection, WriteHandle};
use crate::errors::StorageError;
use crate::schema::{categories, todos};
use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel::r2d2::{self, Pool};
use diesel::SqliteConnection;

use std::sync::Arc;

pub struct CategoryRepository {
    pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
    writer: WriteHandle,
}

impl CategoryRepository {
    pub fn new(
        pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
        writer: WriteHandle,
    ) -> Self {
        CategoryRepository { pool, writer }
    }
}

#[async_trait]
impl CategoryRepositoryTrait for CategoryRepository {
    fn load_categories(&self) -> Result<Vec<Category>> {
        let mut conn = get_connection(&self.pool)?;
        let categories_db = categories::table
            .order(categories::name.asc())
            .load::<CategoryDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(categories_db.into_iter().map(Category::from).collect())
    }

    fn get_category(&self, category_id: i64) -> Result<Option<Category>> {
        let mut conn = get_connection(&self.pool)?;
        let category_db = categories::table
            .find(category_id)
            .first::<CategoryDB>(&mut conn)
            .optional()
            .map_err(StorageError::from)?;
        Ok(category_db.map(Category::from))
    }

    fn existing_category_ids(&self, category_ids: &[i64]) -> Result<Vec<i64>> {
        if category_ids.is_empty() {
            return Ok(Vec::new());
        }
        let mut conn = get_connection(&self.pool)?;
        let ids = categories::table
            .filter(categories::id.eq_any(category_ids.to_vec()))
            .select(categories::id)
            .load::<i64>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(ids)
    }

    async fn insert_new_category(&self, new_category: NewCategory) -> Result<Category> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Category> {
                let new_category_db: NewCategoryDB = new_category.into();
                let result_db = diesel::insert_into(categories::table)
                    .values(&new_category_db)
                    .returning(CategoryDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                Ok(Category::from(result_db))
            })
            .await
    }

    async fn update_category(&self, update: CategoryUpdate) -> Result<Category> {
        let CategoryUpdate {
            id: category_id,
            name: new_name,
            description: new_description,
            color: new_color,
        } = update;

        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Category> {
                let now = Utc::now().naive_utc();
                diesel::update(categories::table.find(category_id))
                    .set((
                        categories::name.eq(new_name),
                        categories::description.eq(new_description),
                        categories::color.eq(new_color),
                        categories::updated_at.eq(now),
                    ))
                    .execute(conn)
                    .map_err(StorageError::from)?;
                // Reload so a vanished row surfaces as NotFound.
                let result_db = categories::table
                    .find(category_id)
                    .first::<CategoryDB>(conn)
                    .map_err(StorageError::from)?;
                Ok(Category::from(result_db))
            })
            .await
    }

    async fn delete_category(&self, category_id: i64) -> Result<usize> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                let referencing: i64 = todos::table
                    .filter(todos::category_id.eq(category_id))
                    .count()
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                if referencing > 0 {
                    return Err(Error::Validation(format!(
                        "Category {} is referenced by {} todo(s) and cannot be deleted",
                        category_id, referencing
                    )));
                }
                let affected = diesel::delete(categories::table.find(category_id))
                    .execute(conn)
                    .map_err(StorageError::from)?;
                Ok(affected)
            })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    use crate::db::{create_pool, init, run_migrations, write_actor::spawn_writer};

    fn setup_db() -> (
        Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
        WriteHandle,
    ) {
        let app_data = tempdir()
            .expect("tempdir")
            .keep()
            .to_string_lossy()
            .to_string();
        let db_path = init(&app_data).expect("init db");
        run_migrations(&db_path).expect("migrate db");
        let pool = create_pool(&db_path).expect("create pool");
        let writer = spawn_writer(pool.as_ref().clone());
        (pool, writer)
    }

    fn insert_user_for_test(conn: &mut SqliteConnection, user_id: &str) {
        let sql = format!(
            "INSERT INTO users (id, email, name, auth_method, is_admin) VALUES ('{user_id}', '{user_id}@example.com', 'Test User', 'email', 0)"
        );
        diesel::sql_query(sql).execute(conn).expect("insert user");
    }

    fn insert_todo_for_test(conn: &mut SqliteConnection, user_id: &str, category_id: i64) {
        let sql = format!(
            "INSERT INTO todos (user_id, category_id, title, client_updated_at) VALUES ('{user_id}', {category_id}, 'Linked todo', CURRENT_TIMESTAMP)"
        );
        diesel::sql_query(sql).execute(conn).expect("insert todo");
    }

    fn new_category(name: &str) -> NewCategory {
        NewCategory {
            name: name.to_string(),
            description: None,
            color: Some("#336699".to_string()),
        }
    }

    #[tokio::test]
    async fn crud_roundtrip_orders_by_name() {
        let (pool, writer) = setup_db();
        let repo = CategoryRepository::new(pool, writer);

        let work = repo
            .insert_new_category(new_category("Work"))
            .await
            .expect("insert work");
        let errands = repo
            .insert_new_category(new_category("Errands"))
            .await
            .expect("insert errands");

        let names: Vec<String> = repo
            .load_categories()
            .expect("load")
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(names, vec!["Errands".to_string(), "Work".to_string()]);

        let updated = repo
            .update_category(CategoryUpdate {
                id: work.id,
                name: "Deep Work".to_string(),
                description: Some("Focus blocks".to_string()),
                color: None,
            })
            .await
            .expect("update");
        assert_eq!(updated.name, "Deep Work");
        assert_eq!(updated.description.as_deref(), Some("Focus blocks"));
        assert!(updated.color.is_none());

        let fetched = repo
            .get_category(errands.id)
            .expect("get")
            .expect("category exists");
        assert_eq!(fetched.name, "Errands");
        assert!(repo.get_category(9999).expect("get missing").is_none());

        let err = repo
            .update_category(CategoryUpdate {
                id: 9999,
                name: "Ghost".to_string(),
                description: None,
                color: None,
            })
            .await
            .expect_err("update missing");
        assert!(matches!(err, Error::NotFound(_)));
    }

    #[tokio::test]
    async fn duplicate_name_is_a_validation_error() {
        let (pool, writer) = setup_db();
        let repo = CategoryRepository::new(pool, writer);

        repo.insert_new_category(new_category("Work"))
            .await
            .expect("first insert");
        let err = repo
            .insert_new_category(new_category("Work"))
            .await
            .expect_err("duplicate name");
        assert!(matches!(err, Error::Validation(_)));
    }

    #[tokio::test]
    async fn referenced_category_cannot_be_deleted() {
        let (pool, writer) = setup_db();
        let repo = CategoryRepository::new(pool.clone(), writer);

        let category = repo
            .insert_new_category(new_category("Work"))
            .await
            .expect("insert");
        {
            let mut conn = get_connection(&pool).expect("conn");
            insert_user_for_test(&mut conn, "user-1");
            insert_todo_for_test(&mut conn, "user-1", category.id);
        }

        let err = repo
            .delete_category(category.id)
            .await
            .expect_err("referenced delete");
        assert!(matches!(err, Error::Validation(_)));

        {
            let mut conn = get_connection(&pool).expect("conn");
            diesel::delete(todos::table)
                .execute(&mut conn)
                .expect("clear todos");
        }
        let affected = repo
            .delete_category(category.id)
            .await
            .expect("delete after unlink");
        assert_eq!(affected, 1);
        assert_eq!(repo.delete_category(category.id).await.expect("repeat"), 0);
    }

    #[tokio::test]
    async fn existing_ids_returns_matching_subset() {
        let (pool, writer) = setup_db();
        let repo = CategoryRepository::new(pool, writer);

        let work = repo
            .insert_new_category(new_category("Work"))
            .await
            .expect("insert");
        assert_eq!(
            repo.existing_category_ids(&[work.id, 9999])
                .expect("existing ids"),
            vec![work.id]
        );
        assert!(repo.existing_category_ids(&[]).expect("empty").is_empty());
    }
}
