//! Storage and service contracts for categories.

use async_trait::async_trait;

use super::categories_model::{Category, CategoryUpdate, NewCategory};
use crate::errors::Result;

/// Data access contract for the categories table.
#[async_trait]
pub trait CategoryRepositoryTrait: Send + Sync {
    fn load_categories(&self) -> Result<Vec<Category>>;
    fn get_category(&self, category_id: i64) -> Result<Option<Category>>;
    /// Returns the subset of `category_ids` that exist. Used by the sync
    /// reconciler's whole-batch pre-validation.
    fn existing_category_ids(&self, category_ids: &[i64]) -> Result<Vec<i64>>;
    async fn insert_new_category(&self, new_category: NewCategory) -> Result<Category>;
    async fn update_category(&self, update: CategoryUpdate) -> Result<Category>;
    /// Deletes a category, returning the number of rows removed. Fails
    /// when any todo still references the category.
    async fn delete_category(&self, category_id: i64) -> Result<usize>;
}

/// Service contract for category management. Mutations are admin-only.
#[async_trait]
pub trait CategoryServiceTrait: Send + Sync {
    fn load_categories(&self) -> Result<Vec<Category>>;
    fn get_category(&self, category_id: i64) -> Result<Category>;
    async fn create_category(
        &self,
        acting_user_id: &str,
        new_category: NewCategory,
    ) -> Result<Category>;
    async fn update_category(
        &self,
        acting_user_id: &str,
        update: CategoryUpdate,
    ) -> Result<Category>;
    async fn delete_category(&self, acting_user_id: &str, category_id: i64) -> Result<()>;
}
