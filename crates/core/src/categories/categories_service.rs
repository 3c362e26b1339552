use std::sync::Arc;

use async_trait::async_trait;
use log::debug;

use super::categories_model::{is_valid_color_code, Category, CategoryUpdate, NewCategory};
use super::categories_traits::{CategoryRepositoryTrait, CategoryServiceTrait};
use crate::errors::{Error, Result};
use crate::users::UserRepositoryTrait;

/// Category management. Reads are open to every signed-in user; mutations
/// require an admin actor.
pub struct CategoryService {
    category_repo: Arc<dyn CategoryRepositoryTrait>,
    user_repo: Arc<dyn UserRepositoryTrait>,
}

impl CategoryService {
    pub fn new(
        category_repo: Arc<dyn CategoryRepositoryTrait>,
        user_repo: Arc<dyn UserRepositoryTrait>,
    ) -> Self {
        Self {
            category_repo,
            user_repo,
        }
    }

    fn ensure_admin(&self, acting_user_id: &str) -> Result<()> {
        let user = self
            .user_repo
            .get_user(acting_user_id)?
            .ok_or_else(|| Error::NotFound(format!("User {} not found", acting_user_id)))?;
        if !user.is_admin {
            return Err(Error::AccessDenied(
                "Category management requires an admin user".to_string(),
            ));
        }
        Ok(())
    }

    fn validate(name: &str, color: Option<&str>) -> Result<()> {
        if name.trim().is_empty() {
            return Err(Error::Validation(
                "Category name cannot be empty".to_string(),
            ));
        }
        if let Some(color) = color {
            if !is_valid_color_code(color) {
                return Err(Error::Validation(format!(
                    "Invalid color code '{}', expected #RRGGBB",
                    color
                )));
            }
        }
        Ok(())
    }
}

#[async_trait]
impl CategoryServiceTrait for CategoryService {
    fn load_categories(&self) -> Result<Vec<Category>> {
        self.category_repo.load_categories()
    }

    fn get_category(&self, category_id: i64) -> Result<Category> {
        self.category_repo
            .get_category(category_id)?
            .ok_or_else(|| Error::NotFound(format!("Category {} not found", category_id)))
    }

    async fn create_category(
        &self,
        acting_user_id: &str,
        new_category: NewCategory,
    ) -> Result<Category> {
        self.ensure_admin(acting_user_id)?;
        Self::validate(&new_category.name, new_category.color.as_deref())?;
        let category = self.category_repo.insert_new_category(new_category).await?;
        debug!("Created category {} ({})", category.id, category.name);
        Ok(category)
    }

    async fn update_category(
        &self,
        acting_user_id: &str,
        update: CategoryUpdate,
    ) -> Result<Category> {
        self.ensure_admin(acting_user_id)?;
        Self::validate(&update.name, update.color.as_deref())?;
        self.category_repo.update_category(update).await
    }

    async fn delete_category(&self, acting_user_id: &str, category_id: i64) -> Result<()> {
        self.ensure_admin(acting_user_id)?;
        let deleted = self.category_repo.delete_category(category_id).await?;
        if deleted == 0 {
            return Err(Error::NotFound(format!(
                "Category {} not found",
                category_id
            )));
        }
        debug!("Deleted category {}", category_id);
        Ok(())
    }
}
