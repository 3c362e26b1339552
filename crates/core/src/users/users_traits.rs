//! Storage and service contracts for users.

use async_trait::async_trait;

use super::users_model::{NewUser, User};
use crate::errors::Result;

/// Data access contract for the users table.
#[async_trait]
pub trait UserRepositoryTrait: Send + Sync {
    fn get_user(&self, user_id: &str) -> Result<Option<User>>;
    fn get_user_by_email(&self, email: &str) -> Result<Option<User>>;
    async fn create_user(&self, new_user: NewUser) -> Result<User>;
}

/// Service contract for the identity stand-in.
#[async_trait]
pub trait UserServiceTrait: Send + Sync {
    fn get_user(&self, user_id: &str) -> Result<User>;
    async fn register_user(&self, new_user: NewUser) -> Result<User>;
}
