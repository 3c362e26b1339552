use std::sync::Arc;

use async_trait::async_trait;
use log::debug;

use super::users_model::{NewUser, User};
use super::users_traits::{UserRepositoryTrait, UserServiceTrait};
use crate::errors::{Error, Result};

/// Minimal identity service: registration and lookup only. Credential and
/// session handling live outside this crate.
pub struct UserService {
    user_repo: Arc<dyn UserRepositoryTrait>,
}

impl UserService {
    pub fn new(user_repo: Arc<dyn UserRepositoryTrait>) -> Self {
        Self { user_repo }
    }
}

#[async_trait]
impl UserServiceTrait for UserService {
    fn get_user(&self, user_id: &str) -> Result<User> {
        self.user_repo
            .get_user(user_id)?
            .ok_or_else(|| Error::NotFound(format!("User {} not found", user_id)))
    }

    async fn register_user(&self, new_user: NewUser) -> Result<User> {
        let email = new_user.email.trim().to_lowercase();
        if email.is_empty() || !email.contains('@') {
            return Err(Error::Validation(format!(
                "Invalid email address '{}'",
                new_user.email
            )));
        }
        let name = new_user.name.trim().to_string();
        if name.is_empty() {
            return Err(Error::Validation("User name cannot be empty".to_string()));
        }
        if self.user_repo.get_user_by_email(&email)?.is_some() {
            return Err(Error::Validation(format!(
                "Email {} is already registered",
                email
            )));
        }

        let user = self
            .user_repo
            .create_user(NewUser {
                email,
                name,
                ..new_user
            })
            .await?;
        debug!("Registered user {} via {:?}", user.id, user.auth_method);
        Ok(user)
    }
}
