//! Sync domain models and services.

mod todo_sync_model;
mod todo_sync_service;
mod todo_sync_traits;

pub use todo_sync_model::*;
pub use todo_sync_service::*;
pub use todo_sync_traits::*;
