mod todos_model;
mod todos_service;
mod todos_traits;

pub use todos_model::*;
pub use todos_service::*;
pub use todos_traits::*;
