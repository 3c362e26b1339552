//! User identity stand-in: models, contracts, and a minimal service.

mod users_model;
mod users_service;
mod users_traits;

pub use users_model::*;
pub use users_service::*;
pub use users_traits::*;
