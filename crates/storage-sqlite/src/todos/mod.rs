//! SQLite persistence for todos, including the offline sync batch writer.

mod model;
mod repository;

pub use model::{NewTodoDB, TodoDB};
pub use repository::TodoRepository;
