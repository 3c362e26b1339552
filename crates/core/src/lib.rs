//! Core domain for OpenTodo: models, error taxonomy, storage contracts,
//! and the services that implement the offline sync reconciler and the
//! filtered query engine. Persistence lives in the storage crates.

pub mod categories;
pub mod errors;
pub mod sync;
pub mod todos;
pub mod users;

pub use errors::{Error, Result};
