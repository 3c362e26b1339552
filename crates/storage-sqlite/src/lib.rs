//! SQLite persistence for opentodo, built on diesel.
//!
//! Reads go straight to the r2d2 pool; every mutation funnels through the
//! single-writer actor in [`db::write_actor`], one immediate transaction
//! per job.

pub mod categories;
pub mod db;
pub mod errors;
pub mod schema;
pub mod todos;
pub mod users;

pub use errors::StorageError;
