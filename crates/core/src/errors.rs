//! Error types shared across the OpenTodo crates.

use thiserror::Error;

/// Result type alias for core operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error taxonomy.
///
/// Sync conflicts are deliberately NOT represented here: a conflict is a
/// normal reconcile outcome carried in the response, never an error.
#[derive(Debug, Error)]
pub enum Error {
    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),

    /// Malformed input, rejected before any persistence attempt
    #[error("Validation error: {0}")]
    Validation(String),

    /// Referenced user, category, or owned todo does not exist.
    /// Ownership failures on todos fold into this variant so callers
    /// cannot probe for other users' rows.
    #[error("Not found: {0}")]
    NotFound(String),

    /// The acting user lacks the required privilege
    #[error("Access denied: {0}")]
    AccessDenied(String),

    /// JSON serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Database-layer failure causes.
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Connection pool error: {0}")]
    PoolError(String),

    #[error("Query failed: {0}")]
    QueryFailed(String),

    #[error("Migration failed: {0}")]
    MigrationFailed(String),

    #[error("Internal database error: {0}")]
    Internal(String),
}
