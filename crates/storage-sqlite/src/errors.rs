use diesel::result::{DatabaseErrorKind, Error as DieselError};
use thiserror::Error;

use opentodo_core::errors::{DatabaseError, Error};

/// Errors raised inside the storage layer before they cross into domain
/// [`Error`] at the repository boundary.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database query failed: {0}")]
    Diesel(#[from] DieselError),

    #[error("Connection pool error: {0}")]
    Pool(#[from] diesel::r2d2::PoolError),

    #[error("Database connection failed: {0}")]
    Connection(#[from] diesel::ConnectionError),

    #[error("Migration failed: {0}")]
    Migration(String),
}

impl From<StorageError> for Error {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::Diesel(diesel_err) => from_diesel_error(diesel_err),
            StorageError::Pool(e) => Error::Database(DatabaseError::PoolError(e.to_string())),
            StorageError::Connection(e) => Error::Database(DatabaseError::Internal(e.to_string())),
            StorageError::Migration(message) => {
                Error::Database(DatabaseError::MigrationFailed(message))
            }
        }
    }
}

/// Maps diesel failures onto the domain taxonomy. Constraint violations
/// carry domain meaning here: a unique clash is caller input, a missing
/// foreign key means the referenced row disappeared.
fn from_diesel_error(err: DieselError) -> Error {
    match err {
        DieselError::NotFound => Error::NotFound("Record not found".to_string()),
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
            Error::Validation(info.message().to_string())
        }
        DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, info) => {
            Error::NotFound(format!("Referenced record not found: {}", info.message()))
        }
        other => Error::Database(DatabaseError::QueryFailed(other.to_string())),
    }
}
