//! Storage-specific error types for SQLite operations.
//!
//! This module wraps Diesel and r2d2 errors and converts them to the
//! database-agnostic taxonomy defined in `secmaster_core`. The conversion is
//! where SQLite constraint failures become domain errors: a unique-index hit
//! is a `DuplicateKey`, a foreign-key failure is a `ReferentialConflict`, and
//! a busy/locked database is a retryable `SerializationConflict`.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use thiserror::Error;

use secmaster_core::errors::{DatabaseError, Error};

/// Storage-specific errors that wrap Diesel and r2d2 types.
///
/// Internal to the storage layer; converted to `secmaster_core::Error`
/// before being returned to callers.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Database connection failed: {0}")]
    ConnectionFailed(#[from] diesel::ConnectionError),

    #[error("Connection pool error: {0}")]
    PoolError(#[from] r2d2::Error),

    #[error("Query execution failed: {0}")]
    QueryFailed(#[from] DieselError),

    #[error("Migration failed: {0}")]
    MigrationFailed(String),

    #[error("Stored value could not be decoded: {0}")]
    Corrupted(String),
}

impl From<StorageError> for Error {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::ConnectionFailed(e) => {
                Error::Database(DatabaseError::ConnectionFailed(e.to_string()))
            }
            StorageError::PoolError(e) => {
                Error::Database(DatabaseError::PoolCreationFailed(e.to_string()))
            }
            StorageError::QueryFailed(DieselError::NotFound) => {
                Error::NotFound("Record not found".to_string())
            }
            StorageError::QueryFailed(DieselError::DatabaseError(
                DatabaseErrorKind::UniqueViolation,
                info,
            )) => Error::DuplicateKey(info.message().to_string()),
            StorageError::QueryFailed(DieselError::DatabaseError(
                DatabaseErrorKind::ForeignKeyViolation,
                info,
            )) => Error::ReferentialConflict(info.message().to_string()),
            StorageError::QueryFailed(DieselError::DatabaseError(
                DatabaseErrorKind::SerializationFailure,
                info,
            )) => Error::SerializationConflict(info.message().to_string()),
            StorageError::QueryFailed(DieselError::DatabaseError(_, info))
                if is_busy(info.message()) =>
            {
                Error::SerializationConflict(info.message().to_string())
            }
            StorageError::QueryFailed(e) => Error::Database(DatabaseError::QueryFailed(e.to_string())),
            StorageError::MigrationFailed(e) => Error::Database(DatabaseError::MigrationFailed(e)),
            StorageError::Corrupted(e) => Error::Database(DatabaseError::Corrupted(e)),
        }
    }
}

/// SQLite reports lock contention as SQLITE_BUSY / SQLITE_LOCKED, which
/// diesel surfaces with these messages rather than a dedicated kind.
fn is_busy(message: &str) -> bool {
    message.contains("database is locked") || message.contains("database table is locked")
}

/// Extension trait for converting Diesel and r2d2 Results to core Results.
///
/// Orphan rules prevent `From<DieselError> for Error`, so conversions go
/// through `StorageError` via this `.into_core()` helper.
pub trait IntoCore<T> {
    fn into_core(self) -> secmaster_core::Result<T>;
}

impl<T> IntoCore<T> for std::result::Result<T, DieselError> {
    fn into_core(self) -> secmaster_core::Result<T> {
        self.map_err(|e| StorageError::from(e).into())
    }
}

impl<T> IntoCore<T> for std::result::Result<T, r2d2::Error> {
    fn into_core(self) -> secmaster_core::Result<T> {
        self.map_err(|e| StorageError::from(e).into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn busy_messages_map_to_serialization_conflict() {
        assert!(is_busy("database is locked"));
        assert!(is_busy("database table is locked: daily_prices"));
        assert!(!is_busy("UNIQUE constraint failed: exchanges.abbrev"));
    }

    #[test]
    fn not_found_maps_to_domain_not_found() {
        let err: Error = StorageError::QueryFailed(DieselError::NotFound).into();
        assert!(matches!(err, Error::NotFound(_)));
    }
}
