//! Core error types for the secmaster store.
//!
//! This module defines database-agnostic error types. Storage-specific errors
//! (from Diesel, SQLite, etc.) are converted to these types by the storage
//! layer before they reach a caller.

use thiserror::Error;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for the securities store.
///
/// Integrity failures (`DuplicateKey`, `ReferentialConflict`,
/// `AmbiguousLookup`) are never retried; they describe data the caller must
/// fix. `SerializationConflict` is the one transient variant and is safe to
/// retry with backoff.
#[derive(Error, Debug)]
pub enum Error {
    /// A required field was missing or malformed.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A uniqueness invariant would be violated by the write.
    #[error("Duplicate key: {0}")]
    DuplicateKey(String),

    /// A foreign key did not resolve, or a delete is blocked by references.
    #[error("Referential conflict: {0}")]
    ReferentialConflict(String),

    /// A lookup matched more than one row where the caller expects one.
    #[error("Ambiguous lookup: {0}")]
    AmbiguousLookup(String),

    /// The requested record does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Transient write collision with a concurrent transaction.
    #[error("Serialization conflict: {0}")]
    SerializationConflict(String),

    /// Schema migration failure.
    #[error(transparent)]
    Migration(#[from] MigrationError),

    /// Storage plumbing failure (connection, pool, unexpected query error).
    #[error("Database operation failed: {0}")]
    Database(#[from] DatabaseError),
}

impl Error {
    /// Whether the caller may retry the operation.
    ///
    /// Only serialization conflicts are transient; every other variant
    /// reflects state that a retry cannot change.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Error::SerializationConflict(_))
    }
}

/// Errors specific to the generation-1 -> generation-2 schema migration.
///
/// Both variants leave the store in its pre-migration state.
#[derive(Error, Debug)]
pub enum MigrationError {
    /// The migration hit an unexpected violation and rolled back.
    #[error("Migration aborted, store left unchanged: {0}")]
    Aborted(String),

    /// The store already carries the composite-key (target) schema.
    #[error("Store is already migrated to the composite-key schema")]
    AlreadyMigrated,
}

/// Database-agnostic plumbing error for storage operations.
///
/// This enum uses `String` for all error details, allowing the storage layer
/// to convert storage-specific errors (Diesel, SQLite, etc.) into this format.
#[derive(Error, Debug)]
pub enum DatabaseError {
    /// Failed to establish a database connection.
    #[error("Failed to connect to database: {0}")]
    ConnectionFailed(String),

    /// Failed to create or configure the connection pool.
    #[error("Failed to create database pool: {0}")]
    PoolCreationFailed(String),

    /// A database query failed to execute.
    #[error("Database query failed: {0}")]
    QueryFailed(String),

    /// A database transaction failed.
    #[error("Transaction failed: {0}")]
    TransactionFailed(String),

    /// Applying embedded schema migrations failed.
    #[error("Database migration failed: {0}")]
    MigrationFailed(String),

    /// A stored value could not be converted to its domain type.
    #[error("Stored value could not be decoded: {0}")]
    Corrupted(String),

    /// Any other internal error.
    #[error("Internal database error: {0}")]
    Internal(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_serialization_conflicts_are_retryable() {
        assert!(Error::SerializationConflict("busy".into()).is_retryable());
        assert!(!Error::DuplicateKey("abbrev".into()).is_retryable());
        assert!(!Error::ReferentialConflict("exchange".into()).is_retryable());
        assert!(!Error::InvalidInput("empty".into()).is_retryable());
        assert!(!Error::Migration(MigrationError::AlreadyMigrated).is_retryable());
    }
}
