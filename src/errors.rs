//! Record Engine Error Hierarchy
//!
//! Defines the error types for the record-management core, categorized by
//! operational concern: boundary validation, storage, feed lifecycle and
//! configuration.

use config::ConfigError;

#[doc(hidden)]
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Input rejected at the boundary before reaching the store
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Underlying store failures (embedded database, encoding, IO)
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// Capped feed lifecycle failures
    #[error(transparent)]
    Feed(#[from] FeedError),

    /// Settings loading/validation failures
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Unrecoverable failures requiring process termination
    #[error("Fatal error: {0}")]
    Fatal(String),
}

/// One or more field constraints were violated by a candidate record.
///
/// Absence of a record is never a `ValidationError`; it is represented as
/// `Ok(None)` by the store operations.
#[derive(Debug, thiserror::Error)]
#[error("validation failed: [{}]", violations.join(", "))]
pub struct ValidationError {
    /// Human-readable `field: reason` entries, one per violated constraint
    pub violations: Vec<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// Disk I/O failures while opening or flushing the database
    #[error(transparent)]
    IoError(#[from] std::io::Error),

    /// Serialization failures for persisted records
    #[error(transparent)]
    BincodeError(#[from] bincode::Error),

    /// Embedded database errors
    #[error("Embedded database error: {0}")]
    DbError(String),

    /// A persisted value failed to decode back into its record type
    #[error("Data corruption detected at {location}")]
    DataCorruption { location: String },
}

#[derive(Debug, thiserror::Error)]
pub enum FeedError {
    /// The capped feed was reset while tail subscriptions were active.
    /// Every active subscriber receives this error and must resubscribe.
    #[error("Feed was torn down while the subscription was active")]
    Teardown,
}

// ============== Conversion Implementations ============== //
impl From<sled::Error> for Error {
    fn from(err: sled::Error) -> Self {
        StorageError::DbError(err.to_string()).into()
    }
}

impl From<sled::Error> for StorageError {
    fn from(err: sled::Error) -> Self {
        StorageError::DbError(err.to_string())
    }
}

impl From<bincode::Error> for Error {
    fn from(err: bincode::Error) -> Self {
        StorageError::BincodeError(err).into()
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        StorageError::IoError(err).into()
    }
}
