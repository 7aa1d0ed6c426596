//! Error types for storage and persistence.
//!
//! None of these reach the caller of `Store::dispatch`. Storage errors are
//! surfaced by the [`Storage`](crate::Storage) backends, and persistence
//! errors are logged by [`persistence::save`](crate::persistence::save).

use thiserror::Error;

/// Errors from a key/value storage backend.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Reading or writing the underlying medium failed.
    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The key cannot be used by this backend.
    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    /// The write would exceed the backend's capacity.
    #[error("Storage quota exceeded: {needed} bytes needed, limit is {limit}")]
    QuotaExceeded {
        /// Maximum number of bytes the backend holds.
        limit: usize,
        /// Bytes the backend would hold after the write.
        needed: usize,
    },
}

/// Errors while writing the cart slice.
#[derive(Debug, Error)]
pub enum PersistError {
    /// The cart could not be encoded as JSON.
    #[error("Failed to serialize cart: {0}")]
    Serialize(#[from] serde_json::Error),

    /// The storage backend rejected the write.
    #[error(transparent)]
    Storage(#[from] StorageError),
}
