//! Key/value storage backends.
//!
//! [`Storage`] mirrors the browser local-storage contract the cart was built
//! against: string keys, string values, last writer wins. The persistence
//! adapter is the only component that talks to a backend.

mod file;
mod memory;

pub use file::FileStorage;
pub use memory::MemoryStorage;

use crate::error::StorageError;

/// A durable string key/value store.
pub trait Storage {
    /// Read the value stored under `key`, or `None` if there is no entry.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is invalid or the backend cannot be read.
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous entry.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is invalid, the backend is full, or the
    /// write fails.
    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete the entry under `key`. Missing entries are not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is invalid or the backend cannot be written.
    fn remove_item(&self, key: &str) -> Result<(), StorageError>;
}

/// Validate that a key is safe for use as a filename.
///
/// Rejects empty keys, path separators, `..`, and control characters.
///
/// # Errors
///
/// Returns [`StorageError::InvalidKey`] describing the problem.
pub fn validate_key(key: &str) -> Result<(), StorageError> {
    if key.is_empty() {
        return Err(StorageError::InvalidKey(
            "key cannot be empty".to_string(),
        ));
    }
    if key.contains('/') || key.contains('\\') || key.contains("..") {
        return Err(StorageError::InvalidKey(format!(
            "key contains path characters: {key:?}"
        )));
    }
    if key.chars().any(char::is_control) {
        return Err(StorageError::InvalidKey(format!(
            "key contains control characters: {key:?}"
        )));
    }
    Ok(())
}
