//! # Storage Traits
//!
//! This module defines the storage abstraction that lets the record store
//! persist its slices without knowing which backend holds them. The model is
//! a flat key-value store of text entries, the same shape as browser local
//! storage: every entry is a complete serialized document under a fixed key.

use thiserror::Error;

/// Errors raised by a key-value store or by the typed repositories on top of it
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Storage I/O error for '{key}': {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Storage quota exceeded for '{key}': {size} bytes exceeds the limit of {limit} bytes")]
    QuotaExceeded { key: String, size: usize, limit: usize },

    #[error("Failed to serialize '{key}': {source}")]
    Serialization {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid storage key '{0}'")]
    InvalidKey(String),
}

impl StorageError {
    pub fn io(key: &str, source: std::io::Error) -> Self {
        StorageError::Io {
            key: key.to_string(),
            source,
        }
    }

    pub fn is_quota_exceeded(&self) -> bool {
        matches!(self, StorageError::QuotaExceeded { .. })
    }
}

/// Trait defining the interface for text key-value storage
///
/// Writes are all-or-nothing: after a failed `set_item` the previous value
/// (or absence) under that key is still what `get_item` returns.
pub trait KeyValueStore: Clone {
    /// Read the entry stored under `key`, `None` when absent
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Replace the entry stored under `key`
    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete the entry under `key`; deleting an absent entry is not an error
    fn remove_item(&self, key: &str) -> Result<(), StorageError>;
}

/// Reject entries larger than the configured per-entry quota
pub fn check_quota(key: &str, value: &str, limit: Option<usize>) -> Result<(), StorageError> {
    match limit {
        Some(limit) if value.len() > limit => Err(StorageError::QuotaExceeded {
            key: key.to_string(),
            size: value.len(),
            limit,
        }),
        _ => Ok(()),
    }
}

/// Keys end up as file names, so only a conservative character set is allowed
pub fn validate_key(key: &str) -> Result<(), StorageError> {
    let valid = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    if valid {
        Ok(())
    } else {
        Err(StorageError::InvalidKey(key.to_string()))
    }
}
