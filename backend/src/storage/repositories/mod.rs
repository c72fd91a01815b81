//! Typed repositories over a [`KeyValueStore`](crate::storage::KeyValueStore).
//!
//! Each repository owns one fixed key and (de)serializes its entity as JSON.

pub mod pet_profile_repository;
pub mod visit_repository;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::storage::traits::{KeyValueStore, StorageError};

pub use pet_profile_repository::PetProfileRepository;
pub use visit_repository::VisitRepository;

/// What was found under a key at load time
#[derive(Debug, Clone, PartialEq)]
pub enum StoredEntry<T> {
    Absent,
    Present(T),
    /// The entry exists but does not decode; carries the parse error
    Malformed(String),
}

pub(crate) fn load_json<S, T>(store: &S, key: &str) -> Result<StoredEntry<T>, StorageError>
where
    S: KeyValueStore,
    T: DeserializeOwned,
{
    let Some(text) = store.get_item(key)? else {
        return Ok(StoredEntry::Absent);
    };

    match serde_json::from_str(&text) {
        Ok(value) => Ok(StoredEntry::Present(value)),
        Err(e) => Ok(StoredEntry::Malformed(e.to_string())),
    }
}

pub(crate) fn save_json<S, T>(store: &S, key: &str, value: &T) -> Result<(), StorageError>
where
    S: KeyValueStore,
    T: Serialize + ?Sized,
{
    let text = serde_json::to_string(value).map_err(|source| StorageError::Serialization {
        key: key.to_string(),
        source,
    })?;
    store.set_item(key, &text)
}
