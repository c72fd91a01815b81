use log::debug;
use shared::{VisitRecord, VISITS_KEY};

use super::{load_json, save_json, StoredEntry};
use crate::storage::traits::{KeyValueStore, StorageError};

/// Persists the full visit list under `visits`
///
/// The list is always written whole; there is no per-visit update.
#[derive(Debug, Clone)]
pub struct VisitRepository<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> VisitRepository<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn load(&self) -> Result<StoredEntry<Vec<VisitRecord>>, StorageError> {
        load_json(&self.store, VISITS_KEY)
    }

    pub fn save_all(&self, visits: &[VisitRecord]) -> Result<(), StorageError> {
        save_json(&self.store, VISITS_KEY, visits)?;
        debug!("Stored {} visits", visits.len());
        Ok(())
    }

    pub fn delete_all(&self) -> Result<(), StorageError> {
        self.store.remove_item(VISITS_KEY)
    }
}
