use log::debug;
use shared::{PetProfile, PET_INFO_KEY};

use super::{load_json, save_json, StoredEntry};
use crate::storage::traits::{KeyValueStore, StorageError};

/// Persists the singleton pet profile under `petInfo`
#[derive(Debug, Clone)]
pub struct PetProfileRepository<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> PetProfileRepository<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn load(&self) -> Result<StoredEntry<PetProfile>, StorageError> {
        load_json(&self.store, PET_INFO_KEY)
    }

    pub fn save(&self, profile: &PetProfile) -> Result<(), StorageError> {
        save_json(&self.store, PET_INFO_KEY, profile)?;
        debug!("Stored pet profile for '{}'", profile.name);
        Ok(())
    }

    pub fn delete(&self) -> Result<(), StorageError> {
        self.store.remove_item(PET_INFO_KEY)
    }
}
