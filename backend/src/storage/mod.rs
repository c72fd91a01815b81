//! # Storage Module
//!
//! Handles persistence of the pet profile and visit list.
//!
//! The domain layer only sees [`KeyValueStore`] and the typed repositories
//! built on it, so the backing store can be swapped (JSON files on disk,
//! in-memory for tests) without touching the record store.
//!
//! ## Entries
//!
//! - `petInfo`: the serialized [`shared::PetProfile`]
//! - `visits`: the serialized visit list, newest first

pub mod json;
pub mod memory;
pub mod repositories;
pub mod traits;

pub use json::JsonConnection;
pub use memory::MemoryStore;
pub use repositories::{PetProfileRepository, StoredEntry, VisitRepository};
pub use traits::{KeyValueStore, StorageError};
