//! # Record Store
//!
//! Holds the pet profile, the visit history and the visit draft in memory and
//! mirrors selected slices to a [`KeyValueStore`] on explicit save.
//!
//! Storage is read once, in [`RecordStore::load_on_startup`]; afterwards the
//! in-memory state is the source of truth for the session. Every save either
//! fully succeeds or leaves both the persisted entry and the in-memory state
//! as they were.

use std::sync::Arc;

use log::{debug, info, warn};
use shared::{
    parse_visit_date, ClearDataResponse, FieldError, PetField, PetProfile,
    SavePetProfileResponse, SaveVisitResponse, VisitField, VisitRecord,
};

use crate::domain::clock::Clock;
use crate::domain::collaborators::Confirmation;
use crate::domain::picture;
use crate::storage::{
    KeyValueStore, PetProfileRepository, StorageError, StoredEntry, VisitRepository,
};

pub const CLEAR_CONFIRMATION_PROMPT: &str =
    "Are you sure you want to clear all saved data? This cannot be undone.";

/// Outcome of hydrating one entry at startup
#[derive(Debug, Clone, PartialEq)]
pub enum EntryLoadStatus {
    Loaded,
    Absent,
    /// Present but not decodable; defaults were kept
    Malformed(String),
    /// The store failed to read the entry; defaults were kept
    Unreadable(String),
}

impl EntryLoadStatus {
    fn issue(&self, label: &str) -> Option<String> {
        match self {
            EntryLoadStatus::Malformed(reason) => {
                Some(format!("Saved {} could not be read and was ignored: {}", label, reason))
            }
            EntryLoadStatus::Unreadable(reason) => {
                Some(format!("Failed to load saved {}: {}", label, reason))
            }
            _ => None,
        }
    }
}

/// What `load_on_startup` found for each entry
#[derive(Debug, Clone, PartialEq)]
pub struct StartupLoadReport {
    pub pet_profile: EntryLoadStatus,
    pub visits: EntryLoadStatus,
}

impl StartupLoadReport {
    /// User-facing descriptions of every entry that fell back to defaults
    pub fn issues(&self) -> Vec<String> {
        [
            self.pet_profile.issue("pet information"),
            self.visits.issue("visits"),
        ]
        .into_iter()
        .flatten()
        .collect()
    }

    pub fn is_clean(&self) -> bool {
        self.issues().is_empty()
    }
}

/// Sort visits newest first. Equal dates keep their relative order.
pub fn sort_visits_descending(visits: &mut [VisitRecord]) {
    visits.sort_by(|a, b| b.date.cmp(&a.date));
}

/// In-memory pet profile and visit log mirrored to a key-value store
pub struct RecordStore<S: KeyValueStore> {
    pet_repository: PetProfileRepository<S>,
    visit_repository: VisitRepository<S>,
    clock: Arc<dyn Clock>,
    pet_profile: PetProfile,
    visits: Vec<VisitRecord>,
    visit_draft: VisitRecord,
}

impl<S: KeyValueStore> RecordStore<S> {
    /// Create an empty record store; call [`Self::load_on_startup`] to hydrate it
    pub fn new(store: S, clock: Arc<dyn Clock>) -> Self {
        let visit_draft = VisitRecord::blank(clock.today());
        Self {
            pet_repository: PetProfileRepository::new(store.clone()),
            visit_repository: VisitRepository::new(store),
            clock,
            pet_profile: PetProfile::default(),
            visits: Vec::new(),
            visit_draft,
        }
    }

    pub fn pet_profile(&self) -> &PetProfile {
        &self.pet_profile
    }

    /// Visit history, newest first
    pub fn visits(&self) -> &[VisitRecord] {
        &self.visits
    }

    pub fn visit_draft(&self) -> &VisitRecord {
        &self.visit_draft
    }

    /// Hydrate from storage. Absent, malformed or unreadable entries leave the
    /// defaults in place; nothing here fails the session.
    pub fn load_on_startup(&mut self) -> StartupLoadReport {
        info!("📂 Loading saved pet records");

        let pet_profile = match self.pet_repository.load() {
            Ok(StoredEntry::Present(profile)) => {
                self.pet_profile = profile;
                EntryLoadStatus::Loaded
            }
            Ok(StoredEntry::Absent) => EntryLoadStatus::Absent,
            Ok(StoredEntry::Malformed(reason)) => {
                warn!("⚠️ Ignoring malformed pet profile entry: {}", reason);
                EntryLoadStatus::Malformed(reason)
            }
            Err(e) => {
                warn!("⚠️ Failed to read pet profile entry: {}", e);
                EntryLoadStatus::Unreadable(e.to_string())
            }
        };

        let visits = match self.visit_repository.load() {
            Ok(StoredEntry::Present(mut visits)) => {
                sort_visits_descending(&mut visits);
                self.visits = visits;
                EntryLoadStatus::Loaded
            }
            Ok(StoredEntry::Absent) => EntryLoadStatus::Absent,
            Ok(StoredEntry::Malformed(reason)) => {
                warn!("⚠️ Ignoring malformed visits entry: {}", reason);
                EntryLoadStatus::Malformed(reason)
            }
            Err(e) => {
                warn!("⚠️ Failed to read visits entry: {}", e);
                EntryLoadStatus::Unreadable(e.to_string())
            }
        };

        info!(
            "✅ Loaded pet profile ({:?}) and {} visits ({:?})",
            pet_profile,
            self.visits.len(),
            visits
        );

        StartupLoadReport {
            pet_profile,
            visits,
        }
    }

    /// Merge one field into the in-memory profile. Not persisted until saved.
    pub fn update_pet_field(&mut self, field: PetField, value: impl Into<String>) {
        self.pet_profile.set_field(field, value);
        debug!("Updated pet field '{}'", field);
    }

    /// Merge one field into the visit draft. Dates must be `YYYY-MM-DD`; an
    /// invalid date leaves the draft unchanged.
    pub fn update_visit_field(
        &mut self,
        field: VisitField,
        value: impl Into<String>,
    ) -> Result<(), FieldError> {
        let value = value.into();
        match field {
            VisitField::Date => self.visit_draft.date = parse_visit_date(&value)?,
            VisitField::Reasons => self.visit_draft.reasons = value,
            VisitField::Symptoms => self.visit_draft.symptoms = value,
            VisitField::BehaviorChanges => self.visit_draft.behavior_changes = value,
        }
        debug!("Updated visit draft field '{}'", field);
        Ok(())
    }

    /// Store an image on the profile as a `data:` URL. In memory only.
    pub fn set_pet_picture(&mut self, bytes: &[u8]) {
        let data_url = picture::to_data_url(bytes);
        info!(
            "🖼️ Set pet picture ({} bytes, {})",
            bytes.len(),
            picture::sniff_mime_type(bytes)
        );
        self.pet_profile.picture = Some(data_url);
    }

    /// Persist the whole profile under `petInfo`
    pub fn save_pet_profile(&self) -> Result<SavePetProfileResponse, StorageError> {
        info!("💾 Saving pet profile for '{}'", self.pet_profile.name);
        self.pet_repository.save(&self.pet_profile)?;

        Ok(SavePetProfileResponse {
            profile: self.pet_profile.clone(),
            success_message: "Pet information saved successfully!".to_string(),
        })
    }

    /// Append the draft to the history, keep it sorted newest first, persist
    /// the full list, then reset the draft. On failure nothing changes.
    pub fn save_visit(&mut self) -> Result<SaveVisitResponse, StorageError> {
        let visit = self.visit_draft.clone();
        info!("💾 Saving visit dated {}", visit.iso_date());

        let mut updated = Vec::with_capacity(self.visits.len() + 1);
        updated.extend_from_slice(&self.visits);
        updated.push(visit.clone());
        sort_visits_descending(&mut updated);

        self.visit_repository.save_all(&updated)?;

        self.visits = updated;
        self.visit_draft = VisitRecord::blank(self.clock.today());

        Ok(SaveVisitResponse {
            visit,
            visit_count: self.visits.len(),
            success_message: "Visit information saved successfully!".to_string(),
        })
    }

    /// Delete both entries once the user confirms. Each in-memory slice is
    /// reset right after its entry is removed, so a failure part way leaves
    /// memory matching what is still stored. The visit draft is kept.
    pub fn clear_all(
        &mut self,
        confirmation: &dyn Confirmation,
    ) -> Result<ClearDataResponse, StorageError> {
        if !confirmation.confirm(CLEAR_CONFIRMATION_PROMPT) {
            info!("Clear all data cancelled by user");
            return Ok(ClearDataResponse {
                cleared: false,
                success_message: None,
            });
        }

        info!("🗑️ Clearing all saved pet data");
        self.visit_repository.delete_all()?;
        self.visits.clear();

        self.pet_repository.delete()?;
        self.pet_profile = PetProfile::default();

        Ok(ClearDataResponse {
            cleared: true,
            success_message: Some("All data cleared successfully!".to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::clock::FixedClock;
    use crate::domain::collaborators::StaticConfirmation;
    use crate::storage::MemoryStore;
    use chrono::NaiveDate;
    use shared::{PET_INFO_KEY, VISITS_KEY};
    use std::cell::Cell;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
    }

    fn setup_store(store: MemoryStore) -> RecordStore<MemoryStore> {
        RecordStore::new(store, Arc::new(FixedClock(today())))
    }

    fn add_visit(records: &mut RecordStore<MemoryStore>, date: &str, symptoms: &str) {
        records.update_visit_field(VisitField::Date, date).unwrap();
        records.update_visit_field(VisitField::Symptoms, symptoms).unwrap();
        records.save_visit().expect("Failed to save visit");
    }

    fn rex() -> [(PetField, &'static str); 5] {
        [
            (PetField::Name, "Rex"),
            (PetField::Age, "3"),
            (PetField::Allergies, ""),
            (PetField::FavoriteFood, "chicken"),
            (PetField::PersonalityTraits, "playful"),
        ]
    }

    struct CountingConfirmation {
        answer: bool,
        asked: Cell<u32>,
    }

    impl Confirmation for CountingConfirmation {
        fn confirm(&self, prompt: &str) -> bool {
            assert_eq!(prompt, CLEAR_CONFIRMATION_PROMPT);
            self.asked.set(self.asked.get() + 1);
            self.answer
        }
    }

    #[test]
    fn test_new_store_has_defaults() {
        let records = setup_store(MemoryStore::new());
        assert_eq!(records.pet_profile(), &PetProfile::default());
        assert!(records.visits().is_empty());
        assert_eq!(records.visit_draft(), &VisitRecord::blank(today()));
    }

    #[test]
    fn test_pet_profile_round_trip() {
        let store = MemoryStore::new();
        let mut records = setup_store(store.clone());
        for (field, value) in rex() {
            records.update_pet_field(field, value);
        }
        let response = records.save_pet_profile().unwrap();
        assert_eq!(response.success_message, "Pet information saved successfully!");

        let mut reloaded = setup_store(store);
        let report = reloaded.load_on_startup();

        assert_eq!(report.pet_profile, EntryLoadStatus::Loaded);
        assert_eq!(report.visits, EntryLoadStatus::Absent);
        assert_eq!(reloaded.pet_profile(), records.pet_profile());
        assert_eq!(reloaded.pet_profile().favorite_food, "chicken");
        assert_eq!(reloaded.pet_profile().allergies, "");
    }

    #[test]
    fn test_update_pet_field_does_not_persist() {
        let store = MemoryStore::new();
        let mut records = setup_store(store.clone());

        records.update_pet_field(PetField::Name, "Rex");

        assert_eq!(records.pet_profile().name, "Rex");
        assert!(!store.contains_key(PET_INFO_KEY));
    }

    #[test]
    fn test_visits_sorted_newest_first() {
        let store = MemoryStore::new();
        let mut records = setup_store(store.clone());

        add_visit(&mut records, "2024-01-10", "sneezing");
        add_visit(&mut records, "2024-03-05", "limping");

        let dates: Vec<String> = records.visits().iter().map(|v| v.iso_date()).collect();
        assert_eq!(dates, vec!["2024-03-05", "2024-01-10"]);

        // The persisted list has the same order
        let mut reloaded = setup_store(store);
        reloaded.load_on_startup();
        assert_eq!(reloaded.visits(), records.visits());
    }

    #[test]
    fn test_sort_invariant_after_many_saves() {
        let mut records = setup_store(MemoryStore::new());
        for date in ["2023-05-01", "2024-02-29", "2022-12-31", "2024-02-29", "2023-11-15"] {
            add_visit(&mut records, date, "");
        }

        assert_eq!(records.visits().len(), 5);
        for pair in records.visits().windows(2) {
            assert!(pair[0].date >= pair[1].date);
        }
    }

    #[test]
    fn test_equal_dates_keep_insertion_order() {
        let mut records = setup_store(MemoryStore::new());

        add_visit(&mut records, "2024-02-01", "first");
        add_visit(&mut records, "2024-03-01", "later");
        add_visit(&mut records, "2024-02-01", "second");
        add_visit(&mut records, "2024-02-01", "third");

        let symptoms: Vec<&str> = records.visits().iter().map(|v| v.symptoms.as_str()).collect();
        assert_eq!(symptoms, vec!["later", "first", "second", "third"]);
    }

    #[test]
    fn test_save_visit_resets_draft() {
        let mut records = setup_store(MemoryStore::new());

        records.update_visit_field(VisitField::Date, "2024-01-10").unwrap();
        records.update_visit_field(VisitField::Reasons, "checkup").unwrap();
        records.update_visit_field(VisitField::BehaviorChanges, "sleepy").unwrap();

        let response = records.save_visit().unwrap();
        assert_eq!(response.visit_count, 1);
        assert_eq!(response.visit.reasons, "checkup");
        assert_eq!(response.success_message, "Visit information saved successfully!");
        assert_eq!(records.visit_draft(), &VisitRecord::blank(today()));
    }

    #[test]
    fn test_draft_defaults_to_today() {
        let mut records = setup_store(MemoryStore::new());
        records.save_visit().unwrap();
        assert_eq!(records.visits()[0].date, today());
    }

    #[test]
    fn test_invalid_visit_date_leaves_draft_unchanged() {
        let mut records = setup_store(MemoryStore::new());
        records.update_visit_field(VisitField::Date, "2024-01-10").unwrap();

        let err = records.update_visit_field(VisitField::Date, "2024-02-30").unwrap_err();

        assert_eq!(err, FieldError::InvalidDate("2024-02-30".to_string()));
        assert_eq!(records.visit_draft().iso_date(), "2024-01-10");
    }

    #[test]
    fn test_failed_visit_save_changes_nothing() {
        let store = MemoryStore::new().with_quota(Some(120));
        let mut records = setup_store(store.clone());
        add_visit(&mut records, "2024-01-10", "");
        let persisted_before = store.get_item(VISITS_KEY).unwrap();

        records.update_visit_field(VisitField::Date, "2024-02-01").unwrap();
        records.update_visit_field(VisitField::Reasons, &"x".repeat(200)).unwrap();
        let draft_before = records.visit_draft().clone();

        let err = records.save_visit().unwrap_err();

        assert!(err.is_quota_exceeded());
        assert_eq!(records.visits().len(), 1);
        assert_eq!(records.visit_draft(), &draft_before);
        assert_eq!(store.get_item(VISITS_KEY).unwrap(), persisted_before);
    }

    #[test]
    fn test_failed_profile_save_reports_quota() {
        let store = MemoryStore::new().with_quota(Some(16));
        let mut records = setup_store(store.clone());
        records.update_pet_field(PetField::Name, "Rex");

        let err = records.save_pet_profile().unwrap_err();

        assert!(err.is_quota_exceeded());
        assert!(!store.contains_key(PET_INFO_KEY));
        assert_eq!(records.pet_profile().name, "Rex");
    }

    #[test]
    fn test_set_pet_picture_is_memory_only() {
        let store = MemoryStore::new();
        let mut records = setup_store(store.clone());

        records.set_pet_picture(&[0xFF, 0xD8, 0xFF, 0xE0]);

        let picture = records.pet_profile().picture.as_deref().unwrap();
        assert!(picture.starts_with("data:image/jpeg;base64,"));
        assert!(!store.contains_key(PET_INFO_KEY));

        records.save_pet_profile().unwrap();
        let mut reloaded = setup_store(store);
        reloaded.load_on_startup();
        assert_eq!(reloaded.pet_profile().picture.as_deref(), Some(picture));
    }

    #[test]
    fn test_clear_all_confirmed() {
        let store = MemoryStore::new();
        let mut records = setup_store(store.clone());
        for (field, value) in rex() {
            records.update_pet_field(field, value);
        }
        records.save_pet_profile().unwrap();
        add_visit(&mut records, "2024-01-10", "cough");
        records.update_visit_field(VisitField::Reasons, "half typed").unwrap();

        let confirmation = CountingConfirmation { answer: true, asked: Cell::new(0) };
        let response = records.clear_all(&confirmation).unwrap();

        assert!(response.cleared);
        assert_eq!(response.success_message.as_deref(), Some("All data cleared successfully!"));
        assert_eq!(confirmation.asked.get(), 1);
        assert!(!store.contains_key(PET_INFO_KEY));
        assert!(!store.contains_key(VISITS_KEY));
        assert_eq!(records.pet_profile(), &PetProfile::default());
        assert!(records.visits().is_empty());
        assert_eq!(records.visit_draft().reasons, "half typed");
    }

    /// Store whose removals fail for one key
    #[derive(Clone)]
    struct FailingRemoveStore {
        inner: MemoryStore,
        failing_key: &'static str,
    }

    impl KeyValueStore for FailingRemoveStore {
        fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
            self.inner.get_item(key)
        }

        fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
            self.inner.set_item(key, value)
        }

        fn remove_item(&self, key: &str) -> Result<(), StorageError> {
            if key == self.failing_key {
                return Err(StorageError::io(
                    key,
                    std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only"),
                ));
            }
            self.inner.remove_item(key)
        }
    }

    fn setup_failing_store(
        failing_key: &'static str,
    ) -> (MemoryStore, RecordStore<FailingRemoveStore>) {
        let inner = MemoryStore::new();
        let store = FailingRemoveStore {
            inner: inner.clone(),
            failing_key,
        };
        let mut records = RecordStore::new(store, Arc::new(FixedClock(today())));

        records.update_pet_field(PetField::Name, "Rex");
        records.save_pet_profile().unwrap();
        records.update_visit_field(VisitField::Symptoms, "cough").unwrap();
        records.save_visit().unwrap();
        (inner, records)
    }

    #[test]
    fn test_clear_all_pet_removal_failure_keeps_memory_in_step() {
        let (inner, mut records) = setup_failing_store(PET_INFO_KEY);

        let err = records.clear_all(&StaticConfirmation(true)).unwrap_err();

        assert!(matches!(err, StorageError::Io { .. }));
        // Visits were removed on disk and in memory
        assert!(!inner.contains_key(VISITS_KEY));
        assert!(records.visits().is_empty());
        // The profile is still stored, so memory keeps it too
        assert!(inner.contains_key(PET_INFO_KEY));
        assert_eq!(records.pet_profile().name, "Rex");
    }

    #[test]
    fn test_clear_all_visit_removal_failure_changes_nothing() {
        let (inner, mut records) = setup_failing_store(VISITS_KEY);

        assert!(records.clear_all(&StaticConfirmation(true)).is_err());

        assert!(inner.contains_key(VISITS_KEY));
        assert!(inner.contains_key(PET_INFO_KEY));
        assert_eq!(records.visits().len(), 1);
        assert_eq!(records.pet_profile().name, "Rex");
    }

    #[test]
    fn test_clear_all_declined() {
        let store = MemoryStore::new();
        let mut records = setup_store(store.clone());
        records.update_pet_field(PetField::Name, "Rex");
        records.save_pet_profile().unwrap();
        add_visit(&mut records, "2024-01-10", "cough");

        let response = records.clear_all(&StaticConfirmation(false)).unwrap();

        assert!(!response.cleared);
        assert!(response.success_message.is_none());
        assert!(store.contains_key(PET_INFO_KEY));
        assert!(store.contains_key(VISITS_KEY));
        assert_eq!(records.pet_profile().name, "Rex");
        assert_eq!(records.visits().len(), 1);
    }

    #[test]
    fn test_malformed_entries_fall_back_to_defaults() {
        let store = MemoryStore::new();
        store.set_item(PET_INFO_KEY, "{\"name\": ").unwrap();
        store.set_item(VISITS_KEY, "[{\"date\":\"not a date\"}]").unwrap();

        let mut records = setup_store(store);
        let report = records.load_on_startup();

        assert!(matches!(report.pet_profile, EntryLoadStatus::Malformed(_)));
        assert!(matches!(report.visits, EntryLoadStatus::Malformed(_)));
        assert_eq!(report.issues().len(), 2);
        assert!(!report.is_clean());
        assert_eq!(records.pet_profile(), &PetProfile::default());
        assert!(records.visits().is_empty());
    }

    #[test]
    fn test_one_malformed_entry_does_not_block_the_other() {
        let store = MemoryStore::new();
        store.set_item(PET_INFO_KEY, r#"{"name":"Rex"}"#).unwrap();
        store.set_item(VISITS_KEY, "garbage").unwrap();

        let mut records = setup_store(store);
        let report = records.load_on_startup();

        assert_eq!(report.pet_profile, EntryLoadStatus::Loaded);
        assert_eq!(records.pet_profile().name, "Rex");
        assert_eq!(report.issues().len(), 1);
        assert!(report.issues()[0].contains("visits"));
    }

    #[test]
    fn test_load_resorts_unsorted_history() {
        let store = MemoryStore::new();
        store
            .set_item(
                VISITS_KEY,
                r#"[{"date":"2023-01-01","reasons":"","symptoms":"a","behaviorChanges":""},
                    {"date":"2024-01-01","reasons":"","symptoms":"b","behaviorChanges":""}]"#,
            )
            .unwrap();

        let mut records = setup_store(store);
        let report = records.load_on_startup();

        assert!(report.is_clean());
        assert_eq!(records.visits()[0].symptoms, "b");
    }
}
