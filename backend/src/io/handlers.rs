//! # Action Handlers
//!
//! One handler per user action. Each runs the domain operation, logs the
//! outcome, and tells the user through the [`Notifier`]. Handlers never
//! propagate errors: a failed action leaves the session usable and the
//! return value only says whether it succeeded.

use std::fs;
use std::path::Path;

use log::{error, info};
use shared::{ExportToPathRequest, ExportToPathResponse, VisitField, VisitHistoryEntry};

use crate::domain::{Confirmation, Notifier, StartupLoadReport};
use crate::storage::KeyValueStore;
use crate::AppState;

/// Surface entries that could not be restored at startup
pub fn report_startup(report: &StartupLoadReport, notifier: &dyn Notifier) {
    for issue in report.issues() {
        notifier.error(&issue);
    }
}

pub fn save_pet_profile<S: KeyValueStore>(state: &AppState<S>, notifier: &dyn Notifier) -> bool {
    match state.record_store.save_pet_profile() {
        Ok(response) => {
            notifier.success(&response.success_message);
            true
        }
        Err(e) => {
            error!("❌ Error saving pet info: {}", e);
            notifier.error("Error saving pet information. Please try again.");
            false
        }
    }
}

/// Apply field values to the visit draft; stops at the first rejected value
pub fn fill_visit_draft<S: KeyValueStore>(
    state: &mut AppState<S>,
    updates: Vec<(VisitField, String)>,
    notifier: &dyn Notifier,
) -> bool {
    for (field, value) in updates {
        if let Err(e) = state.record_store.update_visit_field(field, value) {
            error!("❌ Rejected visit field '{}': {}", field, e);
            notifier.error(&e.to_string());
            return false;
        }
    }
    true
}

pub fn save_visit<S: KeyValueStore>(state: &mut AppState<S>, notifier: &dyn Notifier) -> bool {
    match state.record_store.save_visit() {
        Ok(response) => {
            info!("✅ Visit history now has {} entries", response.visit_count);
            notifier.success(&response.success_message);
            true
        }
        Err(e) => {
            error!("❌ Error saving visit: {}", e);
            notifier.error("Error saving visit information. Please try again.");
            false
        }
    }
}

/// Read an image file and attach it to the in-memory profile
pub fn set_pet_picture_from_file<S: KeyValueStore>(
    state: &mut AppState<S>,
    path: &Path,
    notifier: &dyn Notifier,
) -> bool {
    match fs::read(path) {
        Ok(bytes) => {
            state.record_store.set_pet_picture(&bytes);
            true
        }
        Err(e) => {
            error!("❌ Error reading picture {:?}: {}", path, e);
            notifier.error("Error reading picture file. Please try again.");
            false
        }
    }
}

pub fn export_to_path<S: KeyValueStore>(
    state: &AppState<S>,
    request: ExportToPathRequest,
    notifier: &dyn Notifier,
) -> ExportToPathResponse {
    let response = state.export_service.export_to_path(
        state.record_store.pet_profile(),
        state.record_store.visits(),
        request,
    );

    if response.success {
        info!("✅ {}", response.message);
        notifier.success("File exported successfully!");
    } else {
        error!("❌ Error exporting: {}", response.message);
        notifier.error("Error exporting data. Please try again.");
    }
    response
}

pub fn clear_all_data<S: KeyValueStore>(
    state: &mut AppState<S>,
    confirmation: &dyn Confirmation,
    notifier: &dyn Notifier,
) -> bool {
    match state.record_store.clear_all(confirmation) {
        Ok(response) => {
            if let Some(message) = response.success_message {
                notifier.success(&message);
            }
            response.cleared
        }
        Err(e) => {
            error!("❌ Error clearing data: {}", e);
            notifier.error("Error clearing data. Please try again.");
            false
        }
    }
}

/// Date and symptoms of every visit, newest first
pub fn visit_history<S: KeyValueStore>(state: &AppState<S>) -> Vec<VisitHistoryEntry> {
    state
        .record_store
        .visits()
        .iter()
        .map(|visit| VisitHistoryEntry {
            formatted_date: visit.date.format("%B %-d, %Y").to_string(),
            symptoms: visit.symptoms.clone(),
        })
        .collect()
}
