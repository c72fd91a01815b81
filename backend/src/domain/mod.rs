//! # Domain Module
//!
//! Business logic for the pet medical record: the record store that owns the
//! pet profile and visit history, and the CSV export.
//!
//! ## Module Organization
//!
//! - **record_store**: in-memory state, startup hydration, explicit saves, clear
//! - **export_service**: CSV rendering and writing export files
//! - **picture**: image bytes to `data:` URL
//! - **clock**: injectable source of today's date
//! - **collaborators**: confirmation and notification seams
//!
//! ## Business Rules
//!
//! - The visit history is kept newest first; visits on the same day keep
//!   the order they were saved in
//! - Visits are append-only; the history is only removed as a whole by clear
//! - Pet fields are free text; age is not validated
//! - Clearing requires explicit confirmation

pub mod clock;
pub mod collaborators;
pub mod export_service;
pub mod picture;
pub mod record_store;

pub use clock::{Clock, FixedClock, SystemClock};
pub use collaborators::{Confirmation, Notifier, StaticConfirmation};
pub use export_service::ExportService;
pub use record_store::{EntryLoadStatus, RecordStore, StartupLoadReport};
