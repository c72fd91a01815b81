//! # Pet Medical Record
//!
//! Keeps one pet profile and a log of medical visits in a local key-value
//! store, and exports both as a CSV file.
//!
//! ## Architecture
//!
//! ```text
//! CLI / interactive session (main.rs, io::interactive)
//!     ↓
//! IO layer (io::handlers: actions → notifications)
//!     ↓
//! Domain layer (domain::record_store, domain::export_service)
//!     ↓
//! Storage layer (storage: key-value store, typed repositories)
//! ```
//!
//! All state lives in an explicit [`AppState`] handed to the handlers; there
//! is no global state.

pub mod cli;
pub mod config;
pub mod domain;
pub mod io;
pub mod storage;

use std::sync::Arc;

use anyhow::{Context, Result};
use log::info;

use crate::config::AppConfig;
use crate::domain::{Clock, ExportService, RecordStore, StartupLoadReport, SystemClock};
use crate::storage::{JsonConnection, KeyValueStore};

/// Application state shared by every action handler
pub struct AppState<S: KeyValueStore = JsonConnection> {
    pub record_store: RecordStore<S>,
    pub export_service: ExportService,
    pub config: AppConfig,
}

impl<S: KeyValueStore> AppState<S> {
    /// Wire the services around an already opened store. Nothing is loaded yet.
    pub fn new(store: S, clock: Arc<dyn Clock>, config: AppConfig) -> Self {
        let record_store = RecordStore::new(store, clock.clone());
        let export_service = ExportService::new(clock, config.export_directory.clone());

        Self {
            record_store,
            export_service,
            config,
        }
    }
}

/// Open the data directory, wire the services and hydrate the record store
pub fn initialize_backend(config: AppConfig) -> Result<(AppState, StartupLoadReport)> {
    info!("Setting up storage in {}", config.data_directory.display());
    let connection = JsonConnection::new(&config.data_directory)
        .with_context(|| {
            format!(
                "Failed to open data directory {}",
                config.data_directory.display()
            )
        })?
        .with_quota(config.max_entry_bytes);

    info!("Setting up application state");
    let mut state = AppState::new(connection, Arc::new(SystemClock), config);
    let report = state.record_store.load_on_startup();

    Ok((state, report))
}
