//! # JSON File Storage
//!
//! File-backed key-value store. Each key is one JSON document on disk:
//!
//! ```text
//! data/
//! ├── config.yaml     (optional, see `config`)
//! ├── petInfo.json
//! └── visits.json
//! ```
//!
//! Writes go through a temp file and an atomic rename.

pub mod connection;

#[cfg(test)]
pub mod test_utils;

pub use connection::JsonConnection;
