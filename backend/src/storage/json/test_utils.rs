/// Test utilities for the JSON file store
///
/// Provides an RAII environment whose temporary directory is removed when the
/// environment goes out of scope, even if the test panics.

use std::path::{Path, PathBuf};
use tempfile::TempDir;

use super::connection::JsonConnection;

pub struct TestEnvironment {
    /// The temporary directory - kept alive until drop
    _temp_dir: TempDir,
    pub connection: JsonConnection,
    pub base_path: PathBuf,
}

impl TestEnvironment {
    pub fn new() -> std::io::Result<Self> {
        let temp_dir = TempDir::new()?;
        let base_path = temp_dir.path().to_path_buf();
        let connection = JsonConnection::new(&base_path)?;

        Ok(TestEnvironment {
            _temp_dir: temp_dir,
            connection,
            base_path,
        })
    }

    pub fn base_directory(&self) -> &Path {
        &self.base_path
    }

    /// Write raw text straight into an entry file, bypassing the store
    pub fn write_raw_entry(&self, key: &str, content: &str) {
        std::fs::write(self.connection.entry_path(key), content)
            .expect("Failed to write raw entry");
    }
}

impl Drop for TestEnvironment {
    fn drop(&mut self) {
        if std::env::var("PET_RECORDS_DEBUG_TESTS").is_ok() {
            println!("🧹 Cleaning up test environment: {:?}", self.base_path);
        }
    }
}
