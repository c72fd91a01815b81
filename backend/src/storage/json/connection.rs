use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::{debug, info};

use crate::storage::traits::{check_quota, validate_key, KeyValueStore, StorageError};

/// JsonConnection stores every key as `{base_directory}/{key}.json`
#[derive(Debug, Clone)]
pub struct JsonConnection {
    base_directory: PathBuf,
    max_entry_bytes: Option<usize>,
}

impl JsonConnection {
    /// Create a new connection rooted at `base_directory`, creating it if needed
    pub fn new<P: AsRef<Path>>(base_directory: P) -> io::Result<Self> {
        let base_path = base_directory.as_ref().to_path_buf();

        if !base_path.exists() {
            fs::create_dir_all(&base_path)?;
            info!("Created data directory: {}", base_path.display());
        }

        Ok(Self {
            base_directory: base_path,
            max_entry_bytes: None,
        })
    }

    /// Limit the size of a single entry, mirroring a browser storage quota
    pub fn with_quota(mut self, max_entry_bytes: Option<usize>) -> Self {
        self.max_entry_bytes = max_entry_bytes;
        self
    }

    pub fn base_directory(&self) -> &Path {
        &self.base_directory
    }

    /// Get the file path backing a key
    pub fn entry_path(&self, key: &str) -> PathBuf {
        self.base_directory.join(format!("{}.json", key))
    }
}

impl KeyValueStore for JsonConnection {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        validate_key(key)?;
        let path = self.entry_path(key);

        match fs::read_to_string(&path) {
            Ok(content) => {
                debug!("Read {} bytes for '{}' from {:?}", content.len(), key, path);
                Ok(Some(content))
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!("No entry for '{}' at {:?}", key, path);
                Ok(None)
            }
            Err(e) => Err(StorageError::io(key, e)),
        }
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        validate_key(key)?;
        check_quota(key, value, self.max_entry_bytes)?;

        if !self.base_directory.exists() {
            fs::create_dir_all(&self.base_directory).map_err(|e| StorageError::io(key, e))?;
        }

        // Write to a temp file then rename so readers never see a partial entry
        let path = self.entry_path(key);
        let temp_path = path.with_extension("tmp");
        fs::write(&temp_path, value).map_err(|e| StorageError::io(key, e))?;
        if let Err(e) = fs::rename(&temp_path, &path) {
            let _ = fs::remove_file(&temp_path);
            return Err(StorageError::io(key, e));
        }

        debug!("Saved {} bytes for '{}' to {:?}", value.len(), key, path);
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        validate_key(key)?;
        let path = self.entry_path(key);

        match fs::remove_file(&path) {
            Ok(()) => {
                info!("Removed entry '{}' at {:?}", key, path);
                Ok(())
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StorageError::io(key, e)),
        }
    }
}
