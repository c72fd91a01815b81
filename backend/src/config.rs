//! # Configuration
//!
//! Settings are resolved once at startup, highest precedence first:
//!
//! 1. command-line flags (`--data-dir`)
//! 2. environment (`PET_RECORDS_DATA_DIR`)
//! 3. `config.yaml` inside the data directory
//! 4. built-in defaults
//!
//! ## YAML Format
//!
//! ```yaml
//! export_directory: "/home/me/Desktop"
//! max_entry_bytes: 5242880
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::{debug, info};
use serde::{Deserialize, Serialize};

pub const DATA_DIR_ENV: &str = "PET_RECORDS_DATA_DIR";
pub const CONFIG_FILE_NAME: &str = "config.yaml";
const DEFAULT_DIRECTORY_NAME: &str = "Pet Medical Records";

/// Per-entry storage quota, the common browser local storage budget
pub const DEFAULT_MAX_ENTRY_BYTES: usize = 5 * 1024 * 1024;

/// Optional settings read from `config.yaml`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigFile {
    pub export_directory: Option<PathBuf>,
    pub max_entry_bytes: Option<usize>,
}

/// Resolved application configuration
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Where `petInfo.json` and `visits.json` live
    pub data_directory: PathBuf,
    /// Default target for exports; Documents/home when unset
    pub export_directory: Option<PathBuf>,
    pub max_entry_bytes: Option<usize>,
}

impl AppConfig {
    /// Resolve the configuration from flags, environment and config file
    pub fn load(data_dir_override: Option<PathBuf>) -> Result<Self> {
        let env_dir = std::env::var_os(DATA_DIR_ENV).map(PathBuf::from);
        let data_directory = resolve_data_directory(data_dir_override, env_dir)
            .context("Could not determine a data directory; pass --data-dir")?;

        let file = ConfigFile::load_from(&data_directory)?;
        let config = Self::from_parts(data_directory, file);

        info!("Using data directory: {}", config.data_directory.display());
        Ok(config)
    }

    /// Combine a data directory with the optional file settings
    pub fn from_parts(data_directory: PathBuf, file: ConfigFile) -> Self {
        Self {
            data_directory,
            export_directory: file.export_directory,
            max_entry_bytes: Some(file.max_entry_bytes.unwrap_or(DEFAULT_MAX_ENTRY_BYTES)),
        }
    }

    /// Defaults rooted at a given data directory, ignoring any config file
    pub fn with_data_directory<P: AsRef<Path>>(data_directory: P) -> Self {
        Self::from_parts(data_directory.as_ref().to_path_buf(), ConfigFile::default())
    }
}

impl ConfigFile {
    /// Read `config.yaml` from the data directory; a missing file means defaults
    pub fn load_from(data_directory: &Path) -> Result<Self> {
        let path = data_directory.join(CONFIG_FILE_NAME);

        if !path.exists() {
            debug!("No config file at {:?}, using defaults", path);
            return Ok(Self::default());
        }

        let yaml_content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let file: ConfigFile = serde_yaml::from_str(&yaml_content)
            .with_context(|| format!("Invalid config file {}", path.display()))?;

        debug!("Loaded config file from {:?}", path);
        Ok(file)
    }
}

/// Flag, then environment, then `<Documents>/Pet Medical Records`, then home
pub fn resolve_data_directory(
    flag: Option<PathBuf>,
    env: Option<PathBuf>,
) -> Option<PathBuf> {
    flag.or(env)
        .filter(|path| !path.as_os_str().is_empty())
        .or_else(|| {
            dirs::document_dir()
                .or_else(dirs::home_dir)
                .map(|base| base.join(DEFAULT_DIRECTORY_NAME))
        })
}
