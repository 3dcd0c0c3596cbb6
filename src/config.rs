//! Database configuration types.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::{Error, Result};

/// Environment variable overriding the default database path.
pub const DB_PATH_ENV: &str = "IPCARRIER_DB";

/// Database file name used when no path is configured.
pub const DEFAULT_DB_FILE: &str = "zzipsdb.dat";

/// Default cache capacity (number of entries).
pub const DEFAULT_CACHE_CAPACITY: usize = 10_000;

/// How the database file is brought into memory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoadMode {
    /// Memory-map the file, falling back to a copy if mapping fails.
    #[default]
    Mmap,
    /// Read the whole file into an owned buffer.
    Memory,
}

/// Configuration for opening a carrier database.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// Path to the database file
    pub path: PathBuf,
    /// Load strategy
    pub load_mode: LoadMode,
    /// Lookup cache capacity for [`CachedCarrierDatabase`](crate::CachedCarrierDatabase);
    /// 0 disables caching
    pub cache_capacity: usize,
}

impl DatabaseConfig {
    /// Create a config for `path` with default settings.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            ..Self::default()
        }
    }

    /// Load a config from a JSON file. Missing fields take their defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let config: Self = serde_json::from_str(&content)?;
        if config.path.as_os_str().is_empty() {
            return Err(Error::Config("database path is empty".to_string()));
        }
        Ok(config)
    }

    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = path.into();
        self
    }

    pub fn with_load_mode(mut self, mode: LoadMode) -> Self {
        self.load_mode = mode;
        self
    }

    pub fn with_cache_capacity(mut self, capacity: usize) -> Self {
        self.cache_capacity = capacity;
        self
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
            load_mode: LoadMode::default(),
            cache_capacity: DEFAULT_CACHE_CAPACITY,
        }
    }
}

/// Default database location: `$IPCARRIER_DB`, else `zzipsdb.dat` in the
/// working directory.
pub fn default_db_path() -> PathBuf {
    match std::env::var_os(DB_PATH_ENV) {
        Some(path) if !path.is_empty() => PathBuf::from(path),
        _ => PathBuf::from(DEFAULT_DB_FILE),
    }
}
