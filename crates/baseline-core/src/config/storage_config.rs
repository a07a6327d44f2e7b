//! Storage section of the baseline configuration.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Settings-store configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct StorageConfig {
    /// Database file path, resolved against the project root unless
    /// absolute.
    pub db_path: Option<PathBuf>,
    /// Number of pooled read connections.
    pub read_pool_size: Option<usize>,
}

impl StorageConfig {
    /// The database path resolved against the project root.
    pub fn resolved_db_path(&self, root: &Path) -> PathBuf {
        match &self.db_path {
            Some(path) if path.is_absolute() => path.clone(),
            Some(path) => root.join(path),
            None => root.join(".baseline").join("baseline.db"),
        }
    }
}
