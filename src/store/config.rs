//! Storage backend selection

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Which store backs the service
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "backend", rename_all = "snake_case")]
pub enum StorageConfig {
    /// Process-local, lost on exit
    #[default]
    Memory,

    /// JSON snapshot file, rewritten on every change
    File { path: PathBuf },
}

impl StorageConfig {
    pub fn describe(&self) -> String {
        match self {
            StorageConfig::Memory => "memory".to_string(),
            StorageConfig::File { path } => format!("file:{}", path.display()),
        }
    }
}
