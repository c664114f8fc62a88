use std::path::PathBuf;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Where the session token is persisted between runs.
/// We differentiate the backends via a "type" tag in the YAML.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, JsonSchema)]
#[serde(tag = "type")]
pub enum StorageConfig {
    /// A small JSON key/value file on disk.
    #[serde(rename = "file")]
    File(FileStorageConfig),
    /// Process-local storage, gone when the process exits.
    #[serde(rename = "memory")]
    Memory,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, JsonSchema)]
pub struct FileStorageConfig {
    #[serde(default = "default_storage_path")]
    pub path: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        StorageConfig::File(FileStorageConfig {
            path: default_storage_path(),
        })
    }
}

fn default_storage_path() -> PathBuf {
    PathBuf::from(".authflow/storage.json")
}
