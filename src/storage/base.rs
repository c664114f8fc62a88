use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info};

use super::{file_storage::FileStorage, memory_storage::MemoryStorage};
use crate::config::StorageConfig;
use crate::error::StorageError;
use crate::models::token::{SessionToken, TOKEN_KEY};

/// The ClientStorage trait abstracts durable client-side key/value storage.
/// The flows only ever touch the `"token"` key.
#[async_trait]
pub trait ClientStorage: Send + Sync {
    async fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;
    async fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;
    async fn remove_item(&self, key: &str) -> Result<(), StorageError>;
    fn get_name(&self) -> &str;

    async fn save_token(&self, token: &SessionToken) -> Result<(), StorageError> {
        debug!("Persisting session token in {} storage", self.get_name());
        self.set_item(TOKEN_KEY, token.as_str()).await
    }

    async fn load_token(&self) -> Result<Option<SessionToken>, StorageError> {
        Ok(self.get_item(TOKEN_KEY).await?.map(SessionToken::new))
    }

    async fn clear_token(&self) -> Result<(), StorageError> {
        debug!("Removing session token from {} storage", self.get_name());
        self.remove_item(TOKEN_KEY).await
    }
}

/// Creates a concrete storage implementation based on the StorageConfig.
pub fn create_storage(config: &StorageConfig) -> Arc<dyn ClientStorage> {
    match config {
        StorageConfig::File(file_config) => {
            info!("Using file token storage at {}", file_config.path.display());
            Arc::new(FileStorage::new(&file_config.path))
        }
        StorageConfig::Memory => {
            info!("Using in-memory token storage. Tokens will not survive a restart.");
            Arc::new(MemoryStorage::new())
        }
    }
}
