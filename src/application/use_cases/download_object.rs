use std::sync::Arc;
use thiserror::Error;

use crate::application::ports::{BlobReader, BlobStore, StorageError};
use crate::domain::value_objects::StorageKey;

#[derive(Debug, Error)]
pub enum DownloadError {
    #[error("Object not found: {0}")]
    NotFound(String),

    #[error("Storage error: {0}")]
    Storage(StorageError),
}

/// Use case: stream a stored object back by key.
pub struct DownloadObjectUseCase {
    blob_store: Arc<dyn BlobStore>,
}

impl DownloadObjectUseCase {
    pub fn new(blob_store: Arc<dyn BlobStore>) -> Self {
        Self { blob_store }
    }

    /// Execute a download by storage key.
    ///
    /// The ledger is not consulted on this path, and expiry is deliberately
    /// not checked: an expired object the sweeper has not yet removed is
    /// still served until the next pass.
    pub async fn execute(&self, key: &StorageKey) -> Result<BlobReader, DownloadError> {
        match self.blob_store.get(key).await {
            Ok(reader) => Ok(reader),
            Err(StorageError::NotFound(key)) => Err(DownloadError::NotFound(key)),
            Err(e) => Err(DownloadError::Storage(e)),
        }
    }
}
