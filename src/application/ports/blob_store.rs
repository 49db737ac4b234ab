use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use std::pin::Pin;
use thiserror::Error;
use tokio::io::AsyncRead;

use crate::domain::value_objects::StorageKey;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Blob not found: {0}")]
    NotFound(String),

    #[error("Blob exceeds size limit of {limit} bytes")]
    TooLarge { limit: u64 },
}

/// Type alias for async reader
pub type BlobReader = Pin<Box<dyn AsyncRead + Send>>;

/// Port for physical blob storage operations.
///
/// Blobs are independent of each other; concurrent `put`s to distinct keys
/// and a `get` concurrent with an unrelated `delete` need no coordination.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Stream the blob to durable storage under `key`, returning the byte
    /// count. Streams over the configured size limit are rejected during the
    /// write, never after full buffering.
    async fn put(&self, key: &StorageKey, reader: BlobReader) -> Result<u64, StorageError>;

    /// Open the blob for sequential read.
    async fn get(&self, key: &StorageKey) -> Result<BlobReader, StorageError>;

    /// Remove the physical blob.
    async fn delete(&self, key: &StorageKey) -> Result<(), StorageError>;

    /// Check if the blob exists.
    async fn exists(&self, key: &StorageKey) -> Result<bool, StorageError>;
}
