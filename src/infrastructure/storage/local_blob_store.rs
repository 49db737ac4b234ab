use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs::{self, File};
use tokio::io::{AsyncReadExt, AsyncWriteExt, BufReader, BufWriter};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::application::ports::{BlobReader, BlobStore, StorageError};
use crate::domain::value_objects::StorageKey;

/// Buffer size for streaming I/O. 256KB balances throughput against memory
/// held per in-flight transfer.
const BUFFER_SIZE: usize = 256 * 1024;

/// Blob store backed by a local directory.
///
/// Layout under the root: `objects/` holds committed blobs named by their
/// storage key; `temp/` stages in-progress writes. A put streams into a temp
/// file and renames it into `objects/` once complete, so a partially written
/// blob is never visible under its key.
pub struct LocalBlobStore {
    root: PathBuf,
    max_blob_bytes: u64,
}

impl LocalBlobStore {
    pub fn new(root: PathBuf, max_blob_bytes: u64) -> Self {
        Self {
            root,
            max_blob_bytes,
        }
    }

    /// Initialize the storage directories.
    pub async fn init(&self) -> Result<(), StorageError> {
        fs::create_dir_all(self.root.join("objects")).await?;
        fs::create_dir_all(self.root.join("temp")).await?;
        Ok(())
    }

    fn blob_path(&self, key: &StorageKey) -> PathBuf {
        // StorageKey validation already excludes path separators and dot
        // segments; joining it cannot escape the root
        self.root.join("objects").join(key.as_str())
    }

    fn temp_path(&self) -> PathBuf {
        self.root.join("temp").join(Uuid::new_v4().to_string())
    }

    async fn write_stream(
        &self,
        dest_path: &Path,
        mut reader: BlobReader,
    ) -> Result<u64, StorageError> {
        let mut file =
            BufWriter::with_capacity(BUFFER_SIZE * 2, File::create(dest_path).await?);
        let mut total_bytes = 0u64;
        let mut buffer = vec![0u8; BUFFER_SIZE];

        loop {
            let n = reader.read(&mut buffer).await?;
            if n == 0 {
                break;
            }

            total_bytes += n as u64;
            // Reject during the write so an oversized stream never lands,
            // and never buffers, in full
            if total_bytes > self.max_blob_bytes {
                return Err(StorageError::TooLarge {
                    limit: self.max_blob_bytes,
                });
            }

            file.write_all(&buffer[..n]).await?;
        }

        file.flush().await?;
        file.get_mut().sync_all().await?;

        Ok(total_bytes)
    }
}

#[async_trait]
impl BlobStore for LocalBlobStore {
    async fn put(&self, key: &StorageKey, reader: BlobReader) -> Result<u64, StorageError> {
        let temp_path = self.temp_path();
        debug!("Writing blob to temp file: {:?}", temp_path);

        let size_bytes = match self.write_stream(&temp_path, reader).await {
            Ok(size) => size,
            Err(e) => {
                // Clean up the partial temp file on any write failure
                warn!("Failed to write blob to temp file {:?}: {}", temp_path, e);
                let _ = fs::remove_file(&temp_path).await;
                return Err(e);
            }
        };

        let final_path = self.blob_path(key);
        debug!("Moving blob to final location: {:?}", final_path);
        if let Err(e) = fs::rename(&temp_path, &final_path).await {
            let _ = fs::remove_file(&temp_path).await;
            return Err(StorageError::Io(e));
        }

        Ok(size_bytes)
    }

    async fn get(&self, key: &StorageKey) -> Result<BlobReader, StorageError> {
        let path = self.blob_path(key);

        let file = File::open(&path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                StorageError::NotFound(key.to_string())
            } else {
                StorageError::Io(e)
            }
        })?;

        Ok(Box::pin(BufReader::with_capacity(BUFFER_SIZE, file)))
    }

    async fn delete(&self, key: &StorageKey) -> Result<(), StorageError> {
        let path = self.blob_path(key);

        fs::remove_file(&path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                StorageError::NotFound(key.to_string())
            } else {
                StorageError::Io(e)
            }
        })?;

        Ok(())
    }

    async fn exists(&self, key: &StorageKey) -> Result<bool, StorageError> {
        Ok(fs::metadata(self.blob_path(key)).await.is_ok())
    }
}
