use chrono::{Duration, Utc};
use std::sync::Arc;
use thiserror::Error;
use tracing::warn;

use crate::application::dto::{UploadRequest, UploadedObjectDto};
use crate::application::ledger::Ledger;
use crate::application::ports::{BlobReader, BlobStore, LedgerError, StorageError};
use crate::domain::entities::ObjectRecord;
use crate::domain::value_objects::{sanitize_file_name, StorageKey};

#[derive(Debug, Error)]
pub enum UploadError {
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Ledger error: {0}")]
    Ledger(#[from] LedgerError),
}

/// Use case: accept an uploaded byte stream and commit it to the store and
/// the ledger.
///
/// The blob write is ordered before the ledger append, so no ledger entry
/// ever references bytes that were not durably written.
pub struct UploadObjectUseCase {
    blob_store: Arc<dyn BlobStore>,
    ledger: Arc<Ledger>,
    retention_window: Duration,
}

impl UploadObjectUseCase {
    pub fn new(
        blob_store: Arc<dyn BlobStore>,
        ledger: Arc<Ledger>,
        retention_window: Duration,
    ) -> Self {
        Self {
            blob_store,
            ledger,
            retention_window,
        }
    }

    /// Execute the upload workflow.
    pub async fn execute(
        &self,
        request: UploadRequest,
        reader: BlobReader,
    ) -> Result<UploadedObjectDto, UploadError> {
        // 1. Derive a unique, filesystem-safe key from the client name
        let display_name = sanitize_file_name(&request.original_name);
        let key = StorageKey::generate(&request.original_name);

        // 2. Stream bytes to the store; nothing is visible in the ledger yet
        let size_bytes = self.blob_store.put(&key, reader).await?;

        // 3. Commit the record; the object is now in the Stored state
        let now = Utc::now();
        let record = ObjectRecord::new(key.clone(), display_name, now, self.retention_window);

        if let Err(e) = self.ledger.append(record.clone()).await {
            // Remove the blob so a failed append leaves no orphan behind
            if let Err(del_err) = self.blob_store.delete(&key).await {
                warn!(
                    "Failed to roll back blob {} after ledger error: {}",
                    key, del_err
                );
            }
            return Err(UploadError::Ledger(e));
        }

        let url = format!("{}/{}", request.base_url.trim_end_matches('/'), key);
        Ok(UploadedObjectDto::from_record(&record, size_bytes, url))
    }
}
