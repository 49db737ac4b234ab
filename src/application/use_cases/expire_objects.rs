use chrono::{DateTime, Utc};
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

use crate::application::ledger::Ledger;
use crate::application::ports::{BlobStore, LedgerError, StorageError};
use crate::domain::entities::ObjectRecord;

#[derive(Debug, Error)]
pub enum SweepError {
    #[error("Ledger error: {0}")]
    Ledger(#[from] LedgerError),
}

/// Result of one expiration pass.
#[derive(Debug, Clone, Default)]
pub struct SweepOutcome {
    pub expired: usize,
    pub kept: usize,
    pub errors: Vec<String>,
}

impl SweepOutcome {
    pub fn is_success(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn has_deletions(&self) -> bool {
        self.expired > 0
    }
}

/// Use case: remove every object past its retention window.
///
/// The whole pass runs inside one ledger transaction, so an upload racing
/// the sweep is either fully before it (and gets swept or kept on its own
/// expiry) or fully after it (and survives untouched). Running the pass
/// twice with the same `now` is a no-op the second time.
pub struct ExpireObjectsUseCase {
    blob_store: Arc<dyn BlobStore>,
    ledger: Arc<Ledger>,
}

impl ExpireObjectsUseCase {
    pub fn new(blob_store: Arc<dyn BlobStore>, ledger: Arc<Ledger>) -> Self {
        Self { blob_store, ledger }
    }

    /// Execute one expiration pass at the given instant.
    ///
    /// Expired blobs are deleted before the ledger is rewritten: a crash
    /// mid-pass leaves dangling records that the next pass cleans up, never
    /// orphaned blobs that nothing references.
    pub async fn execute(&self, now: DateTime<Utc>) -> Result<SweepOutcome, SweepError> {
        let txn = self.ledger.begin().await?;

        let (expired, mut kept): (Vec<ObjectRecord>, Vec<ObjectRecord>) = txn
            .records()
            .iter()
            .cloned()
            .partition(|record| record.is_expired_at(now));

        let mut outcome = SweepOutcome::default();

        for record in expired {
            match self.blob_store.delete(&record.storage_key).await {
                Ok(()) => {
                    debug!("Deleted expired blob: {}", record.storage_key);
                    outcome.expired += 1;
                }
                Err(StorageError::NotFound(_)) => {
                    // Already gone, e.g. a prior pass crashed between the
                    // blob delete and the ledger rewrite
                    debug!("Expired blob already deleted: {}", record.storage_key);
                    outcome.expired += 1;
                }
                Err(e) => {
                    // Keep the record so a later pass can retry; dropping it
                    // now would orphan the blob permanently
                    outcome
                        .errors
                        .push(format!("failed to delete blob {}: {}", record.storage_key, e));
                    kept.push(record);
                }
            }
        }

        outcome.kept = kept.len();
        txn.commit(kept).await?;

        Ok(outcome)
    }
}
