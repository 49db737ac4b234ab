use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::value_objects::StorageKey;

/// One ledger entry per stored file.
///
/// Timestamps persist as milliseconds since epoch. `expires_at` is the sole
/// authority for eviction eligibility; `display_name` is informational only
/// and never used to address the blob.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectRecord {
    pub storage_key: StorageKey,
    pub display_name: String,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub expires_at: DateTime<Utc>,
}

impl ObjectRecord {
    pub fn new(
        storage_key: StorageKey,
        display_name: String,
        created_at: DateTime<Utc>,
        retention_window: Duration,
    ) -> Self {
        Self {
            storage_key,
            display_name,
            created_at,
            expires_at: created_at + retention_window,
        }
    }

    /// Inclusive boundary: an object whose expiry equals `now` is expired.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }
}
