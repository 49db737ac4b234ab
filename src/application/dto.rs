use serde::{Deserialize, Serialize};

use crate::domain::entities::ObjectRecord;

/// DTO for an upload request.
#[derive(Debug, Clone)]
pub struct UploadRequest {
    /// Client-supplied filename, not yet sanitized.
    pub original_name: String,
    /// Externally visible base address, e.g. "http://host:3000", reflected
    /// from the request the upload arrived on.
    pub base_url: String,
}

/// DTO for a committed upload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadedObjectDto {
    pub storage_key: String,
    pub display_name: String,
    pub size_bytes: u64,
    pub url: String,
    pub created_at: String,
    pub expires_at: String,
}

impl UploadedObjectDto {
    pub fn from_record(record: &ObjectRecord, size_bytes: u64, url: String) -> Self {
        Self {
            storage_key: record.storage_key.to_string(),
            display_name: record.display_name.clone(),
            size_bytes,
            url,
            created_at: record.created_at.to_rfc3339(),
            expires_at: record.expires_at.to_rfc3339(),
        }
    }
}
