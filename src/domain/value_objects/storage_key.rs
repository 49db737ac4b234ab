use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::errors::DomainError;
use crate::domain::value_objects::sanitize_file_name;

/// Unique name a blob is stored under, doubling as the public URL path
/// segment. Generated once at upload time as `{uuid}-{sanitized_name}` and
/// never reused.
///
/// Parsing validates the key against the sanitizer alphabet, so a key that
/// arrives from a request path or from the persisted ledger can never name a
/// location outside the storage root.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct StorageKey(String);

impl StorageKey {
    /// Generate a fresh key for an uploaded file: a random identity joined
    /// with the sanitized original name.
    pub fn generate(original_name: &str) -> Self {
        Self(format!(
            "{}-{}",
            Uuid::new_v4(),
            sanitize_file_name(original_name)
        ))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn validate(value: &str) -> Result<(), DomainError> {
        if value.is_empty() {
            return Err(DomainError::InvalidStorageKey(
                "key cannot be empty".to_string(),
            ));
        }

        // "." and ".." are made of allowed characters but name directories
        if value == "." || value == ".." {
            return Err(DomainError::InvalidStorageKey(
                "key cannot be a path segment".to_string(),
            ));
        }

        if !value
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_'))
        {
            return Err(DomainError::InvalidStorageKey(
                "key contains characters outside the storage alphabet".to_string(),
            ));
        }

        Ok(())
    }
}

impl std::fmt::Display for StorageKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for StorageKey {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::validate(s)?;
        Ok(Self(s.to_string()))
    }
}

impl TryFrom<String> for StorageKey {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::validate(&value)?;
        Ok(Self(value))
    }
}

impl From<StorageKey> for String {
    fn from(key: StorageKey) -> Self {
        key.0
    }
}
