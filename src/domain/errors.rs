use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Invalid storage key: {0}")]
    InvalidStorageKey(String),
}
