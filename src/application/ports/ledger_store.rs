use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use thiserror::Error;

use crate::domain::entities::ObjectRecord;

#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Corrupt ledger at {path}: {reason}")]
    Corrupt { path: String, reason: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Port for durable ledger persistence.
///
/// The persisted state is always replaced wholesale; callers serialize their
/// load-mutate-save cycles through [`crate::application::ledger::Ledger`].
#[cfg_attr(test, automock)]
#[async_trait]
pub trait LedgerStore: Send + Sync {
    /// Read the persisted record sequence. Empty on first run; unparsable
    /// state is an error, never silently treated as empty.
    async fn load(&self) -> Result<Vec<ObjectRecord>, LedgerError>;

    /// Atomically replace the persisted sequence. A reader must never
    /// observe a partially written ledger.
    async fn save(&self, records: &[ObjectRecord]) -> Result<(), LedgerError>;
}
