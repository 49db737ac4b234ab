mod blob_store;
mod ledger_store;

pub use blob_store::{BlobReader, BlobStore, StorageError};
pub use ledger_store::{LedgerError, LedgerStore};

#[cfg(test)]
pub use blob_store::MockBlobStore;
#[cfg(test)]
pub use ledger_store::MockLedgerStore;
