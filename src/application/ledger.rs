use std::sync::Arc;
use tokio::sync::{Mutex, MutexGuard};

use crate::application::ports::{LedgerError, LedgerStore};
use crate::domain::entities::ObjectRecord;

/// Serialized access to the persisted object ledger.
///
/// The ledger is the only shared mutable state in the service. Every
/// load-mutate-save cycle runs under the same mutex, so two concurrent
/// appends, or an append racing an expiration pass, cannot lose an update or
/// tear a write.
pub struct Ledger {
    store: Arc<dyn LedgerStore>,
    lock: Mutex<()>,
}

impl Ledger {
    pub fn new(store: Arc<dyn LedgerStore>) -> Self {
        Self {
            store,
            lock: Mutex::new(()),
        }
    }

    /// Append one record to the ledger.
    pub async fn append(&self, record: ObjectRecord) -> Result<(), LedgerError> {
        let _guard = self.lock.lock().await;
        let mut records = self.store.load().await?;
        records.push(record);
        self.store.save(&records).await
    }

    /// Read a consistent snapshot of the ledger.
    pub async fn snapshot(&self) -> Result<Vec<ObjectRecord>, LedgerError> {
        let _guard = self.lock.lock().await;
        self.store.load().await
    }

    /// Open a read-modify-write transaction. The ledger stays locked until
    /// the returned transaction is committed or dropped, so work done between
    /// `begin` and `commit` (such as deleting expired blobs) cannot interleave
    /// with an append.
    pub async fn begin(&self) -> Result<LedgerTransaction<'_>, LedgerError> {
        let guard = self.lock.lock().await;
        let records = self.store.load().await?;
        Ok(LedgerTransaction {
            _guard: guard,
            records,
            store: self.store.as_ref(),
        })
    }
}

/// A ledger read-modify-write cycle holding the ledger lock.
///
/// Dropping the transaction without committing leaves the persisted state
/// untouched.
pub struct LedgerTransaction<'a> {
    _guard: MutexGuard<'a, ()>,
    records: Vec<ObjectRecord>,
    store: &'a dyn LedgerStore,
}

impl LedgerTransaction<'_> {
    pub fn records(&self) -> &[ObjectRecord] {
        &self.records
    }

    /// Persist `records` as the new ledger state and release the lock.
    pub async fn commit(self, records: Vec<ObjectRecord>) -> Result<(), LedgerError> {
        self.store.save(&records).await
    }
}
