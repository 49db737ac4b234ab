use async_trait::async_trait;
use std::path::PathBuf;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::debug;

use crate::application::ports::{LedgerError, LedgerStore};
use crate::domain::entities::ObjectRecord;

/// Ledger persistence as a single JSON array file.
///
/// Every save rewrites the whole file: the records are serialized into a
/// sibling staging file which is then renamed over the real path, so a
/// reader never observes a partially written ledger. A missing file is the
/// first-run case; an unparsable file is surfaced as corruption, never
/// masked as empty.
pub struct JsonFileLedger {
    path: PathBuf,
}

impl JsonFileLedger {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    fn staging_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "ledger".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

#[async_trait]
impl LedgerStore for JsonFileLedger {
    async fn load(&self) -> Result<Vec<ObjectRecord>, LedgerError> {
        let bytes = match fs::read(&self.path).await {
            Ok(bytes) => bytes,
            // First run: no ledger has been written yet
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(LedgerError::Io(e)),
        };

        serde_json::from_slice(&bytes).map_err(|e| LedgerError::Corrupt {
            path: self.path.display().to_string(),
            reason: e.to_string(),
        })
    }

    async fn save(&self, records: &[ObjectRecord]) -> Result<(), LedgerError> {
        let json = serde_json::to_vec_pretty(records)?;

        let staging = self.staging_path();
        debug!("Writing ledger staging file: {:?}", staging);

        let mut file = fs::File::create(&staging).await?;
        file.write_all(&json).await?;
        file.sync_all().await?;
        drop(file);

        fs::rename(&staging, &self.path).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};
    use tempfile::TempDir;

    use crate::domain::value_objects::StorageKey;

    fn ledger_in(dir: &TempDir) -> JsonFileLedger {
        JsonFileLedger::new(dir.path().join("metadata.json"))
    }

    fn test_record(name: &str, created_ms: i64) -> ObjectRecord {
        ObjectRecord::new(
            StorageKey::generate(name),
            name.to_string(),
            Utc.timestamp_millis_opt(created_ms).unwrap(),
            Duration::hours(2),
        )
    }

    #[tokio::test]
    async fn test_load_missing_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let ledger = ledger_in(&dir);

        assert!(ledger.load().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_save_load_round_trip_preserves_order() {
        let dir = TempDir::new().unwrap();
        let ledger = ledger_in(&dir);

        let records = vec![
            test_record("b.txt", 2_000),
            test_record("a.txt", 1_000),
            test_record("c.txt", 3_000),
        ];
        ledger.save(&records).await.unwrap();

        assert_eq!(ledger.load().await.unwrap(), records);
    }

    #[tokio::test]
    async fn test_save_leaves_no_staging_file() {
        let dir = TempDir::new().unwrap();
        let ledger = ledger_in(&dir);

        ledger.save(&[test_record("a.txt", 0)]).await.unwrap();

        assert!(dir.path().join("metadata.json").exists());
        assert!(!dir.path().join("metadata.json.tmp").exists());
    }

    #[tokio::test]
    async fn test_persisted_format_is_json_array_with_epoch_millis() {
        let dir = TempDir::new().unwrap();
        let ledger = ledger_in(&dir);

        ledger.save(&[test_record("a.txt", 1_500)]).await.unwrap();

        let raw = std::fs::read_to_string(dir.path().join("metadata.json")).unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();

        let entries = value.as_array().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0]["created_at"], serde_json::json!(1_500));
        assert_eq!(entries[0]["display_name"], serde_json::json!("a.txt"));
    }

    #[tokio::test]
    async fn test_corrupt_file_is_an_error_not_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("metadata.json");
        std::fs::write(&path, b"{not valid json").unwrap();

        let ledger = JsonFileLedger::new(path);
        let result = ledger.load().await;

        assert!(matches!(result, Err(LedgerError::Corrupt { .. })));
    }

    #[tokio::test]
    async fn test_hostile_key_in_ledger_is_corruption() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("metadata.json");
        std::fs::write(
            &path,
            br#"[{"storage_key":"../../etc/passwd","display_name":"x","created_at":0,"expires_at":1}]"#,
        )
        .unwrap();

        let ledger = JsonFileLedger::new(path);
        assert!(matches!(
            ledger.load().await,
            Err(LedgerError::Corrupt { .. })
        ));
    }

    #[tokio::test]
    async fn test_save_replaces_previous_state_wholesale() {
        let dir = TempDir::new().unwrap();
        let ledger = ledger_in(&dir);

        ledger
            .save(&[test_record("a.txt", 0), test_record("b.txt", 1)])
            .await
            .unwrap();
        ledger.save(&[test_record("c.txt", 2)]).await.unwrap();

        let records = ledger.load().await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].display_name, "c.txt");
    }
}
