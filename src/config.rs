use std::path::PathBuf;

/// Default lifetime of a stored object: two hours.
const DEFAULT_RETENTION_SECS: u64 = 2 * 60 * 60;

/// Default pause between retention sweeps: thirty minutes.
const DEFAULT_SWEEP_INTERVAL_SECS: u64 = 30 * 60;

/// Default per-file size cap: 5 GiB.
const DEFAULT_MAX_BLOB_BYTES: u64 = 5 * 1024 * 1024 * 1024;

#[derive(Debug, Clone)]
pub struct Config {
    pub listen_addr: String,
    pub storage_root: PathBuf,
    pub ledger_path: PathBuf,
    pub retention_secs: u64,
    pub sweep_interval_secs: u64,
    pub max_blob_bytes: u64,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            listen_addr: std::env::var("LISTEN_ADDR")
                .unwrap_or_else(|_| "0.0.0.0:3000".to_string()),
            storage_root: std::env::var("STORAGE_ROOT")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("./temp")),
            ledger_path: std::env::var("LEDGER_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("./metadata.json")),
            retention_secs: std::env::var("RETENTION_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(DEFAULT_RETENTION_SECS),
            sweep_interval_secs: std::env::var("SWEEP_INTERVAL_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(DEFAULT_SWEEP_INTERVAL_SECS),
            max_blob_bytes: std::env::var("MAX_BLOB_BYTES")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(DEFAULT_MAX_BLOB_BYTES),
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.listen_addr.is_empty() {
            return Err("LISTEN_ADDR cannot be empty".to_string());
        }

        if self.retention_secs == 0 {
            return Err("RETENTION_SECS must be at least 1 second".to_string());
        }

        if self.sweep_interval_secs < 10 {
            return Err("SWEEP_INTERVAL_SECS must be at least 10 seconds".to_string());
        }

        if self.max_blob_bytes == 0 {
            return Err("MAX_BLOB_BYTES must be at least 1 byte".to_string());
        }

        Ok(())
    }

    /// How long a freshly uploaded object stays available.
    pub fn retention_window(&self) -> chrono::Duration {
        chrono::Duration::seconds(self.retention_secs as i64)
    }

    /// How often the sweeper wakes up.
    pub fn sweep_interval(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.sweep_interval_secs)
    }
}
