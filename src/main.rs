use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::{info, Level};

use tempshare::{
    api::{create_router, AppState},
    application::{
        ledger::Ledger,
        ports::{BlobStore, LedgerStore},
        sweeper::RetentionSweeper,
        use_cases::{DownloadObjectUseCase, ExpireObjectsUseCase, UploadObjectUseCase},
    },
    infrastructure::{persistence::JsonFileLedger, storage::LocalBlobStore},
    Config,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing with structured logging
    tracing_subscriber::fmt()
        .with_max_level(Level::INFO)
        .with_target(true)
        .init();

    info!("Starting TempShare service");

    // Load configuration
    let config = Config::from_env();
    config.validate()?;
    info!("Configuration loaded and validated");

    // Initialize infrastructure layer
    let blob_store = Arc::new(LocalBlobStore::new(
        config.storage_root.clone(),
        config.max_blob_bytes,
    ));
    blob_store.init().await?;
    let blob_store: Arc<dyn BlobStore> = blob_store;

    let ledger_store: Arc<dyn LedgerStore> =
        Arc::new(JsonFileLedger::new(config.ledger_path.clone()));
    let ledger = Arc::new(Ledger::new(Arc::clone(&ledger_store)));

    // A ledger that cannot be read is a fatal startup condition, better
    // surfaced now than on the first upload
    let existing = ledger.snapshot().await?;
    info!("Ledger loaded with {} tracked object(s)", existing.len());

    info!("Infrastructure layer initialized");

    // Initialize use cases (application layer)
    let upload_use_case = Arc::new(UploadObjectUseCase::new(
        Arc::clone(&blob_store),
        Arc::clone(&ledger),
        config.retention_window(),
    ));

    let download_use_case = Arc::new(DownloadObjectUseCase::new(Arc::clone(&blob_store)));

    let expire_use_case = Arc::new(ExpireObjectsUseCase::new(
        Arc::clone(&blob_store),
        Arc::clone(&ledger),
    ));

    info!("Application layer initialized");

    // Start retention sweeper in background
    let sweeper = Arc::new(RetentionSweeper::new(
        Arc::clone(&expire_use_case),
        config.sweep_interval(),
    ));
    tokio::spawn(Arc::clone(&sweeper).run());
    info!(
        "Retention sweeper started (window {}s, interval {}s)",
        config.retention_secs, config.sweep_interval_secs
    );

    // Create app state
    let state = AppState {
        upload_use_case,
        download_use_case,
        // Leave headroom for multipart framing on top of the blob limit
        max_body_bytes: (config.max_blob_bytes as usize).saturating_add(1024 * 1024),
    };

    // Create router
    let app = create_router(state);

    // Start server
    info!("Listening on {}", config.listen_addr);
    let listener = TcpListener::bind(&config.listen_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
