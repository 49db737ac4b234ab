//! Shared test fixtures and utilities for all test types
//!
//! This module provides common test setup patterns to reduce duplication
//! and make tests more maintainable.

use std::sync::Arc;
use tempfile::TempDir;

use tempshare::api::{create_router, AppState};
use tempshare::application::ledger::Ledger;
use tempshare::application::ports::{BlobStore, LedgerStore};
use tempshare::application::use_cases::{
    DownloadObjectUseCase, ExpireObjectsUseCase, UploadObjectUseCase,
};
use tempshare::infrastructure::{persistence::JsonFileLedger, storage::LocalBlobStore};

/// Retention window used throughout the test suite: two hours.
pub fn test_retention() -> chrono::Duration {
    chrono::Duration::hours(2)
}

/// Test environment container with all necessary components
pub struct TestEnvironment {
    pub blob_store: Arc<dyn BlobStore>,
    pub ledger: Arc<Ledger>,
    pub upload_use_case: Arc<UploadObjectUseCase>,
    pub download_use_case: Arc<DownloadObjectUseCase>,
    pub expire_use_case: Arc<ExpireObjectsUseCase>,
    pub storage_dir: TempDir,
    pub ledger_dir: TempDir,
}

impl TestEnvironment {
    /// Create a complete test environment backed by temporary directories.
    pub async fn new() -> Self {
        Self::with_max_blob_bytes(64 * 1024 * 1024).await
    }

    /// Create an environment with a custom per-file size cap.
    pub async fn with_max_blob_bytes(max_blob_bytes: u64) -> Self {
        let storage_dir = TempDir::new().expect("Failed to create temp storage dir");
        let ledger_dir = TempDir::new().expect("Failed to create temp ledger dir");

        let store = LocalBlobStore::new(storage_dir.path().to_path_buf(), max_blob_bytes);
        store.init().await.expect("Failed to init storage");
        let blob_store: Arc<dyn BlobStore> = Arc::new(store);

        let ledger_store: Arc<dyn LedgerStore> = Arc::new(JsonFileLedger::new(
            ledger_dir.path().join("metadata.json"),
        ));
        let ledger = Arc::new(Ledger::new(ledger_store));

        let upload_use_case = Arc::new(UploadObjectUseCase::new(
            Arc::clone(&blob_store),
            Arc::clone(&ledger),
            test_retention(),
        ));
        let download_use_case = Arc::new(DownloadObjectUseCase::new(Arc::clone(&blob_store)));
        let expire_use_case = Arc::new(ExpireObjectsUseCase::new(
            Arc::clone(&blob_store),
            Arc::clone(&ledger),
        ));

        Self {
            blob_store,
            ledger,
            upload_use_case,
            download_use_case,
            expire_use_case,
            storage_dir,
            ledger_dir,
        }
    }

    /// Build a router wired to this environment's use cases.
    pub fn router(&self) -> axum::Router {
        self.router_with_body_limit(128 * 1024 * 1024)
    }

    /// Build a router with a specific request-body cap.
    pub fn router_with_body_limit(&self, max_body_bytes: usize) -> axum::Router {
        create_router(AppState {
            upload_use_case: Arc::clone(&self.upload_use_case),
            download_use_case: Arc::clone(&self.download_use_case),
            max_body_bytes,
        })
    }
}

/// HTTP testing utilities
pub mod http {
    use axum::body::Body;
    use axum::http::{header, Method, Request};
    use serde_json::Value;

    pub const MULTIPART_BOUNDARY: &str = "----tempshare-test-boundary";

    /// Assemble a single-field multipart body by hand.
    pub fn multipart_body(field_name: &str, file_name: &str, content: &[u8]) -> Vec<u8> {
        let mut body = Vec::new();
        body.extend_from_slice(format!("--{}\r\n", MULTIPART_BOUNDARY).as_bytes());
        body.extend_from_slice(
            format!(
                "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n",
                field_name, file_name
            )
            .as_bytes(),
        );
        body.extend_from_slice(b"Content-Type: application/octet-stream\r\n\r\n");
        body.extend_from_slice(content);
        body.extend_from_slice(format!("\r\n--{}--\r\n", MULTIPART_BOUNDARY).as_bytes());
        body
    }

    /// Create an upload request carrying one file field.
    pub fn upload_request(file_name: &str, content: &[u8]) -> Request<Body> {
        Request::builder()
            .method(Method::POST)
            .uri("/upload")
            .header(header::HOST, "files.test:3000")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={}", MULTIPART_BOUNDARY),
            )
            .body(Body::from(multipart_body("file", file_name, content)))
            .unwrap()
    }

    /// Create a GET request
    pub fn get_request(uri: &str) -> Request<Body> {
        Request::builder()
            .method(Method::GET)
            .uri(uri)
            .body(Body::empty())
            .unwrap()
    }

    /// Extract a JSON response body.
    pub async fn extract_json(response: axum::response::Response) -> Value {
        let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&body_bytes).unwrap()
    }

    /// Extract a raw response body.
    pub async fn extract_bytes(response: axum::response::Response) -> Vec<u8> {
        axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap()
            .to_vec()
    }
}
