use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;

use crate::api::handlers::{download_handler, health_handler, upload_handler};
use crate::application::use_cases::{DownloadObjectUseCase, UploadObjectUseCase};

/// Application state container
pub struct AppState {
    pub upload_use_case: Arc<UploadObjectUseCase>,
    pub download_use_case: Arc<DownloadObjectUseCase>,
    pub max_body_bytes: usize,
}

/// Create router with all routes and middleware
pub fn create_router(state: AppState) -> Router {
    let upload_state = Arc::clone(&state.upload_use_case);
    let download_state = Arc::clone(&state.download_use_case);

    Router::new()
        .route("/health", get(health_handler))
        .route(
            "/upload",
            post(upload_handler)
                .with_state(upload_state)
                // The store enforces the blob limit while writing; the body
                // limit only has to leave room for the multipart framing
                .layer(DefaultBodyLimit::max(state.max_body_bytes)),
        )
        // Download routes match the tail of the public URL handed out on upload
        .route(
            "/{key}",
            get(download_handler).with_state(download_state),
        )
        .layer(CorsLayer::permissive())
}
