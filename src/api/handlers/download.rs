use axum::{
    body::Body,
    extract::{Path, State},
    http::{header, StatusCode},
    response::Response,
};
use std::sync::Arc;
use tokio_util::io::ReaderStream;

use crate::api::errors::ApiError;
use crate::application::use_cases::DownloadObjectUseCase;
use crate::domain::value_objects::StorageKey;

/// GET /{key}
/// Stream a stored file back as an attachment.
pub async fn download_handler(
    State(use_case): State<Arc<DownloadObjectUseCase>>,
    Path(key): Path<String>,
) -> Result<Response, ApiError> {
    // A key that fails validation cannot name a stored blob, and this also
    // stops traversal segments before they reach the filesystem
    let key = key
        .parse::<StorageKey>()
        .map_err(|_| ApiError::not_found("File not found."))?;

    let reader = use_case.execute(&key).await?;

    let stream = ReaderStream::new(reader);
    let body = Body::from_stream(stream);

    let response = Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "application/octet-stream")
        .header(
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", key),
        )
        .body(body)
        .map_err(|e| ApiError::internal_error(format!("Failed to build response: {}", e)))?;

    Ok(response)
}
