use axum::{
    extract::{multipart::MultipartError, Multipart, State},
    http::{header, HeaderMap, StatusCode},
    response::Json,
};
use bytes::Bytes;
use futures_util::stream;
use serde_json::json;
use std::sync::Arc;
use tokio_util::io::StreamReader;

use crate::api::errors::ApiError;
use crate::application::dto::UploadRequest;
use crate::application::use_cases::UploadObjectUseCase;

/// Per-upload channel depth between the multipart reader and the store
/// writer. Chunks are already sized by the transport, so a short queue is
/// enough to keep both sides busy.
const CHANNEL_DEPTH: usize = 4;

/// POST /upload
/// Accept one file from the `file` multipart field and stream it to storage.
pub async fn upload_handler(
    State(use_case): State<Arc<UploadObjectUseCase>>,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<serde_json::Value>), ApiError> {
    while let Some(mut field) = multipart.next_field().await.map_err(multipart_error)? {
        if field.name() != Some("file") {
            continue;
        }

        let original_name = field.file_name().unwrap_or("upload").to_string();
        let base_url = request_base_url(&headers);

        // Bridge the borrowed multipart field into an owned reader for the
        // use case. A mid-stream client abort surfaces as a read error, so a
        // truncated body can never be committed as a complete object.
        let (tx, rx) = tokio::sync::mpsc::channel::<Result<Bytes, std::io::Error>>(CHANNEL_DEPTH);
        let chunk_stream = stream::unfold(rx, |mut rx| async move {
            rx.recv().await.map(|chunk| (chunk, rx))
        });
        let reader = Box::pin(StreamReader::new(chunk_stream));

        let pump = async move {
            loop {
                match field.chunk().await {
                    Ok(Some(chunk)) => {
                        // A closed receiver means the write side already
                        // failed; the upload future carries the error
                        if tx.send(Ok(chunk)).await.is_err() {
                            break None;
                        }
                    }
                    Ok(None) => break None,
                    Err(e) => {
                        let _ = tx.send(Err(std::io::Error::other(e.to_string()))).await;
                        break Some(e);
                    }
                }
            }
        };

        let request = UploadRequest {
            original_name,
            base_url,
        };
        let (upload_result, read_error) = tokio::join!(use_case.execute(request, reader), pump);
        // A transport-level failure (body limit, truncated stream) is more
        // precise than the storage error it cascades into
        if let Some(e) = read_error {
            return Err(multipart_error(e));
        }
        let uploaded = upload_result?;

        return Ok((
            StatusCode::OK,
            Json(json!({
                "message": "File uploaded successfully.",
                "url": uploaded.url,
            })),
        ));
    }

    Err(ApiError::bad_request("No file uploaded."))
}

/// Translate a multipart read failure, keeping the status axum assigns it:
/// a body over the configured limit stays a 413, everything else is a 400.
fn multipart_error(e: MultipartError) -> ApiError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        ApiError::payload_too_large("File exceeds size limit")
    } else {
        ApiError::bad_request(format!("Malformed multipart body: {}", e))
    }
}

/// Reflect the externally visible base address from the request headers, the
/// same way the public URL is expected to be reachable.
fn request_base_url(headers: &HeaderMap) -> String {
    let scheme = headers
        .get("x-forwarded-proto")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("http");
    let host = headers
        .get(header::HOST)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("localhost");

    format!("{}://{}", scheme, host)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_reflects_host_header() {
        let mut headers = HeaderMap::new();
        headers.insert(header::HOST, "files.example.com:8080".parse().unwrap());

        assert_eq!(
            request_base_url(&headers),
            "http://files.example.com:8080"
        );
    }

    #[test]
    fn test_base_url_respects_forwarded_proto() {
        let mut headers = HeaderMap::new();
        headers.insert(header::HOST, "files.example.com".parse().unwrap());
        headers.insert("x-forwarded-proto", "https".parse().unwrap());

        assert_eq!(request_base_url(&headers), "https://files.example.com");
    }

    #[test]
    fn test_base_url_defaults_without_host() {
        let headers = HeaderMap::new();
        assert_eq!(request_base_url(&headers), "http://localhost");
    }
}
