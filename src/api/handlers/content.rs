use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use std::sync::Arc;

use crate::api::response::ApiError;
use crate::AppState;

/// Serve blob content by its `{year}/{file_name}` path.
/// Route: GET /files/*path
pub async fn serve_file(
    State(state): State<Arc<AppState>>,
    axum::extract::Path(path): axum::extract::Path<String>,
) -> Result<Response, ApiError> {
    // Only paths with a metadata row are servable
    let record = state
        .db
        .get_presentation_by_path(&path)
        .map_err(|e| ApiError::internal(e.to_string()))?
        .ok_or_else(|| ApiError::not_found("File not found"))?;

    let data = state
        .object_store
        .get(&record.file_path)
        .await
        .map_err(|e| match e {
            crate::object_store::ObjectStoreError::NotFound(_) => {
                ApiError::not_found("File content not found")
            }
            _ => ApiError::internal(format!("Failed to retrieve file: {e}")),
        })?;

    let mut response = (StatusCode::OK, data).into_response();
    let headers = response.headers_mut();

    headers.insert(
        header::CONTENT_TYPE,
        record
            .mime_type
            .parse()
            .unwrap_or(header::HeaderValue::from_static("application/octet-stream")),
    );
    headers.insert(
        header::CONTENT_LENGTH,
        header::HeaderValue::from(record.byte_size),
    );
    if let Ok(value) = format!("inline; filename=\"{}\"", record.file_name).parse() {
        headers.insert(header::CONTENT_DISPOSITION, value);
    }

    // Blobs are immutable once uploaded, so long caching is safe
    headers.insert(
        header::CACHE_CONTROL,
        header::HeaderValue::from_static("public, max-age=3600"),
    );

    Ok(response)
}
