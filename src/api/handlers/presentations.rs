use std::sync::Arc;

use axum::extract::{Multipart, Path, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use bytes::BytesMut;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::api::response::{ApiError, AppQuery, JSend};
use crate::storage::models::{
    derive_file_name, derive_file_path, is_allowed_upload, PresentationRecord, Year,
};
use crate::viewer;
use crate::AppState;

// ============================================================================
// Types
// ============================================================================

#[derive(Debug, Serialize)]
pub struct PresentationResponse {
    pub id: String,
    pub name: String,
    pub roll_number: String,
    pub title: String,
    pub year: Year,
    pub file_url: String,
    pub file_name: String,
    pub mime_type: String,
    pub byte_size: u64,
    pub created_at: String,
}

#[derive(Debug, Serialize)]
pub struct YearGroup {
    pub year: Year,
    pub count: usize,
    pub items: Vec<PresentationResponse>,
}

#[derive(Debug, Serialize)]
pub struct ListingResponse {
    pub years: Vec<YearGroup>,
}

#[derive(Debug, Deserialize)]
pub struct ListPresentationsParams {
    #[serde(default)]
    pub year: Option<String>,
}

// ============================================================================
// Handlers
// ============================================================================

pub async fn create_presentation(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<Json<JSend<PresentationResponse>>, ApiError> {
    let mut name: Option<String> = None;
    let mut roll_number: Option<String> = None;
    let mut title: Option<String> = None;
    let mut year: Option<String> = None;
    let mut file_data: Option<BytesMut> = None;
    let mut original_file_name: Option<String> = None;
    let mut file_content_type: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::bad_request(format!("Invalid multipart data: {e}")))?
    {
        let field_name = field.name().unwrap_or("").to_string();

        match field_name.as_str() {
            "file" => {
                original_file_name = field.file_name().map(|s| s.to_string());
                file_content_type = field.content_type().map(|s| s.to_string());

                let data = field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::bad_request(format!("Failed to read file: {e}")))?;

                if data.len() as u64 > state.config.max_upload_size {
                    return Err(ApiError::payload_too_large(format!(
                        "File exceeds maximum upload size of {} bytes",
                        state.config.max_upload_size
                    )));
                }

                let mut buf = BytesMut::with_capacity(data.len());
                buf.extend_from_slice(&data);
                file_data = Some(buf);
            }
            "name" => {
                name = Some(
                    field
                        .text()
                        .await
                        .map_err(|e| ApiError::bad_request(format!("Invalid name: {e}")))?,
                );
            }
            "roll_number" => {
                roll_number = Some(
                    field
                        .text()
                        .await
                        .map_err(|e| ApiError::bad_request(format!("Invalid roll_number: {e}")))?,
                );
            }
            "title" => {
                title = Some(
                    field
                        .text()
                        .await
                        .map_err(|e| ApiError::bad_request(format!("Invalid title: {e}")))?,
                );
            }
            "year" => {
                year = Some(
                    field
                        .text()
                        .await
                        .map_err(|e| ApiError::bad_request(format!("Invalid year: {e}")))?,
                );
            }
            _ => {
                // Ignore unknown fields
            }
        }
    }

    // Every validation below happens before any storage call.
    let name = require_field(name, "name")?;
    let roll_number = require_field(roll_number, "roll_number")?;
    let title = require_field(title, "title")?;
    let year_label = require_field(year, "year")?;
    let year = Year::parse(&year_label).ok_or_else(|| {
        ApiError::bad_request(format!(
            "year must be one of: {}",
            Year::ALL.map(|y| y.label()).join(", ")
        ))
    })?;

    let file_data =
        file_data.ok_or_else(|| ApiError::bad_request("Missing information: file is required"))?;
    if file_data.is_empty() {
        return Err(ApiError::bad_request("Missing information: file is empty"));
    }
    let original_file_name = original_file_name
        .ok_or_else(|| ApiError::bad_request("file field must carry a filename"))?;

    if !is_allowed_upload(&original_file_name, file_content_type.as_deref()) {
        return Err(ApiError::bad_request(
            "Invalid file type: only .ppt or .pptx files are accepted",
        ));
    }

    let extension = viewer::extension(&original_file_name)
        .ok_or_else(|| ApiError::bad_request("file name must have an extension"))?;

    let file_name = derive_file_name(&roll_number, &title, &extension);
    let file_path = derive_file_path(year, &file_name);

    if state
        .db
        .path_exists(&file_path)
        .map_err(|e| ApiError::internal(e.to_string()))?
    {
        return Err(ApiError::conflict(format!(
            "A presentation already exists at '{file_path}'"
        )));
    }

    // MIME type: from multipart Content-Type, or guess from filename, or fallback
    let mime_type = file_content_type
        .filter(|ct| ct != "application/octet-stream")
        .or_else(|| {
            mime_guess::from_path(&original_file_name)
                .first()
                .map(|m| m.to_string())
        })
        .unwrap_or_else(|| "application/octet-stream".to_string());

    let byte_size = file_data.len() as u64;
    let id = uuid::Uuid::new_v4().to_string();

    // Phase 1: Upload bytes to object storage
    state
        .object_store
        .put(&file_path, file_data.freeze())
        .await
        .map_err(|e| ApiError::internal(format!("Failed to store file: {e}")))?;

    // Phase 2: Write the metadata row
    let record = PresentationRecord {
        id: id.clone(),
        name,
        roll_number,
        title,
        year,
        file_url: public_file_url(&state.config.public_base_url, &file_path),
        file_name,
        file_path: file_path.clone(),
        mime_type,
        byte_size,
        created_at: Utc::now(),
    };

    if let Err(e) = state.db.put_presentation(&record) {
        // Best-effort cleanup of the uploaded blob
        if let Err(del_err) = state.object_store.delete(&file_path).await {
            tracing::warn!(path = %file_path, error = %del_err, "Failed to clean up blob after insert failure");
        }
        return Err(ApiError::internal(e.to_string()));
    }

    tracing::debug!(presentation_id = %id, path = %file_path, "Created presentation");

    Ok(JSend::success(to_response(&record)))
}

pub async fn list_presentations(
    State(state): State<Arc<AppState>>,
    AppQuery(params): AppQuery<ListPresentationsParams>,
) -> Result<Json<JSend<ListingResponse>>, ApiError> {
    let years = match params.year {
        Some(label) => {
            let year = Year::parse(&label)
                .ok_or_else(|| ApiError::bad_request(format!("Unknown year: '{label}'")))?;
            let records = state
                .db
                .list_by_year(year)
                .map_err(|e| ApiError::internal(e.to_string()))?;
            vec![to_group(year, records)]
        }
        None => {
            let all = state
                .db
                .list_presentations()
                .map_err(|e| ApiError::internal(e.to_string()))?;
            Year::ALL
                .into_iter()
                .map(|year| {
                    let records: Vec<_> =
                        all.iter().filter(|r| r.year == year).cloned().collect();
                    to_group(year, records)
                })
                .collect()
        }
    };

    Ok(JSend::success(ListingResponse { years }))
}

pub async fn get_presentation(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<JSend<PresentationResponse>>, ApiError> {
    let record = state
        .db
        .get_presentation(&id)
        .map_err(|e| ApiError::internal(e.to_string()))?
        .ok_or_else(|| ApiError::not_found("Presentation not found"))?;

    Ok(JSend::success(to_response(&record)))
}

/// Serve the presentation bytes as an attachment under the stored file name.
/// Route: GET /presentations/:id/download
pub async fn download_presentation(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    let record = state
        .db
        .get_presentation(&id)
        .map_err(|e| ApiError::internal(e.to_string()))?
        .ok_or_else(|| ApiError::not_found("Presentation not found"))?;

    let data = state
        .object_store
        .get(&record.file_path)
        .await
        .map_err(|e| match e {
            crate::object_store::ObjectStoreError::NotFound(_) => {
                ApiError::not_found("Presentation content not found")
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
    if let Ok(value) = format!("attachment; filename=\"{}\"", record.file_name).parse() {
        headers.insert(header::CONTENT_DISPOSITION, value);
    }

    Ok(response)
}

// ============================================================================
// Helpers
// ============================================================================

fn require_field(value: Option<String>, field: &str) -> Result<String, ApiError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v.trim().to_string()),
        _ => Err(ApiError::bad_request(format!(
            "Missing information: {field} is required"
        ))),
    }
}

/// Public URL the service serves a blob at. Path segments are encoded so the
/// year's space survives as `%20`.
pub fn public_file_url(base_url: &str, file_path: &str) -> String {
    let encoded: Vec<String> = file_path
        .split('/')
        .map(viewer::encode_uri_component)
        .collect();
    format!("{base_url}/files/{}", encoded.join("/"))
}

fn to_group(year: Year, records: Vec<PresentationRecord>) -> YearGroup {
    let items: Vec<PresentationResponse> = records.iter().map(to_response).collect();
    YearGroup {
        year,
        count: items.len(),
        items,
    }
}

pub(super) fn to_response(record: &PresentationRecord) -> PresentationResponse {
    PresentationResponse {
        id: record.id.clone(),
        name: record.name.clone(),
        roll_number: record.roll_number.clone(),
        title: record.title.clone(),
        year: record.year,
        file_url: record.file_url.clone(),
        file_name: record.file_name.clone(),
        mime_type: record.mime_type.clone(),
        byte_size: record.byte_size,
        created_at: record.created_at.to_rfc3339(),
    }
}
