use std::sync::Arc;

use axum::extract::{Path, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use super::presentations::{to_response, PresentationResponse};
use crate::api::response::{ApiError, AppJson, JSend};
use crate::viewer::{self, Resolution, ViewerKind};
use crate::AppState;

// ============================================================================
// Types
// ============================================================================

/// Request body of the standalone resolution endpoint. Field names follow the
/// wire contract callers already use (`fileUrl`/`fileName`).
#[derive(Debug, Deserialize)]
pub struct ResolveRequest {
    #[serde(rename = "fileUrl")]
    pub file_url: String,
    #[serde(rename = "fileName")]
    pub file_name: String,
}

/// Response of the standalone resolution endpoint. Callers must inspect
/// `success`; unsupported formats are a 200, not an error status.
#[derive(Debug, Serialize)]
pub struct ResolveResponse {
    pub success: bool,
    #[serde(rename = "embedUrl", skip_serializing_if = "Option::is_none")]
    pub embed_url: Option<String>,
    #[serde(rename = "viewerType", skip_serializing_if = "Option::is_none")]
    pub viewer_type: Option<ViewerKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ViewResponse {
    /// `None` means no inline preview exists; use `download_url`.
    pub viewer: Option<ViewerKind>,
    pub embed_url: Option<String>,
    pub download_url: String,
    pub presentation: PresentationResponse,
}

// ============================================================================
// Handlers
// ============================================================================

/// Stateless viewer resolution: PowerPoint files get an Office embed URL,
/// everything else reports `success: false` so the caller falls back to the
/// generic document viewer.
/// Route: POST /viewer/resolve
pub async fn resolve_viewer(
    AppJson(req): AppJson<ResolveRequest>,
) -> Json<ResolveResponse> {
    let ext = viewer::extension(&req.file_name).unwrap_or_default();

    if ext == "ppt" || ext == "pptx" {
        let embed_url = viewer::office_embed_url(&req.file_url);
        tracing::debug!(file_name = %req.file_name, %embed_url, "Resolved Office viewer");
        return Json(ResolveResponse {
            success: true,
            embed_url: Some(embed_url),
            viewer_type: Some(ViewerKind::Office),
            error: None,
        });
    }

    Json(ResolveResponse {
        success: false,
        embed_url: None,
        viewer_type: None,
        error: Some("File type not supported for enhanced viewing".to_string()),
    })
}

/// Full viewing decision for a stored presentation: office embed for decks,
/// generic viewer for other document formats, download-only otherwise.
/// Route: GET /presentations/:id/view
pub async fn view_presentation(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<JSend<ViewResponse>>, ApiError> {
    let record = state
        .db
        .get_presentation(&id)
        .map_err(|e| ApiError::internal(e.to_string()))?
        .ok_or_else(|| ApiError::not_found("Presentation not found"))?;

    let download_url = format!(
        "{}/presentations/{}/download",
        state.config.public_base_url, record.id
    );

    let (viewer, embed_url) = match viewer::resolve(&record.file_url, &record.file_name) {
        Resolution::Embed { kind, embed_url } => (Some(kind), Some(embed_url)),
        Resolution::Unsupported => (None, None),
    };

    Ok(JSend::success(ViewResponse {
        viewer,
        embed_url,
        download_url,
        presentation: to_response(&record),
    }))
}
