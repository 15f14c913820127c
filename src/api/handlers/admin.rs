use axum::extract::{Path, State};
use axum::Json;
use serde::Serialize;
use std::sync::Arc;

use crate::api::auth::AdminToken;
use crate::api::response::{ApiError, JSend};
use crate::storage::models::Year;
use crate::AppState;

// ============================================================================
// Types
// ============================================================================

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

#[derive(Debug, Serialize)]
pub struct CleanupResponse {
    pub year: Year,
    pub rows_deleted: u64,
    pub blobs_deleted: u64,
}

#[derive(Debug, Serialize)]
pub struct PurgeResponse {
    pub presentations_deleted: u64,
}

// ============================================================================
// Handlers
// ============================================================================

pub async fn health() -> Json<JSend<HealthResponse>> {
    JSend::success(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Delete every presentation in a year category: blobs first, then rows.
/// Blob failures are logged and skipped; row deletion failure fails the
/// whole operation.
/// Route: DELETE /admin/presentations/:year
pub async fn cleanup_year(
    _admin: AdminToken,
    State(state): State<Arc<AppState>>,
    Path(year): Path<String>,
) -> Result<Json<JSend<CleanupResponse>>, ApiError> {
    let year = Year::parse(&year)
        .ok_or_else(|| ApiError::bad_request(format!("Unknown year: '{year}'")))?;

    // Blob pass covers orphans too: everything under the prefix goes,
    // whether or not a row references it.
    let mut blobs_deleted = 0u64;
    match state.object_store.list(&year.prefix()).await {
        Ok(paths) => {
            for path in paths {
                match state.object_store.delete(&path).await {
                    Ok(()) => blobs_deleted += 1,
                    Err(e) => {
                        tracing::warn!(%path, error = %e, "Failed to delete blob during cleanup");
                    }
                }
            }
        }
        Err(e) => {
            tracing::warn!(year = %year, error = %e, "Failed to list blobs during cleanup");
        }
    }

    let deleted = state.db.delete_by_year(year).map_err(|e| {
        tracing::error!(year = %year, error = %e, "Failed to delete presentation rows");
        ApiError::internal(e.to_string())
    })?;

    tracing::info!(
        year = %year,
        rows = deleted.len(),
        blobs = blobs_deleted,
        "Cleaned up year category"
    );

    Ok(JSend::success(CleanupResponse {
        year,
        rows_deleted: deleted.len() as u64,
        blobs_deleted,
    }))
}

/// Purge all rows - for testing only
pub async fn admin_purge(
    _admin: AdminToken,
    State(state): State<Arc<AppState>>,
) -> Result<Json<JSend<PurgeResponse>>, ApiError> {
    let stats = state
        .db
        .purge_all()
        .map_err(|e| ApiError::internal(e.to_string()))?;

    tracing::warn!(presentations = stats.presentations, "Purged all data");

    Ok(JSend::success(PurgeResponse {
        presentations_deleted: stats.presentations,
    }))
}
