use std::sync::Arc;

use axum::extract::FromRequestParts;
use axum::http::{header, request::Parts};

use crate::api::response::ApiError;
use crate::AppState;

/// Proof that the request carried the admin bearer token.
///
/// Add this as a handler parameter to gate destructive admin operations.
/// The token never leaves the server; clients present it via
/// `Authorization: Bearer <token>`.
pub struct AdminToken;

#[axum::async_trait]
impl FromRequestParts<Arc<AppState>> for AdminToken {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let expected = state
            .config
            .admin_token
            .as_deref()
            .ok_or_else(|| ApiError::forbidden("Admin operations are not configured"))?;

        let auth_header = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| ApiError::unauthorized("Missing Authorization header"))?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or_else(|| ApiError::unauthorized("Expected a Bearer token"))?;

        ring::constant_time::verify_slices_are_equal(token.as_bytes(), expected.as_bytes())
            .map_err(|_| ApiError::forbidden("Invalid admin token"))?;

        Ok(AdminToken)
    }
}
