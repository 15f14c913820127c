use axum::{
    extract::DefaultBodyLimit,
    routing::{delete, get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use super::handlers;
use crate::AppState;

pub fn create_router(state: Arc<AppState>) -> Router {
    let upload_limit = state.config.max_upload_size as usize;

    let mut router = Router::new()
        // Presentations
        .route("/presentations", get(handlers::list_presentations))
        .route(
            "/presentations",
            post(handlers::create_presentation).layer(DefaultBodyLimit::max(upload_limit)),
        )
        .route("/presentations/:id", get(handlers::get_presentation))
        .route(
            "/presentations/:id/download",
            get(handlers::download_presentation),
        )
        .route("/presentations/:id/view", get(handlers::view_presentation))
        // Viewer resolution (open to any origin; also answers pre-flight)
        .route(
            "/viewer/resolve",
            post(handlers::resolve_viewer).layer(CorsLayer::permissive()),
        )
        // Blob content
        .route("/files/*path", get(handlers::serve_file))
        // Admin
        .route(
            "/admin/presentations/:year",
            delete(handlers::cleanup_year),
        )
        // Internal
        .route("/_internal/health", get(handlers::health));

    // Test-only routes
    if state.config.test_mode {
        tracing::warn!("Test mode enabled — purge route is available.");
        router = router.route("/admin/purge", delete(handlers::admin_purge));
    }

    router.layer(TraceLayer::new_for_http()).with_state(state)
}
