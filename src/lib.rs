//! deck-share - A department presentation archive API
//!
//! This crate provides slide-deck upload, year-organized browsing, viewer
//! resolution, and admin cleanup with:
//! - Swappable object storage backends (local filesystem, GCS)
//! - redb embedded database for metadata (ACID, MVCC, crash-safe)
//! - REST API with multipart upload support
//! - External viewer delegation (Office embed, generic document viewer)

pub mod api;
pub mod config;
pub mod object_store;
pub mod storage;
pub mod viewer;

use std::sync::Arc;

use config::Config;
use storage::Database;

/// Shared application state
pub struct AppState {
    pub config: Config,
    pub db: Database,
    pub object_store: Arc<dyn object_store::ObjectStore>,
}
