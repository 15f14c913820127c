mod gcs;
mod local;

pub use gcs::GcsStore;
pub use local::LocalStore;

use async_trait::async_trait;
use bytes::Bytes;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ObjectStoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid object path: {0}")]
    InvalidPath(String),
    #[error("Object not found: {0}")]
    NotFound(String),
    #[error("Backend error: {0}")]
    Backend(String),
}

/// Abstraction over object storage backends.
/// Keys are blob paths of the form `{year}/{file_name}`.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    async fn put(&self, path: &str, data: Bytes) -> Result<(), ObjectStoreError>;
    async fn get(&self, path: &str) -> Result<Bytes, ObjectStoreError>;
    /// Deleting a missing object is not an error.
    async fn delete(&self, path: &str) -> Result<(), ObjectStoreError>;
    async fn exists(&self, path: &str) -> Result<bool, ObjectStoreError>;
    /// List blob paths under a prefix (e.g. `"3rd Year/"`).
    async fn list(&self, prefix: &str) -> Result<Vec<String>, ObjectStoreError>;
}
