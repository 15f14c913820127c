use async_trait::async_trait;
use bytes::Bytes;
use std::path::{Component, Path, PathBuf};

use super::{ObjectStore, ObjectStoreError};

/// Local filesystem object store for development and testing.
pub struct LocalStore {
    base_path: PathBuf,
}

impl LocalStore {
    pub fn new<P: AsRef<Path>>(base_path: P) -> Result<Self, std::io::Error> {
        let base_path = base_path.as_ref().to_path_buf();
        std::fs::create_dir_all(&base_path)?;
        Ok(Self { base_path })
    }

    /// Resolve a blob path under the base directory, rejecting traversal.
    fn object_path(&self, path: &str) -> Result<PathBuf, ObjectStoreError> {
        let relative = Path::new(path);
        let safe = relative
            .components()
            .all(|c| matches!(c, Component::Normal(_)));
        if !safe || path.is_empty() {
            return Err(ObjectStoreError::InvalidPath(path.to_string()));
        }
        Ok(self.base_path.join(relative))
    }
}

#[async_trait]
impl ObjectStore for LocalStore {
    async fn put(&self, path: &str, data: Bytes) -> Result<(), ObjectStoreError> {
        let full = self.object_path(path)?;
        if let Some(parent) = full.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&full, &data).await?;
        Ok(())
    }

    async fn get(&self, path: &str) -> Result<Bytes, ObjectStoreError> {
        let full = self.object_path(path)?;
        if !full.exists() {
            return Err(ObjectStoreError::NotFound(path.to_string()));
        }
        let data = tokio::fs::read(&full).await?;
        Ok(Bytes::from(data))
    }

    async fn delete(&self, path: &str) -> Result<(), ObjectStoreError> {
        let full = self.object_path(path)?;
        if full.exists() {
            tokio::fs::remove_file(&full).await?;
        }
        Ok(())
    }

    async fn exists(&self, path: &str) -> Result<bool, ObjectStoreError> {
        let full = self.object_path(path)?;
        Ok(full.exists())
    }

    async fn list(&self, prefix: &str) -> Result<Vec<String>, ObjectStoreError> {
        let trimmed = prefix.trim_end_matches('/');
        let dir = self.object_path(trimmed)?;
        if !dir.is_dir() {
            return Ok(Vec::new());
        }

        let mut paths = Vec::new();
        let mut entries = tokio::fs::read_dir(&dir).await?;
        while let Some(entry) = entries.next_entry().await? {
            if entry.file_type().await?.is_file() {
                let name = entry.file_name().to_string_lossy().to_string();
                paths.push(format!("{trimmed}/{name}"));
            }
        }

        paths.sort();
        Ok(paths)
    }
}
