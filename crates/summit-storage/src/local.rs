//! Local filesystem storage.
//!
//! Keys are slash-separated paths relative to the storage root, e.g.
//! `documents/resources/1724-ab12cd-report.pdf`. The public URL of a
//! key is `{base_url}/{key}`.

use crate::error::{StorageError, StorageResult};
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;

#[derive(Clone)]
pub struct LocalStorage {
    base_path: PathBuf,
    base_url: String,
}

impl LocalStorage {
    /// Create the storage root if absent. An already-existing root is
    /// fine; two first-uploads racing on directory creation must both
    /// succeed.
    pub async fn new(base_path: impl Into<PathBuf>, base_url: String) -> StorageResult<Self> {
        let base_path = base_path.into();

        fs::create_dir_all(&base_path).await.map_err(|e| {
            StorageError::Config(format!(
                "Failed to create storage directory {}: {}",
                base_path.display(),
                e
            ))
        })?;

        Ok(LocalStorage {
            base_path,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Convert a storage key to a filesystem path, rejecting traversal
    /// sequences that could escape the storage root.
    fn key_to_path(&self, storage_key: &str) -> StorageResult<PathBuf> {
        if storage_key.is_empty()
            || storage_key.starts_with('/')
            || storage_key.split('/').any(|part| part == "..")
        {
            return Err(StorageError::InvalidKey(storage_key.to_string()));
        }
        Ok(self.base_path.join(storage_key))
    }

    /// Public URL for a key.
    pub fn public_url(&self, storage_key: &str) -> String {
        format!("{}/{}", self.base_url, storage_key)
    }

    /// URL path (no scheme/host) for a key.
    pub fn url_path(&self, storage_key: &str) -> String {
        format!("/{}", storage_key)
    }

    async fn ensure_parent_dir(&self, path: &Path) -> StorageResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }
        Ok(())
    }

    /// Write bytes to a key, creating the category directory on first
    /// use. Returns the public URL.
    pub async fn upload(&self, storage_key: &str, data: Vec<u8>) -> StorageResult<String> {
        let path = self.key_to_path(storage_key)?;
        let size = data.len();

        self.ensure_parent_dir(&path).await?;

        let start = std::time::Instant::now();

        let mut file = fs::File::create(&path).await.map_err(|e| {
            StorageError::WriteFailed(format!("Failed to create file {}: {}", path.display(), e))
        })?;

        file.write_all(&data).await.map_err(|e| {
            StorageError::WriteFailed(format!("Failed to write file {}: {}", path.display(), e))
        })?;

        file.sync_all().await.map_err(|e| {
            StorageError::WriteFailed(format!("Failed to sync file {}: {}", path.display(), e))
        })?;

        tracing::info!(
            key = %storage_key,
            size_bytes = size,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Local storage upload successful"
        );

        Ok(self.public_url(storage_key))
    }

    /// Delete a key. Deleting an absent key is not an error; callers
    /// that need not-found semantics check existence themselves.
    pub async fn delete(&self, storage_key: &str) -> StorageResult<()> {
        let path = self.key_to_path(storage_key)?;

        if !fs::try_exists(&path).await.unwrap_or(false) {
            return Ok(());
        }

        fs::remove_file(&path).await.map_err(|e| {
            StorageError::DeleteFailed(format!("Failed to delete file {}: {}", path.display(), e))
        })?;

        tracing::info!(key = %storage_key, "Local storage delete successful");

        Ok(())
    }

    pub async fn exists(&self, storage_key: &str) -> StorageResult<bool> {
        let path = self.key_to_path(storage_key)?;
        Ok(fs::try_exists(&path).await.unwrap_or(false))
    }

    /// Size and modification time of a stored file.
    pub async fn metadata(&self, storage_key: &str) -> StorageResult<std::fs::Metadata> {
        let path = self.key_to_path(storage_key)?;
        fs::metadata(&path)
            .await
            .map_err(|_| StorageError::NotFound(storage_key.to_string()))
    }

    /// Filenames directly under a key prefix (one directory, no
    /// recursion), in directory order. A missing directory reads as
    /// empty; other errors propagate so callers can log and skip.
    pub async fn list_dir(&self, prefix: &str) -> StorageResult<Vec<String>> {
        let path = self.key_to_path(prefix)?;

        if !fs::try_exists(&path).await.unwrap_or(false) {
            return Ok(Vec::new());
        }

        let mut entries = fs::read_dir(&path).await?;
        let mut names = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            if entry.file_type().await?.is_file() {
                if let Some(name) = entry.file_name().to_str() {
                    names.push(name.to_string());
                }
            }
        }
        Ok(names)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    async fn test_storage(dir: &tempfile::TempDir) -> LocalStorage {
        LocalStorage::new(dir.path(), "http://localhost:3000".to_string())
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn upload_creates_category_dir_and_returns_url() {
        let dir = tempdir().unwrap();
        let storage = test_storage(&dir).await;

        let url = storage
            .upload("documents/resources/1-ab-x.pdf", b"data".to_vec())
            .await
            .unwrap();

        assert_eq!(url, "http://localhost:3000/documents/resources/1-ab-x.pdf");
        assert!(storage.exists("documents/resources/1-ab-x.pdf").await.unwrap());
        let meta = storage.metadata("documents/resources/1-ab-x.pdf").await.unwrap();
        assert_eq!(meta.len(), 4);
    }

    #[tokio::test]
    async fn path_traversal_rejected() {
        let dir = tempdir().unwrap();
        let storage = test_storage(&dir).await;

        let result = storage.upload("../escape.txt", b"x".to_vec()).await;
        assert!(matches!(result, Err(StorageError::InvalidKey(_))));

        let result = storage.delete("/etc/passwd").await;
        assert!(matches!(result, Err(StorageError::InvalidKey(_))));

        let result = storage.exists("a/../../b").await;
        assert!(matches!(result, Err(StorageError::InvalidKey(_))));
    }

    #[tokio::test]
    async fn delete_nonexistent_is_ok() {
        let dir = tempdir().unwrap();
        let storage = test_storage(&dir).await;

        assert!(storage.delete("images/gallery/other/missing.jpg").await.is_ok());
    }

    #[tokio::test]
    async fn list_dir_missing_reads_empty() {
        let dir = tempdir().unwrap();
        let storage = test_storage(&dir).await;

        let names = storage.list_dir("images/gallery/summit").await.unwrap();
        assert!(names.is_empty());
    }

    #[tokio::test]
    async fn list_dir_returns_files_only() {
        let dir = tempdir().unwrap();
        let storage = test_storage(&dir).await;

        storage
            .upload("images/gallery/summit/1-aa.jpg", b"a".to_vec())
            .await
            .unwrap();
        storage
            .upload("images/gallery/summit/nested/2-bb.jpg", b"b".to_vec())
            .await
            .unwrap();

        let names = storage.list_dir("images/gallery/summit").await.unwrap();
        assert_eq!(names, vec!["1-aa.jpg".to_string()]);
    }
}
