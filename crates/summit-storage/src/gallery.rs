//! Gallery listing and deletion, re-derived from directory contents.
//!
//! No index is persisted for gallery photos: each scan reconstructs
//! the records from the filenames in the category directories. The
//! external photo list (source "google") is prepended as-is and is
//! never deletable here.

use crate::error::StorageResult;
use crate::local::LocalStorage;
use chrono::{DateTime, Utc};
use std::path::Path;
use summit_core::kinds::{self, GALLERY_KINDS};
use summit_core::models::{PhotoRecord, PhotoSource, LOCAL_ID_PREFIX};
use summit_core::naming;
use summit_core::surface::{GalleryCategory, UploadSurface};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GalleryError {
    #[error("Photo not found: {0}")]
    NotFound(String),

    #[error("Only locally stored photos can be deleted")]
    Unsupported,

    #[error(transparent)]
    Storage(#[from] crate::error::StorageError),
}

pub struct GalleryScanner {
    storage: LocalStorage,
    external: Vec<PhotoRecord>,
}

/// Identity of a file in a category directory: the embedded token for
/// well-formed stored names, a stable stem-derived token otherwise.
fn effective_token(filename: &str) -> String {
    match naming::parse_stored_name(filename) {
        Some(parsed) => parsed.token,
        None => naming::fallback_token(filename),
    }
}

impl GalleryScanner {
    pub fn new(storage: LocalStorage, external: Vec<PhotoRecord>) -> Self {
        Self { storage, external }
    }

    /// Load the static external photo list from a JSON file.
    pub async fn load_external_photos(path: &Path) -> Result<Vec<PhotoRecord>, anyhow::Error> {
        let bytes = tokio::fs::read(path).await?;
        let photos: Vec<PhotoRecord> = serde_json::from_slice(&bytes)?;
        Ok(photos)
    }

    fn category_prefix(category: GalleryCategory) -> String {
        format!("{}/{}", UploadSurface::Gallery.root(), category.as_str())
    }

    /// All photos: the external list first, then each category
    /// directory in fixed order. An unreadable category is logged and
    /// skipped; the listing still returns what the others yielded.
    /// Purely derived from current directory contents, so idempotent
    /// while the tree is unchanged.
    pub async fn list_photos(&self) -> Vec<PhotoRecord> {
        let mut photos = self.external.clone();

        for category in GalleryCategory::ALL {
            match self.scan_category(category).await {
                Ok(mut records) => photos.append(&mut records),
                Err(e) => {
                    tracing::warn!(
                        category = category.as_str(),
                        error = %e,
                        "Skipping unreadable gallery category"
                    );
                }
            }
        }

        photos
    }

    async fn scan_category(&self, category: GalleryCategory) -> StorageResult<Vec<PhotoRecord>> {
        let prefix = Self::category_prefix(category);
        let mut records = Vec::new();

        for filename in self.storage.list_dir(&prefix).await? {
            let extension = naming::extension_of(&filename);
            if !kinds::extension_allowed(GALLERY_KINDS, &extension) {
                continue;
            }

            let key = format!("{}/{}", prefix, filename);
            let uploaded_at = match naming::parse_stored_name(&filename)
                .and_then(|p| DateTime::from_timestamp_millis(p.timestamp_ms))
            {
                Some(ts) => ts,
                // Foreign filename: fall back to the file's mtime so the
                // record keeps the same timestamp across scans.
                None => self.file_mtime(&key).await,
            };
            let url = self.storage.public_url(&key);

            records.push(PhotoRecord {
                id: format!("{}{}", LOCAL_ID_PREFIX, effective_token(&filename)),
                thumbnail_url: url.clone(),
                url,
                name: naming::stem_of(&filename).to_string(),
                uploaded_at,
                category: category.as_str().to_string(),
                source: PhotoSource::Local,
            });
        }

        Ok(records)
    }

    async fn file_mtime(&self, key: &str) -> DateTime<Utc> {
        match self.storage.metadata(key).await {
            Ok(meta) => meta
                .modified()
                .map(DateTime::<Utc>::from)
                .unwrap_or_else(|_| Utc::now()),
            Err(_) => Utc::now(),
        }
    }

    /// Delete a photo by its listing id. External-source ids are
    /// rejected as unsupported; local ids are resolved by scanning the
    /// category directories in fixed order for a matching token. The
    /// filesystem is untouched when no match exists.
    pub async fn delete_photo(&self, id: &str) -> Result<(), GalleryError> {
        let token = id
            .strip_prefix(LOCAL_ID_PREFIX)
            .filter(|t| !t.is_empty())
            .ok_or(GalleryError::Unsupported)?;

        for category in GalleryCategory::ALL {
            let prefix = Self::category_prefix(category);
            let filenames = match self.storage.list_dir(&prefix).await {
                Ok(names) => names,
                Err(e) => {
                    tracing::warn!(
                        category = category.as_str(),
                        error = %e,
                        "Skipping unreadable gallery category during delete"
                    );
                    continue;
                }
            };

            for filename in filenames {
                if effective_token(&filename) == token {
                    let key = format!("{}/{}", prefix, filename);
                    self.storage.delete(&key).await?;
                    tracing::info!(id = %id, key = %key, "Deleted gallery photo");
                    return Ok(());
                }
            }
        }

        Err(GalleryError::NotFound(id.to_string()))
    }
}
