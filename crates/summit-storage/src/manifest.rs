//! Document manifest generation.
//!
//! Walks the document category directories and emits one entry per
//! stored file, with metadata re-derived from the stored filename
//! (original name, upload time) and the filesystem (size). The result
//! is served directly and also written to `documents/resources.json`.

use crate::error::StorageResult;
use crate::local::LocalStorage;
use base64::Engine;
use chrono::{DateTime, Utc};
use summit_core::kinds::{self, DOCUMENT_KINDS};
use summit_core::models::ManifestEntry;
use summit_core::naming;
use summit_core::surface::{DocumentCategory, UploadSurface};

/// Storage key of the generated manifest.
pub const MANIFEST_KEY: &str = "documents/resources.json";

const FALLBACK_CONTENT_TYPE: &str = "application/octet-stream";

pub struct ManifestGenerator {
    storage: LocalStorage,
}

/// Manifest id of a URL path: base64 with trailing `=` padding stripped.
pub fn manifest_id(url_path: &str) -> String {
    let encoded = base64::engine::general_purpose::STANDARD.encode(url_path);
    encoded.trim_end_matches('=').to_string()
}

impl ManifestGenerator {
    pub fn new(storage: LocalStorage) -> Self {
        Self { storage }
    }

    /// One manifest entry per stored document, category directories
    /// walked in fixed order. Unreadable directories are logged and
    /// skipped like in the gallery scan.
    pub async fn scan(&self) -> Vec<ManifestEntry> {
        let mut entries = Vec::new();

        for category in DocumentCategory::ALL {
            match self.scan_category(category).await {
                Ok(mut records) => entries.append(&mut records),
                Err(e) => {
                    tracing::warn!(
                        category = category.as_str(),
                        error = %e,
                        "Skipping unreadable document category"
                    );
                }
            }
        }

        entries
    }

    async fn scan_category(&self, category: DocumentCategory) -> StorageResult<Vec<ManifestEntry>> {
        let prefix = format!("{}/{}", UploadSurface::Document.root(), category.as_str());
        let mut entries = Vec::new();

        for filename in self.storage.list_dir(&prefix).await? {
            let key = format!("{}/{}", prefix, filename);
            let size = match self.storage.metadata(&key).await {
                Ok(meta) => meta.len(),
                Err(e) => {
                    // Raced with a delete between listing and stat.
                    tracing::warn!(key = %key, error = %e, "Skipping unreadable document");
                    continue;
                }
            };

            let parsed = naming::parse_stored_name(&filename);
            let uploaded_at = parsed
                .as_ref()
                .and_then(|p| DateTime::from_timestamp_millis(p.timestamp_ms))
                .unwrap_or_else(Utc::now);
            let original_name = parsed
                .as_ref()
                .and_then(|p| {
                    let head = format!("{}-{}-", p.timestamp_ms, p.token);
                    filename.strip_prefix(&head).map(str::to_string)
                })
                .filter(|n| !n.is_empty())
                .unwrap_or_else(|| filename.clone());

            let extension = naming::extension_of(&filename);
            let content_type = kinds::mime_for_extension(DOCUMENT_KINDS, &extension)
                .unwrap_or(FALLBACK_CONTENT_TYPE)
                .to_string();

            let url_path = self.storage.url_path(&key);
            entries.push(ManifestEntry {
                id: manifest_id(&url_path),
                name: filename.clone(),
                original_name,
                url: self.storage.public_url(&key),
                size,
                content_type,
                uploaded_at,
            });
        }

        Ok(entries)
    }

    /// Regenerate `documents/resources.json` from the current tree.
    /// Returns the number of entries written.
    pub async fn write(&self) -> StorageResult<usize> {
        let entries = self.scan().await;
        let json = serde_json::to_vec_pretty(&entries)
            .map_err(|e| crate::error::StorageError::WriteFailed(e.to_string()))?;
        self.storage.upload(MANIFEST_KEY, json).await?;

        tracing::info!(count = entries.len(), key = MANIFEST_KEY, "Wrote document manifest");
        Ok(entries.len())
    }
}
