//! Shared application state.

use anyhow::Context;
use std::sync::Arc;
use summit_core::Config;
use summit_storage::{GalleryScanner, LocalStorage, ManifestGenerator};

pub struct AppState {
    pub config: Config,
    pub storage: LocalStorage,
    pub gallery: GalleryScanner,
    pub manifest: ManifestGenerator,
}

impl AppState {
    /// Build the state graph from configuration: open the storage root,
    /// load the external photo list (when configured), and wire the
    /// scanner and manifest generator on top of the same storage.
    pub async fn from_config(config: Config) -> Result<Arc<Self>, anyhow::Error> {
        let storage = LocalStorage::new(&config.storage_root, config.public_base_url.clone())
            .await
            .context("Failed to initialize local storage")?;

        let external = match &config.external_photos_path {
            Some(path) => GalleryScanner::load_external_photos(path)
                .await
                .with_context(|| {
                    format!("Failed to load external photos from {}", path.display())
                })?,
            None => Vec::new(),
        };
        if !external.is_empty() {
            tracing::info!(count = external.len(), "Loaded external photo records");
        }

        let gallery = GalleryScanner::new(storage.clone(), external);
        let manifest = ManifestGenerator::new(storage.clone());

        Ok(Arc::new(AppState {
            config,
            storage,
            gallery,
            manifest,
        }))
    }
}
