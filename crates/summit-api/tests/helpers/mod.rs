#![allow(dead_code)]

use axum_test::multipart::{MultipartForm, Part};
use axum_test::TestServer;
use std::path::Path;
use std::sync::Arc;
use summit_api::setup::routes::setup_routes;
use summit_api::state::AppState;
use summit_core::Config;
use tempfile::TempDir;

/// Test application: an in-process server over a throwaway storage root.
pub struct TestApp {
    pub server: TestServer,
    _temp_dir: TempDir,
}

impl TestApp {
    pub fn client(&self) -> &TestServer {
        &self.server
    }

    /// The storage root backing this app.
    pub fn storage_root(&self) -> std::path::PathBuf {
        self._temp_dir.path().join("public")
    }

    pub fn file_exists(&self, key: &str) -> bool {
        self.storage_root().join(key).is_file()
    }
}

pub async fn setup_test_app() -> TestApp {
    setup_test_app_with_external(None).await
}

/// Like `setup_test_app`, but seeds an external photo list JSON file
/// that the gallery prepends to its listings.
pub async fn setup_test_app_with_external(external: Option<serde_json::Value>) -> TestApp {
    let temp_dir = TempDir::new().unwrap();

    let external_photos_path = external.map(|json| {
        let path = temp_dir.path().join("external-photos.json");
        std::fs::write(&path, serde_json::to_vec(&json).unwrap()).unwrap();
        path
    });

    let config = Config {
        server_port: 0,
        cors_origins: vec!["*".to_string()],
        environment: "test".to_string(),
        storage_root: temp_dir.path().join("public"),
        public_base_url: "http://localhost:3000".to_string(),
        external_photos_path,
    };

    let state = AppState::from_config(config).await.unwrap();
    let server = TestServer::new(setup_routes(state).unwrap()).unwrap();

    TestApp {
        server,
        _temp_dir: temp_dir,
    }
}

/// A multipart upload form with one file part and optional extras.
pub fn upload_form(
    filename: &str,
    mime: &str,
    data: Vec<u8>,
    category: Option<&str>,
) -> MultipartForm {
    let mut form = MultipartForm::new().add_part(
        "file",
        Part::bytes(data)
            .file_name(filename.to_string())
            .mime_type(mime.to_string()),
    );
    if let Some(category) = category {
        form = form.add_text("category", category.to_string());
    }
    form
}

/// Minimal valid PNG (1x1 pixel).
pub fn png_bytes() -> Vec<u8> {
    vec![
        0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, // PNG signature
        0x00, 0x00, 0x00, 0x0D, 0x49, 0x48, 0x44, 0x52, // IHDR chunk
        0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, // 1x1 dimensions
        0x08, 0x02, 0x00, 0x00, 0x00, 0x90, 0x77, 0x53, 0xDE, //
        0x00, 0x00, 0x00, 0x0C, 0x49, 0x44, 0x41, 0x54, // IDAT chunk
        0x08, 0xD7, 0x63, 0xF8, 0x00, 0x00, 0x00, 0x00, 0x01, 0x00, 0x01, //
        0x00, 0x18, 0xDD, 0x8D, 0x89, 0x00, 0x00, 0x00, 0x00, 0x49, 0x45, //
        0x4E, 0x44, 0xAE, 0x42, 0x60, 0x82, // IEND chunk
    ]
}

/// Seed a file directly under the storage root, bypassing the API.
pub fn seed_file(app: &TestApp, key: &str, data: &[u8]) {
    let path = app.storage_root().join(key);
    if let Some(parent) = Path::new(&path).parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(path, data).unwrap();
}
