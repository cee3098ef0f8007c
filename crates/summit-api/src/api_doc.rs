//! OpenAPI documentation.

use utoipa::OpenApi;

use crate::error;
use crate::handlers;
use summit_core::models;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Summit Media API",
        version = "0.1.0",
        description = "Upload and gallery backend for the summit website. Documents land under /documents/{category}/ and are tracked by a generated resources.json manifest; gallery photos land under /images/gallery/{category}/ and are listed by scanning the tree."
    ),
    paths(
        handlers::documents::upload_document,
        handlers::documents::list_documents,
        handlers::documents::regenerate_manifest,
        handlers::gallery::upload_photo,
        handlers::gallery::list_photos,
        handlers::gallery::delete_photo,
        handlers::health::health,
    ),
    components(schemas(
        error::ErrorResponse,
        models::PhotoRecord,
        models::PhotoSource,
        models::ManifestEntry,
        handlers::documents::DocumentInfo,
        handlers::documents::DocumentUploadResponse,
        handlers::documents::DocumentListResponse,
        handlers::documents::ManifestWriteResponse,
        handlers::gallery::PhotoUploadResponse,
        handlers::gallery::PhotoListResponse,
        handlers::gallery::PhotoDeleteResponse,
        handlers::health::HealthResponse,
    )),
    tags(
        (name = "documents", description = "Document upload and manifest"),
        (name = "gallery", description = "Gallery photos"),
        (name = "health", description = "Probes")
    )
)]
pub struct ApiDoc;
