//! Document upload, listing, and manifest regeneration.

use crate::error::{ErrorResponse, HttpAppError};
use crate::multipart::extract_upload_form;
use crate::state::AppState;
use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use summit_core::models::ManifestEntry;
use summit_core::surface::UploadSurface;
use summit_core::validator::{self, IncomingFile};
use summit_storage::manifest;
use utoipa::ToSchema;

/// A freshly stored document as returned to the uploader.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DocumentInfo {
    pub id: String,
    /// Stored filename, unique within the category directory.
    pub name: String,
    pub original_name: String,
    pub category: String,
    pub url: String,
    pub size: u64,
    #[serde(rename = "type")]
    pub content_type: String,
    pub uploaded_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uploaded_by: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DocumentUploadResponse {
    pub success: bool,
    pub document: DocumentInfo,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DocumentListResponse {
    pub success: bool,
    pub documents: Vec<ManifestEntry>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ManifestWriteResponse {
    pub success: bool,
    pub count: usize,
}

#[utoipa::path(
    post,
    path = "/api/documents",
    tag = "documents",
    request_body(content = inline(Object), content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "Document uploaded successfully", body = DocumentUploadResponse),
        (status = 400, description = "Validation failure (type, extension, size, category)", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn upload_document(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> Result<(StatusCode, Json<DocumentUploadResponse>), HttpAppError> {
    let form = extract_upload_form(multipart).await.map_err(HttpAppError)?;

    let incoming = form.file.as_ref().map(|f| IncomingFile {
        filename: &f.filename,
        content_type: &f.content_type,
        size: f.data.len() as u64,
    });
    let accepted = validator::validate(UploadSurface::Document, incoming, form.category.as_deref())?;

    // Validation guarantees the file part exists past this point.
    let data = form.file.map(|f| f.data).unwrap_or_default();
    let url = state.storage.upload(&accepted.storage_key, data).await?;

    // Keep resources.json in step with the tree. A failed refresh does
    // not undo the upload; the next regeneration catches up.
    if let Err(e) = state.manifest.write().await {
        tracing::warn!(error = %e, "Document stored but manifest refresh failed");
    }

    tracing::info!(
        stored_name = %accepted.stored_name,
        category = %accepted.category,
        size_bytes = accepted.size,
        "Document uploaded"
    );

    let document = DocumentInfo {
        id: manifest::manifest_id(&state.storage.url_path(&accepted.storage_key)),
        name: accepted.stored_name,
        original_name: accepted.sanitized_name,
        category: accepted.category,
        url,
        size: accepted.size,
        content_type: accepted.content_type,
        uploaded_at: DateTime::from_timestamp_millis(accepted.timestamp_ms)
            .unwrap_or_else(Utc::now),
        description: form.description,
        uploaded_by: form.uploaded_by,
    };

    Ok((
        StatusCode::CREATED,
        Json(DocumentUploadResponse {
            success: true,
            document,
        }),
    ))
}

#[utoipa::path(
    get,
    path = "/api/documents",
    tag = "documents",
    responses(
        (status = 200, description = "All stored documents", body = DocumentListResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn list_documents(
    State(state): State<Arc<AppState>>,
) -> Json<DocumentListResponse> {
    let documents = state.manifest.scan().await;
    Json(DocumentListResponse {
        success: true,
        documents,
    })
}

#[utoipa::path(
    post,
    path = "/api/documents/manifest",
    tag = "documents",
    responses(
        (status = 200, description = "Manifest regenerated", body = ManifestWriteResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn regenerate_manifest(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ManifestWriteResponse>, HttpAppError> {
    let count = state.manifest.write().await?;
    Ok(Json(ManifestWriteResponse {
        success: true,
        count,
    }))
}
