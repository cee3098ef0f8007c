//! Gallery photo upload, listing, and deletion.

use crate::error::{ErrorResponse, HttpAppError};
use crate::multipart::extract_upload_form;
use crate::state::AppState;
use axum::{
    extract::{Multipart, Query, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use summit_core::models::{PhotoRecord, PhotoSource, LOCAL_ID_PREFIX};
use summit_core::naming;
use summit_core::surface::UploadSurface;
use summit_core::validator::{self, IncomingFile};
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
pub struct PhotoUploadResponse {
    pub success: bool,
    pub file: PhotoRecord,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PhotoListResponse {
    pub success: bool,
    pub photos: Vec<PhotoRecord>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PhotoDeleteResponse {
    pub success: bool,
}

#[derive(Debug, Deserialize)]
pub struct DeleteQuery {
    pub id: String,
}

#[utoipa::path(
    post,
    path = "/api/gallery",
    tag = "gallery",
    request_body(content = inline(Object), content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "Photo uploaded successfully", body = PhotoUploadResponse),
        (status = 400, description = "Validation failure (type, extension, size, category)", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn upload_photo(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> Result<(StatusCode, Json<PhotoUploadResponse>), HttpAppError> {
    let form = extract_upload_form(multipart).await.map_err(HttpAppError)?;

    let incoming = form.file.as_ref().map(|f| IncomingFile {
        filename: &f.filename,
        content_type: &f.content_type,
        size: f.data.len() as u64,
    });
    let accepted = validator::validate(UploadSurface::Gallery, incoming, form.category.as_deref())?;

    let data = form.file.map(|f| f.data).unwrap_or_default();
    let url = state.storage.upload(&accepted.storage_key, data).await?;

    tracing::info!(
        stored_name = %accepted.stored_name,
        category = %accepted.category,
        size_bytes = accepted.size,
        "Gallery photo uploaded"
    );

    let file = PhotoRecord {
        id: format!("{}{}", LOCAL_ID_PREFIX, accepted.token),
        thumbnail_url: url.clone(),
        url,
        name: naming::stem_of(&accepted.stored_name).to_string(),
        uploaded_at: DateTime::from_timestamp_millis(accepted.timestamp_ms)
            .unwrap_or_else(Utc::now),
        category: accepted.category,
        source: PhotoSource::Local,
    };

    Ok((
        StatusCode::CREATED,
        Json(PhotoUploadResponse {
            success: true,
            file,
        }),
    ))
}

#[utoipa::path(
    get,
    path = "/api/gallery",
    tag = "gallery",
    responses(
        (status = 200, description = "All photos, external records first", body = PhotoListResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn list_photos(State(state): State<Arc<AppState>>) -> Json<PhotoListResponse> {
    let photos = state.gallery.list_photos().await;
    Json(PhotoListResponse {
        success: true,
        photos,
    })
}

#[utoipa::path(
    delete,
    path = "/api/gallery/photo",
    tag = "gallery",
    params(
        ("id" = String, Query, description = "Photo id as returned by the listing, e.g. local-ab12cd")
    ),
    responses(
        (status = 200, description = "Photo deleted", body = PhotoDeleteResponse),
        (status = 400, description = "Id does not refer to a locally stored photo", body = ErrorResponse),
        (status = 404, description = "No stored photo matches the id", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn delete_photo(
    State(state): State<Arc<AppState>>,
    Query(query): Query<DeleteQuery>,
) -> Result<Json<PhotoDeleteResponse>, HttpAppError> {
    state.gallery.delete_photo(&query.id).await?;
    Ok(Json(PhotoDeleteResponse { success: true }))
}
