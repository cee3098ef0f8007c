//! Multipart form extraction for the upload endpoints.
//!
//! Pulls the parts out of a `multipart/form-data` body into an owned
//! form; validation happens afterwards so the validator sees the whole
//! submission (a missing file is its problem, not a parse error).

use axum::extract::multipart::MultipartError;
use axum::extract::Multipart;
use summit_core::AppError;

/// The file part of an upload form.
pub struct FilePart {
    pub data: Vec<u8>,
    pub filename: String,
    pub content_type: String,
}

/// All recognized parts of an upload form. Unknown parts are drained
/// and ignored.
#[derive(Default)]
pub struct UploadForm {
    pub file: Option<FilePart>,
    pub category: Option<String>,
    pub description: Option<String>,
    pub uploaded_by: Option<String>,
}

pub async fn extract_upload_form(mut multipart: Multipart) -> Result<UploadForm, AppError> {
    let mut form = UploadForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error("Invalid multipart body", e))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "file" => {
                if form.file.is_some() {
                    return Err(AppError::InvalidInput(
                        "Duplicate file part in upload form".to_string(),
                    ));
                }
                let filename = field.file_name().unwrap_or_default().to_string();
                let content_type = field.content_type().unwrap_or_default().to_string();
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| multipart_error("Failed to read file part", e))?;
                form.file = Some(FilePart {
                    data: data.to_vec(),
                    filename,
                    content_type,
                });
            }
            "category" => form.category = Some(read_text(field).await?),
            "description" => form.description = Some(read_text(field).await?),
            "uploadedBy" => form.uploaded_by = Some(read_text(field).await?),
            _ => {}
        }
    }

    Ok(form)
}

async fn read_text(field: axum::extract::multipart::Field<'_>) -> Result<String, AppError> {
    field
        .text()
        .await
        .map_err(|e| multipart_error("Failed to read form field", e))
}

/// A read that died on the request-body backstop is a size problem,
/// not a malformed body; report it as such.
fn multipart_error(context: &str, err: MultipartError) -> AppError {
    if is_length_limit(&err) {
        return AppError::PayloadTooLarge(
            "File too large: request body exceeds the upload limit".to_string(),
        );
    }
    AppError::InvalidInput(format!("{}: {}", context, err))
}

fn is_length_limit(err: &(dyn std::error::Error + 'static)) -> bool {
    let mut source = err.source();
    while let Some(inner) = source {
        if inner.is::<http_body_util::LengthLimitError>() {
            return true;
        }
        source = inner.source();
    }
    false
}
