//! Upload validation: the pure accept/reject decision plus stored-name
//! derivation. The byte write-through belongs to the storage layer;
//! everything here is a single-shot, stateless function of its inputs.

use crate::kinds;
use crate::naming;
use crate::surface::UploadSurface;
use chrono::Utc;

/// Validation failures, in the order they are checked. First failure
/// wins; later checks never run.
#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    #[error("No file was provided")]
    MissingFile,

    #[error("Unsupported file type: {mime} (allowed: {allowed})")]
    UnsupportedType { mime: String, allowed: String },

    #[error("Unsupported file extension: {extension} (allowed: {allowed})")]
    UnsupportedExtension { extension: String, allowed: String },

    #[error("File too large: {size} bytes (max {max} bytes)")]
    TooLarge { size: u64, max: u64 },

    #[error("Invalid category: {0}")]
    InvalidCategory(String),
}

/// A submitted file as declared by the client. Content is opaque; only
/// the size is inspected here.
#[derive(Debug, Clone)]
pub struct IncomingFile<'a> {
    pub filename: &'a str,
    pub content_type: &'a str,
    pub size: u64,
}

/// Result of a successful validation: everything the storage layer
/// needs to persist the bytes and everything the API layer needs to
/// answer the client.
#[derive(Debug, Clone)]
pub struct AcceptedUpload {
    pub category: String,
    pub sanitized_name: String,
    pub extension: String,
    pub content_type: String,
    pub size: u64,
    pub timestamp_ms: i64,
    pub token: String,
    pub stored_name: String,
    /// `{surfaceRoot}/{category}/{storedName}`, relative to the storage root.
    pub storage_key: String,
}

/// Validate a submitted file against a surface's allow-lists and size
/// ceiling, and derive its collision-resistant stored name.
///
/// Check order (first failure wins): presence, MIME allow-list,
/// extension allow-list, size ceiling (inclusive), category membership.
/// An omitted category becomes the surface default before the
/// membership check runs.
pub fn validate(
    surface: UploadSurface,
    file: Option<IncomingFile<'_>>,
    category: Option<&str>,
) -> Result<AcceptedUpload, UploadError> {
    let file = file.ok_or(UploadError::MissingFile)?;
    let kinds = surface.kinds();

    if !kinds::mime_allowed(kinds, file.content_type) {
        return Err(UploadError::UnsupportedType {
            mime: file.content_type.to_string(),
            allowed: kinds::allowed_mime_types(kinds).join(", "),
        });
    }

    let extension = naming::extension_of(file.filename);
    if !kinds::extension_allowed(kinds, &extension) {
        return Err(UploadError::UnsupportedExtension {
            extension,
            allowed: kinds::allowed_extensions(kinds).join(", "),
        });
    }

    let max = surface.max_file_size();
    if file.size > max {
        return Err(UploadError::TooLarge {
            size: file.size,
            max,
        });
    }

    let category = category
        .filter(|c| !c.trim().is_empty())
        .unwrap_or_else(|| surface.default_category());
    if !surface.is_valid_category(category) {
        return Err(UploadError::InvalidCategory(category.to_string()));
    }

    let sanitized_name = naming::sanitize_filename(file.filename);
    let timestamp_ms = Utc::now().timestamp_millis();
    let token = naming::random_token();
    let stored_name = match surface {
        UploadSurface::Document => {
            naming::document_stored_name(timestamp_ms, &token, &sanitized_name)
        }
        UploadSurface::Gallery => naming::gallery_stored_name(timestamp_ms, &token, &extension),
    };
    let storage_key = format!("{}/{}/{}", surface.root(), category, stored_name);

    Ok(AcceptedUpload {
        category: category.to_string(),
        sanitized_name,
        extension,
        content_type: kinds::normalize_mime(file.content_type),
        size: file.size,
        timestamp_ms,
        token,
        stored_name,
        storage_key,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::naming::parse_stored_name;
    use crate::surface::{DOCUMENT_MAX_FILE_SIZE, GALLERY_MAX_FILE_SIZE};

    fn pdf(size: u64) -> IncomingFile<'static> {
        IncomingFile {
            filename: "report.pdf",
            content_type: "application/pdf",
            size,
        }
    }

    #[test]
    fn missing_file_wins_over_everything() {
        let err = validate(UploadSurface::Document, None, Some("bogus")).unwrap_err();
        assert!(matches!(err, UploadError::MissingFile));
    }

    #[test]
    fn mime_outside_allowlist_rejected_regardless_of_extension() {
        let file = IncomingFile {
            filename: "innocent.pdf",
            content_type: "application/x-msdownload",
            size: 10,
        };
        let err = validate(UploadSurface::Document, Some(file), None).unwrap_err();
        assert!(matches!(err, UploadError::UnsupportedType { .. }));
    }

    #[test]
    fn mime_checked_before_extension() {
        // Both checks would fail; the MIME one must win.
        let file = IncomingFile {
            filename: "script.exe",
            content_type: "application/x-msdownload",
            size: 10,
        };
        let err = validate(UploadSurface::Document, Some(file), None).unwrap_err();
        assert!(matches!(err, UploadError::UnsupportedType { .. }));
    }

    #[test]
    fn extension_outside_allowlist_rejected() {
        let file = IncomingFile {
            filename: "payload.exe",
            content_type: "application/pdf",
            size: 10,
        };
        let err = validate(UploadSurface::Document, Some(file), None).unwrap_err();
        assert!(matches!(err, UploadError::UnsupportedExtension { .. }));
    }

    #[test]
    fn size_ceiling_is_inclusive() {
        assert!(validate(UploadSurface::Document, Some(pdf(DOCUMENT_MAX_FILE_SIZE)), None).is_ok());

        let err =
            validate(UploadSurface::Document, Some(pdf(DOCUMENT_MAX_FILE_SIZE + 1)), None)
                .unwrap_err();
        assert!(matches!(err, UploadError::TooLarge { .. }));
    }

    #[test]
    fn gallery_has_its_own_ceiling() {
        let file = IncomingFile {
            filename: "big.png",
            content_type: "image/png",
            size: GALLERY_MAX_FILE_SIZE + 1,
        };
        let err = validate(UploadSurface::Gallery, Some(file), None).unwrap_err();
        assert!(matches!(err, UploadError::TooLarge { .. }));
    }

    #[test]
    fn omitted_category_gets_surface_default() {
        let accepted = validate(UploadSurface::Document, Some(pdf(100)), None).unwrap();
        assert_eq!(accepted.category, "resources");
        assert!(accepted.storage_key.starts_with("documents/resources/"));

        let file = IncomingFile {
            filename: "pic.jpg",
            content_type: "image/jpeg",
            size: 100,
        };
        let accepted = validate(UploadSurface::Gallery, Some(file), Some("  ")).unwrap();
        assert_eq!(accepted.category, "other");
    }

    #[test]
    fn unknown_category_rejected() {
        let err = validate(UploadSurface::Document, Some(pdf(100)), Some("misc")).unwrap_err();
        assert!(matches!(err, UploadError::InvalidCategory(c) if c == "misc"));

        // Category sets are per-surface: a document category is not a
        // gallery category.
        let file = IncomingFile {
            filename: "pic.jpg",
            content_type: "image/jpeg",
            size: 100,
        };
        let err = validate(UploadSurface::Gallery, Some(file), Some("resources")).unwrap_err();
        assert!(matches!(err, UploadError::InvalidCategory(_)));
    }

    #[test]
    fn resume_example_from_the_field() {
        let file = IncomingFile {
            filename: "My Résumé.PDF",
            content_type: "application/pdf",
            size: 2 * 1024 * 1024,
        };
        let accepted = validate(UploadSurface::Document, Some(file), Some("resources")).unwrap();
        assert_eq!(accepted.sanitized_name, "my_r_sum_.pdf");
        assert!(accepted.stored_name.ends_with("-my_r_sum_.pdf"));
        assert!(accepted.storage_key.starts_with("documents/resources/"));
    }

    #[test]
    fn stored_name_parses_back() {
        let before = Utc::now().timestamp_millis();
        let accepted = validate(UploadSurface::Document, Some(pdf(100)), None).unwrap();
        let parsed = parse_stored_name(&accepted.stored_name).unwrap();
        assert_eq!(parsed.token, accepted.token);
        assert!(parsed.timestamp_ms >= before);
        assert!(parsed.timestamp_ms <= Utc::now().timestamp_millis());
        assert!(parsed.token.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit()));
    }

    #[test]
    fn gallery_stored_name_carries_extension_only() {
        let file = IncomingFile {
            filename: "Team Photo.JPG",
            content_type: "image/jpeg",
            size: 100,
        };
        let accepted = validate(UploadSurface::Gallery, Some(file), Some("summit")).unwrap();
        assert!(accepted.stored_name.ends_with(".jpg"));
        assert_eq!(
            accepted.stored_name,
            format!("{}-{}.jpg", accepted.timestamp_ms, accepted.token)
        );
        assert!(accepted.storage_key.starts_with("images/gallery/summit/"));
    }

    #[test]
    fn declared_mime_is_normalized() {
        let file = IncomingFile {
            filename: "pic.png",
            content_type: "IMAGE/PNG; charset=binary",
            size: 100,
        };
        let accepted = validate(UploadSurface::Gallery, Some(file), None).unwrap();
        assert_eq!(accepted.content_type, "image/png");
    }
}
