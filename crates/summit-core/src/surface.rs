//! Upload surfaces and their category sets.
//!
//! Each surface has its own storage root, size ceiling, allowed file
//! kinds, and enumerated category set with an explicit default. The
//! default is part of the validator's input contract: an omitted
//! category is substituted before membership is checked.

use crate::kinds::{FileKind, DOCUMENT_KINDS, GALLERY_KINDS};
use serde::{Deserialize, Serialize};

/// Size ceiling for the document surface (inclusive).
pub const DOCUMENT_MAX_FILE_SIZE: u64 = 25 * 1024 * 1024;
/// Size ceiling for the gallery surface (inclusive).
pub const GALLERY_MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;

/// Category for uploaded documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "kebab-case")]
pub enum DocumentCategory {
    PanelistMaterials,
    SummitDocs,
    Resources,
    Presentations,
}

impl DocumentCategory {
    /// Fixed scan order for directory walks.
    pub const ALL: [DocumentCategory; 4] = [
        DocumentCategory::PanelistMaterials,
        DocumentCategory::SummitDocs,
        DocumentCategory::Resources,
        DocumentCategory::Presentations,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentCategory::PanelistMaterials => "panelist-materials",
            DocumentCategory::SummitDocs => "summit-docs",
            DocumentCategory::Resources => "resources",
            DocumentCategory::Presentations => "presentations",
        }
    }
}

/// Category for gallery photos.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "kebab-case")]
pub enum GalleryCategory {
    Summit,
    Networking,
    Other,
}

impl GalleryCategory {
    /// Fixed scan order for listing and delete-by-token.
    pub const ALL: [GalleryCategory; 3] = [
        GalleryCategory::Summit,
        GalleryCategory::Networking,
        GalleryCategory::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            GalleryCategory::Summit => "summit",
            GalleryCategory::Networking => "networking",
            GalleryCategory::Other => "other",
        }
    }
}

/// The two upload surfaces of the site.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadSurface {
    Document,
    Gallery,
}

impl UploadSurface {
    /// Root path segment under the public storage root.
    pub fn root(&self) -> &'static str {
        match self {
            UploadSurface::Document => "documents",
            UploadSurface::Gallery => "images/gallery",
        }
    }

    /// Allowed file kinds (drives both MIME and extension checks).
    pub fn kinds(&self) -> &'static [FileKind] {
        match self {
            UploadSurface::Document => DOCUMENT_KINDS,
            UploadSurface::Gallery => GALLERY_KINDS,
        }
    }

    /// Inclusive byte-size ceiling.
    pub fn max_file_size(&self) -> u64 {
        match self {
            UploadSurface::Document => DOCUMENT_MAX_FILE_SIZE,
            UploadSurface::Gallery => GALLERY_MAX_FILE_SIZE,
        }
    }

    /// Enumerated category set, in fixed order.
    pub fn categories(&self) -> &'static [&'static str] {
        match self {
            UploadSurface::Document => &[
                "panelist-materials",
                "summit-docs",
                "resources",
                "presentations",
            ],
            UploadSurface::Gallery => &["summit", "networking", "other"],
        }
    }

    /// Category substituted when the caller omits one.
    pub fn default_category(&self) -> &'static str {
        match self {
            UploadSurface::Document => "resources",
            UploadSurface::Gallery => "other",
        }
    }

    pub fn is_valid_category(&self, category: &str) -> bool {
        self.categories().contains(&category)
    }
}
