//! Wire-level records shared by the storage and API layers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Prefix marking photo ids this system can delete.
pub const LOCAL_ID_PREFIX: &str = "local-";

/// Where a gallery photo lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum PhotoSource {
    /// Stored in a category directory under this site's storage root.
    Local,
    /// Externally hosted; listed but never deletable here.
    Google,
}

/// One gallery listing entry.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PhotoRecord {
    pub id: String,
    pub url: String,
    /// Identical to `url`; no thumbnailing pipeline exists.
    pub thumbnail_url: String,
    /// Filename without extension.
    pub name: String,
    pub uploaded_at: DateTime<Utc>,
    pub category: String,
    pub source: PhotoSource,
}

/// One entry of the generated `documents/resources.json` manifest.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ManifestEntry {
    /// base64 of the URL path, trailing `=` stripped.
    pub id: String,
    /// Stored filename on disk.
    pub name: String,
    /// Sanitized original name recovered from the stored-name tail.
    pub original_name: String,
    pub url: String,
    pub size: u64,
    #[serde(rename = "type")]
    pub content_type: String,
    pub uploaded_at: DateTime<Utc>,
}
