//! Allowed file kinds per upload surface.
//!
//! One table maps each logical kind to both its MIME values and its
//! extensions, so the MIME check and the extension check cannot drift
//! apart. Both allow-lists are derived from here.

/// A logical file kind: the MIME values a client may declare for it and
/// the filename extensions it may carry.
#[derive(Debug, Clone, Copy)]
pub struct FileKind {
    pub name: &'static str,
    pub mime_types: &'static [&'static str],
    pub extensions: &'static [&'static str],
}

const PDF: FileKind = FileKind {
    name: "pdf",
    mime_types: &["application/pdf"],
    extensions: &["pdf"],
};

const WORD: FileKind = FileKind {
    name: "word",
    mime_types: &[
        "application/msword",
        "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
    ],
    extensions: &["doc", "docx"],
};

const EXCEL: FileKind = FileKind {
    name: "excel",
    mime_types: &[
        "application/vnd.ms-excel",
        "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
    ],
    extensions: &["xls", "xlsx"],
};

const POWERPOINT: FileKind = FileKind {
    name: "powerpoint",
    mime_types: &[
        "application/vnd.ms-powerpoint",
        "application/vnd.openxmlformats-officedocument.presentationml.presentation",
    ],
    extensions: &["ppt", "pptx"],
};

const PLAIN_TEXT: FileKind = FileKind {
    name: "text",
    mime_types: &["text/plain"],
    extensions: &["txt"],
};

const CSV: FileKind = FileKind {
    name: "csv",
    mime_types: &["text/csv"],
    extensions: &["csv"],
};

const JPEG: FileKind = FileKind {
    name: "jpeg",
    mime_types: &["image/jpeg"],
    extensions: &["jpg", "jpeg"],
};

const PNG: FileKind = FileKind {
    name: "png",
    mime_types: &["image/png"],
    extensions: &["png"],
};

const GIF: FileKind = FileKind {
    name: "gif",
    mime_types: &["image/gif"],
    extensions: &["gif"],
};

const WEBP: FileKind = FileKind {
    name: "webp",
    mime_types: &["image/webp"],
    extensions: &["webp"],
};

/// Kinds accepted on the document surface: office formats, plain
/// text/CSV, and common raster images.
pub const DOCUMENT_KINDS: &[FileKind] = &[
    PDF, WORD, EXCEL, POWERPOINT, PLAIN_TEXT, CSV, JPEG, PNG, GIF, WEBP,
];

/// Kinds accepted on the gallery surface: raster images only.
pub const GALLERY_KINDS: &[FileKind] = &[JPEG, PNG, GIF, WEBP];

/// Normalize a declared MIME type: strip parameters and lowercase
/// (e.g. "image/JPEG; charset=utf-8" -> "image/jpeg").
pub fn normalize_mime(content_type: &str) -> String {
    content_type
        .split(';')
        .next()
        .unwrap_or(content_type)
        .trim()
        .to_lowercase()
}

/// Whether the declared MIME type belongs to any kind in the table.
pub fn mime_allowed(kinds: &[FileKind], content_type: &str) -> bool {
    let normalized = normalize_mime(content_type);
    kinds
        .iter()
        .any(|k| k.mime_types.iter().any(|m| *m == normalized))
}

/// Whether the (already lowercased) extension belongs to any kind.
pub fn extension_allowed(kinds: &[FileKind], extension: &str) -> bool {
    kinds
        .iter()
        .any(|k| k.extensions.iter().any(|e| *e == extension))
}

/// The canonical MIME type for an extension, used when re-deriving
/// metadata from a filename on disk.
pub fn mime_for_extension(kinds: &[FileKind], extension: &str) -> Option<&'static str> {
    let extension = extension.to_lowercase();
    kinds
        .iter()
        .find(|k| k.extensions.iter().any(|e| *e == extension))
        .and_then(|k| k.mime_types.first().copied())
}

/// All MIME values in the table, for error messages.
pub fn allowed_mime_types(kinds: &[FileKind]) -> Vec<&'static str> {
    kinds.iter().flat_map(|k| k.mime_types.iter().copied()).collect()
}

/// All extensions in the table, for error messages.
pub fn allowed_extensions(kinds: &[FileKind]) -> Vec<&'static str> {
    kinds.iter().flat_map(|k| k.extensions.iter().copied()).collect()
}
