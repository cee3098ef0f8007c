//! Filesystem side of the summit media backend.
//!
//! `LocalStorage` maps storage keys onto a directory tree under the
//! public root and does the byte write-through; `GalleryScanner`
//! re-derives the photo listing from the filenames on disk; the
//! manifest module regenerates `documents/resources.json`. There is no
//! database: the stored filename is the only persisted state.

pub mod error;
pub mod gallery;
pub mod local;
pub mod manifest;

pub use error::{StorageError, StorageResult};
pub use gallery::{GalleryError, GalleryScanner};
pub use local::LocalStorage;
pub use manifest::ManifestGenerator;
