//! Core domain types for the summit media backend: upload surfaces,
//! the file-kind table, the upload validator, stored-name encoding,
//! configuration, and the shared error types.

pub mod config;
pub mod error;
pub mod kinds;
pub mod models;
pub mod naming;
pub mod surface;
pub mod validator;

pub use config::Config;
pub use error::{AppError, ErrorMetadata, LogLevel};
