//! HTTP surface of the summit media backend.
//!
//! Exposed as a library so integration tests can mount the router on
//! an in-process test server.

pub mod api_doc;
pub mod error;
pub mod handlers;
pub mod multipart;
pub mod setup;
pub mod state;
pub mod telemetry;
