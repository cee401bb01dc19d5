//! carscan - asset extraction for compiled asset catalogs
//!
//! Recovers images, vector documents and data blobs embedded in `.car`
//! archives. Extraction is signature-driven: payloads are located by their
//! magic bytes, bounded by format-specific end markers, validated and then
//! merged with whatever the platform metadata tool reports.

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod presentation;
pub mod utils;
