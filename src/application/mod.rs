//! Application layer
//!
//! Use cases that orchestrate the domain services.

pub mod dto;
mod analyze_catalog;
mod extract_assets;

pub use analyze_catalog::AnalyzeCatalogUseCase;
pub use extract_assets::{ExtractAssetsUseCase, ExtractionError};
