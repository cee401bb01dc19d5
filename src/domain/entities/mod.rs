//! Domain entities
//!
//! Core objects of the catalog extraction domain.

mod asset_record;
mod catalog_summary;
mod metadata_record;
mod signature;

pub use asset_record::{AssetRecord, AssetSource, PayloadLocation, Scale};
pub use catalog_summary::{CatalogHeader, CatalogSummary, CountSource, KindCounts};
pub use metadata_record::MetadataRecord;
pub use signature::{AssetKind, EndStrategy, SignatureSpec};
