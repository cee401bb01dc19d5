//! Metadata source trait
//!
//! Abstracts the external catalog inspection capability so the extraction
//! flow can run against the real tool or a fixed record list.

use crate::domain::entities::MetadataRecord;
use std::future::Future;
use std::path::Path;

/// Provider of catalog metadata
///
/// Implementations never fail: an unavailable or misbehaving source yields
/// an empty list, and the extraction flow degrades accordingly.
pub trait MetadataSource: Send + Sync {
    /// Returns the entries describing the catalog at `catalog`, sorted by display name
    fn records(&self, catalog: &Path) -> impl Future<Output = Vec<MetadataRecord>> + Send;
}

/// Source that never reports anything
#[derive(Debug, Clone, Copy, Default)]
pub struct NoMetadata;

impl MetadataSource for NoMetadata {
    async fn records(&self, _catalog: &Path) -> Vec<MetadataRecord> {
        Vec::new()
    }
}

/// Source returning a fixed record list, regardless of the catalog path
#[derive(Debug, Clone, Default)]
pub struct StaticMetadata {
    records: Vec<MetadataRecord>,
}

impl StaticMetadata {
    pub fn new(mut records: Vec<MetadataRecord>) -> Self {
        records.sort_by_key(|r| r.display_name());
        Self { records }
    }
}

impl MetadataSource for StaticMetadata {
    async fn records(&self, _catalog: &Path) -> Vec<MetadataRecord> {
        self.records.clone()
    }
}
