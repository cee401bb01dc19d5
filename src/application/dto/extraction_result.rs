//! Extraction result DTO

use crate::domain::entities::{AssetKind, AssetRecord, CatalogHeader};
use crate::utils::format_bytes;
use std::collections::BTreeMap;
use std::fmt;
use std::time::Duration;

/// Which fallback level produced the records
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractionTier {
    /// Scanned payloads, correlated with metadata
    Scanned,
    /// Nothing was scanned; metadata entries became placeholders
    MetadataOnly,
    /// Neither source produced anything; the synthetic icon set was returned
    Synthetic,
}

impl fmt::Display for ExtractionTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ExtractionTier::Scanned => "signature scan",
            ExtractionTier::MetadataOnly => "metadata only",
            ExtractionTier::Synthetic => "synthetic placeholders",
        };
        f.write_str(label)
    }
}

/// Result of an extraction request
#[derive(Debug, Clone)]
pub struct ExtractionResult {
    pub records: Vec<AssetRecord>,
    pub tier: ExtractionTier,
    pub header: Option<CatalogHeader>,
    /// Number of metadata entries consulted
    pub metadata_entries: usize,
    pub bytes_scanned: u64,
    pub duration: Duration,
}

impl ExtractionResult {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records with a payload, either in memory or in scratch storage
    pub fn extracted_count(&self) -> usize {
        self.records.iter().filter(|r| r.payload().is_some()).count()
    }

    pub fn counts_by_kind(&self) -> BTreeMap<AssetKind, usize> {
        let mut counts = BTreeMap::new();
        for record in &self.records {
            *counts.entry(record.kind()).or_insert(0) += 1;
        }
        counts
    }

    pub fn summary(&self) -> String {
        let mut summary = format!(
            "Extraction complete: {} assets ({} with payloads) via {}\n",
            self.len(),
            self.extracted_count(),
            self.tier
        );

        summary.push_str(&format!(
            "Scanned {} in {:.2}s, {} metadata entries\n",
            format_bytes(self.bytes_scanned),
            self.duration.as_secs_f64(),
            self.metadata_entries
        ));

        for (kind, count) in self.counts_by_kind() {
            summary.push_str(&format!("  - {}: {}\n", kind, count));
        }

        summary
    }
}
