//! Catalog analyzer service
//!
//! Summary-only pass used for a fast first look at a catalog. Counts raw
//! signature hits instead of resolving boundaries, and guesses the
//! compression scheme from well-known stream magics.

use super::signature_catalog::SignatureCatalog;
use crate::domain::entities::{
    AssetKind, CatalogHeader, CatalogSummary, CountSource, KindCounts, MetadataRecord,
};
use crate::utils::{format_bytes, hex_dump};
use memchr::memmem;
use std::collections::BTreeSet;

const HEADER_DUMP_LEN: usize = 16;
const ZLIB_MAGIC: &[u8] = &[0x78, 0x9C];
const GZIP_MAGIC: &[u8] = &[0x1F, 0x8B];
pub const DEFAULT_COMPRESSION_GUESS: &str = "optimized binary format";

#[derive(Debug, Clone, Default)]
pub struct CatalogAnalyzer {
    catalog: SignatureCatalog,
}

impl CatalogAnalyzer {
    pub fn new(catalog: SignatureCatalog) -> Self {
        Self { catalog }
    }

    /// Summarizes `data` from its bytes alone
    pub fn analyze(&self, data: &[u8]) -> CatalogSummary {
        let (header_hex, header) = if data.len() >= HEADER_DUMP_LEN {
            (
                Some(hex_dump(&data[..HEADER_DUMP_LEN])),
                CatalogHeader::read(data),
            )
        } else {
            (None, None)
        };

        CatalogSummary {
            file_size: format_bytes(data.len() as u64),
            byte_len: data.len() as u64,
            header_hex,
            header,
            counts: self.catalog.count_occurrences(data),
            count_source: CountSource::SignatureEstimate,
            detected_types: self.catalog.describe_present(data),
            compression: guess_compression(data).to_string(),
        }
    }

    /// Summarizes `data`, replacing the signature estimate with metadata kind
    /// counts when any metadata is available
    pub fn analyze_with_metadata(
        &self,
        data: &[u8],
        metadata: &[MetadataRecord],
    ) -> CatalogSummary {
        let mut summary = self.analyze(data);
        if metadata.is_empty() {
            return summary;
        }

        let mut counts = KindCounts::default();
        for record in metadata {
            counts.add(record.kind(), 1);
        }
        summary.counts = counts;
        summary.count_source = CountSource::Metadata;
        summary.detected_types = describe_counts(&counts);

        let tags: BTreeSet<&str> = metadata
            .iter()
            .map(|m| m.compression.as_str())
            .filter(|c| !c.is_empty())
            .collect();
        match tags.len() {
            0 => {}
            1 => summary.compression = tags.into_iter().collect(),
            _ => {
                summary.compression = format!(
                    "Mixed compression ({})",
                    tags.into_iter().collect::<Vec<_>>().join(", ")
                )
            }
        }
        summary
    }
}

fn guess_compression(data: &[u8]) -> &'static str {
    if memmem::find(data, ZLIB_MAGIC).is_some() {
        "zlib compressed"
    } else if memmem::find(data, GZIP_MAGIC).is_some() {
        "gzip compressed"
    } else {
        DEFAULT_COMPRESSION_GUESS
    }
}

fn describe_counts(counts: &KindCounts) -> String {
    let parts: Vec<String> = AssetKind::ALL
        .iter()
        .filter(|kind| counts.get(**kind) > 0)
        .map(|kind| {
            let noun = match kind {
                AssetKind::Image => "images",
                AssetKind::Vector => "vectors",
                AssetKind::Data => "data assets",
            };
            format!("{} {}", counts.get(*kind), noun)
        })
        .collect();

    if parts.is_empty() {
        "Unknown content".to_string()
    } else {
        parts.join(", ")
    }
}
