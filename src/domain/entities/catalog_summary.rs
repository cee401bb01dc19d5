//! Catalog summary entity
//!
//! Fast first-look statistics about a catalog, produced without extraction.

use super::signature::AssetKind;
use serde::Serialize;
use std::fmt;

const BOM_STORE_TAG: &[u8; 8] = b"BOMStore";

/// Leading header words of a catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CatalogHeader {
    pub magic: u32,
    pub version: u32,
    bom_store: bool,
}

impl CatalogHeader {
    /// Reads the first 8 bytes as two little-endian words
    pub fn read(data: &[u8]) -> Option<Self> {
        let head: &[u8; 8] = data.get(..8)?.try_into().ok()?;
        Some(Self {
            magic: u32::from_le_bytes([head[0], head[1], head[2], head[3]]),
            version: u32::from_le_bytes([head[4], head[5], head[6], head[7]]),
            bom_store: head == BOM_STORE_TAG,
        })
    }

    /// Whether the file starts with the `BOMStore` container tag
    pub fn is_bom_store(&self) -> bool {
        self.bom_store
    }
}

/// Where the per-kind counts of a summary came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CountSource {
    /// Raw signature occurrences; not boundary-resolved
    SignatureEstimate,
    /// Entries reported by the metadata tool
    Metadata,
}

/// Per-kind asset counts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct KindCounts {
    pub images: usize,
    pub vectors: usize,
    pub data: usize,
}

impl KindCounts {
    pub fn add(&mut self, kind: AssetKind, count: usize) {
        match kind {
            AssetKind::Image => self.images += count,
            AssetKind::Vector => self.vectors += count,
            AssetKind::Data => self.data += count,
        }
    }

    pub fn get(&self, kind: AssetKind) -> usize {
        match kind {
            AssetKind::Image => self.images,
            AssetKind::Vector => self.vectors,
            AssetKind::Data => self.data,
        }
    }

    pub fn total(&self) -> usize {
        self.images + self.vectors + self.data
    }
}

/// Human-oriented summary of a catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogSummary {
    pub file_size: String,
    pub byte_len: u64,
    pub header_hex: Option<String>,
    pub header: Option<CatalogHeader>,
    pub counts: KindCounts,
    pub count_source: CountSource,
    pub detected_types: String,
    pub compression: String,
}

impl CatalogSummary {
    /// Formats the magic number as `0xXXXXXXXX`
    pub fn magic_number(&self) -> Option<String> {
        self.header.map(|h| format!("0x{:08X}", h.magic))
    }

    /// Describes the asset count and how it was obtained
    pub fn estimated_asset_count(&self) -> String {
        match self.count_source {
            CountSource::SignatureEstimate => {
                format!("~{} potential assets detected", self.counts.total())
            }
            CountSource::Metadata => {
                format!("{} assets detected via metadata", self.counts.total())
            }
        }
    }
}

impl fmt::Display for CatalogSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "File size:      {}", self.file_size)?;
        if let Some(magic) = self.magic_number() {
            writeln!(f, "Magic number:   {}", magic)?;
        }
        if let Some(hex) = &self.header_hex {
            writeln!(f, "Header:         {}", hex)?;
        }
        writeln!(f, "Assets:         {}", self.estimated_asset_count())?;
        writeln!(f, "Detected types: {}", self.detected_types)?;
        write!(f, "Compression:    {}", self.compression)
    }
}
