//! Structural parser service
//!
//! First-choice extraction strategy: reads the catalog header words for
//! diagnostics, then runs signature extraction over the whole file.

use super::scanner::{MIN_BUFFER_LEN, SignatureScanner};
use crate::domain::entities::{AssetRecord, CatalogHeader};
use tracing::debug;

/// Result of a structural parse
#[derive(Debug, Clone, Default)]
pub struct ParsedCatalog {
    pub header: Option<CatalogHeader>,
    pub assets: Vec<AssetRecord>,
}

impl ParsedCatalog {
    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }
}

#[derive(Debug, Clone, Default)]
pub struct StructuralParser {
    scanner: SignatureScanner,
}

impl StructuralParser {
    pub fn new(scanner: SignatureScanner) -> Self {
        Self { scanner }
    }

    /// Parses `data`; buffers too small for a header yield an empty result
    pub fn parse(&self, data: &[u8]) -> ParsedCatalog {
        if data.len() < MIN_BUFFER_LEN {
            return ParsedCatalog::default();
        }

        let header = CatalogHeader::read(data);
        if let Some(h) = header {
            debug!(
                magic = %format!("0x{:08X}", h.magic),
                version = h.version,
                bom_store = h.is_bom_store(),
                "catalog header"
            );
        }

        ParsedCatalog {
            header,
            assets: self.scanner.scan(data),
        }
    }
}
