//! Signature scanner service
//!
//! Drives the catalog, boundary resolver, validator and scale inferer over
//! a whole archive buffer. Each signature family keeps its own cursor, so
//! families are scanned independently (in parallel with rayon) and merged
//! back in archive-offset order.

use super::boundary::BoundaryResolver;
use super::scale::ScaleInferer;
use super::signature_catalog::SignatureCatalog;
use super::validator::PayloadValidator;
use crate::domain::entities::{AssetRecord, Scale, SignatureSpec};
use memchr::memmem;
use rayon::prelude::*;
use tracing::{debug, trace};

/// Buffers shorter than this cannot hold a catalog header
pub const MIN_BUFFER_LEN: usize = 16;
/// Ranges shorter than this are treated as false positives
pub const MIN_PAYLOAD_LEN: usize = 100;

#[derive(Debug, Clone, Copy)]
struct Candidate {
    start: usize,
    end: usize,
    spec: SignatureSpec,
    scale: Scale,
}

/// Recovers embedded payloads from raw archive bytes
#[derive(Debug, Clone, Default)]
pub struct SignatureScanner {
    catalog: SignatureCatalog,
    validator: PayloadValidator,
    scale_inferer: ScaleInferer,
}

impl SignatureScanner {
    pub fn new(catalog: SignatureCatalog) -> Self {
        Self {
            catalog,
            validator: PayloadValidator::new(),
            scale_inferer: ScaleInferer::new(),
        }
    }

    pub fn catalog(&self) -> &SignatureCatalog {
        &self.catalog
    }

    /// Scans `data` and returns one record per validated payload, ordered by offset.
    ///
    /// Never fails: short, empty or adversarial buffers yield fewer (or no) records.
    pub fn scan(&self, data: &[u8]) -> Vec<AssetRecord> {
        if data.len() < MIN_BUFFER_LEN {
            return Vec::new();
        }

        let mut candidates: Vec<Candidate> = self
            .catalog
            .signatures()
            .par_iter()
            .flat_map_iter(|spec| self.scan_family(spec, data))
            .collect();

        // Stable: equal offsets keep catalog priority order
        candidates.sort_by_key(|c| c.start);

        candidates
            .into_iter()
            .enumerate()
            .map(|(index, c)| {
                let name = format!(
                    "{}_{:04}.{}",
                    c.spec.kind().file_prefix(),
                    index,
                    c.spec.extension()
                );
                AssetRecord::extracted(
                    name,
                    c.spec.kind(),
                    c.start as u64,
                    data[c.start..c.end].to_vec(),
                    c.scale,
                )
            })
            .collect()
    }

    fn scan_family(&self, spec: &SignatureSpec, data: &[u8]) -> Vec<Candidate> {
        let resolver = BoundaryResolver::new(&self.catalog);
        let finder = memmem::Finder::new(spec.magic());
        let mut found = Vec::new();
        let mut cursor = 0;

        while let Some(pos) = finder.find(&data[cursor..]) {
            let start = cursor + pos;
            let end = resolver.resolve(start, spec, data);
            let payload = &data[start..end];

            if payload.len() < MIN_PAYLOAD_LEN {
                trace!(offset = start, len = payload.len(), "candidate below minimum size");
            } else {
                let verdict = self.validator.check(payload, spec.kind());
                if verdict.is_valid() {
                    found.push(Candidate {
                        start,
                        end,
                        spec: *spec,
                        scale: self.scale_inferer.infer(start, data),
                    });
                    cursor = end;
                    if cursor >= data.len() {
                        break;
                    }
                    continue;
                }
                debug!(
                    offset = start,
                    extension = spec.extension(),
                    reason = verdict.reason(),
                    "rejected candidate"
                );
            }

            cursor = start + 1;
            if cursor >= data.len() {
                break;
            }
        }

        found
    }
}
