//! Signature catalog service
//!
//! Holds the table of payload signatures searched for inside a compiled
//! asset catalog. Uses Aho-Corasick for the cheap multi-pattern occurrence
//! counts needed by the analyzer.

use crate::domain::entities::{AssetKind, EndStrategy, KindCounts, SignatureSpec};
use aho_corasick::AhoCorasick;

pub const PNG_MAGIC: &[u8] = &[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];
pub const JPEG_MAGIC: &[u8] = &[0xFF, 0xD8, 0xFF];
pub const PDF_EOF: &[u8] = b"%%EOF";

const DATA_WINDOW: usize = 1024;

const fn jpeg(magic: &'static [u8]) -> SignatureSpec {
    SignatureSpec::new(magic, AssetKind::Image, "jpg", EndStrategy::JpegEndOfImage)
}

const fn gif(magic: &'static [u8]) -> SignatureSpec {
    SignatureSpec::new(magic, AssetKind::Image, "gif", EndStrategy::GifBlocks)
}

/// Standard signatures, in scan priority order
static STANDARD_SIGNATURES: [SignatureSpec; 9] = [
    SignatureSpec::new(PNG_MAGIC, AssetKind::Image, "png", EndStrategy::PngEndChunk),
    // JPEG: SOI followed by APP0 (JFIF), APP1 (Exif), DQT, APP14 (Adobe)
    jpeg(&[0xFF, 0xD8, 0xFF, 0xE0]),
    jpeg(&[0xFF, 0xD8, 0xFF, 0xE1]),
    jpeg(&[0xFF, 0xD8, 0xFF, 0xDB]),
    jpeg(&[0xFF, 0xD8, 0xFF, 0xEE]),
    gif(b"GIF89a"),
    gif(b"GIF87a"),
    SignatureSpec::new(b"%PDF", AssetKind::Vector, "pdf", EndStrategy::Trailer(PDF_EOF)),
    SignatureSpec::new(
        b"bplist00",
        AssetKind::Data,
        "plist",
        EndStrategy::FixedWindow(DATA_WINDOW),
    ),
];

/// Table of known payload signatures
///
/// # Example
///
/// ```
/// use carscan::domain::services::SignatureCatalog;
/// use carscan::domain::entities::AssetKind;
///
/// let catalog = SignatureCatalog::standard();
/// let data = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00];
/// let spec = catalog.match_at(&data).unwrap();
/// assert_eq!(spec.kind(), AssetKind::Image);
/// assert_eq!(spec.extension(), "png");
/// ```
#[derive(Debug, Clone)]
pub struct SignatureCatalog {
    signatures: Vec<SignatureSpec>,
    /// Aho-Corasick automaton over every magic; pattern index == signature index
    pattern_matcher: Option<AhoCorasick>,
}

impl SignatureCatalog {
    /// Creates a catalog from an explicit signature list
    pub fn new(signatures: Vec<SignatureSpec>) -> Self {
        let pattern_matcher = if signatures.is_empty() {
            None
        } else {
            AhoCorasick::new(signatures.iter().map(|s| s.magic())).ok()
        };
        Self {
            signatures,
            pattern_matcher,
        }
    }

    /// Creates the catalog of standard image, vector and data signatures
    pub fn standard() -> Self {
        Self::new(STANDARD_SIGNATURES.to_vec())
    }

    /// Returns all signatures in priority order
    pub fn signatures(&self) -> &[SignatureSpec] {
        &self.signatures
    }

    /// Returns the number of registered signatures
    pub fn len(&self) -> usize {
        self.signatures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.signatures.is_empty()
    }

    /// Returns the first signature whose magic starts `data`
    pub fn match_at(&self, data: &[u8]) -> Option<&SignatureSpec> {
        self.signatures.iter().find(|s| s.matches_header(data))
    }

    /// Whether any known signature starts `data`
    pub fn starts_signature(&self, data: &[u8]) -> bool {
        self.match_at(data).is_some()
    }

    /// Counts raw, non-overlapping signature occurrences, grouped by kind
    ///
    /// Hits are not boundary-resolved or validated, so this is an upper-bound
    /// estimate that costs a single pass over the data.
    pub fn count_occurrences(&self, data: &[u8]) -> KindCounts {
        let mut counts = KindCounts::default();
        let Some(matcher) = &self.pattern_matcher else {
            return counts;
        };
        for mat in matcher.find_iter(data) {
            if let Some(spec) = self.signatures.get(mat.pattern().as_usize()) {
                counts.add(spec.kind(), 1);
            }
        }
        counts
    }

    /// Lists which signature families occur at least once, e.g. "PNG images, PDF vectors"
    pub fn describe_present(&self, data: &[u8]) -> String {
        let mut present: Vec<&'static str> = Vec::new();
        let Some(matcher) = &self.pattern_matcher else {
            return "Unknown content".to_string();
        };
        for mat in matcher.find_iter(data) {
            if let Some(spec) = self.signatures.get(mat.pattern().as_usize()) {
                let label = family_label(spec);
                if !present.contains(&label) {
                    present.push(label);
                }
            }
        }
        if present.is_empty() {
            "Unknown content".to_string()
        } else {
            present.join(", ")
        }
    }
}

impl Default for SignatureCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

fn family_label(spec: &SignatureSpec) -> &'static str {
    match spec.extension() {
        "png" => "PNG images",
        "jpg" => "JPEG images",
        "gif" => "GIF images",
        "pdf" => "PDF vectors",
        "plist" => "binary plists",
        _ => match spec.kind() {
            AssetKind::Image => "images",
            AssetKind::Vector => "vectors",
            AssetKind::Data => "data blobs",
        },
    }
}
