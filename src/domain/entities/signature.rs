//! Signature entity
//!
//! Describes the leading magic bytes of a payload embedded inside a compiled
//! asset catalog, together with the strategy used to find where it ends.

use serde::Serialize;
use std::fmt;

/// Kind of content recovered from a catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum AssetKind {
    /// Raster image (PNG, JPEG, GIF)
    Image,
    /// Vector document (PDF)
    Vector,
    /// Opaque data blob
    Data,
}

impl AssetKind {
    /// Every kind, in display order
    pub const ALL: [AssetKind; 3] = [AssetKind::Image, AssetKind::Vector, AssetKind::Data];

    /// Returns a human-readable name for this kind
    pub fn name(&self) -> &'static str {
        match self {
            AssetKind::Image => "Image",
            AssetKind::Vector => "Vector",
            AssetKind::Data => "Data",
        }
    }

    /// Lowercase prefix used when naming extracted payloads
    pub fn file_prefix(&self) -> &'static str {
        match self {
            AssetKind::Image => "image",
            AssetKind::Vector => "vector",
            AssetKind::Data => "data",
        }
    }

    /// Upper bound on a payload of this kind when no end marker is found
    pub fn size_cap(&self) -> usize {
        match self {
            AssetKind::Image => 2 * 1024 * 1024,
            AssetKind::Vector => 10 * 1024 * 1024,
            AssetKind::Data => 1024,
        }
    }
}

impl fmt::Display for AssetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// How the end of a payload is located once its start is known
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndStrategy {
    /// PNG `IEND` chunk, then the next PNG magic, then the size cap
    PngEndChunk,
    /// JPEG end-of-image marker confirmed by what follows it
    JpegEndOfImage,
    /// GIF block structure walked to its trailer byte
    GifBlocks,
    /// First occurrence of a literal trailer, inclusive
    Trailer(&'static [u8]),
    /// Fixed window from the start offset
    FixedWindow(usize),
}

/// Immutable description of one recognizable payload format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SignatureSpec {
    magic: &'static [u8],
    kind: AssetKind,
    extension: &'static str,
    end_strategy: EndStrategy,
}

impl SignatureSpec {
    /// Creates a new signature
    pub const fn new(
        magic: &'static [u8],
        kind: AssetKind,
        extension: &'static str,
        end_strategy: EndStrategy,
    ) -> Self {
        Self {
            magic,
            kind,
            extension,
            end_strategy,
        }
    }

    /// Returns the leading magic bytes
    pub fn magic(&self) -> &'static [u8] {
        self.magic
    }

    /// Returns the asset kind this signature identifies
    pub fn kind(&self) -> AssetKind {
        self.kind
    }

    /// Returns the file extension used for extracted payloads
    pub fn extension(&self) -> &'static str {
        self.extension
    }

    /// Returns the end-marker strategy
    pub fn end_strategy(&self) -> EndStrategy {
        self.end_strategy
    }

    /// Returns the size cap applied when no end marker is found
    pub fn max_size(&self) -> usize {
        match self.end_strategy {
            EndStrategy::FixedWindow(window) => window,
            _ => self.kind.size_cap(),
        }
    }

    /// Checks if the given data starts with this signature
    pub fn matches_header(&self, data: &[u8]) -> bool {
        data.starts_with(self.magic)
    }
}
