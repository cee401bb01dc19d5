//! Asset record entity
//!
//! One recovered or inferred unit of catalog content. A record is either
//! backed by extracted bytes, a metadata-only placeholder, or a symbolic
//! icon-set aggregate.

use super::signature::AssetKind;
use crate::utils::format_bytes;
use std::fmt;
use std::path::{Path, PathBuf};

/// Density multiplier: how many device pixels one logical point occupies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Scale(u32);

impl Scale {
    pub const ONE: Scale = Scale(1);
    pub const TWO: Scale = Scale(2);
    pub const THREE: Scale = Scale(3);

    /// Builds a scale from a reported integer factor; values below 2 collapse to `@1x`
    pub fn from_factor(factor: i64) -> Self {
        if factor > 1 {
            Scale(u32::try_from(factor).unwrap_or(u32::MAX))
        } else {
            Scale::ONE
        }
    }

    /// Returns the integer multiplier
    pub fn factor(&self) -> u32 {
        self.0
    }
}

impl Default for Scale {
    fn default() -> Self {
        Scale::ONE
    }
}

impl fmt::Display for Scale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "@{}x", self.0)
    }
}

/// Where the bytes of an extracted payload live
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PayloadLocation {
    /// Bytes owned by the record
    InMemory(Vec<u8>),
    /// File inside the request's scratch directory
    Stored(PathBuf),
}

impl PayloadLocation {
    /// Returns the in-memory bytes, if the payload was not materialized
    pub fn bytes(&self) -> Option<&[u8]> {
        match self {
            PayloadLocation::InMemory(data) => Some(data),
            PayloadLocation::Stored(_) => None,
        }
    }

    /// Returns the stored path, if the payload was materialized
    pub fn path(&self) -> Option<&Path> {
        match self {
            PayloadLocation::InMemory(_) => None,
            PayloadLocation::Stored(path) => Some(path),
        }
    }
}

/// What backs an [`AssetRecord`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssetSource {
    /// Payload recovered by scanning the archive bytes
    Extracted {
        location: PayloadLocation,
        scale: Scale,
        offset: u64,
    },
    /// Known from metadata only; no bytes were recovered
    Placeholder { scale: Scale },
    /// Symbolic grouping of icon variants
    IconSet {
        scales: Vec<Scale>,
        variant_labels: Vec<String>,
    },
}

/// A recovered or inferred catalog asset
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetRecord {
    name: String,
    kind: AssetKind,
    byte_size: Option<u64>,
    source: AssetSource,
}

impl AssetRecord {
    /// Creates a record that owns its extracted payload
    pub fn extracted(
        name: impl Into<String>,
        kind: AssetKind,
        offset: u64,
        data: Vec<u8>,
        scale: Scale,
    ) -> Self {
        Self {
            name: name.into(),
            kind,
            byte_size: Some(data.len() as u64),
            source: AssetSource::Extracted {
                location: PayloadLocation::InMemory(data),
                scale,
                offset,
            },
        }
    }

    /// Creates a metadata-only placeholder
    pub fn placeholder(
        name: impl Into<String>,
        kind: AssetKind,
        byte_size: Option<u64>,
        scale: Scale,
    ) -> Self {
        Self {
            name: name.into(),
            kind,
            byte_size,
            source: AssetSource::Placeholder { scale },
        }
    }

    /// Creates an icon-set aggregate. Returns `None` when there are no variant labels,
    /// since an aggregate must describe at least one variant.
    pub fn icon_set(
        name: impl Into<String>,
        total_size: u64,
        scales: Vec<Scale>,
        variant_labels: Vec<String>,
    ) -> Option<Self> {
        if variant_labels.is_empty() {
            return None;
        }
        Some(Self {
            name: name.into(),
            kind: AssetKind::Image,
            byte_size: Some(total_size),
            source: AssetSource::IconSet {
                scales,
                variant_labels,
            },
        })
    }

    /// Returns the display name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the asset kind
    pub fn kind(&self) -> AssetKind {
        self.kind
    }

    /// Returns the payload size, or the size reported by metadata
    pub fn byte_size(&self) -> Option<u64> {
        self.byte_size
    }

    /// Returns what backs this record
    pub fn source(&self) -> &AssetSource {
        &self.source
    }

    /// Returns the single density scale; aggregates report their smallest member scale
    pub fn scale(&self) -> Scale {
        match &self.source {
            AssetSource::Extracted { scale, .. } | AssetSource::Placeholder { scale } => *scale,
            AssetSource::IconSet { scales, .. } => scales.first().copied().unwrap_or_default(),
        }
    }

    /// Returns the scale label as displayed; aggregates join every member scale
    pub fn scale_label(&self) -> String {
        match &self.source {
            AssetSource::IconSet { scales, .. } => scales
                .iter()
                .map(Scale::to_string)
                .collect::<Vec<_>>()
                .join(", "),
            _ => self.scale().to_string(),
        }
    }

    /// Returns the payload location, if bytes were recovered
    pub fn payload(&self) -> Option<&PayloadLocation> {
        match &self.source {
            AssetSource::Extracted { location, .. } => Some(location),
            _ => None,
        }
    }

    /// Returns where the payload started in the archive
    pub fn source_offset(&self) -> Option<u64> {
        match &self.source {
            AssetSource::Extracted { offset, .. } => Some(*offset),
            _ => None,
        }
    }

    /// Whether this record is an icon-set aggregate
    pub fn is_aggregate(&self) -> bool {
        matches!(self.source, AssetSource::IconSet { .. })
    }

    /// Returns the aggregate's size/appearance descriptors; empty for other records
    pub fn variant_labels(&self) -> &[String] {
        match &self.source {
            AssetSource::IconSet { variant_labels, .. } => variant_labels,
            _ => &[],
        }
    }

    /// Replaces an in-memory payload with the path it was written to
    pub fn mark_stored(&mut self, path: PathBuf) {
        if let AssetSource::Extracted { location, .. } = &mut self.source {
            *location = PayloadLocation::Stored(path);
        }
    }

    /// Returns a human-readable size string
    pub fn size_human(&self) -> String {
        match self.byte_size {
            Some(size) => format_bytes(size),
            None => "Unknown".to_string(),
        }
    }
}
