//! Metadata record entity
//!
//! One entry reported by the external catalog inspection tool.

use super::asset_record::Scale;
use super::signature::AssetKind;

const DARK_APPEARANCE: &str = "NSAppearanceNameDarkAqua";
const DEFAULT_COMPRESSION: &str = "deepmap2";
const DEFAULT_ENCODING: &str = "ARGB";

/// Catalog entry as described by the metadata tool
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetadataRecord {
    /// Logical asset name
    pub name: String,
    /// Raw category string (e.g. "Image", "Vector", "PackedImage")
    pub asset_type: String,
    /// Width in pixels, 0 when not applicable
    pub pixel_width: u32,
    /// Height in pixels, 0 when not applicable
    pub pixel_height: u32,
    /// Bytes occupied inside the catalog, 0 when unreported
    pub size_on_disk: u64,
    /// Density factor, at least 1
    pub scale_factor: u32,
    /// Compression scheme tag, empty when unreported
    pub compression: String,
    /// Appearance tag, when the entry is appearance-specific
    pub appearance: Option<String>,
    /// Pixel encoding tag, empty when unreported
    pub encoding: String,
}

impl MetadataRecord {
    /// Maps the reported category onto the closed kind set
    pub fn kind(&self) -> AssetKind {
        match self.asset_type.as_str() {
            "Icon Image" | "Image" | "MultiSized Image" | "PackedImage" => AssetKind::Image,
            "Vector" => AssetKind::Vector,
            _ => AssetKind::Data,
        }
    }

    /// Returns the density scale
    pub fn scale(&self) -> Scale {
        Scale::from_factor(i64::from(self.scale_factor))
    }

    /// Returns the reported size, if any
    pub fn byte_size(&self) -> Option<u64> {
        (self.size_on_disk > 0).then_some(self.size_on_disk)
    }

    /// Whether this entry is the dark-mode variant of an asset
    pub fn is_dark(&self) -> bool {
        self.appearance.as_deref() == Some(DARK_APPEARANCE)
    }

    /// Name decorated with dimensions, appearance, compression, encoding and kind markers
    pub fn display_name(&self) -> String {
        let mut name = self.name.clone();
        if self.pixel_width > 0 && self.pixel_height > 0 {
            name.push_str(&format!(" ({}×{})", self.pixel_width, self.pixel_height));
        }
        if self.is_dark() {
            name.push_str(" [Dark]");
        }
        if !self.compression.is_empty() && self.compression != DEFAULT_COMPRESSION {
            name.push_str(&format!(" [{}]", self.compression));
        }
        if !self.encoding.is_empty() && self.encoding != DEFAULT_ENCODING {
            name.push_str(&format!(" [{}]", self.encoding));
        }
        match self.asset_type.as_str() {
            "PackedImage" => name.push_str(" [Packed]"),
            "Vector" => name.push_str(" [Vector]"),
            _ => {}
        }
        name
    }
}
