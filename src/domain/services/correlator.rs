//! Correlator service
//!
//! Merges scanned payloads with metadata entries. Matching is a plain
//! case-insensitive substring test in both directions on one key per side;
//! it misses some pairs, which then surface as extra placeholders.

use super::icon_set::{ICON_GROUP_NAME, IconSetAggregator};
use crate::domain::entities::{AssetRecord, MetadataRecord};

#[derive(Debug, Clone, Copy, Default)]
pub struct Correlator {
    aggregator: IconSetAggregator,
}

impl Correlator {
    pub fn new(aggregator: IconSetAggregator) -> Self {
        Self { aggregator }
    }

    /// Combines `extracted` with `metadata` and returns the result sorted by name.
    ///
    /// Icon family entries are folded into one aggregate; every other entry
    /// without a matching extracted record becomes a metadata-only placeholder.
    pub fn correlate(
        &self,
        extracted: Vec<AssetRecord>,
        metadata: &[MetadataRecord],
    ) -> Vec<AssetRecord> {
        let (family, rest): (Vec<&MetadataRecord>, Vec<&MetadataRecord>) = metadata
            .iter()
            .partition(|m| IconSetAggregator::is_family_member(m));

        let placeholders: Vec<AssetRecord> = rest
            .into_iter()
            .filter_map(|meta| {
                let display = meta.display_name();
                if extracted.iter().any(|e| names_match(e.name(), &display)) {
                    return None;
                }
                Some(AssetRecord::placeholder(
                    display,
                    meta.kind(),
                    meta.byte_size(),
                    meta.scale(),
                ))
            })
            .collect();

        let mut result = extracted;
        if let Some(icon_set) = self.aggregator.aggregate(&family, ICON_GROUP_NAME) {
            result.push(icon_set);
        }
        result.extend(placeholders);
        result.sort_by(|a, b| a.name().cmp(b.name()));
        result
    }
}

/// Substring match in either direction between an extracted name and a metadata name
pub fn names_match(extracted_name: &str, metadata_name: &str) -> bool {
    contains_ignore_case(extracted_name, metadata_key(metadata_name))
        || contains_ignore_case(metadata_name, extracted_key(extracted_name))
}

/// First whitespace-delimited token of a metadata name
fn metadata_key(name: &str) -> &str {
    name.split_whitespace().next().unwrap_or("")
}

/// Text after the last underscore, up to the first dot: `image_0003.png` -> `0003`
fn extracted_key(name: &str) -> &str {
    let tail = name.rsplit('_').next().unwrap_or(name);
    tail.split('.').next().unwrap_or(tail)
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    !needle.is_empty() && haystack.to_lowercase().contains(&needle.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keys() {
        assert_eq!(metadata_key("Background (320×480) [lzfse]"), "Background");
        assert_eq!(metadata_key("   "), "");
        assert_eq!(extracted_key("image_0003.png"), "0003");
        assert_eq!(extracted_key("logo.pdf"), "logo");
    }

    #[test]
    fn test_match_either_direction() {
        assert!(names_match("background_0001.png", "Background (320×480)"));
        assert!(names_match("image_0001.png", "Tile0001 (8×8)"));
        assert!(!names_match("image_0001.png", "Splash (640×960)"));
    }

    #[test]
    fn test_empty_keys_never_match() {
        assert!(!names_match("image_.png", ""));
    }

    // Known approximation: a numeric extracted key matches any metadata name that
    // happens to contain the same digits, suppressing an unrelated placeholder.
    #[test]
    fn test_numeric_key_collides_with_dimensions() {
        assert!(names_match("image_0.png", "Splash (640×960)"));
    }
}
