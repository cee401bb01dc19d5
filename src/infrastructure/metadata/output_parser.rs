//! Parser for the metadata tool's JSON output
//!
//! The tool prints an array of loosely-typed objects. Entries without an
//! `AssetType` (such as the leading catalog-wide header object) are skipped,
//! and missing or mistyped fields fall back to defaults instead of failing.

use super::MetadataError;
use crate::domain::entities::MetadataRecord;
use serde_json::{Map, Value};

const UNKNOWN_NAME: &str = "Unknown Asset";

/// Parses the tool's standard output into records sorted by display name
pub fn parse_assetutil_output(output: &str) -> Result<Vec<MetadataRecord>, MetadataError> {
    let value: Value = serde_json::from_str(output)?;
    let Value::Array(items) = value else {
        return Err(MetadataError::NotAnArray);
    };

    let mut records: Vec<MetadataRecord> = items
        .iter()
        .filter_map(Value::as_object)
        .filter_map(record_from_object)
        .collect();

    records.sort_by_cached_key(MetadataRecord::display_name);
    Ok(records)
}

fn record_from_object(item: &Map<String, Value>) -> Option<MetadataRecord> {
    let asset_type = item.get("AssetType")?.as_str()?.to_string();

    Some(MetadataRecord {
        name: string_field(item, "Name").unwrap_or_else(|| UNKNOWN_NAME.to_string()),
        asset_type,
        pixel_width: u32_field(item, "PixelWidth").unwrap_or(0),
        pixel_height: u32_field(item, "PixelHeight").unwrap_or(0),
        size_on_disk: item.get("SizeOnDisk").and_then(Value::as_u64).unwrap_or(0),
        scale_factor: u32_field(item, "Scale").filter(|s| *s >= 1).unwrap_or(1),
        compression: string_field(item, "Compression").unwrap_or_default(),
        appearance: string_field(item, "Appearance"),
        encoding: string_field(item, "Encoding").unwrap_or_default(),
    })
}

fn string_field(item: &Map<String, Value>, key: &str) -> Option<String> {
    item.get(key).and_then(Value::as_str).map(str::to_string)
}

fn u32_field(item: &Map<String, Value>, key: &str) -> Option<u32> {
    item.get(key)
        .and_then(Value::as_u64)
        .and_then(|v| u32::try_from(v).ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skips_entries_without_asset_type() {
        let output = r#"[
            {"AssetStorageVersion": "Xcode 15", "Platform": "ios"},
            {"AssetType": "Image", "Name": "Logo", "Scale": 2}
        ]"#;
        let records = parse_assetutil_output(output).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "Logo");
        assert_eq!(records[0].scale_factor, 2);
    }

    #[test]
    fn test_mistyped_fields_use_defaults() {
        let output =
            r#"[{"AssetType": "Data", "PixelWidth": "wide", "Scale": 0, "SizeOnDisk": -4}]"#;
        let records = parse_assetutil_output(output).unwrap();
        assert_eq!(records[0].name, UNKNOWN_NAME);
        assert_eq!(records[0].pixel_width, 0);
        assert_eq!(records[0].scale_factor, 1);
        assert_eq!(records[0].size_on_disk, 0);
    }

    #[test]
    fn test_rejects_non_array() {
        assert!(matches!(
            parse_assetutil_output(r#"{"AssetType": "Image"}"#),
            Err(MetadataError::NotAnArray)
        ));
        assert!(matches!(
            parse_assetutil_output("not json"),
            Err(MetadataError::Json(_))
        ));
    }
}
