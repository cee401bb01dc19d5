//! Rendering of extraction results for the terminal

use crate::domain::entities::{AssetRecord, AssetSource, PayloadLocation};
use serde::Serialize;

/// Flat, serializable view of one record
#[derive(Debug, Serialize)]
pub struct AssetRow {
    pub name: String,
    pub kind: String,
    pub size: Option<u64>,
    pub size_human: String,
    pub scale: String,
    pub source: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub variants: Vec<String>,
}

impl From<&AssetRecord> for AssetRow {
    fn from(record: &AssetRecord) -> Self {
        let source = match record.source() {
            AssetSource::Extracted { .. } => "extracted",
            AssetSource::Placeholder { .. } => "metadata",
            AssetSource::IconSet { .. } => "icon-set",
        };
        Self {
            name: record.name().to_string(),
            kind: record.kind().to_string(),
            size: record.byte_size(),
            size_human: record.size_human(),
            scale: record.scale_label(),
            source,
            offset: record.source_offset(),
            path: record
                .payload()
                .and_then(PayloadLocation::path)
                .map(|p| p.display().to_string()),
            variants: record.variant_labels().to_vec(),
        }
    }
}

/// Formats rows as an aligned table
pub fn render_table(records: &[AssetRecord]) -> String {
    let rows: Vec<AssetRow> = records.iter().map(AssetRow::from).collect();
    let name_width = rows
        .iter()
        .map(|r| r.name.chars().count())
        .max()
        .unwrap_or(4)
        .max(4);

    let mut out = format!(
        "{:<name_width$}  {:<7} {:>12}  {:<14} {}\n",
        "NAME", "KIND", "SIZE", "SCALE", "SOURCE"
    );
    out.push_str(&"-".repeat(name_width + 50));
    out.push('\n');

    for row in &rows {
        out.push_str(&format!(
            "{:<name_width$}  {:<7} {:>12}  {:<14} {}\n",
            row.name, row.kind, row.size_human, row.scale, row.source
        ));
        if let Some(path) = &row.path {
            out.push_str(&format!("    -> {}\n", path));
        }
        if !row.variants.is_empty() {
            out.push_str(&format!("    variants: {}\n", row.variants.join(", ")));
        }
    }
    out
}
