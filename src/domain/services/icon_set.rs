//! Icon set aggregator service
//!
//! Folds the metadata entries of one app icon family into a single symbolic
//! record listing the variant sizes.

use crate::domain::entities::{AssetRecord, MetadataRecord, Scale};
use regex::Regex;
use std::collections::BTreeSet;
use std::sync::LazyLock;

/// Case-insensitive marker identifying icon family members
pub const ICON_FAMILY_MARKER: &str = "appicon";
/// Group name used for the aggregate
pub const ICON_GROUP_NAME: &str = "AppIcon";

const DARK_LABEL: &str = "Dark";

static SIZE_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\((\d+)×(\d+)\)").expect("size token pattern is valid"));

#[derive(Debug, Clone, Copy, Default)]
pub struct IconSetAggregator;

impl IconSetAggregator {
    pub fn new() -> Self {
        Self
    }

    /// Whether a metadata entry belongs to the app icon family
    pub fn is_family_member(record: &MetadataRecord) -> bool {
        record
            .display_name()
            .to_lowercase()
            .contains(ICON_FAMILY_MARKER)
    }

    /// Builds the aggregate for `members`, or `None` when there are none.
    ///
    /// The total size is the exact sum of the members' reported sizes. Variant
    /// labels are the distinct `W×H` tokens of the decorated member names in
    /// ascending pixel order, followed by `Dark` when a dark variant exists.
    /// Members without a size token fall back to their scale labels.
    pub fn aggregate(&self, members: &[&MetadataRecord], group: &str) -> Option<AssetRecord> {
        if members.is_empty() {
            return None;
        }

        let total: u64 = members.iter().map(|m| m.size_on_disk).sum();
        let scales: BTreeSet<Scale> = members.iter().map(|m| m.scale()).collect();

        let sizes: BTreeSet<(u32, u32)> = members
            .iter()
            .filter_map(|m| size_token(&m.display_name()))
            .collect();

        let mut labels: Vec<String> = sizes
            .iter()
            .map(|(w, h)| format!("{}×{}", w, h))
            .collect();
        if labels.is_empty() {
            labels = scales.iter().map(Scale::to_string).collect();
        }
        if members.iter().any(|m| m.is_dark()) {
            labels.push(DARK_LABEL.to_string());
        }

        AssetRecord::icon_set(
            format!("{} Icon Set ({} variants)", group, members.len()),
            total,
            scales.into_iter().collect(),
            labels,
        )
    }
}

fn size_token(name: &str) -> Option<(u32, u32)> {
    let caps = SIZE_TOKEN.captures(name)?;
    let width = caps.get(1)?.as_str().parse().ok()?;
    let height = caps.get(2)?.as_str().parse().ok()?;
    Some((width, height))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size_token() {
        assert_eq!(size_token("AppIcon (1024×1024) [Dark]"), Some((1024, 1024)));
        assert_eq!(size_token("AppIcon (1024x1024)"), None);
        assert_eq!(size_token("AppIcon"), None);
    }
}
