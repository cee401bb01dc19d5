//! Extract assets use case
//!
//! Runs the byte scan and the metadata lookup concurrently, then merges
//! them. When the scan finds nothing the result degrades to metadata-only
//! placeholders, and when that is empty too, to a synthetic icon set.

use crate::application::dto::{ExtractionOptions, ExtractionResult, ExtractionTier};
use crate::domain::entities::{AssetKind, AssetRecord, MetadataRecord, PayloadLocation, Scale};
use crate::domain::repositories::{MetadataSource, ScratchError, ScratchSpace};
use crate::domain::services::{Correlator, StructuralParser};
use std::path::Path;
use std::time::Instant;
use thiserror::Error;
use tracing::{debug, info};

/// Names of the synthetic fallback set
const SYNTHETIC_ICON_NAMES: [(&str, Scale); 3] = [
    ("AppIcon@1x.png", Scale::ONE),
    ("AppIcon@2x.png", Scale::TWO),
    ("AppIcon@3x.png", Scale::THREE),
];

/// Errors that abort an extraction request
#[derive(Error, Debug)]
pub enum ExtractionError {
    #[error("Failed to read catalog {path}: {source}")]
    ReadCatalog {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Scratch storage failed: {0}")]
    Scratch(#[from] ScratchError),

    #[error("Scan task failed: {0}")]
    ScanTask(#[from] tokio::task::JoinError),
}

/// Extract assets use case
///
/// Each call is independent; concurrent calls share nothing but the
/// configured services.
pub struct ExtractAssetsUseCase<M: MetadataSource> {
    parser: StructuralParser,
    correlator: Correlator,
    metadata: M,
    options: ExtractionOptions,
}

impl<M: MetadataSource> ExtractAssetsUseCase<M> {
    pub fn new(metadata: M) -> Self {
        Self::with_services(
            StructuralParser::default(),
            Correlator::default(),
            metadata,
        )
    }

    pub fn with_services(parser: StructuralParser, correlator: Correlator, metadata: M) -> Self {
        Self {
            parser,
            correlator,
            metadata,
            options: ExtractionOptions::default(),
        }
    }

    pub fn with_options(mut self, options: ExtractionOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> &ExtractionOptions {
        &self.options
    }

    /// Reads the catalog at `path` and extracts it
    pub async fn extract_file(
        &self,
        path: &Path,
        scratch: Option<&dyn ScratchSpace>,
    ) -> Result<ExtractionResult, ExtractionError> {
        let data = tokio::fs::read(path)
            .await
            .map_err(|source| ExtractionError::ReadCatalog {
                path: path.display().to_string(),
                source,
            })?;
        self.extract(data, path, scratch).await
    }

    /// Extracts assets from catalog bytes
    ///
    /// `catalog` is the path handed to the metadata source. With a scratch
    /// space and materialization enabled, every payload is written out and
    /// its record points at the file; otherwise payloads stay in memory.
    pub async fn extract(
        &self,
        data: Vec<u8>,
        catalog: &Path,
        scratch: Option<&dyn ScratchSpace>,
    ) -> Result<ExtractionResult, ExtractionError> {
        let start_time = Instant::now();
        let bytes_scanned = data.len() as u64;

        info!(catalog = %catalog.display(), bytes = bytes_scanned, "starting extraction");

        let parser = self.parser.clone();
        let scan = tokio::task::spawn_blocking(move || parser.parse(&data));
        let lookup = async {
            if self.options.use_metadata {
                self.metadata.records(catalog).await
            } else {
                Vec::new()
            }
        };

        let (parsed, metadata) = tokio::join!(scan, lookup);
        let mut parsed = parsed?;

        let (records, tier) = if !parsed.is_empty() {
            if let Some(scratch) = scratch.filter(|_| self.options.materialize) {
                store_payloads(&mut parsed.assets, scratch)?;
            }
            (
                self.correlator.correlate(parsed.assets, &metadata),
                ExtractionTier::Scanned,
            )
        } else if !metadata.is_empty() {
            (metadata_placeholders(&metadata), ExtractionTier::MetadataOnly)
        } else {
            (synthetic_icon_set(), ExtractionTier::Synthetic)
        };

        let result = ExtractionResult {
            records,
            tier,
            header: parsed.header,
            metadata_entries: metadata.len(),
            bytes_scanned,
            duration: start_time.elapsed(),
        };

        info!(
            assets = result.len(),
            tier = %result.tier,
            elapsed_ms = result.duration.as_millis() as u64,
            "extraction complete"
        );

        Ok(result)
    }
}

fn store_payloads(
    records: &mut [AssetRecord],
    scratch: &dyn ScratchSpace,
) -> Result<(), ScratchError> {
    for record in records.iter_mut() {
        let Some(bytes) = record.payload().and_then(PayloadLocation::bytes) else {
            continue;
        };
        let path = scratch.store(record.name(), bytes)?;
        debug!(name = record.name(), path = %path.display(), "payload stored");
        record.mark_stored(path);
    }
    Ok(())
}

fn metadata_placeholders(metadata: &[MetadataRecord]) -> Vec<AssetRecord> {
    metadata
        .iter()
        .map(|meta| {
            AssetRecord::placeholder(
                meta.display_name(),
                meta.kind(),
                meta.byte_size(),
                meta.scale(),
            )
        })
        .collect()
}

fn synthetic_icon_set() -> Vec<AssetRecord> {
    SYNTHETIC_ICON_NAMES
        .iter()
        .map(|(name, scale)| AssetRecord::placeholder(*name, AssetKind::Image, None, *scale))
        .collect()
}
