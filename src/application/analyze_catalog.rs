//! Analyze catalog use case
//!
//! Summary-only path: no payload is extracted.

use crate::domain::entities::CatalogSummary;
use crate::domain::repositories::MetadataSource;
use crate::domain::services::CatalogAnalyzer;
use std::path::Path;
use tracing::info;

pub struct AnalyzeCatalogUseCase<M: MetadataSource> {
    analyzer: CatalogAnalyzer,
    metadata: M,
}

impl<M: MetadataSource> AnalyzeCatalogUseCase<M> {
    pub fn new(metadata: M) -> Self {
        Self {
            analyzer: CatalogAnalyzer::default(),
            metadata,
        }
    }

    pub fn with_analyzer(mut self, analyzer: CatalogAnalyzer) -> Self {
        self.analyzer = analyzer;
        self
    }

    /// Summarizes `data` from signature occurrences alone
    pub fn analyze(&self, data: &[u8]) -> CatalogSummary {
        self.analyzer.analyze(data)
    }

    /// Summarizes `data`, taking counts from the metadata source when it reports anything
    pub async fn analyze_with_metadata(&self, data: &[u8], catalog: &Path) -> CatalogSummary {
        let metadata = self.metadata.records(catalog).await;
        info!(
            catalog = %catalog.display(),
            entries = metadata.len(),
            "analyzing catalog"
        );
        self.analyzer.analyze_with_metadata(data, &metadata)
    }
}
