//! Extraction options DTO

/// Options for one extraction request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtractionOptions {
    /// Write extracted payloads to the request's scratch space
    pub materialize: bool,
    /// Consult the metadata source alongside the scan
    pub use_metadata: bool,
}

impl Default for ExtractionOptions {
    fn default() -> Self {
        Self {
            materialize: true,
            use_metadata: true,
        }
    }
}

impl ExtractionOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keeps payloads in memory even when a scratch space is supplied
    pub fn in_memory(mut self) -> Self {
        self.materialize = false;
        self
    }

    /// Skips the metadata source entirely
    pub fn without_metadata(mut self) -> Self {
        self.use_metadata = false;
        self
    }
}
