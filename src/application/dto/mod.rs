//! Data Transfer Objects

mod extraction_options;
mod extraction_result;

pub use extraction_options::ExtractionOptions;
pub use extraction_result::{ExtractionResult, ExtractionTier};
