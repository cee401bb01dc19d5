//! Metadata inspection tool client

mod assetutil;
mod output_parser;

pub use assetutil::{AssetUtilClient, AssetUtilConfig};
pub use output_parser::parse_assetutil_output;

use std::time::Duration;
use thiserror::Error;

/// Reasons the metadata tool produced no usable output
///
/// These never cross the `MetadataSource` boundary; they are logged and the
/// source reports an empty list.
#[derive(Error, Debug)]
pub enum MetadataError {
    #[error("Failed to launch {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{program} exited with {status}")]
    NonZeroExit { program: String, status: String },

    #[error("Output is not valid UTF-8: {0}")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),

    #[error("Output is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Output is not a JSON array")]
    NotAnArray,

    #[error("Timed out after {0:?}")]
    TimedOut(Duration),
}
