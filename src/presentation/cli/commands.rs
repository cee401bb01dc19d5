//! CLI commands using clap

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// carscan - compiled asset catalog extractor
///
/// Recovers embedded images, vector documents and data blobs from `.car`
/// archives by signature scanning, enriched with metadata from the
/// platform's catalog inspection tool when it is available.
#[derive(Parser)]
#[command(name = "carscan")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Extract assets from compiled asset catalogs", long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Enable debug output
    #[arg(short, long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Extract every recoverable asset from a catalog
    Extract {
        /// Path to the .car file
        catalog: PathBuf,

        /// Base directory for extracted payloads (defaults to the system temp dir)
        #[arg(short, long)]
        scratch: Option<PathBuf>,

        /// Keep payloads in memory instead of writing them out
        #[arg(long)]
        in_memory: bool,

        /// Skip the metadata tool
        #[arg(long)]
        no_metadata: bool,

        /// Print records as JSON
        #[arg(long)]
        json: bool,
    },

    /// Summarize a catalog without extracting anything
    Analyze {
        /// Path to the .car file
        catalog: PathBuf,

        /// Take counts and compression from the metadata tool
        #[arg(long)]
        with_metadata: bool,

        /// Print the summary as JSON
        #[arg(long)]
        json: bool,
    },

    /// List the recognized payload signatures
    ListSignatures,
}
