use anyhow::{Context, Result};
use clap::Parser;
use std::path::Path;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use carscan::application::dto::ExtractionOptions;
use carscan::application::{AnalyzeCatalogUseCase, ExtractAssetsUseCase};
use carscan::domain::repositories::{NoMetadata, ScratchSpace};
use carscan::domain::services::SignatureCatalog;
use carscan::infrastructure::metadata::AssetUtilClient;
use carscan::infrastructure::persistence::LocalScratchSpace;
use carscan::presentation::cli::{AssetRow, Cli, Commands, render_table};
use carscan::utils::{format_bytes, hex_dump};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let directive = if cli.debug {
        "carscan=trace"
    } else if cli.verbose {
        "carscan=debug"
    } else {
        "carscan=info"
    };
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).compact().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env().add_directive(directive.parse()?))
        .init();

    match cli.command {
        Commands::Extract {
            catalog,
            scratch,
            in_memory,
            no_metadata,
            json,
        } => run_extract(&catalog, scratch.as_deref(), in_memory, no_metadata, json).await?,
        Commands::Analyze {
            catalog,
            with_metadata,
            json,
        } => run_analyze(&catalog, with_metadata, json).await?,
        Commands::ListSignatures => list_signatures(),
    }

    Ok(())
}

async fn run_extract(
    catalog: &Path,
    scratch_base: Option<&Path>,
    in_memory: bool,
    no_metadata: bool,
    json: bool,
) -> Result<()> {
    let mut options = ExtractionOptions::new();
    if in_memory {
        options = options.in_memory();
    }
    if no_metadata {
        options = options.without_metadata();
    }

    let scratch = if in_memory {
        None
    } else {
        let space = match scratch_base {
            Some(base) => LocalScratchSpace::new(base),
            None => LocalScratchSpace::in_temp_dir(),
        }
        .context("Failed to create scratch directory")?;
        Some(space)
    };

    let use_case = ExtractAssetsUseCase::new(AssetUtilClient::default()).with_options(options);
    let result = use_case
        .extract_file(catalog, scratch.as_ref().map(|s| s as &dyn ScratchSpace))
        .await
        .with_context(|| format!("Failed to extract {}", catalog.display()))?;

    if json {
        let rows: Vec<AssetRow> = result.records.iter().map(AssetRow::from).collect();
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    print!("{}", render_table(&result.records));
    println!();
    print!("{}", result.summary());
    if let Some(space) = &scratch {
        println!("Payloads written to {}", space.root().display());
    }
    Ok(())
}

async fn run_analyze(catalog: &Path, with_metadata: bool, json: bool) -> Result<()> {
    let data = tokio::fs::read(catalog)
        .await
        .with_context(|| format!("Failed to read {}", catalog.display()))?;

    let summary = if with_metadata {
        AnalyzeCatalogUseCase::new(AssetUtilClient::default())
            .analyze_with_metadata(&data, catalog)
            .await
    } else {
        AnalyzeCatalogUseCase::new(NoMetadata).analyze(&data)
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!("{}", summary);
    }
    Ok(())
}

fn list_signatures() {
    println!("{:<28} {:<7} {:<6} {}", "MAGIC", "KIND", "EXT", "MAX SIZE");
    println!("{}", "-".repeat(56));
    for spec in SignatureCatalog::standard().signatures() {
        println!(
            "{:<28} {:<7} {:<6} {}",
            hex_dump(spec.magic()),
            spec.kind(),
            spec.extension(),
            format_bytes(spec.max_size() as u64)
        );
    }
}
