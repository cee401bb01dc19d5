//! Infrastructure layer tests
//!
//! Tests for the metadata tool client, its output parser and local scratch
//! storage.

use carscan::domain::entities::AssetKind;
use carscan::domain::repositories::{MetadataSource, ScratchSpace};
use carscan::infrastructure::metadata::{
    AssetUtilClient, AssetUtilConfig, MetadataError, parse_assetutil_output,
};
use carscan::infrastructure::persistence::LocalScratchSpace;
use rstest::*;
use std::fs;
use std::path::Path;
use std::time::Duration;
use tempfile::TempDir;

const SAMPLE_OUTPUT: &str = r#"[
    {"AssetStorageVersion": "Xcode 15.0", "Authoring Tool": "actool", "Platform": "ios"},
    {"AssetType": "Vector", "Name": "Logo", "SizeOnDisk": 4096, "Scale": 1},
    {"AssetType": "Icon Image", "Name": "AppIcon", "PixelWidth": 120, "PixelHeight": 120,
     "SizeOnDisk": 2048, "Scale": 2, "Compression": "lzfse", "Encoding": "ARGB"},
    {"AssetType": "Image", "Name": "Background", "PixelWidth": 640, "PixelHeight": 960,
     "Appearance": "NSAppearanceNameDarkAqua", "Compression": "deepmap2", "Scale": 3}
]"#;

fn client_for(program: &str, args: &[&str]) -> AssetUtilClient {
    AssetUtilClient::new(AssetUtilConfig::default().with_command(
        program,
        args.iter().map(|a| a.to_string()).collect(),
    ))
}

// ============================================================================
// Output Parser Tests
// ============================================================================

#[rstest]
fn test_parse_sample_output() {
    let records = parse_assetutil_output(SAMPLE_OUTPUT).unwrap();

    let names: Vec<String> = records.iter().map(|r| r.display_name()).collect();
    assert_eq!(
        names,
        [
            "AppIcon (120×120) [lzfse]",
            "Background (640×960) [Dark]",
            "Logo [Vector]",
        ]
    );
    assert_eq!(records[2].kind(), AssetKind::Vector);
    assert_eq!(records[2].byte_size(), Some(4096));
    assert_eq!(records[1].byte_size(), None);
}

#[rstest]
#[case("")]
#[case("[")]
#[case("null")]
#[case("\"text\"")]
fn test_parse_rejects_malformed(#[case] output: &str) {
    assert!(parse_assetutil_output(output).is_err());
}

#[rstest]
fn test_parse_empty_array() {
    assert!(parse_assetutil_output("[]").unwrap().is_empty());
}

// ============================================================================
// AssetUtilClient Tests
// ============================================================================

#[rstest]
fn test_default_config_invokes_assetutil() {
    let config = AssetUtilConfig::default();
    assert!(config.program.ends_with("xcrun"));
    assert_eq!(config.args, ["--sdk", "macosx", "assetutil", "--info"]);
    assert_eq!(config.timeout(), Duration::from_secs(30));
}

#[rstest]
fn test_config_deserializes_with_defaults() {
    let config: AssetUtilConfig = serde_json::from_str(r#"{"timeout_secs": 5}"#).unwrap();
    assert_eq!(config.timeout(), Duration::from_secs(5));
    assert_eq!(config.args.len(), 4);
}

#[cfg(unix)]
#[rstest]
#[tokio::test]
async fn test_client_parses_tool_output() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("info.json");
    fs::write(&output, SAMPLE_OUTPUT).unwrap();
    let client = client_for("cat", &[]);

    let records = client.records(&output).await;

    assert_eq!(records.len(), 3);
    assert_eq!(records[0].name, "AppIcon");
}

#[cfg(unix)]
#[rstest]
#[tokio::test]
async fn test_client_non_zero_exit() {
    let client = client_for("sh", &["-c", "exit 3"]);

    assert!(matches!(
        client.run(Path::new("Assets.car")).await,
        Err(MetadataError::NonZeroExit { .. })
    ));
    assert!(client.records(Path::new("Assets.car")).await.is_empty());
}

#[cfg(unix)]
#[rstest]
#[tokio::test]
async fn test_client_rejects_non_json_output() {
    let client = client_for("sh", &["-c", "echo not json"]);

    assert!(matches!(
        client.run(Path::new("Assets.car")).await,
        Err(MetadataError::Json(_))
    ));
}

#[rstest]
#[tokio::test]
async fn test_client_missing_program() {
    let client = client_for("/nonexistent/assetutil", &[]);

    assert!(matches!(
        client.run(Path::new("Assets.car")).await,
        Err(MetadataError::Spawn { .. })
    ));
    assert!(client.records(Path::new("Assets.car")).await.is_empty());
}

#[cfg(unix)]
#[rstest]
#[tokio::test]
async fn test_client_times_out() {
    let client = AssetUtilClient::new(
        AssetUtilConfig::default()
            .with_command("sh", vec!["-c".to_string(), "sleep 10".to_string()])
            .with_timeout(Duration::from_secs(1)),
    );

    assert!(matches!(
        client.run(Path::new("Assets.car")).await,
        Err(MetadataError::TimedOut(_))
    ));
}

// ============================================================================
// LocalScratchSpace Tests
// ============================================================================

#[rstest]
fn test_scratch_namespace_under_base() {
    let base = TempDir::new().unwrap();
    let space = LocalScratchSpace::new(base.path()).unwrap();

    let path = space.store("vector_0001.pdf", b"%PDF").unwrap();

    assert_eq!(path.parent(), Some(space.root()));
    assert_eq!(fs::read(&path).unwrap(), b"%PDF");
}

#[rstest]
fn test_scratch_unusable_base() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("not_a_dir");
    fs::write(&file, b"x").unwrap();

    assert!(LocalScratchSpace::new(&file).is_err());
}
