//! Metadata client backed by the `assetutil` command-line tool
//!
//! Runs the tool against a catalog path and parses its JSON output. The
//! child process is killed if the request is dropped or times out.

use super::MetadataError;
use super::output_parser::parse_assetutil_output;
use crate::domain::entities::MetadataRecord;
use crate::domain::repositories::MetadataSource;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tracing::{debug, warn};

/// How to invoke the metadata tool; the catalog path is appended to `args`
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AssetUtilConfig {
    pub program: PathBuf,
    pub args: Vec<String>,
    pub timeout_secs: u64,
}

impl Default for AssetUtilConfig {
    fn default() -> Self {
        Self {
            program: PathBuf::from("/usr/bin/xcrun"),
            args: vec![
                "--sdk".to_string(),
                "macosx".to_string(),
                "assetutil".to_string(),
                "--info".to_string(),
            ],
            timeout_secs: 30,
        }
    }
}

impl AssetUtilConfig {
    /// Uses `program` with `args` instead of the default `xcrun` invocation
    pub fn with_command(mut self, program: impl Into<PathBuf>, args: Vec<String>) -> Self {
        self.program = program.into();
        self.args = args;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout_secs = timeout.as_secs().max(1);
        self
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Clone, Default)]
pub struct AssetUtilClient {
    config: AssetUtilConfig,
}

impl AssetUtilClient {
    pub fn new(config: AssetUtilConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AssetUtilConfig {
        &self.config
    }

    /// Runs the tool and parses its output, reporting why no records were obtained
    pub async fn run(&self, catalog: &Path) -> Result<Vec<MetadataRecord>, MetadataError> {
        let program = self.config.program.display().to_string();
        let mut command = Command::new(&self.config.program);
        command
            .args(&self.config.args)
            .arg(catalog)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let timeout = self.config.timeout();
        let output = tokio::time::timeout(timeout, command.output())
            .await
            .map_err(|_| MetadataError::TimedOut(timeout))?
            .map_err(|source| MetadataError::Spawn {
                program: program.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(MetadataError::NonZeroExit {
                program,
                status: output.status.to_string(),
            });
        }

        let text = String::from_utf8(output.stdout)?;
        parse_assetutil_output(&text)
    }
}

impl MetadataSource for AssetUtilClient {
    async fn records(&self, catalog: &Path) -> Vec<MetadataRecord> {
        match self.run(catalog).await {
            Ok(records) => {
                debug!(count = records.len(), "metadata records parsed");
                records
            }
            Err(e) => {
                warn!(catalog = %catalog.display(), error = %e, "metadata unavailable");
                Vec::new()
            }
        }
    }
}
