//! Manifest source backed by the `draft info` command.

use async_trait::async_trait;
use std::process::Stdio;
use tokio::process::Command;
use tracing::debug;

use crate::config::DraftToolConfig;
use crate::language::{
    domain::DraftManifest,
    ports::{LanguageManifestSource, ManifestResult, ManifestSourceError},
};

/// Runs the Draft binary and parses the JSON it prints for `info`.
///
/// Each fetch spawns a fresh process; nothing is cached between calls. A
/// process that outlives the configured timeout is killed.
#[derive(Debug, Clone, Default)]
pub struct DraftCliManifestSource {
    config: DraftToolConfig,
}

impl DraftCliManifestSource {
    /// Creates a source using the given tool configuration.
    #[must_use]
    pub const fn new(config: DraftToolConfig) -> Self {
        Self { config }
    }

    /// Returns the tool configuration.
    #[must_use]
    pub const fn config(&self) -> &DraftToolConfig {
        &self.config
    }
}

/// Parses the standard output of `draft info`.
///
/// # Errors
///
/// Returns [`ManifestSourceError::Malformed`] when the output is not the
/// expected JSON document.
pub fn parse_draft_info(stdout: &[u8]) -> ManifestResult<DraftManifest> {
    serde_json::from_slice(stdout).map_err(|err| ManifestSourceError::Malformed(err.to_string()))
}

#[async_trait]
impl LanguageManifestSource for DraftCliManifestSource {
    async fn fetch_manifest(&self) -> ManifestResult<DraftManifest> {
        let timeout = self.config.timeout();
        debug!(binary = %self.config.binary, "running draft info");

        let child = Command::new(self.config.binary.as_std_path())
            .arg("info")
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(ManifestSourceError::unavailable)?;

        let output = tokio::time::timeout(timeout, child.wait_with_output())
            .await
            .map_err(|_| ManifestSourceError::Timeout(timeout))?
            .map_err(ManifestSourceError::unavailable)?;

        if !output.status.success() {
            return Err(ManifestSourceError::CommandFailed {
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_owned(),
            });
        }

        parse_draft_info(&output.stdout)
    }
}
