//! Manifest source port for the Draft language registry.

use crate::language::domain::DraftManifest;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

/// Result type for manifest source operations.
pub type ManifestResult<T> = Result<T, ManifestSourceError>;

/// Read-only source of the Draft tool manifest.
#[async_trait]
pub trait LanguageManifestSource: Send + Sync {
    /// Fetches the current manifest.
    ///
    /// # Errors
    ///
    /// Returns [`ManifestSourceError`] when the manifest cannot be obtained
    /// or parsed.
    async fn fetch_manifest(&self) -> ManifestResult<DraftManifest>;
}

/// Errors returned by manifest source implementations.
#[derive(Debug, Clone, Error)]
pub enum ManifestSourceError {
    /// The tool exited unsuccessfully.
    #[error("draft exited with {status}: {stderr}")]
    CommandFailed {
        /// Exit status description.
        status: String,
        /// Captured standard error, trimmed.
        stderr: String,
    },

    /// The tool did not answer in time.
    #[error("draft did not respond within {0:?}")]
    Timeout(Duration),

    /// The manifest could not be parsed.
    #[error("malformed draft manifest: {0}")]
    Malformed(String),

    /// The source could not be reached.
    #[error("draft manifest unavailable: {0}")]
    Unavailable(Arc<dyn std::error::Error + Send + Sync>),
}

impl ManifestSourceError {
    /// Wraps an error that made the source unreachable.
    pub fn unavailable(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Unavailable(Arc::new(err))
    }
}
