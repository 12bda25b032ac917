//! Source-control provider port.

use crate::repository::domain::{BranchQuery, Ref, Remote, RepoLocation};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

/// Result type for provider operations.
pub type ProviderResult<T> = Result<T, RepositoryProviderError>;

/// Lookup of repositories known to the source-control provider.
#[async_trait]
pub trait RepositoryProvider: Send + Sync {
    /// Returns the repository registered at `location`.
    ///
    /// Returns `None` when the provider does not know the location.
    async fn open_repository(
        &self,
        location: &RepoLocation,
    ) -> ProviderResult<Option<Arc<dyn SourceRepository>>>;
}

/// Live view of a single repository.
#[async_trait]
pub trait SourceRepository: Send + Sync {
    /// Returns the root of the working copy.
    fn root(&self) -> &RepoLocation;

    /// Lists branches matching `query`.
    async fn get_branches(&self, query: BranchQuery) -> ProviderResult<Vec<Ref>>;

    /// Lists configured remotes.
    async fn get_remotes(&self) -> ProviderResult<Vec<Remote>>;
}

/// Errors returned by repository provider implementations.
#[derive(Debug, Clone, Error)]
pub enum RepositoryProviderError {
    /// A provider command exited unsuccessfully.
    #[error("`{command}` failed: {stderr}")]
    CommandFailed {
        /// Command line that failed.
        command: String,
        /// Captured standard error, trimmed.
        stderr: String,
    },

    /// A provider command did not finish in time.
    #[error("`{command}` did not finish within {timeout:?}")]
    Timeout {
        /// Command line that timed out.
        command: String,
        /// Configured bound.
        timeout: Duration,
    },

    /// Provider output could not be interpreted.
    #[error("unexpected provider output: {0}")]
    InvalidOutput(String),

    /// Generic provider failure.
    #[error("repository provider error: {0}")]
    Backend(Arc<dyn std::error::Error + Send + Sync>),
}

impl RepositoryProviderError {
    /// Wraps a backend error.
    pub fn backend(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Backend(Arc::new(err))
    }
}
