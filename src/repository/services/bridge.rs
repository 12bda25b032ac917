//! Service layer relaying branch and remote queries to the provider.

use crate::errorable::Errorable;
use crate::repository::{
    domain::{BranchQuery, Ref, Remote, RepoLocation},
    ports::{RepositoryProvider, RepositoryProviderError, SourceRepository},
};
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

/// Service-level errors for repository queries.
#[derive(Debug, Error)]
pub enum RepositoryBridgeError {
    /// The provider does not know the location.
    #[error("no repository found at {0}")]
    RepositoryNotFound(RepoLocation),

    /// Provider operation failed.
    #[error(transparent)]
    Provider(#[from] RepositoryProviderError),
}

/// Result type for repository bridge operations.
pub type RepositoryBridgeResult<T> = Result<T, RepositoryBridgeError>;

/// Relays branch and remote listings for repositories known to a provider.
///
/// Nothing is cached: every call asks the provider for the repository and
/// lists its current references.
#[derive(Clone)]
pub struct RepositoryBridgeService<P>
where
    P: RepositoryProvider,
{
    provider: Arc<P>,
}

impl<P> RepositoryBridgeService<P>
where
    P: RepositoryProvider,
{
    /// Creates a bridge over `provider`.
    #[must_use]
    pub const fn new(provider: Arc<P>) -> Self {
        Self { provider }
    }

    async fn open(&self, location: &RepoLocation) -> RepositoryBridgeResult<Arc<dyn SourceRepository>> {
        self.provider
            .open_repository(location)
            .await?
            .ok_or_else(|| RepositoryBridgeError::RepositoryNotFound(location.clone()))
    }

    /// Lists the remote-tracking branches of the repository at `location`.
    ///
    /// Local branches are never included.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryBridgeError::RepositoryNotFound`] when the
    /// provider does not know the location, or provider errors.
    pub async fn get_branches(&self, location: &RepoLocation) -> RepositoryBridgeResult<Vec<Ref>> {
        let repository = self.open(location).await?;
        let query = BranchQuery::remote();
        let mut branches = repository.get_branches(query).await?;
        branches.retain(|reference| query.matches(reference));
        debug!(%location, count = branches.len(), "listed remote branches");
        Ok(branches)
    }

    /// Lists the remotes configured for the repository at `location`.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryBridgeError::RepositoryNotFound`] when the
    /// provider does not know the location, or provider errors.
    pub async fn get_remotes(&self, location: &RepoLocation) -> RepositoryBridgeResult<Vec<Remote>> {
        let repository = self.open(location).await?;
        let remotes = repository.get_remotes().await?;
        debug!(%location, count = remotes.len(), "listed remotes");
        Ok(remotes)
    }

    /// [`Self::get_branches`] as an [`Errorable`].
    pub async fn branches_errorable(&self, location: &RepoLocation) -> Errorable<Vec<Ref>> {
        self.get_branches(location).await.into()
    }

    /// [`Self::get_remotes`] as an [`Errorable`].
    pub async fn remotes_errorable(&self, location: &RepoLocation) -> Errorable<Vec<Remote>> {
        self.get_remotes(location).await.into()
    }
}
