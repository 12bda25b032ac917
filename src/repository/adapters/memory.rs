//! In-memory repository provider for bridge tests.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::repository::{
    domain::{BranchQuery, Ref, Remote, RepoLocation},
    ports::{ProviderResult, RepositoryProvider, RepositoryProviderError, SourceRepository},
};

/// Thread-safe in-memory repository provider.
///
/// Repositories handed out by [`RepositoryProvider::open_repository`] read
/// the shared state on every call, so later mutations are visible to them.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRepositoryProvider {
    state: Arc<RwLock<HashMap<RepoLocation, RepositoryEntry>>>,
}

#[derive(Debug, Default)]
struct RepositoryEntry {
    refs: Vec<Ref>,
    remotes: Vec<Remote>,
}

fn lock_error(err: impl std::fmt::Display) -> RepositoryProviderError {
    RepositoryProviderError::backend(std::io::Error::other(err.to_string()))
}

fn unknown_location(location: &RepoLocation) -> RepositoryProviderError {
    RepositoryProviderError::backend(std::io::Error::new(
        std::io::ErrorKind::NotFound,
        format!("no repository registered at {location}"),
    ))
}

impl InMemoryRepositoryProvider {
    /// Creates a provider with no registered repositories.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an empty repository at `location`.
    ///
    /// Registering an existing location keeps its references.
    ///
    /// # Errors
    ///
    /// Returns provider errors when lock acquisition fails.
    pub fn register(&self, location: RepoLocation) -> ProviderResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        state.entry(location).or_default();
        Ok(())
    }

    /// Adds a reference to a registered repository.
    ///
    /// # Errors
    ///
    /// Returns provider errors when the location is not registered or lock
    /// acquisition fails.
    pub fn add_ref(&self, location: &RepoLocation, reference: Ref) -> ProviderResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        let entry = state
            .get_mut(location)
            .ok_or_else(|| unknown_location(location))?;
        entry.refs.push(reference);
        Ok(())
    }

    /// Adds a remote to a registered repository.
    ///
    /// # Errors
    ///
    /// Returns provider errors when the location is not registered or lock
    /// acquisition fails.
    pub fn add_remote(&self, location: &RepoLocation, remote: Remote) -> ProviderResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        let entry = state
            .get_mut(location)
            .ok_or_else(|| unknown_location(location))?;
        entry.remotes.push(remote);
        Ok(())
    }
}

#[async_trait]
impl RepositoryProvider for InMemoryRepositoryProvider {
    async fn open_repository(
        &self,
        location: &RepoLocation,
    ) -> ProviderResult<Option<Arc<dyn SourceRepository>>> {
        let state = self.state.read().map_err(lock_error)?;
        if !state.contains_key(location) {
            return Ok(None);
        }
        Ok(Some(Arc::new(InMemorySourceRepository {
            root: location.clone(),
            state: Arc::clone(&self.state),
        })))
    }
}

/// Repository view handed out by [`InMemoryRepositoryProvider`].
#[derive(Debug)]
struct InMemorySourceRepository {
    root: RepoLocation,
    state: Arc<RwLock<HashMap<RepoLocation, RepositoryEntry>>>,
}

#[async_trait]
impl SourceRepository for InMemorySourceRepository {
    fn root(&self) -> &RepoLocation {
        &self.root
    }

    async fn get_branches(&self, query: BranchQuery) -> ProviderResult<Vec<Ref>> {
        let state = self.state.read().map_err(lock_error)?;
        let entry = state
            .get(&self.root)
            .ok_or_else(|| unknown_location(&self.root))?;
        Ok(entry
            .refs
            .iter()
            .filter(|reference| query.matches(reference))
            .cloned()
            .collect())
    }

    async fn get_remotes(&self) -> ProviderResult<Vec<Remote>> {
        let state = self.state.read().map_err(lock_error)?;
        let entry = state
            .get(&self.root)
            .ok_or_else(|| unknown_location(&self.root))?;
        Ok(entry.remotes.clone())
    }
}
