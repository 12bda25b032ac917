//! In-memory manifest source for language registry tests.

use async_trait::async_trait;
use std::sync::{Arc, RwLock};

use crate::language::{
    domain::DraftManifest,
    ports::{LanguageManifestSource, ManifestResult, ManifestSourceError},
};

/// Manifest source serving a fixed manifest or a fixed failure.
#[derive(Debug, Clone)]
pub struct InMemoryManifestSource {
    state: Arc<RwLock<InMemoryManifestState>>,
}

#[derive(Debug)]
struct InMemoryManifestState {
    outcome: ManifestResult<DraftManifest>,
    fetch_count: usize,
}

impl InMemoryManifestSource {
    /// Creates a source that serves `manifest`.
    #[must_use]
    pub fn new(manifest: DraftManifest) -> Self {
        Self::with_outcome(Ok(manifest))
    }

    /// Creates a source that fails every fetch with `error`.
    #[must_use]
    pub fn failing(error: ManifestSourceError) -> Self {
        Self::with_outcome(Err(error))
    }

    fn with_outcome(outcome: ManifestResult<DraftManifest>) -> Self {
        Self {
            state: Arc::new(RwLock::new(InMemoryManifestState {
                outcome,
                fetch_count: 0,
            })),
        }
    }

    /// Replaces the served manifest.
    ///
    /// # Errors
    ///
    /// Returns [`ManifestSourceError::Unavailable`] when lock acquisition
    /// fails.
    pub fn set_manifest(&self, manifest: DraftManifest) -> ManifestResult<()> {
        let mut state = self.state.write().map_err(|err| {
            ManifestSourceError::unavailable(std::io::Error::other(err.to_string()))
        })?;
        state.outcome = Ok(manifest);
        Ok(())
    }

    /// Returns how many fetches have been served.
    ///
    /// # Errors
    ///
    /// Returns [`ManifestSourceError::Unavailable`] when lock acquisition
    /// fails.
    pub fn fetch_count(&self) -> ManifestResult<usize> {
        let state = self.state.read().map_err(|err| {
            ManifestSourceError::unavailable(std::io::Error::other(err.to_string()))
        })?;
        Ok(state.fetch_count)
    }
}

impl Default for InMemoryManifestSource {
    fn default() -> Self {
        Self::new(DraftManifest::default())
    }
}

#[async_trait]
impl LanguageManifestSource for InMemoryManifestSource {
    async fn fetch_manifest(&self) -> ManifestResult<DraftManifest> {
        let mut state = self.state.write().map_err(|err| {
            ManifestSourceError::unavailable(std::io::Error::other(err.to_string()))
        })?;
        state.fetch_count += 1;
        state.outcome.clone()
    }
}
