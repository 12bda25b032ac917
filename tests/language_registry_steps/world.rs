//! Shared world state for language registry BDD scenarios.

use draftkit::errorable::Errorable;
use draftkit::language::{
    domain::{DraftLanguage, DraftManifest},
    ports::ManifestSourceError,
};
use rstest::fixture;

/// Scenario world for language registry behaviour tests.
#[derive(Default)]
pub struct RegistryWorld {
    pub manifest: DraftManifest,
    pub source_error: Option<ManifestSourceError>,
    pub outcome: Option<Errorable<Vec<DraftLanguage>>>,
}

impl RegistryWorld {
    /// Returns the recorded query outcome.
    ///
    /// # Errors
    ///
    /// Returns an error when no query has run yet.
    pub fn outcome(&self) -> Result<&Errorable<Vec<DraftLanguage>>, eyre::Report> {
        self.outcome
            .as_ref()
            .ok_or_else(|| eyre::eyre!("missing registry outcome in scenario world"))
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> RegistryWorld {
    RegistryWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
