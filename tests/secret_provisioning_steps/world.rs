//! Shared world state for secret provisioning BDD scenarios.

use std::sync::Arc;

use draftkit::secrets::{
    adapters::{InMemoryAuthProvider, InMemorySecretHost},
    domain::{RepositorySlug, SecretWriteOutcome},
    services::SecretProvisioningError,
};
use rstest::fixture;

/// Scenario world for secret provisioning behaviour tests.
pub struct ProvisioningWorld {
    pub auth: Option<Arc<InMemoryAuthProvider>>,
    pub host: Arc<InMemorySecretHost>,
    pub target: Option<RepositorySlug>,
    pub results: Vec<Result<SecretWriteOutcome, SecretProvisioningError>>,
}

impl ProvisioningWorld {
    /// Creates a world with an empty host and no account.
    #[must_use]
    pub fn new() -> Self {
        Self {
            auth: None,
            host: Arc::new(InMemorySecretHost::new()),
            target: None,
            results: Vec::new(),
        }
    }

    /// Returns the most recent provisioning result.
    ///
    /// # Errors
    ///
    /// Returns an error when no provisioning call has run yet.
    pub fn last_result(
        &self,
    ) -> Result<&Result<SecretWriteOutcome, SecretProvisioningError>, eyre::Report> {
        self.results
            .last()
            .ok_or_else(|| eyre::eyre!("missing provisioning result in scenario world"))
    }
}

impl Default for ProvisioningWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> ProvisioningWorld {
    ProvisioningWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
