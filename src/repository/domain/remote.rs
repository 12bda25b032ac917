//! Configured remote of a repository.

use super::RepositoryDomainError;
use serde::{Deserialize, Serialize};

/// A configured Git remote with its fetch and push URLs.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Remote {
    name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    fetch_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    push_url: Option<String>,
}

impl Remote {
    /// Creates a remote without URLs.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryDomainError::EmptyRemoteName`] for a blank name.
    pub fn new(name: impl Into<String>) -> Result<Self, RepositoryDomainError> {
        let raw = name.into();
        let normalized = raw.trim();
        if normalized.is_empty() {
            return Err(RepositoryDomainError::EmptyRemoteName);
        }
        Ok(Self {
            name: normalized.to_owned(),
            fetch_url: None,
            push_url: None,
        })
    }

    /// Sets the fetch URL.
    #[must_use]
    pub fn with_fetch_url(mut self, url: impl Into<String>) -> Self {
        self.fetch_url = Some(url.into());
        self
    }

    /// Sets the push URL.
    #[must_use]
    pub fn with_push_url(mut self, url: impl Into<String>) -> Self {
        self.push_url = Some(url.into());
        self
    }

    /// Returns the remote name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the fetch URL.
    #[must_use]
    pub fn fetch_url(&self) -> Option<&str> {
        self.fetch_url.as_deref()
    }

    /// Returns the push URL.
    #[must_use]
    pub fn push_url(&self) -> Option<&str> {
        self.push_url.as_deref()
    }
}
