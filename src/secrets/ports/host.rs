//! Secret-storage host port.

use crate::secrets::domain::{
    AuthenticationSession, RepoPublicKey, RepositorySlug, SealedSecret, SecretName,
    SecretWriteOutcome,
};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for secret host operations.
pub type SecretHostResult<T> = Result<T, SecretHostError>;

/// Client for the host's repository secret API.
#[async_trait]
pub trait SecretHostClient: Send + Sync {
    /// Fetches the public key used to seal secrets for `repository`.
    async fn get_repo_public_key(
        &self,
        session: &AuthenticationSession,
        repository: &RepositorySlug,
    ) -> SecretHostResult<RepoPublicKey>;

    /// Creates or overwrites `secret_name` in `repository`.
    async fn create_or_update_repo_secret(
        &self,
        session: &AuthenticationSession,
        repository: &RepositorySlug,
        secret_name: &SecretName,
        sealed: &SealedSecret,
    ) -> SecretHostResult<SecretWriteOutcome>;
}

/// Errors returned by secret host implementations.
#[derive(Debug, Clone, Error)]
pub enum SecretHostError {
    /// The API answered with a non-success status.
    #[error("API responded with status {status}: {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Message from the response body.
        message: String,
    },

    /// The response body could not be decoded.
    #[error("unexpected API response: {0}")]
    Decode(String),

    /// The request could not be sent or completed.
    #[error("transport error: {0}")]
    Transport(Arc<dyn std::error::Error + Send + Sync>),
}

impl SecretHostError {
    /// Wraps a transport error.
    pub fn transport(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Transport(Arc::new(err))
    }

    /// Creates an API error.
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }
}
