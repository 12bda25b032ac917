//! Authentication provider port.

use crate::secrets::domain::{AuthScope, AuthenticationSession};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for authentication provider operations.
pub type AuthResult<T> = Result<T, AuthProviderError>;

/// Options for a session request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SessionRequest {
    /// Prompt the user to sign in when no matching session exists.
    pub create_if_none: bool,
}

impl SessionRequest {
    /// Request that may prompt the user to sign in.
    #[must_use]
    pub const fn interactive() -> Self {
        Self {
            create_if_none: true,
        }
    }

    /// Request that only returns an existing session.
    #[must_use]
    pub const fn silent() -> Self {
        Self {
            create_if_none: false,
        }
    }
}

/// Host authentication subsystem.
#[async_trait]
pub trait AuthProvider: Send + Sync {
    /// Returns a session for `provider_id` carrying `scopes`.
    ///
    /// An existing session is returned without prompting. With
    /// [`SessionRequest::create_if_none`], a missing session triggers an
    /// interactive sign-in that completes only when the user finishes or
    /// cancels it. Returns `None` when no session is available.
    async fn get_session(
        &self,
        provider_id: &str,
        scopes: &[AuthScope],
        request: SessionRequest,
    ) -> AuthResult<Option<AuthenticationSession>>;
}

/// Errors returned by authentication provider implementations.
#[derive(Debug, Clone, Error)]
pub enum AuthProviderError {
    /// The user dismissed the sign-in prompt.
    #[error("sign-in was cancelled by the user")]
    Cancelled,

    /// The provider refused the request.
    #[error("authentication request rejected: {0}")]
    Rejected(String),

    /// Generic provider failure.
    #[error("authentication provider error: {0}")]
    Backend(Arc<dyn std::error::Error + Send + Sync>),
}

impl AuthProviderError {
    /// Wraps a backend error.
    pub fn backend(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Backend(Arc::new(err))
    }
}
