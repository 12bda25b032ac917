//! Authentication provider backed by a pre-issued access token.

use async_trait::async_trait;

use crate::config::{ConfigError, read_env};
use crate::secrets::{
    domain::{AccountIdentity, AuthScope, AuthenticationSession, GITHUB_AUTH_PROVIDER_ID},
    ports::{AuthProvider, AuthProviderError, AuthResult, SessionRequest},
};

/// Environment variable read by [`StaticTokenAuthProvider::from_default_env`].
pub const GITHUB_TOKEN_ENV: &str = "GITHUB_TOKEN";

/// Non-interactive provider for headless use, such as CI jobs.
///
/// The token is assumed to carry whatever scopes are requested; GitHub
/// rejects the API calls themselves when it does not.
#[derive(Clone)]
pub struct StaticTokenAuthProvider {
    token: Option<String>,
}

impl std::fmt::Debug for StaticTokenAuthProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StaticTokenAuthProvider")
            .field("has_token", &self.token.is_some())
            .finish()
    }
}

impl StaticTokenAuthProvider {
    /// Creates a provider from an optional token. Blank tokens count as
    /// absent.
    #[must_use]
    pub fn new(token: Option<String>) -> Self {
        Self {
            token: token.filter(|value| !value.trim().is_empty()),
        }
    }

    /// Reads the token from the environment variable `name`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NotUnicode`] when the value is not unicode.
    pub fn from_env(name: &str) -> Result<Self, ConfigError> {
        read_env(name).map(Self::new)
    }

    /// Reads the token from `GITHUB_TOKEN`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NotUnicode`] when the value is not unicode.
    pub fn from_default_env() -> Result<Self, ConfigError> {
        Self::from_env(GITHUB_TOKEN_ENV)
    }
}

#[async_trait]
impl AuthProvider for StaticTokenAuthProvider {
    async fn get_session(
        &self,
        provider_id: &str,
        scopes: &[AuthScope],
        request: SessionRequest,
    ) -> AuthResult<Option<AuthenticationSession>> {
        if provider_id != GITHUB_AUTH_PROVIDER_ID {
            return Err(AuthProviderError::Rejected(format!(
                "unsupported provider '{provider_id}'"
            )));
        }
        match &self.token {
            Some(token) => Ok(Some(AuthenticationSession::new(
                token.clone(),
                scopes.iter().cloned(),
                AccountIdentity::new("token", "token"),
            ))),
            None if request.create_if_none => Err(AuthProviderError::Rejected(
                "no access token configured".to_owned(),
            )),
            None => Ok(None),
        }
    }
}
