//! In-memory authentication provider with a scripted sign-in prompt.

use async_trait::async_trait;
use std::sync::{Arc, RwLock};

use crate::secrets::{
    domain::{AuthScope, AuthenticationSession},
    ports::{AuthProvider, AuthProviderError, AuthResult, SessionRequest},
};

/// What the simulated sign-in prompt does when shown.
#[derive(Debug, Clone)]
pub enum SignInOutcome {
    /// The user signs in; the session is cached for later requests.
    SignIn(AuthenticationSession),
    /// The user dismisses the prompt.
    Cancel,
    /// The provider refuses the request.
    Reject(String),
    /// The prompt completes without producing a session.
    NoSession,
    /// The prompt never completes.
    Pending,
}

/// A session request observed by [`InMemoryAuthProvider`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedSessionRequest {
    /// Requested provider identifier.
    pub provider_id: String,
    /// Requested scopes.
    pub scopes: Vec<AuthScope>,
    /// Request options.
    pub request: SessionRequest,
}

/// Authentication provider with an optional cached session and a scripted
/// sign-in prompt.
#[derive(Debug, Clone)]
pub struct InMemoryAuthProvider {
    state: Arc<RwLock<InMemoryAuthState>>,
}

#[derive(Debug)]
struct InMemoryAuthState {
    cached: Option<AuthenticationSession>,
    sign_in: SignInOutcome,
    prompt_count: usize,
    requests: Vec<RecordedSessionRequest>,
}

fn lock_error(err: impl std::fmt::Display) -> AuthProviderError {
    AuthProviderError::backend(std::io::Error::other(err.to_string()))
}

impl InMemoryAuthProvider {
    /// Creates a provider with no cached session whose prompt behaves as
    /// `sign_in`.
    #[must_use]
    pub fn new(sign_in: SignInOutcome) -> Self {
        Self::from_parts(None, sign_in)
    }

    /// Creates a provider that already holds `session`.
    ///
    /// The prompt is scripted to cancel, so any prompt shows up as a failure.
    #[must_use]
    pub fn with_cached_session(session: AuthenticationSession) -> Self {
        Self::from_parts(Some(session), SignInOutcome::Cancel)
    }

    fn from_parts(cached: Option<AuthenticationSession>, sign_in: SignInOutcome) -> Self {
        Self {
            state: Arc::new(RwLock::new(InMemoryAuthState {
                cached,
                sign_in,
                prompt_count: 0,
                requests: Vec::new(),
            })),
        }
    }

    /// Returns how many times the sign-in prompt was shown.
    ///
    /// # Errors
    ///
    /// Returns provider errors when lock acquisition fails.
    pub fn prompt_count(&self) -> AuthResult<usize> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state.prompt_count)
    }

    /// Returns every session request received so far.
    ///
    /// # Errors
    ///
    /// Returns provider errors when lock acquisition fails.
    pub fn requests(&self) -> AuthResult<Vec<RecordedSessionRequest>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state.requests.clone())
    }
}

#[async_trait]
impl AuthProvider for InMemoryAuthProvider {
    async fn get_session(
        &self,
        provider_id: &str,
        scopes: &[AuthScope],
        request: SessionRequest,
    ) -> AuthResult<Option<AuthenticationSession>> {
        let outcome = {
            let mut state = self.state.write().map_err(lock_error)?;
            state.requests.push(RecordedSessionRequest {
                provider_id: provider_id.to_owned(),
                scopes: scopes.to_vec(),
                request,
            });

            if let Some(session) = state
                .cached
                .as_ref()
                .filter(|session| session.has_scopes(scopes))
            {
                return Ok(Some(session.clone()));
            }
            if !request.create_if_none {
                return Ok(None);
            }

            state.prompt_count += 1;
            if let SignInOutcome::SignIn(session) = &state.sign_in {
                let signed_in = session.clone();
                state.cached = Some(signed_in.clone());
                return Ok(Some(signed_in));
            }
            state.sign_in.clone()
        };

        match outcome {
            SignInOutcome::SignIn(session) => Ok(Some(session)),
            SignInOutcome::Cancel => Err(AuthProviderError::Cancelled),
            SignInOutcome::Reject(reason) => Err(AuthProviderError::Rejected(reason)),
            SignInOutcome::NoSession => Ok(None),
            SignInOutcome::Pending => std::future::pending().await,
        }
    }
}
