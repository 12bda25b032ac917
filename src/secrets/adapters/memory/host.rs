//! In-memory secret host that owns real key pairs.
//!
//! Registered repositories get a freshly generated X25519 key pair, so
//! submitted values can be unsealed again to check what the host stores.

use async_trait::async_trait;
use base64::{Engine, engine::general_purpose::STANDARD};
use crypto_box::{SecretKey, aead::OsRng};
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, RwLock};
use std::time::Duration;

use crate::secrets::{
    domain::{
        AuthenticationSession, RepoPublicKey, RepositorySlug, SealedSecret, SecretName,
        SecretWriteOutcome,
    },
    ports::{SecretHostClient, SecretHostError, SecretHostResult},
};

/// A call received by [`InMemorySecretHost`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostCall {
    /// Public key request.
    FetchPublicKey {
        /// Target repository.
        repository: RepositorySlug,
    },
    /// Create-or-update request.
    SubmitSecret {
        /// Target repository.
        repository: RepositorySlug,
        /// Target secret.
        secret_name: SecretName,
        /// Submitted payload.
        sealed: SealedSecret,
    },
}

/// Thread-safe in-memory secret host.
#[derive(Debug, Clone, Default)]
pub struct InMemorySecretHost {
    state: Arc<RwLock<InMemoryHostState>>,
}

#[derive(Debug, Default)]
struct InMemoryHostState {
    keys: HashMap<RepositorySlug, HostKey>,
    secrets: HashMap<(RepositorySlug, SecretName), SealedSecret>,
    calls: Vec<HostCall>,
    key_fetch_failure: Option<SecretHostError>,
    submission_failure: Option<SecretHostError>,
    response_delay: Option<Duration>,
    submission_delay: Option<Duration>,
}

struct HostKey {
    public: RepoPublicKey,
    private: Option<SecretKey>,
}

impl fmt::Debug for HostKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HostKey")
            .field("public", &self.public)
            .field("has_private", &self.private.is_some())
            .finish()
    }
}

fn lock_error(err: impl fmt::Display) -> SecretHostError {
    SecretHostError::transport(std::io::Error::other(err.to_string()))
}

impl InMemorySecretHost {
    /// Creates a host with no repositories.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `repository` with a freshly generated key pair.
    ///
    /// Returns the public half under `key_id`.
    ///
    /// # Errors
    ///
    /// Returns host errors when lock acquisition fails.
    pub fn register_repository(
        &self,
        repository: RepositorySlug,
        key_id: &str,
    ) -> SecretHostResult<RepoPublicKey> {
        let private = SecretKey::generate(&mut OsRng);
        let public = RepoPublicKey::new(key_id, STANDARD.encode(private.public_key().as_bytes()));
        let mut state = self.state.write().map_err(lock_error)?;
        state.keys.insert(
            repository,
            HostKey {
                public: public.clone(),
                private: Some(private),
            },
        );
        Ok(public)
    }

    /// Serves `public_key` for `repository` without a matching private key.
    ///
    /// # Errors
    ///
    /// Returns host errors when lock acquisition fails.
    pub fn set_public_key(
        &self,
        repository: RepositorySlug,
        public_key: RepoPublicKey,
    ) -> SecretHostResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        state.keys.insert(
            repository,
            HostKey {
                public: public_key,
                private: None,
            },
        );
        Ok(())
    }

    /// Fails every public key request with `error`.
    ///
    /// # Errors
    ///
    /// Returns host errors when lock acquisition fails.
    pub fn fail_key_fetch(&self, error: SecretHostError) -> SecretHostResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        state.key_fetch_failure = Some(error);
        Ok(())
    }

    /// Fails every submission with `error`.
    ///
    /// # Errors
    ///
    /// Returns host errors when lock acquisition fails.
    pub fn fail_submission(&self, error: SecretHostError) -> SecretHostResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        state.submission_failure = Some(error);
        Ok(())
    }

    /// Delays every response by `delay`.
    ///
    /// # Errors
    ///
    /// Returns host errors when lock acquisition fails.
    pub fn set_response_delay(&self, delay: Duration) -> SecretHostResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        state.response_delay = Some(delay);
        Ok(())
    }

    /// Delays submissions by `delay`, leaving key fetches on the shared
    /// response delay.
    ///
    /// # Errors
    ///
    /// Returns host errors when lock acquisition fails.
    pub fn set_submission_delay(&self, delay: Duration) -> SecretHostResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        state.submission_delay = Some(delay);
        Ok(())
    }

    /// Returns every call received so far, in order.
    ///
    /// # Errors
    ///
    /// Returns host errors when lock acquisition fails.
    pub fn calls(&self) -> SecretHostResult<Vec<HostCall>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state.calls.clone())
    }

    /// Returns how many secrets are stored across all repositories.
    ///
    /// # Errors
    ///
    /// Returns host errors when lock acquisition fails.
    pub fn secret_count(&self) -> SecretHostResult<usize> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state.secrets.len())
    }

    /// Returns the stored payload for a secret.
    ///
    /// # Errors
    ///
    /// Returns host errors when lock acquisition fails.
    pub fn stored_secret(
        &self,
        repository: &RepositorySlug,
        secret_name: &SecretName,
    ) -> SecretHostResult<Option<SealedSecret>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state
            .secrets
            .get(&(repository.clone(), secret_name.clone()))
            .cloned())
    }

    /// Unseals a stored secret with the repository's private key.
    ///
    /// Returns `None` when the secret is not stored.
    ///
    /// # Errors
    ///
    /// Returns [`SecretHostError::Decode`] when the repository has no
    /// private key or the payload cannot be opened.
    pub fn reveal_secret(
        &self,
        repository: &RepositorySlug,
        secret_name: &SecretName,
    ) -> SecretHostResult<Option<String>> {
        let state = self.state.read().map_err(lock_error)?;
        let Some(sealed) = state
            .secrets
            .get(&(repository.clone(), secret_name.clone()))
        else {
            return Ok(None);
        };
        let private = state
            .keys
            .get(repository)
            .and_then(|key| key.private.as_ref())
            .ok_or_else(|| SecretHostError::Decode(format!("no private key for {repository}")))?;

        let ciphertext = STANDARD
            .decode(sealed.encrypted_value())
            .map_err(|err| SecretHostError::Decode(err.to_string()))?;
        let plaintext = private
            .unseal(&ciphertext)
            .map_err(|_| SecretHostError::Decode("sealed box could not be opened".to_owned()))?;
        String::from_utf8(plaintext)
            .map(Some)
            .map_err(|err| SecretHostError::Decode(err.to_string()))
    }

    fn response_delay(&self) -> SecretHostResult<Option<Duration>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state.response_delay)
    }

    fn submission_delay(&self) -> SecretHostResult<Option<Duration>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state.submission_delay.or(state.response_delay))
    }
}

#[async_trait]
impl SecretHostClient for InMemorySecretHost {
    async fn get_repo_public_key(
        &self,
        _session: &AuthenticationSession,
        repository: &RepositorySlug,
    ) -> SecretHostResult<RepoPublicKey> {
        if let Some(delay) = self.response_delay()? {
            tokio::time::sleep(delay).await;
        }

        let mut state = self.state.write().map_err(lock_error)?;
        state.calls.push(HostCall::FetchPublicKey {
            repository: repository.clone(),
        });
        if let Some(error) = state.key_fetch_failure.clone() {
            return Err(error);
        }
        state
            .keys
            .get(repository)
            .map(|key| key.public.clone())
            .ok_or_else(|| SecretHostError::api(404, "Not Found"))
    }

    async fn create_or_update_repo_secret(
        &self,
        _session: &AuthenticationSession,
        repository: &RepositorySlug,
        secret_name: &SecretName,
        sealed: &SealedSecret,
    ) -> SecretHostResult<SecretWriteOutcome> {
        if let Some(delay) = self.submission_delay()? {
            tokio::time::sleep(delay).await;
        }

        let mut state = self.state.write().map_err(lock_error)?;
        state.calls.push(HostCall::SubmitSecret {
            repository: repository.clone(),
            secret_name: secret_name.clone(),
            sealed: sealed.clone(),
        });
        if let Some(error) = state.submission_failure.clone() {
            return Err(error);
        }

        let current_key_id = state
            .keys
            .get(repository)
            .map(|key| key.public.key_id().to_owned())
            .ok_or_else(|| SecretHostError::api(404, "Not Found"))?;
        if current_key_id != sealed.key_id() {
            return Err(SecretHostError::api(
                422,
                format!("key_id {} does not match the repository key", sealed.key_id()),
            ));
        }

        let previous = state
            .secrets
            .insert((repository.clone(), secret_name.clone()), sealed.clone());
        Ok(if previous.is_some() {
            SecretWriteOutcome::Updated
        } else {
            SecretWriteOutcome::Created
        })
    }
}
