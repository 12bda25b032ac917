//! Service orchestrating the secret provisioning pipeline.

use crate::config::ProvisionerConfig;
use crate::errorable::Errorable;
use crate::secrets::{
    domain::{
        GITHUB_AUTH_PROVIDER_ID, RepositorySlug, SecretName, SecretValue, SecretWriteOutcome,
        SecretsDomainError, provisioning_scopes, seal_secret,
    },
    ports::{AuthProvider, AuthProviderError, SecretHostClient, SecretHostError, SessionRequest},
};
use std::fmt;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Pipeline stage at which provisioning stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProvisioningStage {
    /// Obtaining an authentication session.
    Authenticate,
    /// Fetching the repository public key.
    FetchPublicKey,
    /// Submitting the sealed value.
    SubmitSecret,
}

impl ProvisioningStage {
    /// Returns the canonical string form.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Authenticate => "authenticate",
            Self::FetchPublicKey => "fetch_public_key",
            Self::SubmitSecret => "submit_secret",
        }
    }
}

impl fmt::Display for ProvisioningStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Service-level errors for secret provisioning.
#[derive(Debug, Error)]
pub enum SecretProvisioningError {
    /// Request validation failed before any I/O.
    #[error(transparent)]
    Domain(#[from] SecretsDomainError),

    /// The authentication provider rejected the request or the user
    /// cancelled sign-in.
    #[error("failed to obtain an authentication session: {0}")]
    AuthSession(#[source] AuthProviderError),

    /// The provider completed without producing a session.
    #[error("no authentication session is available")]
    AuthSessionMissing,

    /// The public key could not be fetched.
    #[error("failed to fetch the repository public key: {0}")]
    PublicKeyFetch(#[source] SecretHostError),

    /// The fetched public key has no identifier or unusable key material.
    #[error("repository public key is invalid: {0}")]
    PublicKeyInvalid(#[source] SecretsDomainError),

    /// The sealed value could not be submitted.
    #[error("failed to submit the secret: {0}")]
    SecretSubmission(#[source] SecretHostError),

    /// A network stage exceeded the request timeout.
    #[error("{stage} timed out after {timeout:?}")]
    Timeout {
        /// Stage that timed out.
        stage: ProvisioningStage,
        /// Applied bound.
        timeout: Duration,
    },

    /// The caller cancelled the operation.
    #[error("{stage} was cancelled")]
    Cancelled {
        /// Stage in progress when cancellation was observed.
        stage: ProvisioningStage,
    },
}

impl SecretProvisioningError {
    /// Returns the pipeline stage the error belongs to, if any.
    #[must_use]
    pub const fn stage(&self) -> Option<ProvisioningStage> {
        match self {
            Self::Domain(_) => None,
            Self::AuthSession(_) | Self::AuthSessionMissing => {
                Some(ProvisioningStage::Authenticate)
            }
            Self::PublicKeyFetch(_) | Self::PublicKeyInvalid(_) => {
                Some(ProvisioningStage::FetchPublicKey)
            }
            Self::SecretSubmission(_) => Some(ProvisioningStage::SubmitSecret),
            Self::Timeout { stage, .. } | Self::Cancelled { stage } => Some(*stage),
        }
    }
}

/// Result type for secret provisioning operations.
pub type SecretProvisioningResult<T> = Result<T, SecretProvisioningError>;

/// Request to create or update one repository secret.
#[derive(Clone)]
pub struct SetRepositorySecretRequest {
    owner: String,
    repository: String,
    secret_name: String,
    secret_value: String,
}

impl SetRepositorySecretRequest {
    /// Creates a request. Fields are validated when the request runs.
    #[must_use]
    pub fn new(
        owner: impl Into<String>,
        repository: impl Into<String>,
        secret_name: impl Into<String>,
        secret_value: impl Into<String>,
    ) -> Self {
        Self {
            owner: owner.into(),
            repository: repository.into(),
            secret_name: secret_name.into(),
            secret_value: secret_value.into(),
        }
    }

    fn validate(self) -> Result<ValidatedRequest, SecretsDomainError> {
        Ok(ValidatedRequest {
            slug: RepositorySlug::new(&self.owner, &self.repository)?,
            name: SecretName::new(self.secret_name)?,
            value: SecretValue::new(self.secret_value)?,
        })
    }
}

impl fmt::Debug for SetRepositorySecretRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SetRepositorySecretRequest")
            .field("owner", &self.owner)
            .field("repository", &self.repository)
            .field("secret_name", &self.secret_name)
            .field("secret_value", &"<redacted>")
            .finish()
    }
}

#[derive(Debug)]
struct ValidatedRequest {
    slug: RepositorySlug,
    name: SecretName,
    value: SecretValue,
}

/// Sets GitHub Actions repository secrets.
///
/// Each call authenticates, fetches the repository public key, seals the
/// value against it, and submits the sealed value. Stages run strictly in
/// order and the first failure ends the call. Neither sessions nor keys are
/// kept between calls.
#[derive(Clone)]
pub struct SecretProvisioningService<A, H>
where
    A: AuthProvider,
    H: SecretHostClient,
{
    auth: Arc<A>,
    host: Arc<H>,
    request_timeout: Duration,
}

impl<A, H> SecretProvisioningService<A, H>
where
    A: AuthProvider,
    H: SecretHostClient,
{
    /// Creates a service with the default request timeout.
    #[must_use]
    pub fn new(auth: Arc<A>, host: Arc<H>) -> Self {
        Self::with_config(auth, host, &ProvisionerConfig::default())
    }

    /// Creates a service whose request timeout comes from `config`.
    #[must_use]
    pub const fn with_config(auth: Arc<A>, host: Arc<H>, config: &ProvisionerConfig) -> Self {
        Self {
            auth,
            host,
            request_timeout: config.request_timeout(),
        }
    }

    /// Overrides the bound applied to key fetch and submission.
    #[must_use]
    pub const fn with_request_timeout(mut self, request_timeout: Duration) -> Self {
        self.request_timeout = request_timeout;
        self
    }

    /// Returns the bound applied to key fetch and submission.
    #[must_use]
    pub const fn request_timeout(&self) -> Duration {
        self.request_timeout
    }

    /// Creates or updates a repository secret.
    ///
    /// # Errors
    ///
    /// Returns [`SecretProvisioningError`] for the first stage that fails.
    pub async fn set_repository_secret(
        &self,
        request: SetRepositorySecretRequest,
    ) -> SecretProvisioningResult<SecretWriteOutcome> {
        self.set_repository_secret_with_cancellation(request, &CancellationToken::new())
            .await
    }

    /// Creates or updates a repository secret, stopping when `cancel`
    /// fires.
    ///
    /// # Errors
    ///
    /// Returns [`SecretProvisioningError::Cancelled`] when the token fires
    /// before the pipeline completes, or the error of the first stage that
    /// fails.
    #[tracing::instrument(
        name = "secrets.set_repository_secret",
        skip(self, request, cancel),
        fields(owner = %request.owner, repository = %request.repository, secret_name = %request.secret_name)
    )]
    pub async fn set_repository_secret_with_cancellation(
        &self,
        request: SetRepositorySecretRequest,
        cancel: &CancellationToken,
    ) -> SecretProvisioningResult<SecretWriteOutcome> {
        let result = self.run_pipeline(request, cancel).await;
        match &result {
            Ok(outcome) => info!(%outcome, "repository secret written"),
            Err(err) => warn!(stage = ?err.stage(), error = %err, "repository secret not written"),
        }
        result
    }

    /// [`Self::set_repository_secret`] as an [`Errorable`].
    pub async fn set_repository_secret_errorable(
        &self,
        request: SetRepositorySecretRequest,
    ) -> Errorable<SecretWriteOutcome> {
        self.set_repository_secret(request).await.into()
    }

    async fn run_pipeline(
        &self,
        request: SetRepositorySecretRequest,
        cancel: &CancellationToken,
    ) -> SecretProvisioningResult<SecretWriteOutcome> {
        let ValidatedRequest { slug, name, value } = request.validate()?;
        let scopes = provisioning_scopes();

        debug!(%slug, "requesting authentication session");
        let session = guarded(
            ProvisioningStage::Authenticate,
            None,
            cancel,
            self.auth.get_session(
                GITHUB_AUTH_PROVIDER_ID,
                &scopes,
                SessionRequest::interactive(),
            ),
        )
        .await?
        .map_err(SecretProvisioningError::AuthSession)?
        .ok_or(SecretProvisioningError::AuthSessionMissing)?;

        debug!(%slug, account = %session.account().label, "fetching repository public key");
        let public_key = guarded(
            ProvisioningStage::FetchPublicKey,
            Some(self.request_timeout),
            cancel,
            self.host.get_repo_public_key(&session, &slug),
        )
        .await?
        .map_err(SecretProvisioningError::PublicKeyFetch)?;

        let sealed =
            seal_secret(&public_key, &value).map_err(SecretProvisioningError::PublicKeyInvalid)?;

        debug!(%slug, %name, key_id = sealed.key_id(), "submitting sealed secret");
        guarded(
            ProvisioningStage::SubmitSecret,
            Some(self.request_timeout),
            cancel,
            self.host
                .create_or_update_repo_secret(&session, &slug, &name, &sealed),
        )
        .await?
        .map_err(SecretProvisioningError::SecretSubmission)
    }
}

/// Runs `operation` until it completes, `limit` elapses, or `cancel` fires.
///
/// Cancellation wins when both are ready.
async fn guarded<F>(
    stage: ProvisioningStage,
    limit: Option<Duration>,
    cancel: &CancellationToken,
    operation: F,
) -> SecretProvisioningResult<F::Output>
where
    F: Future,
{
    let bounded = async {
        match limit {
            Some(timeout) => tokio::time::timeout(timeout, operation)
                .await
                .map_err(|_| SecretProvisioningError::Timeout { stage, timeout }),
            None => Ok(operation.await),
        }
    };

    tokio::select! {
        biased;
        () = cancel.cancelled() => Err(SecretProvisioningError::Cancelled { stage }),
        outcome = bounded => outcome,
    }
}
