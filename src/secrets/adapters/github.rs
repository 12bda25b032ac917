//! GitHub REST client for repository Actions secrets.

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode, Url, header};
use serde::Deserialize;
use tracing::debug;

use crate::config::ProvisionerConfig;
use crate::secrets::{
    domain::{
        AuthenticationSession, RepoPublicKey, RepositorySlug, SealedSecret, SecretName,
        SecretWriteOutcome,
    },
    ports::{SecretHostClient, SecretHostError, SecretHostResult},
};

const GITHUB_MEDIA_TYPE: &str = "application/vnd.github+json";
const API_VERSION_HEADER: &str = "X-GitHub-Api-Version";
const API_VERSION: &str = "2022-11-28";

/// Secret host client for `api.github.com` and GitHub Enterprise Server.
///
/// Requests authenticate with the session's bearer token. The public key
/// response is passed through unvalidated; sealing rejects unusable keys.
#[derive(Debug, Clone)]
pub struct GitHubSecretsClient {
    client: Client,
    base_url: Url,
}

#[derive(Debug, Deserialize)]
struct PublicKeyResponse {
    #[serde(default)]
    key_id: String,
    #[serde(default)]
    key: String,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

impl GitHubSecretsClient {
    /// Builds a client from provisioner configuration.
    ///
    /// # Errors
    ///
    /// Returns [`SecretHostError::Transport`] when the base URL is invalid
    /// or the HTTP client cannot be constructed.
    pub fn new(config: &ProvisionerConfig) -> SecretHostResult<Self> {
        let base_url = config.api_url().map_err(SecretHostError::transport)?;
        let client = Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(config.request_timeout())
            .build()
            .map_err(SecretHostError::transport)?;
        Ok(Self { client, base_url })
    }

    /// Returns the API base URL.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, segments: &[&str]) -> SecretHostResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| SecretHostError::Decode(format!("{} cannot be a base", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn secrets_endpoint(
        &self,
        repository: &RepositorySlug,
        tail: &str,
    ) -> SecretHostResult<Url> {
        self.endpoint(&[
            "repos",
            repository.owner(),
            repository.name(),
            "actions",
            "secrets",
            tail,
        ])
    }

    fn authorise(request: RequestBuilder, session: &AuthenticationSession) -> RequestBuilder {
        request
            .bearer_auth(session.access_token())
            .header(header::ACCEPT, GITHUB_MEDIA_TYPE)
            .header(API_VERSION_HEADER, API_VERSION)
    }
}

async fn api_error(response: Response) -> SecretHostError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ApiErrorBody>(&body).map_or_else(
        |_| {
            status
                .canonical_reason()
                .map_or_else(|| body.trim().to_owned(), str::to_owned)
        },
        |parsed| parsed.message,
    );
    SecretHostError::api(status.as_u16(), message)
}

#[async_trait]
impl SecretHostClient for GitHubSecretsClient {
    async fn get_repo_public_key(
        &self,
        session: &AuthenticationSession,
        repository: &RepositorySlug,
    ) -> SecretHostResult<RepoPublicKey> {
        let url = self.secrets_endpoint(repository, "public-key")?;
        debug!(%repository, "fetching repository public key");

        let response = Self::authorise(self.client.get(url), session)
            .send()
            .await
            .map_err(SecretHostError::transport)?;
        if !response.status().is_success() {
            return Err(api_error(response).await);
        }

        let body: PublicKeyResponse = response
            .json()
            .await
            .map_err(|err| SecretHostError::Decode(err.to_string()))?;
        Ok(RepoPublicKey::new(body.key_id, body.key))
    }

    async fn create_or_update_repo_secret(
        &self,
        session: &AuthenticationSession,
        repository: &RepositorySlug,
        secret_name: &SecretName,
        sealed: &SealedSecret,
    ) -> SecretHostResult<SecretWriteOutcome> {
        let url = self.secrets_endpoint(repository, secret_name.as_str())?;
        debug!(%repository, %secret_name, key_id = sealed.key_id(), "submitting sealed secret");

        let response = Self::authorise(self.client.put(url), session)
            .json(sealed)
            .send()
            .await
            .map_err(SecretHostError::transport)?;
        match response.status() {
            StatusCode::CREATED => Ok(SecretWriteOutcome::Created),
            StatusCode::NO_CONTENT | StatusCode::OK => Ok(SecretWriteOutcome::Updated),
            _ => Err(api_error(response).await),
        }
    }
}
