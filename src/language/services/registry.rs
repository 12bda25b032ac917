//! Service layer for querying supported Draft languages.

use crate::errorable::Errorable;
use crate::language::{
    domain::{DraftLanguage, DraftManifest, LanguageDomainError, ManifestLanguage},
    ports::{LanguageManifestSource, ManifestSourceError},
};
use std::collections::HashSet;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, warn};

/// Service-level errors for language registry queries.
#[derive(Debug, Error)]
pub enum LanguageRegistryError {
    /// The manifest source could not be reached.
    #[error("draft language registry unavailable: {0}")]
    RegistryUnavailable(#[source] ManifestSourceError),

    /// The manifest could not be parsed.
    #[error("draft language manifest is malformed: {0}")]
    Malformed(String),

    /// A manifest entry violates the language invariants.
    #[error(transparent)]
    InvalidLanguage(#[from] LanguageDomainError),

    /// The manifest lists no languages.
    #[error("draft reported no supported languages")]
    Empty,

    /// The manifest lists no deployment types.
    #[error("draft reported no supported deployment types")]
    NoDeploymentTypes,
}

impl From<ManifestSourceError> for LanguageRegistryError {
    fn from(value: ManifestSourceError) -> Self {
        match value {
            ManifestSourceError::Malformed(reason) => Self::Malformed(reason),
            other => Self::RegistryUnavailable(other),
        }
    }
}

/// Result type for language registry operations.
pub type LanguageRegistryResult<T> = Result<T, LanguageRegistryError>;

/// Read-through query service over a Draft manifest source.
///
/// Every call fetches the manifest again; the service holds no mutable
/// state and may be shared across tasks.
#[derive(Clone)]
pub struct LanguageRegistryService<S>
where
    S: LanguageManifestSource,
{
    source: Arc<S>,
}

impl<S> LanguageRegistryService<S>
where
    S: LanguageManifestSource,
{
    /// Creates a registry service over `source`.
    #[must_use]
    pub const fn new(source: Arc<S>) -> Self {
        Self { source }
    }

    /// Returns the supported languages as an [`Errorable`].
    ///
    /// Never yields an empty [`Errorable::Succeeded`].
    pub async fn draft_languages(&self) -> Errorable<Vec<DraftLanguage>> {
        self.try_draft_languages().await.into()
    }

    /// Returns the supported languages.
    ///
    /// # Errors
    ///
    /// Returns [`LanguageRegistryError::RegistryUnavailable`] or
    /// [`LanguageRegistryError::Malformed`] when the manifest cannot be
    /// obtained, [`LanguageRegistryError::InvalidLanguage`] when an entry
    /// has no versions or repeats a name, and
    /// [`LanguageRegistryError::Empty`] when no languages are listed.
    pub async fn try_draft_languages(&self) -> LanguageRegistryResult<Vec<DraftLanguage>> {
        let manifest = self.fetch().await?;
        let languages = validate_languages(manifest.supported_languages)?;
        debug!(count = languages.len(), "draft languages loaded");
        Ok(languages)
    }

    /// Returns the supported deployment types as an [`Errorable`].
    pub async fn deployment_types(&self) -> Errorable<Vec<String>> {
        self.try_deployment_types().await.into()
    }

    /// Returns the supported deployment types (`helm`, `kustomize`, ...).
    ///
    /// # Errors
    ///
    /// Returns manifest errors as for [`Self::try_draft_languages`] and
    /// [`LanguageRegistryError::NoDeploymentTypes`] when none are listed.
    pub async fn try_deployment_types(&self) -> LanguageRegistryResult<Vec<String>> {
        let manifest = self.fetch().await?;
        let types: Vec<String> = manifest
            .supported_deployment_types
            .into_iter()
            .map(|value| value.trim().to_owned())
            .filter(|value| !value.is_empty())
            .collect();
        if types.is_empty() {
            return Err(LanguageRegistryError::NoDeploymentTypes);
        }
        Ok(types)
    }

    async fn fetch(&self) -> LanguageRegistryResult<DraftManifest> {
        self.source.fetch_manifest().await.map_err(|err| {
            warn!(error = %err, "draft manifest fetch failed");
            LanguageRegistryError::from(err)
        })
    }
}

fn validate_languages(
    entries: Vec<ManifestLanguage>,
) -> LanguageRegistryResult<Vec<DraftLanguage>> {
    if entries.is_empty() {
        return Err(LanguageRegistryError::Empty);
    }

    let mut seen = HashSet::with_capacity(entries.len());
    let mut languages = Vec::with_capacity(entries.len());
    for entry in entries {
        let language = DraftLanguage::try_from(entry)?;
        if !seen.insert(language.name().to_owned()) {
            return Err(LanguageDomainError::DuplicateLanguage(language.name().to_owned()).into());
        }
        languages.push(language);
    }
    Ok(languages)
}
