//! Unvalidated manifest shape reported by `draft info`.

use serde::{Deserialize, Serialize};

/// Manifest describing what the Draft tool can scaffold.
///
/// Mirrors the JSON printed by `draft info`:
///
/// ```json
/// {
///   "supportedLanguages": [
///     { "name": "go", "displayName": "Go", "exampleVersions": ["1.22"] }
///   ],
///   "supportedDeploymentTypes": ["helm", "kustomize", "manifests"]
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftManifest {
    /// Language entries in the order Draft lists them.
    #[serde(default)]
    pub supported_languages: Vec<ManifestLanguage>,
    /// Deployment flavours Draft can generate.
    #[serde(default)]
    pub supported_deployment_types: Vec<String>,
}

impl DraftManifest {
    /// Creates a manifest from language entries and deployment types.
    #[must_use]
    pub const fn new(
        supported_languages: Vec<ManifestLanguage>,
        supported_deployment_types: Vec<String>,
    ) -> Self {
        Self {
            supported_languages,
            supported_deployment_types,
        }
    }
}

/// A single language entry as reported by Draft, before validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManifestLanguage {
    /// Draft identifier of the language.
    pub name: String,
    /// Human-readable language name.
    #[serde(default)]
    pub display_name: Option<String>,
    /// Runtime versions offered for the language.
    #[serde(default)]
    pub example_versions: Vec<String>,
}

impl ManifestLanguage {
    /// Creates an entry without a display name.
    #[must_use]
    pub fn new<I, S>(name: impl Into<String>, versions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            display_name: None,
            example_versions: versions.into_iter().map(Into::into).collect(),
        }
    }

    /// Sets the display name.
    #[must_use]
    pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = Some(display_name.into());
        self
    }
}
