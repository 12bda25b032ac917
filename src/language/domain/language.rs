//! Validated Draft language value.

use super::{LanguageDomainError, ManifestLanguage};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A language supported by Draft together with its runtime versions.
///
/// The name is trimmed and non-empty; `versions` keeps manifest order and
/// always holds at least one non-blank entry.
///
/// # Examples
///
///     use draftkit::language::domain::DraftLanguage;
///
///     let go = DraftLanguage::new("go", ["1.22", "1.21"]).expect("valid language");
///     assert_eq!(go.name(), "go");
///     assert_eq!(go.versions(), ["1.22", "1.21"]);
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DraftLanguage {
    name: String,
    display_name: Option<String>,
    versions: Vec<String>,
}

impl DraftLanguage {
    /// Creates a validated language.
    ///
    /// # Errors
    ///
    /// Returns [`LanguageDomainError::EmptyLanguageName`] for a blank name,
    /// [`LanguageDomainError::NoVersions`] when no versions are given, or
    /// [`LanguageDomainError::BlankVersion`] when a version is blank.
    pub fn new<I, S>(name: impl Into<String>, versions: I) -> Result<Self, LanguageDomainError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let raw = name.into();
        let normalized = raw.trim();
        if normalized.is_empty() {
            return Err(LanguageDomainError::EmptyLanguageName);
        }

        let mut validated = Vec::new();
        for version in versions {
            let value = version.into();
            let trimmed = value.trim();
            if trimmed.is_empty() {
                return Err(LanguageDomainError::BlankVersion(normalized.to_owned()));
            }
            validated.push(trimmed.to_owned());
        }
        if validated.is_empty() {
            return Err(LanguageDomainError::NoVersions(normalized.to_owned()));
        }

        Ok(Self {
            name: normalized.to_owned(),
            display_name: None,
            versions: validated,
        })
    }

    /// Sets the human-readable display name. Blank values are ignored.
    #[must_use]
    pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
        let value = display_name.into();
        let trimmed = value.trim();
        self.display_name = (!trimmed.is_empty()).then(|| trimmed.to_owned());
        self
    }

    /// Returns the Draft identifier of the language.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the display name reported by Draft, if any.
    #[must_use]
    pub fn display_name(&self) -> Option<&str> {
        self.display_name.as_deref()
    }

    /// Returns the supported runtime versions in manifest order.
    #[must_use]
    pub fn versions(&self) -> &[String] {
        &self.versions
    }

    /// Returns the first listed version, which Draft treats as the default.
    #[must_use]
    pub fn default_version(&self) -> Option<&str> {
        self.versions.first().map(String::as_str)
    }
}

impl fmt::Display for DraftLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name().unwrap_or(&self.name))
    }
}

impl TryFrom<ManifestLanguage> for DraftLanguage {
    type Error = LanguageDomainError;

    fn try_from(value: ManifestLanguage) -> Result<Self, Self::Error> {
        let language = Self::new(value.name, value.example_versions)?;
        Ok(match value.display_name {
            Some(display_name) => language.with_display_name(display_name),
            None => language,
        })
    }
}
