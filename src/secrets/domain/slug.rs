//! Repository owner/name pair on GitHub.

use super::SecretsDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

const MAX_OWNER_LENGTH: usize = 100;
const MAX_REPOSITORY_NAME_LENGTH: usize = 100;

/// Validated `owner/name` repository coordinates.
///
/// # Examples
///
///     use draftkit::secrets::domain::RepositorySlug;
///
///     let slug = RepositorySlug::new("acme", "widgets").expect("valid slug");
///     assert_eq!(slug.to_string(), "acme/widgets");
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RepositorySlug {
    owner: String,
    name: String,
}

impl RepositorySlug {
    /// Creates validated repository coordinates.
    ///
    /// Owners accept ASCII letters, digits, `-` and `_`; names additionally
    /// accept `.` but may not be `.` or `..`.
    ///
    /// # Errors
    ///
    /// Returns [`SecretsDomainError::InvalidOwner`] or
    /// [`SecretsDomainError::InvalidRepositoryName`] for invalid parts.
    pub fn new(owner: &str, name: &str) -> Result<Self, SecretsDomainError> {
        let owner_trimmed = owner.trim();
        let owner_is_valid = !owner_trimmed.is_empty()
            && owner_trimmed.len() <= MAX_OWNER_LENGTH
            && owner_trimmed
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !owner_is_valid {
            return Err(SecretsDomainError::InvalidOwner(owner.to_owned()));
        }

        let name_trimmed = name.trim();
        let name_is_valid = !name_trimmed.is_empty()
            && name_trimmed.len() <= MAX_REPOSITORY_NAME_LENGTH
            && name_trimmed != "."
            && name_trimmed != ".."
            && name_trimmed
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'));
        if !name_is_valid {
            return Err(SecretsDomainError::InvalidRepositoryName(name.to_owned()));
        }

        Ok(Self {
            owner: owner_trimmed.to_owned(),
            name: name_trimmed.to_owned(),
        })
    }

    /// Returns the owner login.
    #[must_use]
    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// Returns the repository name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for RepositorySlug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}
