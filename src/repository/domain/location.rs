//! Working-copy location value object.

use super::RepositoryDomainError;
use camino::{Utf8Path, Utf8PathBuf};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Path identifying a working copy on disk.
///
/// # Examples
///
///     use draftkit::repository::domain::RepoLocation;
///
///     let location = RepoLocation::new("/src/widgets").expect("valid location");
///     assert_eq!(location.as_str(), "/src/widgets");
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RepoLocation(Utf8PathBuf);

impl RepoLocation {
    /// Creates a validated location.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryDomainError::EmptyLocation`] when the path is
    /// blank.
    pub fn new(value: impl Into<Utf8PathBuf>) -> Result<Self, RepositoryDomainError> {
        let path = value.into();
        if path.as_str().trim().is_empty() {
            return Err(RepositoryDomainError::EmptyLocation);
        }
        Ok(Self(path))
    }

    /// Returns the location as a path.
    #[must_use]
    pub fn as_path(&self) -> &Utf8Path {
        &self.0
    }

    /// Returns the location as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl TryFrom<PathBuf> for RepoLocation {
    type Error = RepositoryDomainError;

    fn try_from(value: PathBuf) -> Result<Self, Self::Error> {
        let path = Utf8PathBuf::from_path_buf(value).map_err(|original| {
            RepositoryDomainError::NonUtf8Location(original.to_string_lossy().into_owned())
        })?;
        Self::new(path)
    }
}

impl AsRef<Utf8Path> for RepoLocation {
    fn as_ref(&self) -> &Utf8Path {
        self.as_path()
    }
}

impl fmt::Display for RepoLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0.as_str())
    }
}
