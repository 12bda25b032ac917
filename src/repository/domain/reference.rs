//! Branch and tag references relayed from the repository provider.

use super::{ParseRefKindError, RepositoryDomainError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of a Git reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RefKind {
    /// Local branch under `refs/heads`.
    Head,
    /// Remote-tracking branch under `refs/remotes`.
    RemoteHead,
    /// Tag under `refs/tags`.
    Tag,
}

impl RefKind {
    /// Returns the canonical string form.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Head => "head",
            Self::RemoteHead => "remote-head",
            Self::Tag => "tag",
        }
    }
}

impl fmt::Display for RefKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for RefKind {
    type Error = ParseRefKindError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "head" => Ok(Self::Head),
            "remote-head" => Ok(Self::RemoteHead),
            "tag" => Ok(Self::Tag),
            other => Err(ParseRefKindError(other.to_owned())),
        }
    }
}

/// A branch or tag reference.
///
/// Remote-tracking branches are named `<remote>/<branch>` and carry the
/// remote name separately.
///
/// # Examples
///
///     use draftkit::repository::domain::{Ref, RefKind};
///
///     let main = Ref::remote_head("origin", "main").expect("valid ref");
///     assert_eq!(main.name(), "origin/main");
///     assert_eq!(main.kind(), RefKind::RemoteHead);
///     assert_eq!(main.remote_name(), Some("origin"));
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ref {
    name: String,
    kind: RefKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    remote_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    commit: Option<String>,
}

impl Ref {
    /// Creates a reference of the given kind.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryDomainError::EmptyRefName`] for a blank name.
    pub fn new(name: impl Into<String>, kind: RefKind) -> Result<Self, RepositoryDomainError> {
        let raw = name.into();
        let normalized = raw.trim();
        if normalized.is_empty() {
            return Err(RepositoryDomainError::EmptyRefName);
        }
        Ok(Self {
            name: normalized.to_owned(),
            kind,
            remote_name: None,
            commit: None,
        })
    }

    /// Creates a remote-tracking branch reference `<remote>/<branch>`.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryDomainError`] when either part is blank.
    pub fn remote_head(remote: &str, branch: &str) -> Result<Self, RepositoryDomainError> {
        let remote_name = remote.trim();
        if remote_name.is_empty() {
            return Err(RepositoryDomainError::EmptyRemoteName);
        }
        let branch_name = branch.trim();
        if branch_name.is_empty() {
            return Err(RepositoryDomainError::EmptyRefName);
        }
        Ok(Self::new(format!("{remote_name}/{branch_name}"), RefKind::RemoteHead)?
            .with_remote_name(remote_name))
    }

    /// Sets the owning remote.
    #[must_use]
    pub fn with_remote_name(mut self, remote_name: impl Into<String>) -> Self {
        self.remote_name = Some(remote_name.into());
        self
    }

    /// Sets the commit the reference points at.
    #[must_use]
    pub fn with_commit(mut self, commit: impl Into<String>) -> Self {
        self.commit = Some(commit.into());
        self
    }

    /// Returns the short reference name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the reference kind.
    #[must_use]
    pub const fn kind(&self) -> RefKind {
        self.kind
    }

    /// Returns the owning remote for remote-tracking branches.
    #[must_use]
    pub fn remote_name(&self) -> Option<&str> {
        self.remote_name.as_deref()
    }

    /// Returns the commit identifier, when known.
    #[must_use]
    pub fn commit(&self) -> Option<&str> {
        self.commit.as_deref()
    }

    /// Returns `true` for remote-tracking branches.
    #[must_use]
    pub fn is_remote(&self) -> bool {
        self.kind == RefKind::RemoteHead
    }
}

impl fmt::Display for Ref {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Filter for branch listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BranchQuery {
    remote: bool,
}

impl BranchQuery {
    /// Selects remote-tracking branches only.
    #[must_use]
    pub const fn remote() -> Self {
        Self { remote: true }
    }

    /// Selects local branches only.
    #[must_use]
    pub const fn local() -> Self {
        Self { remote: false }
    }

    /// Returns `true` when remote-tracking branches are selected.
    #[must_use]
    pub const fn is_remote(self) -> bool {
        self.remote
    }

    /// Returns `true` when `reference` satisfies the filter.
    #[must_use]
    pub fn matches(self, reference: &Ref) -> bool {
        let wanted = if self.remote {
            RefKind::RemoteHead
        } else {
            RefKind::Head
        };
        reference.kind() == wanted
    }
}
