//! Error types for repository domain validation and parsing.

use thiserror::Error;

/// Errors returned while constructing repository domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RepositoryDomainError {
    /// The repository location is empty after trimming.
    #[error("repository location must not be empty")]
    EmptyLocation,

    /// The location is not valid UTF-8.
    #[error("repository location is not valid UTF-8: {0}")]
    NonUtf8Location(String),

    /// The reference name is empty after trimming.
    #[error("reference name must not be empty")]
    EmptyRefName,

    /// The remote name is empty after trimming.
    #[error("remote name must not be empty")]
    EmptyRemoteName,
}

/// Error returned while parsing reference kinds.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown reference kind: {0}")]
pub struct ParseRefKindError(pub String);
