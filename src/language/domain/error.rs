//! Error types for language domain validation.

use thiserror::Error;

/// Errors returned while constructing language values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LanguageDomainError {
    /// The language name is empty after trimming.
    #[error("language name must not be empty")]
    EmptyLanguageName,

    /// The language lists no runtime versions.
    #[error("language '{0}' lists no runtime versions")]
    NoVersions(String),

    /// A runtime version entry is empty after trimming.
    #[error("language '{0}' lists a blank runtime version")]
    BlankVersion(String),

    /// The same language name appears more than once.
    #[error("language '{0}' appears more than once")]
    DuplicateLanguage(String),
}
