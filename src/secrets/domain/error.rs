//! Error types for secret provisioning domain validation.

use thiserror::Error;

/// Errors returned while constructing or sealing secret values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SecretsDomainError {
    /// The repository owner is empty or contains unsupported characters.
    #[error("invalid repository owner '{0}'")]
    InvalidOwner(String),

    /// The repository name is empty or contains unsupported characters.
    #[error("invalid repository name '{0}'")]
    InvalidRepositoryName(String),

    /// The secret name is empty after trimming.
    #[error("secret name must not be empty")]
    EmptySecretName,

    /// The secret name contains characters outside `[A-Za-z0-9_]` or starts
    /// with a digit.
    #[error(
        "secret name '{0}' must contain only letters, digits, and underscores and must not start with a digit"
    )]
    InvalidSecretName(String),

    /// The secret name uses the reserved `GITHUB_` prefix.
    #[error("secret name '{0}' must not start with GITHUB_")]
    ReservedSecretName(String),

    /// The secret value exceeds the host size limit.
    #[error("secret value is {actual} bytes, exceeds limit of {limit} bytes")]
    SecretValueTooLarge {
        /// Size of the value in bytes.
        actual: usize,
        /// Maximum accepted size in bytes.
        limit: usize,
    },

    /// The public key has no key identifier.
    #[error("public key has no key identifier")]
    MissingKeyId,

    /// The public key material is not a base64 encoded X25519 key.
    #[error("invalid public key material: {0}")]
    InvalidKeyMaterial(String),

    /// Sealing the value failed.
    #[error("failed to seal secret value")]
    SealFailed,
}
