//! Secret names, plaintext values, and sealed payloads.

use super::SecretsDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum size of a repository secret accepted by GitHub.
const MAX_SECRET_VALUE_BYTES: usize = 48 * 1024;

/// Reserved prefix for names managed by GitHub itself.
const RESERVED_PREFIX: &str = "GITHUB_";

/// Validated GitHub Actions secret name.
///
/// Names are stored upper-case, as GitHub does.
///
/// # Examples
///
///     use draftkit::secrets::domain::SecretName;
///
///     let name = SecretName::new("deploy_key").expect("valid name");
///     assert_eq!(name.as_str(), "DEPLOY_KEY");
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SecretName(String);

impl SecretName {
    /// Creates a validated secret name.
    ///
    /// # Errors
    ///
    /// Returns [`SecretsDomainError::EmptySecretName`] for a blank value,
    /// [`SecretsDomainError::InvalidSecretName`] for unsupported characters
    /// or a leading digit, and [`SecretsDomainError::ReservedSecretName`]
    /// for names starting with `GITHUB_`.
    pub fn new(value: impl Into<String>) -> Result<Self, SecretsDomainError> {
        let raw = value.into();
        let normalized = raw.trim().to_ascii_uppercase();

        if normalized.is_empty() {
            return Err(SecretsDomainError::EmptySecretName);
        }

        let starts_with_digit = normalized.starts_with(|c: char| c.is_ascii_digit());
        let has_invalid_char = !normalized
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_');
        if starts_with_digit || has_invalid_char {
            return Err(SecretsDomainError::InvalidSecretName(raw));
        }

        if normalized.starts_with(RESERVED_PREFIX) {
            return Err(SecretsDomainError::ReservedSecretName(raw));
        }

        Ok(Self(normalized))
    }

    /// Returns the secret name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for SecretName {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for SecretName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Plaintext secret value. `Debug` output is redacted.
#[derive(Clone, PartialEq, Eq)]
pub struct SecretValue(String);

impl SecretValue {
    /// Wraps a plaintext value.
    ///
    /// # Errors
    ///
    /// Returns [`SecretsDomainError::SecretValueTooLarge`] when the value
    /// exceeds 48 KiB.
    pub fn new(value: impl Into<String>) -> Result<Self, SecretsDomainError> {
        let raw = value.into();
        if raw.len() > MAX_SECRET_VALUE_BYTES {
            return Err(SecretsDomainError::SecretValueTooLarge {
                actual: raw.len(),
                limit: MAX_SECRET_VALUE_BYTES,
            });
        }
        Ok(Self(raw))
    }

    /// Returns the plaintext.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for SecretValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SecretValue(<redacted>)")
    }
}

/// Secret value sealed against a repository public key.
///
/// Serialises to the request body of the create-or-update endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SealedSecret {
    encrypted_value: String,
    key_id: String,
}

impl SealedSecret {
    /// Creates a sealed payload from a base64 ciphertext and key identifier.
    #[must_use]
    pub fn new(key_id: impl Into<String>, encrypted_value: impl Into<String>) -> Self {
        Self {
            encrypted_value: encrypted_value.into(),
            key_id: key_id.into(),
        }
    }

    /// Returns the base64 encoded ciphertext.
    #[must_use]
    pub fn encrypted_value(&self) -> &str {
        &self.encrypted_value
    }

    /// Returns the identifier of the key used for sealing.
    #[must_use]
    pub fn key_id(&self) -> &str {
        &self.key_id
    }
}

/// Result of a create-or-update secret call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SecretWriteOutcome {
    /// The secret did not exist before.
    Created,
    /// An existing secret was overwritten.
    Updated,
}

impl SecretWriteOutcome {
    /// Returns the canonical string form.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::Updated => "updated",
        }
    }
}

impl fmt::Display for SecretWriteOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
