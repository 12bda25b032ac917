//! Repository public key used to seal secrets.

use serde::{Deserialize, Serialize};

/// Public key GitHub publishes for sealing a repository's secrets.
///
/// Fetched fresh for every submission and never cached. The fields are not
/// validated here; [`super::seal_secret`] rejects a missing identifier or
/// unusable key material.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoPublicKey {
    key_id: String,
    key: String,
}

impl RepoPublicKey {
    /// Creates a key from its identifier and base64 key material.
    #[must_use]
    pub fn new(key_id: impl Into<String>, key_material: impl Into<String>) -> Self {
        Self {
            key_id: key_id.into(),
            key: key_material.into(),
        }
    }

    /// Returns the key identifier.
    #[must_use]
    pub fn key_id(&self) -> &str {
        &self.key_id
    }

    /// Returns the base64 encoded key material.
    #[must_use]
    pub fn key_material(&self) -> &str {
        &self.key
    }
}
