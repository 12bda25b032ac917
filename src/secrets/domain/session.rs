//! Authentication session borrowed from the host authentication subsystem.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Identifier of the GitHub authentication provider.
pub const GITHUB_AUTH_PROVIDER_ID: &str = "github";

/// OAuth scope requested from the authentication provider.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AuthScope(String);

impl AuthScope {
    /// Creates a scope from its wire name.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Full control of repositories, including secrets.
    #[must_use]
    pub fn repo() -> Self {
        Self::new("repo")
    }

    /// Read access to public keys.
    #[must_use]
    pub fn read_public_key() -> Self {
        Self::new("read:public_key")
    }

    /// Returns the scope wire name.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AuthScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Scopes required to read a repository public key and write its secrets.
#[must_use]
pub fn provisioning_scopes() -> Vec<AuthScope> {
    vec![AuthScope::repo(), AuthScope::read_public_key()]
}

/// Account the session belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountIdentity {
    /// Provider-specific account identifier.
    pub id: String,
    /// Human-readable account label, usually the login.
    pub label: String,
}

impl AccountIdentity {
    /// Creates an account identity.
    #[must_use]
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
        }
    }
}

/// Access token and granted scopes for one account.
///
/// Sessions are owned by the authentication provider; the provisioner only
/// borrows one for a single request cycle. `Debug` output never includes
/// the token.
#[derive(Clone, PartialEq, Eq)]
pub struct AuthenticationSession {
    access_token: String,
    scopes: BTreeSet<AuthScope>,
    account: AccountIdentity,
}

impl AuthenticationSession {
    /// Creates a session.
    #[must_use]
    pub fn new(
        access_token: impl Into<String>,
        scopes: impl IntoIterator<Item = AuthScope>,
        account: AccountIdentity,
    ) -> Self {
        Self {
            access_token: access_token.into(),
            scopes: scopes.into_iter().collect(),
            account,
        }
    }

    /// Returns the bearer token.
    #[must_use]
    pub fn access_token(&self) -> &str {
        &self.access_token
    }

    /// Returns the granted scopes.
    #[must_use]
    pub const fn scopes(&self) -> &BTreeSet<AuthScope> {
        &self.scopes
    }

    /// Returns the account.
    #[must_use]
    pub const fn account(&self) -> &AccountIdentity {
        &self.account
    }

    /// Returns `true` when every scope in `required` was granted.
    #[must_use]
    pub fn has_scopes(&self, required: &[AuthScope]) -> bool {
        required.iter().all(|scope| self.scopes.contains(scope))
    }
}

impl fmt::Debug for AuthenticationSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthenticationSession")
            .field("access_token", &"<redacted>")
            .field("scopes", &self.scopes)
            .field("account", &self.account)
            .finish()
    }
}
