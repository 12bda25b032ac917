//! Domain model for repository secret provisioning.
//!
//! Values are validated on construction, secret material is redacted from
//! `Debug` output, and sealing happens in [`seal_secret`].

mod error;
mod public_key;
mod seal;
mod secret;
mod session;
mod slug;

pub use error::SecretsDomainError;
pub use public_key::RepoPublicKey;
pub use seal::{PUBLIC_KEY_LENGTH, seal_secret};
pub use secret::{SealedSecret, SecretName, SecretValue, SecretWriteOutcome};
pub use session::{
    AccountIdentity, AuthScope, AuthenticationSession, GITHUB_AUTH_PROVIDER_ID,
    provisioning_scopes,
};
pub use slug::RepositorySlug;
