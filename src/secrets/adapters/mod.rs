//! Adapter implementations for secret provisioning ports.

pub mod github;
pub mod memory;
pub mod token;

pub use github::GitHubSecretsClient;
pub use memory::{HostCall, InMemoryAuthProvider, InMemorySecretHost, SignInOutcome};
pub use token::StaticTokenAuthProvider;
