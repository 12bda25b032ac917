//! Port contracts for secret provisioning.
//!
//! Ports define infrastructure-agnostic interfaces used by the provisioning
//! service: the host authentication subsystem and the secret-storage API.

pub mod auth;
pub mod host;

pub use auth::{AuthProvider, AuthProviderError, AuthResult, SessionRequest};
pub use host::{SecretHostClient, SecretHostError, SecretHostResult};
