//! In-memory adapters for secret provisioning tests.

mod auth;
mod host;

pub use auth::{InMemoryAuthProvider, RecordedSessionRequest, SignInOutcome};
pub use host::{HostCall, InMemorySecretHost};
