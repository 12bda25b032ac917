//! Provisioning of GitHub Actions repository secrets.
//!
//! Setting a secret is a linear pipeline: obtain an authentication session,
//! fetch the repository's public key, seal the value against that key, and
//! submit the sealed value to the create-or-update endpoint. Each stage is
//! terminal on failure and nothing is retried or cached. The module follows
//! hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
