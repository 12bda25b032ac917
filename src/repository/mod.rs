//! Remote branch and remote queries for local working copies.
//!
//! The bridge asks a repository provider for the repository registered at a
//! location and relays its remote-tracking branches or its configured
//! remotes. Unknown locations fail with `RepositoryNotFound`; results are
//! never cached. The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;
