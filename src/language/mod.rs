//! Discovery of the languages and runtime versions supported by Draft.
//!
//! The registry reads the Draft tool's manifest (`draft info`) and exposes a
//! validated, non-empty list of languages, each with at least one runtime
//! version. An empty manifest is reported as a failure rather than an empty
//! success. The module follows hexagonal architecture:
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
