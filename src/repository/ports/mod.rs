//! Port contracts for repository reference queries.
//!
//! Ports define infrastructure-agnostic interfaces used by repository
//! services.

pub mod provider;

pub use provider::{
    ProviderResult, RepositoryProvider, RepositoryProviderError, SourceRepository,
};
