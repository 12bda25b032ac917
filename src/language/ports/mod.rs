//! Port contracts for Draft language discovery.
//!
//! Ports define infrastructure-agnostic interfaces used by language services.

pub mod manifest;

pub use manifest::{LanguageManifestSource, ManifestResult, ManifestSourceError};
