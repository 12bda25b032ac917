//! Domain model for Draft language discovery.

mod error;
mod language;
mod manifest;

pub use error::LanguageDomainError;
pub use language::DraftLanguage;
pub use manifest::{DraftManifest, ManifestLanguage};
