//! Application services for Draft language discovery.

mod registry;

pub use registry::{LanguageRegistryError, LanguageRegistryResult, LanguageRegistryService};
