//! Adapter implementations for the manifest source port.

pub mod draft_cli;
pub mod memory;

pub use draft_cli::DraftCliManifestSource;
pub use memory::InMemoryManifestSource;
