//! Adapter implementations for the repository provider port.

pub mod git_cli;
pub mod memory;

pub use git_cli::GitCliRepositoryProvider;
pub use memory::InMemoryRepositoryProvider;
