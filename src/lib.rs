//! Draftkit: core services behind the Draft scaffolding workflow.
//!
//! This crate discovers the languages the Draft tool can scaffold, relays
//! branch and remote listings from source repositories, and provisions
//! encrypted GitHub Actions secrets for deployment pipelines.
//!
//! # Architecture
//!
//! Each feature module follows hexagonal architecture principles:
//!
//! - **Domain**: Validated value types with no infrastructure dependencies
//! - **Ports**: Async trait interfaces for external systems
//! - **Adapters**: Concrete implementations of ports (CLI tools, HTTP, memory)
//! - **Services**: Orchestration over ports, returning typed results
//!
//! The three feature modules never call each other; a caller gathers context
//! from [`language`] and [`repository`], then invokes [`secrets`].
//!
//! # Modules
//!
//! - [`config`]: Tool and provisioner configuration
//! - [`errorable`]: Serialisable success-or-failure outcome
//! - [`language`]: Draft language and deployment type discovery
//! - [`repository`]: Remote branch and remote listings
//! - [`secrets`]: Sealed repository secret provisioning

pub mod config;
pub mod errorable;
pub mod language;
pub mod repository;
pub mod secrets;
