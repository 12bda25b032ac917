//! Application services for repository reference queries.

mod bridge;

pub use bridge::{RepositoryBridgeError, RepositoryBridgeResult, RepositoryBridgeService};
