//! Domain model for repository reference queries.

mod error;
mod location;
mod reference;
mod remote;

pub use error::{ParseRefKindError, RepositoryDomainError};
pub use location::RepoLocation;
pub use reference::{BranchQuery, Ref, RefKind};
pub use remote::Remote;
