//! Shared fixtures for in-memory integration tests.

use std::sync::Arc;

use draftkit::language::domain::{DraftManifest, ManifestLanguage};
use draftkit::repository::{
    adapters::InMemoryRepositoryProvider,
    domain::{Ref, RefKind, Remote, RepoLocation},
};
use draftkit::secrets::{
    adapters::{InMemoryAuthProvider, InMemorySecretHost},
    domain::{AccountIdentity, AuthenticationSession, RepositorySlug, provisioning_scopes},
};
use rstest::fixture;

/// Manifest resembling the output of a current Draft release.
#[fixture]
pub fn draft_manifest() -> DraftManifest {
    DraftManifest::new(
        vec![
            ManifestLanguage::new("go", ["1.22", "1.21"]).with_display_name("Go"),
            ManifestLanguage::new("java", ["21", "17", "11"]).with_display_name("Java"),
            ManifestLanguage::new("python", ["3.12", "3.11"]),
        ],
        vec![
            "helm".to_owned(),
            "kustomize".to_owned(),
            "manifests".to_owned(),
        ],
    )
}

/// Location of the `widgets` working copy.
///
/// # Panics
///
/// Panics if the fixed path is rejected.
#[must_use]
pub fn widgets_location() -> RepoLocation {
    RepoLocation::new("/work/widgets").expect("valid location")
}

/// Provider holding one working copy with local, remote, and tag refs.
///
/// # Panics
///
/// Panics if the fixture data cannot be registered.
#[fixture]
pub fn repository_provider() -> Arc<InMemoryRepositoryProvider> {
    let provider = Arc::new(InMemoryRepositoryProvider::new());
    let location = widgets_location();
    provider.register(location.clone()).expect("register");
    for reference in [
        Ref::new("main", RefKind::Head).expect("valid ref"),
        Ref::new("topic", RefKind::Head).expect("valid ref"),
        Ref::remote_head("origin", "main")
            .expect("valid ref")
            .with_commit("4b825dc"),
        Ref::remote_head("upstream", "release/2.0").expect("valid ref"),
        Ref::new("v2.0.0", RefKind::Tag).expect("valid ref"),
    ] {
        provider.add_ref(&location, reference).expect("add ref");
    }
    provider
        .add_remote(
            &location,
            Remote::new("origin")
                .expect("valid remote")
                .with_fetch_url("https://github.com/acme/widgets.git")
                .with_push_url("git@github.com:acme/widgets.git"),
        )
        .expect("add remote");
    provider
        .add_remote(
            &location,
            Remote::new("upstream")
                .expect("valid remote")
                .with_fetch_url("https://github.com/upstream/widgets.git"),
        )
        .expect("add remote");
    provider
}

/// Session granted by the authentication provider.
#[must_use]
pub fn github_session() -> AuthenticationSession {
    AuthenticationSession::new(
        "gho_integration",
        provisioning_scopes(),
        AccountIdentity::new("583231", "octocat"),
    )
}

/// The `acme/widgets` repository.
///
/// # Panics
///
/// Panics if the fixed slug is rejected.
#[must_use]
pub fn widgets_slug() -> RepositorySlug {
    RepositorySlug::new("acme", "widgets").expect("valid slug")
}

/// Host with `acme/widgets` registered under key `k1`.
///
/// # Panics
///
/// Panics if the repository cannot be registered.
#[fixture]
pub fn secret_host() -> Arc<InMemorySecretHost> {
    let host = Arc::new(InMemorySecretHost::new());
    host.register_repository(widgets_slug(), "k1")
        .expect("register repository");
    host
}

/// Authentication provider that already holds [`github_session`].
#[fixture]
pub fn signed_in() -> Arc<InMemoryAuthProvider> {
    Arc::new(InMemoryAuthProvider::with_cached_session(github_session()))
}
