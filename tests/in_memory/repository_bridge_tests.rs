//! Repository bridge queries against an in-memory provider.

use std::sync::Arc;

use draftkit::repository::{
    adapters::InMemoryRepositoryProvider,
    domain::{Ref, RefKind, RepoLocation},
    services::{RepositoryBridgeError, RepositoryBridgeService},
};
use rstest::rstest;

use super::helpers::{repository_provider, widgets_location};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn branches_are_remote_tracking_refs_only(
    repository_provider: Arc<InMemoryRepositoryProvider>,
) {
    let service = RepositoryBridgeService::new(repository_provider);

    let branches = service
        .get_branches(&widgets_location())
        .await
        .expect("branch query succeeds");

    let names: Vec<&str> = branches.iter().map(Ref::name).collect();
    assert_eq!(names, ["origin/main", "upstream/release/2.0"]);
    assert!(branches.iter().all(|branch| branch.kind() == RefKind::RemoteHead));
    assert_eq!(
        branches.first().and_then(Ref::commit),
        Some("4b825dc")
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn remotes_are_listed_with_urls(repository_provider: Arc<InMemoryRepositoryProvider>) {
    let service = RepositoryBridgeService::new(repository_provider);

    let remotes = service
        .get_remotes(&widgets_location())
        .await
        .expect("remote query succeeds");

    assert_eq!(remotes.len(), 2);
    let origin = remotes.first().expect("origin listed");
    assert_eq!(origin.name(), "origin");
    assert_eq!(origin.push_url(), Some("git@github.com:acme/widgets.git"));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn unknown_location_is_reported_for_both_queries(
    repository_provider: Arc<InMemoryRepositoryProvider>,
) {
    let service = RepositoryBridgeService::new(repository_provider);
    let elsewhere = RepoLocation::new("/work/elsewhere").expect("valid location");

    let branches = service.get_branches(&elsewhere).await;
    let remotes = service.get_remotes(&elsewhere).await;

    assert!(matches!(
        branches,
        Err(RepositoryBridgeError::RepositoryNotFound(ref location)) if location == &elsewhere
    ));
    assert!(matches!(
        remotes,
        Err(RepositoryBridgeError::RepositoryNotFound(_))
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn new_remote_branches_are_visible_on_the_next_query(
    repository_provider: Arc<InMemoryRepositoryProvider>,
) {
    let service = RepositoryBridgeService::new(Arc::clone(&repository_provider));
    let location = widgets_location();
    let before = service
        .get_branches(&location)
        .await
        .expect("branch query succeeds");

    repository_provider
        .add_ref(
            &location,
            Ref::remote_head("origin", "feature/login").expect("valid ref"),
        )
        .expect("add ref");
    let after = service
        .get_branches(&location)
        .await
        .expect("branch query succeeds");

    assert_eq!(after.len(), before.len() + 1);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn errorable_variants_carry_failure_reason(
    repository_provider: Arc<InMemoryRepositoryProvider>,
) {
    let service = RepositoryBridgeService::new(repository_provider);
    let elsewhere = RepoLocation::new("/work/elsewhere").expect("valid location");

    let outcome = service.branches_errorable(&elsewhere).await;

    assert_eq!(
        outcome.reason(),
        Some("no repository found at /work/elsewhere")
    );
    assert!(service.remotes_errorable(&widgets_location()).await.is_succeeded());
}
