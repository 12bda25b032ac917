//! Language registry queries against an in-memory manifest source.

use std::sync::Arc;
use std::time::Duration;

use draftkit::errorable::Errorable;
use draftkit::language::{
    adapters::InMemoryManifestSource,
    domain::{DraftManifest, ManifestLanguage},
    ports::ManifestSourceError,
    services::{LanguageRegistryError, LanguageRegistryService},
};
use rstest::rstest;

use super::helpers::draft_manifest;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn languages_keep_manifest_order_and_versions(draft_manifest: DraftManifest) {
    let service = LanguageRegistryService::new(Arc::new(InMemoryManifestSource::new(draft_manifest)));

    let outcome = service.draft_languages().await;

    let languages = outcome.result().expect("registry query succeeds");
    let names: Vec<&str> = languages.iter().map(|language| language.name()).collect();
    assert_eq!(names, ["go", "java", "python"]);
    assert!(languages.iter().all(|language| !language.versions().is_empty()));
    let java = languages.get(1).expect("java present");
    assert_eq!(java.display_name(), Some("Java"));
    assert_eq!(java.default_version(), Some("21"));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn empty_manifest_is_a_failure_not_an_empty_success() {
    let source = Arc::new(InMemoryManifestSource::new(DraftManifest::default()));
    let service = LanguageRegistryService::new(source);

    let outcome = service.draft_languages().await;

    assert!(outcome.is_failed());
    assert!(matches!(
        service.try_draft_languages().await,
        Err(LanguageRegistryError::Empty)
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn unreachable_tool_reports_registry_unavailable() {
    let source = Arc::new(InMemoryManifestSource::failing(ManifestSourceError::Timeout(
        Duration::from_secs(30),
    )));
    let service = LanguageRegistryService::new(source);

    let result = service.try_draft_languages().await;

    assert!(matches!(
        result,
        Err(LanguageRegistryError::RegistryUnavailable(ManifestSourceError::Timeout(_)))
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn language_without_versions_fails_the_query(draft_manifest: DraftManifest) {
    let mut manifest = draft_manifest;
    manifest
        .supported_languages
        .push(ManifestLanguage::new("rust", Vec::<String>::new()));
    let service = LanguageRegistryService::new(Arc::new(InMemoryManifestSource::new(manifest)));

    let outcome = service.draft_languages().await;

    assert!(matches!(outcome, Errorable::Failed { .. }));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn every_query_reads_the_source_again(draft_manifest: DraftManifest) {
    let source = Arc::new(InMemoryManifestSource::new(draft_manifest));
    let service = LanguageRegistryService::new(Arc::clone(&source));

    let first = service.draft_languages().await;
    source
        .set_manifest(DraftManifest::new(
            vec![ManifestLanguage::new("ruby", ["3.3"])],
            vec!["helm".to_owned()],
        ))
        .expect("replace manifest");
    let second = service.draft_languages().await;

    assert_eq!(first.result().map(Vec::len), Some(3));
    assert_eq!(
        second
            .result()
            .and_then(|languages| languages.first())
            .map(|language| language.name().to_owned()),
        Some("ruby".to_owned())
    );
    assert_eq!(source.fetch_count().expect("fetch count"), 2);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn concurrent_queries_return_the_same_languages(draft_manifest: DraftManifest) {
    let service = LanguageRegistryService::new(Arc::new(InMemoryManifestSource::new(draft_manifest)));

    let (left, right) = tokio::join!(service.draft_languages(), service.draft_languages());

    assert!(left.is_succeeded());
    assert_eq!(left, right);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn deployment_types_are_listed(draft_manifest: DraftManifest) {
    let service = LanguageRegistryService::new(Arc::new(InMemoryManifestSource::new(draft_manifest)));

    let types = service
        .try_deployment_types()
        .await
        .expect("deployment types listed");

    assert_eq!(types, ["helm", "kustomize", "manifests"]);
}
