//! Secret provisioning against in-memory authentication and host adapters.

use std::sync::Arc;

use base64::{Engine, engine::general_purpose::STANDARD};
use draftkit::secrets::{
    adapters::{HostCall, InMemoryAuthProvider, InMemorySecretHost, SignInOutcome},
    domain::{RepoPublicKey, SecretName, SecretWriteOutcome},
    ports::SessionRequest,
    services::{SecretProvisioningError, SecretProvisioningService, SetRepositorySecretRequest},
};
use rstest::rstest;

use super::helpers::{github_session, secret_host, signed_in, widgets_slug};

fn deploy_key(value: &str) -> SetRepositorySecretRequest {
    SetRepositorySecretRequest::new("acme", "widgets", "DEPLOY_KEY", value)
}

fn deploy_key_name() -> SecretName {
    SecretName::new("DEPLOY_KEY").expect("valid name")
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn sealed_secret_round_trips_through_the_host(
    signed_in: Arc<InMemoryAuthProvider>,
    secret_host: Arc<InMemorySecretHost>,
) {
    let service = SecretProvisioningService::new(signed_in, Arc::clone(&secret_host));

    let outcome = service
        .set_repository_secret(deploy_key("s3cr3t"))
        .await
        .expect("provisioning succeeds");

    assert_eq!(outcome, SecretWriteOutcome::Created);
    let stored = secret_host
        .stored_secret(&widgets_slug(), &deploy_key_name())
        .expect("read store")
        .expect("secret stored");
    assert_eq!(stored.key_id(), "k1");
    assert_ne!(stored.encrypted_value(), STANDARD.encode("s3cr3t"));
    assert_eq!(
        secret_host
            .reveal_secret(&widgets_slug(), &deploy_key_name())
            .expect("reveal"),
        Some("s3cr3t".to_owned())
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn interactive_sign_in_happens_once_then_session_is_reused(
    secret_host: Arc<InMemorySecretHost>,
) {
    let auth = Arc::new(InMemoryAuthProvider::new(SignInOutcome::SignIn(
        github_session(),
    )));
    let service = SecretProvisioningService::new(Arc::clone(&auth), secret_host);

    service
        .set_repository_secret(deploy_key("first"))
        .await
        .expect("first write succeeds");
    service
        .set_repository_secret(deploy_key("second"))
        .await
        .expect("second write succeeds");

    assert_eq!(auth.prompt_count().expect("prompt count"), 1);
    let requests = auth.requests().expect("requests");
    assert_eq!(requests.len(), 2);
    assert!(
        requests
            .iter()
            .all(|recorded| recorded.request == SessionRequest::interactive()
                && recorded.provider_id == "github")
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn repeated_writes_converge_on_the_latest_value(
    signed_in: Arc<InMemoryAuthProvider>,
    secret_host: Arc<InMemorySecretHost>,
) {
    let service = SecretProvisioningService::new(signed_in, Arc::clone(&secret_host));

    for value in ["one", "two", "three"] {
        service
            .set_repository_secret(deploy_key(value))
            .await
            .expect("write succeeds");
    }

    assert_eq!(secret_host.secret_count().expect("count"), 1);
    assert_eq!(
        secret_host
            .reveal_secret(&widgets_slug(), &deploy_key_name())
            .expect("reveal"),
        Some("three".to_owned())
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn unregistered_repository_fails_at_key_fetch(
    signed_in: Arc<InMemoryAuthProvider>,
    secret_host: Arc<InMemorySecretHost>,
) {
    let service = SecretProvisioningService::new(signed_in, Arc::clone(&secret_host));

    let result = service
        .set_repository_secret(SetRepositorySecretRequest::new(
            "acme", "gadgets", "DEPLOY_KEY", "s3cr3t",
        ))
        .await;

    assert!(matches!(
        result,
        Err(SecretProvisioningError::PublicKeyFetch(_))
    ));
    let calls = secret_host.calls().expect("calls");
    assert!(
        calls
            .iter()
            .all(|call| matches!(call, HostCall::FetchPublicKey { .. }))
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn key_without_identifier_never_reaches_submission(
    signed_in: Arc<InMemoryAuthProvider>,
    secret_host: Arc<InMemorySecretHost>,
) {
    secret_host
        .set_public_key(
            widgets_slug(),
            RepoPublicKey::new("", STANDARD.encode([9_u8; 32])),
        )
        .expect("replace key");
    let service = SecretProvisioningService::new(signed_in, Arc::clone(&secret_host));

    let result = service.set_repository_secret(deploy_key("s3cr3t")).await;

    assert!(matches!(
        result,
        Err(SecretProvisioningError::PublicKeyInvalid(_))
    ));
    assert_eq!(secret_host.calls().expect("calls").len(), 1);
}
