//! Given steps for secret provisioning BDD scenarios.

use std::sync::Arc;

use super::world::ProvisioningWorld;
use draftkit::secrets::{
    adapters::{InMemoryAuthProvider, SignInOutcome},
    domain::{AccountIdentity, AuthenticationSession, RepositorySlug, provisioning_scopes},
    ports::SecretHostError,
};
use eyre::WrapErr;
use rstest_bdd_macros::given;

#[given("a signed-in GitHub account")]
fn signed_in_account(world: &mut ProvisioningWorld) {
    let session = AuthenticationSession::new(
        "gho_scenario",
        provisioning_scopes(),
        AccountIdentity::new("583231", "octocat"),
    );
    world.auth = Some(Arc::new(InMemoryAuthProvider::with_cached_session(session)));
}

#[given("no signed-in account and a user who cancels sign-in")]
fn user_cancels_sign_in(world: &mut ProvisioningWorld) {
    world.auth = Some(Arc::new(InMemoryAuthProvider::new(SignInOutcome::Cancel)));
}

#[given(r#"the repository "{name}" owned by "{owner}" publishes key "{key_id}""#)]
fn repository_publishes_key(
    world: &mut ProvisioningWorld,
    name: String,
    owner: String,
    key_id: String,
) -> Result<(), eyre::Report> {
    let slug = RepositorySlug::new(&owner, &name).wrap_err("construct repository slug")?;
    world
        .host
        .register_repository(slug.clone(), &key_id)
        .wrap_err("register repository key")?;
    world.target = Some(slug);
    Ok(())
}

#[given("the host fails public key requests with status {status:u16}")]
fn host_fails_key_requests(world: &mut ProvisioningWorld, status: u16) -> Result<(), eyre::Report> {
    world
        .host
        .fail_key_fetch(SecretHostError::api(status, "Service Unavailable"))
        .wrap_err("script key fetch failure")
}
