//! When steps for secret provisioning BDD scenarios.

use std::sync::Arc;

use super::world::{ProvisioningWorld, run_async};
use draftkit::secrets::services::{SecretProvisioningService, SetRepositorySecretRequest};
use rstest_bdd_macros::when;

#[when(r#"secret "{secret_name}" is set to "{secret_value}""#)]
fn set_secret(
    world: &mut ProvisioningWorld,
    secret_name: String,
    secret_value: String,
) -> Result<(), eyre::Report> {
    let auth = world
        .auth
        .clone()
        .ok_or_else(|| eyre::eyre!("missing authentication provider in scenario world"))?;
    let target = world
        .target
        .clone()
        .ok_or_else(|| eyre::eyre!("missing target repository in scenario world"))?;
    let service = SecretProvisioningService::new(auth, Arc::clone(&world.host));
    let request = SetRepositorySecretRequest::new(
        target.owner(),
        target.name(),
        secret_name,
        secret_value,
    );

    let result = run_async(service.set_repository_secret(request));
    world.results.push(result);
    Ok(())
}
