//! Then steps for secret provisioning BDD scenarios.

use super::world::ProvisioningWorld;
use base64::{Engine, engine::general_purpose::STANDARD};
use draftkit::secrets::{
    adapters::HostCall,
    domain::{SecretName, SecretWriteOutcome},
    ports::AuthProviderError,
    services::SecretProvisioningError,
};
use eyre::WrapErr;
use rstest_bdd_macros::then;

fn expect_outcome(
    world: &ProvisioningWorld,
    expected: SecretWriteOutcome,
) -> Result<(), eyre::Report> {
    let outcome = world
        .last_result()?
        .as_ref()
        .map_err(|err| eyre::eyre!("unexpected provisioning failure: {err}"))?;
    if *outcome != expected {
        return Err(eyre::eyre!("expected {expected}, got {outcome}"));
    }
    Ok(())
}

#[then("the secret is reported as created")]
fn reported_created(world: &ProvisioningWorld) -> Result<(), eyre::Report> {
    expect_outcome(world, SecretWriteOutcome::Created)
}

#[then("the secret is reported as updated")]
fn reported_updated(world: &ProvisioningWorld) -> Result<(), eyre::Report> {
    expect_outcome(world, SecretWriteOutcome::Updated)
}

#[then(r#"the host stored "{secret_name}" sealed with key "{key_id}""#)]
fn stored_with_key(
    world: &ProvisioningWorld,
    secret_name: String,
    key_id: String,
) -> Result<(), eyre::Report> {
    let target = world
        .target
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing target repository in scenario world"))?;
    let name = SecretName::new(secret_name).wrap_err("construct secret name")?;
    let stored = world
        .host
        .stored_secret(target, &name)
        .wrap_err("read stored secret")?
        .ok_or_else(|| eyre::eyre!("no secret stored for {name}"))?;

    if stored.key_id() != key_id {
        return Err(eyre::eyre!(
            "expected key id {key_id}, found {}",
            stored.key_id()
        ));
    }
    Ok(())
}

#[then(r#"the stored "{secret_name}" opens to "{expected}""#)]
fn stored_value_opens_to(
    world: &ProvisioningWorld,
    secret_name: String,
    expected: String,
) -> Result<(), eyre::Report> {
    let target = world
        .target
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing target repository in scenario world"))?;
    let name = SecretName::new(secret_name).wrap_err("construct secret name")?;
    let stored = world
        .host
        .stored_secret(target, &name)
        .wrap_err("read stored secret")?
        .ok_or_else(|| eyre::eyre!("no secret stored for {name}"))?;
    if stored.encrypted_value() == STANDARD.encode(&expected) {
        return Err(eyre::eyre!("stored value is only base64 encoded"));
    }

    let revealed = world
        .host
        .reveal_secret(target, &name)
        .wrap_err("unseal stored secret")?;
    if revealed.as_deref() != Some(expected.as_str()) {
        return Err(eyre::eyre!("expected {expected}, unsealed {revealed:?}"));
    }
    Ok(())
}

#[then("provisioning fails while fetching the public key")]
fn fails_at_key_fetch(world: &ProvisioningWorld) -> Result<(), eyre::Report> {
    let result = world.last_result()?;
    if !matches!(result, Err(SecretProvisioningError::PublicKeyFetch(_))) {
        return Err(eyre::eyre!(
            "expected a public key fetch error, got {result:?}"
        ));
    }
    Ok(())
}

#[then("provisioning fails because sign-in was cancelled")]
fn fails_on_cancelled_sign_in(world: &ProvisioningWorld) -> Result<(), eyre::Report> {
    let result = world.last_result()?;
    if !matches!(
        result,
        Err(SecretProvisioningError::AuthSession(
            AuthProviderError::Cancelled
        ))
    ) {
        return Err(eyre::eyre!(
            "expected a cancelled sign-in error, got {result:?}"
        ));
    }
    Ok(())
}

#[then("no secret submission was sent")]
fn no_submission_sent(world: &ProvisioningWorld) -> Result<(), eyre::Report> {
    let calls = world.host.calls().wrap_err("read host calls")?;
    if calls
        .iter()
        .any(|call| matches!(call, HostCall::SubmitSecret { .. }))
    {
        return Err(eyre::eyre!("unexpected submission in {calls:?}"));
    }
    Ok(())
}

#[then("no request reached the host")]
fn host_untouched(world: &ProvisioningWorld) -> Result<(), eyre::Report> {
    let calls = world.host.calls().wrap_err("read host calls")?;
    if !calls.is_empty() {
        return Err(eyre::eyre!("expected no host calls, got {calls:?}"));
    }
    Ok(())
}
