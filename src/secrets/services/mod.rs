//! Application services for secret provisioning.

mod provisioning;

pub use provisioning::{
    ProvisioningStage, SecretProvisioningError, SecretProvisioningResult,
    SecretProvisioningService, SetRepositorySecretRequest,
};
