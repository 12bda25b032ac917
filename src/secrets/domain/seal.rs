//! Sealed-box encryption of secret values.
//!
//! Uses the libsodium `crypto_box_seal` construction (X25519 +
//! XSalsa20-Poly1305 with an ephemeral sender key), which is what the
//! GitHub secrets API expects.

use super::{RepoPublicKey, SealedSecret, SecretValue, SecretsDomainError};
use base64::{Engine, engine::general_purpose::STANDARD};
use crypto_box::{PublicKey, aead::OsRng};

/// Length in bytes of an X25519 public key.
pub const PUBLIC_KEY_LENGTH: usize = 32;

/// Seals `value` against `public_key` and base64 encodes the result.
///
/// Each call uses a fresh ephemeral key, so sealing the same value twice
/// yields different ciphertexts.
///
/// # Errors
///
/// Returns [`SecretsDomainError::MissingKeyId`] when the key has no
/// identifier, [`SecretsDomainError::InvalidKeyMaterial`] when the key is
/// not 32 base64 encoded bytes, or [`SecretsDomainError::SealFailed`].
pub fn seal_secret(
    public_key: &RepoPublicKey,
    value: &SecretValue,
) -> Result<SealedSecret, SecretsDomainError> {
    if public_key.key_id().trim().is_empty() {
        return Err(SecretsDomainError::MissingKeyId);
    }

    let decoded = STANDARD
        .decode(public_key.key_material().trim())
        .map_err(|err| SecretsDomainError::InvalidKeyMaterial(err.to_string()))?;
    let key_bytes: [u8; PUBLIC_KEY_LENGTH] = decoded.as_slice().try_into().map_err(|_| {
        SecretsDomainError::InvalidKeyMaterial(format!(
            "expected {PUBLIC_KEY_LENGTH} bytes, got {}",
            decoded.len()
        ))
    })?;
    let recipient = PublicKey::from(key_bytes);

    let ciphertext = recipient
        .seal(&mut OsRng, value.expose().as_bytes())
        .map_err(|_| SecretsDomainError::SealFailed)?;

    Ok(SealedSecret::new(public_key.key_id(), STANDARD.encode(ciphertext)))
}
