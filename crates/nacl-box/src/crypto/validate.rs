use super::error::BoxError;
use super::{PUBLIC_KEY_SIZE, SECRET_KEY_SIZE};

/// Check the fixed-length invariants of a box key pair
///
/// The public key is checked first, so a call where both keys are malformed
/// reports `BadPublicKeySize`.
pub fn check_box_lengths(public_key: &[u8], secret_key: &[u8]) -> Result<(), BoxError> {
    box_key_arrays(public_key, secret_key).map(|_| ())
}

/// Borrow both keys as fixed-size arrays, with the same checks and ordering
/// as [`check_box_lengths`]
pub(crate) fn box_key_arrays<'a>(
    public_key: &'a [u8],
    secret_key: &'a [u8],
) -> Result<(&'a [u8; PUBLIC_KEY_SIZE], &'a [u8; SECRET_KEY_SIZE]), BoxError> {
    let public_key = <&[u8; PUBLIC_KEY_SIZE]>::try_from(public_key).map_err(|_| {
        BoxError::BadPublicKeySize {
            expected: PUBLIC_KEY_SIZE,
            actual: public_key.len(),
        }
    })?;

    let secret_key = <&[u8; SECRET_KEY_SIZE]>::try_from(secret_key).map_err(|_| {
        BoxError::BadSecretKeySize {
            expected: SECRET_KEY_SIZE,
            actual: secret_key.len(),
        }
    })?;

    Ok((public_key, secret_key))
}
