use zeroize::Zeroizing;

use super::backend::{CurveBackend, DalekCurve, EntropySource, OsEntropy};
use super::error::BoxError;
use super::keys::{KeyPair, PublicKey, SecretKey, SharedKey};
use super::validate::box_key_arrays;
use super::SECRET_KEY_SIZE;

/// Key pair generation and shared key derivation for the box construction
///
/// Every operation is a single-shot computation over caller-owned inputs, so
/// one instance can be shared freely between threads.
///
/// # Examples
///
/// ```ignore
/// let agreement = KeyAgreement::system();
///
/// let alice = agreement.generate_key_pair()?;
/// let bob = agreement.generate_key_pair()?;
///
/// let k1 = agreement.derive_shared_key(bob.public_key.as_bytes(), alice.secret_key.as_bytes())?;
/// let k2 = agreement.derive_shared_key(alice.public_key.as_bytes(), bob.secret_key.as_bytes())?;
/// assert_eq!(k1, k2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct KeyAgreement<E = OsEntropy, C = DalekCurve> {
    entropy: E,
    curve: C,
}

impl KeyAgreement<OsEntropy, DalekCurve> {
    /// Key agreement backed by the OS CSPRNG and `x25519-dalek`
    pub fn system() -> Self {
        Self {
            entropy: OsEntropy,
            curve: DalekCurve,
        }
    }
}

impl<E, C> KeyAgreement<E, C>
where
    E: EntropySource,
    C: CurveBackend,
{
    pub fn new(entropy: E, curve: C) -> Self {
        Self { entropy, curve }
    }

    /// Generate a fresh key pair from 32 random bytes
    ///
    /// # Errors
    ///
    /// Returns `KeyGenerationFailed` if the entropy source fails or the base-point
    /// multiplication reports an error. A failed entropy read is never retried.
    pub fn generate_key_pair(&self) -> Result<KeyPair, BoxError> {
        let mut secret = Zeroizing::new([0u8; SECRET_KEY_SIZE]);
        self.entropy.fill_bytes(&mut secret[..]).map_err(|e| {
            tracing::warn!("entropy source failed during key generation: {}", e);
            BoxError::KeyGenerationFailed(e)
        })?;

        let public = self.curve.scalarmult_base(&secret).map_err(|e| {
            tracing::warn!("base point multiplication failed: {}", e);
            BoxError::KeyGenerationFailed(e)
        })?;

        tracing::debug!("generated box key pair");
        Ok(KeyPair {
            public_key: PublicKey::from(public),
            secret_key: SecretKey::from(*secret),
        })
    }

    /// Build a key pair around caller-supplied secret key bytes
    ///
    /// The bytes are neither clamped nor validated as a scalar, and are returned
    /// unchanged as the pair's secret key. An all-zero key is accepted.
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameters` if `secret_key` is not exactly 32 bytes.
    pub fn key_pair_from_secret_key(&self, secret_key: &[u8]) -> Result<KeyPair, BoxError> {
        let secret_key = SecretKey::try_from(secret_key)
            .map_err(|e| BoxError::InvalidParameters(e.to_string()))?;

        let public = self
            .curve
            .scalarmult_base(secret_key.as_bytes())
            .map_err(|e| {
                tracing::warn!("base point multiplication failed: {}", e);
                BoxError::InternalError(e)
            })?;

        Ok(KeyPair {
            public_key: PublicKey::from(public),
            secret_key,
        })
    }

    /// Precompute the shared key between our secret key and a peer's public key
    ///
    /// This is `crypto_box_beforenm`: X25519 followed by HSalsa20 mixing. The
    /// result is deterministic, and symmetric between the two parties.
    ///
    /// # Errors
    ///
    /// - `BadPublicKeySize` if `public_key` is not 32 bytes (checked first)
    /// - `BadSecretKeySize` if `secret_key` is not 32 bytes
    /// - `InternalError` if the derivation primitive fails
    pub fn derive_shared_key(
        &self,
        public_key: &[u8],
        secret_key: &[u8],
    ) -> Result<SharedKey, BoxError> {
        let (public_key, secret_key) = box_key_arrays(public_key, secret_key)?;

        let shared = Zeroizing::new(
            self.curve
                .beforenm(public_key, secret_key)
                .map_err(|e| {
                    tracing::warn!("shared key derivation failed: {}", e);
                    BoxError::InternalError(e)
                })?,
        );

        tracing::debug!("derived shared key for peer {}", hex::encode(public_key));
        Ok(SharedKey::from(*shared))
    }
}

/// Generate a fresh key pair with the system backends
pub fn generate_key_pair() -> Result<KeyPair, BoxError> {
    KeyAgreement::system().generate_key_pair()
}

/// Build a key pair from a 32-byte secret key with the system backends
pub fn key_pair_from_secret_key(secret_key: &[u8]) -> Result<KeyPair, BoxError> {
    KeyAgreement::system().key_pair_from_secret_key(secret_key)
}

/// Precompute a box shared key with the system backends
pub fn derive_shared_key(public_key: &[u8], secret_key: &[u8]) -> Result<SharedKey, BoxError> {
    KeyAgreement::system().derive_shared_key(public_key, secret_key)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::crypto::error::BackendError;
    use crate::crypto::{PUBLIC_KEY_SIZE, SHARED_KEY_SIZE};

    struct FailingEntropy;

    impl EntropySource for FailingEntropy {
        fn fill_bytes(&self, _dest: &mut [u8]) -> Result<(), BackendError> {
            Err(BackendError::Status(-1))
        }
    }

    /// Fixed entropy so generated keys are predictable
    struct FixedEntropy(u8);

    impl EntropySource for FixedEntropy {
        fn fill_bytes(&self, dest: &mut [u8]) -> Result<(), BackendError> {
            dest.fill(self.0);
            Ok(())
        }
    }

    struct FailingCurve;

    impl CurveBackend for FailingCurve {
        fn scalarmult_base(
            &self,
            _secret_key: &[u8; SECRET_KEY_SIZE],
        ) -> Result<[u8; PUBLIC_KEY_SIZE], BackendError> {
            Err(BackendError::Status(1))
        }

        fn beforenm(
            &self,
            _public_key: &[u8; PUBLIC_KEY_SIZE],
            _secret_key: &[u8; SECRET_KEY_SIZE],
        ) -> Result<[u8; SHARED_KEY_SIZE], BackendError> {
            Err(BackendError::Status(1))
        }
    }

    #[test]
    fn test_entropy_failure_is_key_generation_failure() {
        let agreement = KeyAgreement::new(FailingEntropy, DalekCurve);
        let result = agreement.generate_key_pair();
        assert!(matches!(
            result,
            Err(BoxError::KeyGenerationFailed(BackendError::Status(-1)))
        ));
    }

    #[test]
    fn test_curve_failure_is_key_generation_failure() {
        let agreement = KeyAgreement::new(OsEntropy, FailingCurve);
        let result = agreement.generate_key_pair();
        assert!(matches!(
            result,
            Err(BoxError::KeyGenerationFailed(BackendError::Status(1)))
        ));
    }

    #[test]
    fn test_curve_failure_is_internal_error() {
        let agreement = KeyAgreement::new(OsEntropy, FailingCurve);
        let result = agreement.derive_shared_key(&[1u8; 32], &[2u8; 32]);
        assert!(matches!(
            result,
            Err(BoxError::InternalError(BackendError::Status(1)))
        ));
    }

    #[test]
    fn test_curve_failure_from_secret_key_is_internal_error() {
        let agreement = KeyAgreement::new(OsEntropy, FailingCurve);
        let result = agreement.key_pair_from_secret_key(&[1u8; 32]);
        assert!(matches!(
            result,
            Err(BoxError::InternalError(BackendError::Status(1)))
        ));
    }

    #[test]
    fn test_lengths_checked_before_backend() {
        let agreement = KeyAgreement::new(FailingEntropy, FailingCurve);

        let result = agreement.derive_shared_key(&[1u8; 31], &[2u8; 32]);
        assert!(matches!(result, Err(BoxError::BadPublicKeySize { .. })));

        let result = agreement.derive_shared_key(&[1u8; 32], &[2u8; 16]);
        assert!(matches!(result, Err(BoxError::BadSecretKeySize { .. })));

        let result = agreement.key_pair_from_secret_key(&[2u8; 31]);
        assert!(matches!(result, Err(BoxError::InvalidParameters(_))));
    }

    #[test]
    fn test_generated_secret_comes_from_entropy() {
        let agreement = KeyAgreement::new(FixedEntropy(0x11), DalekCurve);
        let pair = agreement.generate_key_pair().unwrap();
        assert_eq!(pair.secret_key.to_bytes(), [0x11u8; SECRET_KEY_SIZE]);

        let expected = agreement
            .key_pair_from_secret_key(&[0x11u8; SECRET_KEY_SIZE])
            .unwrap();
        assert_eq!(pair.public_key, expected.public_key);
    }

    #[test]
    fn test_shared_key_symmetry() {
        let alice = generate_key_pair().unwrap();
        let bob = generate_key_pair().unwrap();

        let k1 = alice.shared_key(&bob.public_key).unwrap();
        let k2 = bob.shared_key(&alice.public_key).unwrap();
        assert_eq!(k1, k2);
    }
}
