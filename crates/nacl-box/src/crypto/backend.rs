//! Narrow interfaces to the primitives key agreement is built on
//!
//! Neither trait performs length checks: callers hand over fixed-size arrays
//! they own, and get a freshly filled array back.

use salsa20::cipher::consts::U10;
use salsa20::cipher::generic_array::GenericArray;
use x25519_dalek::{PublicKey as X25519PublicKey, StaticSecret};
use zeroize::Zeroizing;

use super::error::BackendError;
use super::{PUBLIC_KEY_SIZE, SECRET_KEY_SIZE, SHARED_KEY_SIZE};

/// A source of cryptographically secure random bytes
pub trait EntropySource {
    /// Fill `dest` entirely, or fail without retrying
    fn fill_bytes(&self, dest: &mut [u8]) -> Result<(), BackendError>;
}

/// Curve25519 arithmetic used by the box construction
pub trait CurveBackend {
    /// Multiply the (clamped) scalar by the curve base point
    fn scalarmult_base(
        &self,
        secret_key: &[u8; SECRET_KEY_SIZE],
    ) -> Result<[u8; PUBLIC_KEY_SIZE], BackendError>;

    /// Compute the box precomputation (`crypto_box_beforenm`)
    fn beforenm(
        &self,
        public_key: &[u8; PUBLIC_KEY_SIZE],
        secret_key: &[u8; SECRET_KEY_SIZE],
    ) -> Result<[u8; SHARED_KEY_SIZE], BackendError>;
}

/// The operating system CSPRNG, via `getrandom`
#[derive(Debug, Clone, Copy, Default)]
pub struct OsEntropy;

impl EntropySource for OsEntropy {
    fn fill_bytes(&self, dest: &mut [u8]) -> Result<(), BackendError> {
        getrandom::getrandom(dest)?;
        Ok(())
    }
}

/// `x25519-dalek` scalar multiplication with HSalsa20 key mixing
#[derive(Debug, Clone, Copy, Default)]
pub struct DalekCurve;

impl CurveBackend for DalekCurve {
    fn scalarmult_base(
        &self,
        secret_key: &[u8; SECRET_KEY_SIZE],
    ) -> Result<[u8; PUBLIC_KEY_SIZE], BackendError> {
        let secret = StaticSecret::from(*secret_key);
        Ok(X25519PublicKey::from(&secret).to_bytes())
    }

    fn beforenm(
        &self,
        public_key: &[u8; PUBLIC_KEY_SIZE],
        secret_key: &[u8; SECRET_KEY_SIZE],
    ) -> Result<[u8; SHARED_KEY_SIZE], BackendError> {
        // no low-order point rejection, matching crypto_scalarmult
        let dh = Zeroizing::new(x25519_dalek::x25519(*secret_key, *public_key));

        // HSalsa20 with 10 double rounds over a zero input
        let input = GenericArray::default();
        let mixed = salsa20::hsalsa::<U10>(GenericArray::from_slice(dh.as_slice()), &input);

        let mut shared = [0u8; SHARED_KEY_SIZE];
        shared.copy_from_slice(mixed.as_slice());
        Ok(shared)
    }
}
