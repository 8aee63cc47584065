//! Curve25519 key agreement for the NaCl box construction
//!
//! This module provides the key material half of `crypto_box_curve25519xsalsa20poly1305`:
//!
//! - **Key Pairs**: 32-byte Curve25519 secret scalars and their base-point multiples
//! - **Shared Keys**: the `beforenm` precomputation, reusable for every box/unbox with one peer
//! - **Validation**: fixed-length checks that run before any curve arithmetic
//!
//! # Shared Key Derivation
//!
//! Given our secret key `sk` and a peer's public key `pk`:
//! 1. Compute the Diffie-Hellman product `s = X25519(sk, pk)`
//! 2. Mix it with HSalsa20 keyed by `s` over a zero 16-byte input
//! 3. The 32-byte output is the shared key fed to XSalsa20-Poly1305
//!
//! Both peers arrive at the same key, since `X25519(skA, pkB) == X25519(skB, pkA)`.
//!
//! # Collaborators
//!
//! Randomness and curve arithmetic are reached through the [`EntropySource`] and
//! [`CurveBackend`] traits. [`KeyAgreement::system`] wires them to the operating
//! system CSPRNG and `x25519-dalek`.

mod agreement;
mod backend;
mod error;
mod keys;
mod validate;

pub use agreement::{derive_shared_key, generate_key_pair, key_pair_from_secret_key, KeyAgreement};
pub use backend::{CurveBackend, DalekCurve, EntropySource, OsEntropy};
pub use error::{BackendError, BoxError};
pub use keys::{KeyError, KeyPair, PublicKey, SecretKey, SharedKey};
pub use validate::check_box_lengths;

/// Size of a box public key in bytes (`crypto_box_PUBLICKEYBYTES`)
pub const PUBLIC_KEY_SIZE: usize = 32;
/// Size of a box secret key in bytes (`crypto_box_SECRETKEYBYTES`)
pub const SECRET_KEY_SIZE: usize = 32;
/// Size of a precomputed shared key in bytes (`crypto_box_BEFORENMBYTES`)
pub const SHARED_KEY_SIZE: usize = 32;
