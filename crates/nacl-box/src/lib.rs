/**
 * Key agreement for the NaCl box construction.
 *  - Curve25519 key pair generation
 *  - Precomputed (beforenm) shared keys
 *  - Length validation of raw key material
 */
pub mod crypto;

pub mod prelude {
    pub use crate::crypto::{
        derive_shared_key, generate_key_pair, key_pair_from_secret_key, BoxError, KeyAgreement,
        KeyPair, PublicKey, SecretKey, SharedKey,
    };
}
