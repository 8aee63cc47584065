//! Shared helpers for key agreement integration tests
#![allow(dead_code)]

use nacl::crypto::{PublicKey, SecretKey};
use tracing_subscriber::EnvFilter;

/// Alice's secret key from the NaCl box test suite
pub const ALICE_SECRET: &str = "77076d0a7318a57d3c16c17251b26645df4c2f87ebc0992ab177fba51db92c2a";
/// Alice's public key from the NaCl box test suite
pub const ALICE_PUBLIC: &str = "8520f0098930a754748b7ddcb43ef75a0dbf3a0d26381af4eba4a98eaa9b4e6a";
/// Bob's secret key from the NaCl box test suite
pub const BOB_SECRET: &str = "5dab087e624a8a4b79e17f8b83800ee66f3bb1292618b6fd1c2f8b27ff88e0eb";
/// Bob's public key from the NaCl box test suite
pub const BOB_PUBLIC: &str = "de9edb7d7b7dc1b4d35b61c2ece435373f8343c85b78674dadfc7e146f882b4f";
/// Raw X25519 product of Alice and Bob
pub const DH_PRODUCT: &str = "4a5d9d5ba4ce2de1728e3bf480350f25e07e21c947d19e3376f09b3c1e161742";
/// `crypto_box_beforenm` output for Alice and Bob
pub const FIRST_KEY: &str = "1b27556473e985d462cd51197a9a46c76009549eac6474f206c4ee0844f68389";

/// Install a test subscriber, filtered by `RUST_LOG`
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub fn secret(hex: &str) -> SecretKey {
    SecretKey::from_hex(hex).unwrap()
}

pub fn public(hex: &str) -> PublicKey {
    PublicKey::from_hex(hex).unwrap()
}

/// Reference base point multiplication, independent of the crate's backend
pub fn reference_public(secret_key: [u8; 32]) -> [u8; 32] {
    curve25519_dalek::constants::X25519_BASEPOINT
        .mul_clamped(secret_key)
        .to_bytes()
}
