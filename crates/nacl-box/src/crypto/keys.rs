use std::fmt;
use std::ops::Deref;

use serde::{Deserialize, Serialize};
use subtle::ConstantTimeEq;
use zeroize::{Zeroize, ZeroizeOnDrop};

use super::agreement::KeyAgreement;
use super::error::BoxError;
use super::{PUBLIC_KEY_SIZE, SECRET_KEY_SIZE, SHARED_KEY_SIZE};

/// Errors that can occur while decoding keys
#[derive(Debug, thiserror::Error)]
pub enum KeyError {
    #[error("key error: {0}")]
    Default(#[from] anyhow::Error),
}

/// Public key of a box key pair
///
/// The little-endian Montgomery u-coordinate of `secret * B`, where `B` is the
/// Curve25519 base point. Public keys are not checked for being on the curve
/// or of large order; any 32 bytes are accepted, as in NaCl.
///
/// # Examples
///
/// ```ignore
/// let pair = nacl::crypto::generate_key_pair()?;
/// let hex = pair.public_key.to_hex();
/// let recovered = PublicKey::from_hex(&hex)?;
/// assert_eq!(pair.public_key, recovered);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PublicKey([u8; PUBLIC_KEY_SIZE]);

impl Deref for PublicKey {
    type Target = [u8; PUBLIC_KEY_SIZE];
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<[u8; PUBLIC_KEY_SIZE]> for PublicKey {
    fn from(bytes: [u8; PUBLIC_KEY_SIZE]) -> Self {
        PublicKey(bytes)
    }
}

impl TryFrom<&[u8]> for PublicKey {
    type Error = KeyError;
    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        if bytes.len() != PUBLIC_KEY_SIZE {
            return Err(anyhow::anyhow!(
                "invalid public key size, expected {}, got {}",
                PUBLIC_KEY_SIZE,
                bytes.len()
            )
            .into());
        }
        let mut buff = [0; PUBLIC_KEY_SIZE];
        buff.copy_from_slice(bytes);
        Ok(buff.into())
    }
}

impl PublicKey {
    /// Parse a public key from a hexadecimal string
    ///
    /// Accepts both plain hex and "0x"-prefixed hex strings.
    pub fn from_hex(hex: &str) -> Result<Self, KeyError> {
        let hex = hex.strip_prefix("0x").unwrap_or(hex);
        let mut buff = [0; PUBLIC_KEY_SIZE];
        hex::decode_to_slice(hex, &mut buff)
            .map_err(|_| anyhow::anyhow!("public key hex decode error"))?;
        Ok(buff.into())
    }

    /// Borrow the raw public key bytes
    pub fn as_bytes(&self) -> &[u8; PUBLIC_KEY_SIZE] {
        &self.0
    }

    /// Convert public key to raw bytes
    pub fn to_bytes(&self) -> [u8; PUBLIC_KEY_SIZE] {
        self.0
    }

    /// Convert public key to hexadecimal string
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

/// Secret key of a box key pair
///
/// Holds the 32 scalar bytes exactly as generated or supplied. Clamping happens
/// inside the curve multiplication, never on the stored bytes, so
/// `SecretKey::from(bytes).to_bytes() == bytes` always holds.
///
/// The bytes are wiped when the key is dropped, and `Debug` never prints them.
///
/// # Examples
///
/// ```ignore
/// let pair = nacl::crypto::generate_key_pair()?;
///
/// // Persist to PEM format
/// std::fs::write("box.pem", pair.secret_key.to_pem())?;
///
/// // Load from PEM
/// let pem = std::fs::read_to_string("box.pem")?;
/// let secret_key = SecretKey::from_pem(&pem)?;
/// assert_eq!(secret_key.public()?, pair.public_key);
/// ```
#[derive(Clone, Serialize, Deserialize, Zeroize, ZeroizeOnDrop)]
pub struct SecretKey([u8; SECRET_KEY_SIZE]);

impl fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SecretKey(..)")
    }
}

impl From<[u8; SECRET_KEY_SIZE]> for SecretKey {
    fn from(bytes: [u8; SECRET_KEY_SIZE]) -> Self {
        SecretKey(bytes)
    }
}

impl TryFrom<&[u8]> for SecretKey {
    type Error = KeyError;
    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        if bytes.len() != SECRET_KEY_SIZE {
            return Err(anyhow::anyhow!(
                "invalid secret key size, expected {}, got {}",
                SECRET_KEY_SIZE,
                bytes.len()
            )
            .into());
        }
        let mut buff = [0; SECRET_KEY_SIZE];
        buff.copy_from_slice(bytes);
        Ok(buff.into())
    }
}

impl SecretKey {
    /// Parse a secret key from a hexadecimal string
    ///
    /// Accepts both plain hex and "0x"-prefixed hex strings.
    pub fn from_hex(hex: &str) -> Result<Self, KeyError> {
        let hex = hex.strip_prefix("0x").unwrap_or(hex);
        let mut buff = [0; SECRET_KEY_SIZE];
        hex::decode_to_slice(hex, &mut buff)
            .map_err(|_| anyhow::anyhow!("secret key hex decode error"))?;
        Ok(Self::from(buff))
    }

    /// Borrow the raw secret key bytes
    pub fn as_bytes(&self) -> &[u8; SECRET_KEY_SIZE] {
        &self.0
    }

    /// Convert secret key to raw bytes
    pub fn to_bytes(&self) -> [u8; SECRET_KEY_SIZE] {
        self.0
    }

    /// Convert secret key to hexadecimal string
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Encode secret key in PEM format for storage
    ///
    /// Returns a PEM-encoded string with tag "PRIVATE KEY".
    pub fn to_pem(&self) -> String {
        let pem = pem::Pem::new("PRIVATE KEY", self.0.to_vec());
        pem::encode(&pem)
    }

    /// Parse a secret key from PEM format
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The PEM string is malformed
    /// - The PEM tag is not "PRIVATE KEY"
    /// - The key size is incorrect
    pub fn from_pem(pem_str: &str) -> Result<Self, KeyError> {
        let pem = pem::parse(pem_str).map_err(|e| anyhow::anyhow!("failed to parse PEM: {}", e))?;

        if pem.tag() != "PRIVATE KEY" {
            return Err(anyhow::anyhow!("invalid PEM tag, expected PRIVATE KEY").into());
        }

        Self::try_from(pem.contents())
    }

    /// Derive the public key for this secret key
    pub fn public(&self) -> Result<PublicKey, BoxError> {
        let pair = KeyAgreement::system().key_pair_from_secret_key(&self.0)?;
        Ok(pair.public_key)
    }

    /// Precompute the shared key with a peer
    pub fn shared_key(&self, peer: &PublicKey) -> Result<SharedKey, BoxError> {
        KeyAgreement::system().derive_shared_key(peer.as_bytes(), &self.0)
    }
}

/// Precomputed shared key (`crypto_box_beforenm` output)
///
/// Symmetric key for XSalsa20-Poly1305 between two parties. Wiped on drop and
/// deliberately not serializable.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct SharedKey([u8; SHARED_KEY_SIZE]);

impl PartialEq for SharedKey {
    fn eq(&self, other: &Self) -> bool {
        self.0[..].ct_eq(&other.0[..]).into()
    }
}

impl Eq for SharedKey {}

impl fmt::Debug for SharedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SharedKey(..)")
    }
}

impl From<[u8; SHARED_KEY_SIZE]> for SharedKey {
    fn from(bytes: [u8; SHARED_KEY_SIZE]) -> Self {
        SharedKey(bytes)
    }
}

impl SharedKey {
    /// Borrow the raw shared key bytes
    pub fn as_bytes(&self) -> &[u8; SHARED_KEY_SIZE] {
        &self.0
    }

    /// Convert shared key to raw bytes
    pub fn to_bytes(&self) -> [u8; SHARED_KEY_SIZE] {
        self.0
    }
}

/// A public key together with the secret key it was derived from
#[derive(Debug, Clone)]
pub struct KeyPair {
    pub public_key: PublicKey,
    pub secret_key: SecretKey,
}

impl KeyPair {
    /// Precompute the shared key between this pair's secret key and a peer
    pub fn shared_key(&self, peer: &PublicKey) -> Result<SharedKey, BoxError> {
        self.secret_key.shared_key(peer)
    }
}
