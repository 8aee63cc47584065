/// Failures reported by the randomness or curve collaborators
#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    #[error("entropy source failed: {0}")]
    Entropy(#[from] getrandom::Error),
    /// A non-zero status code, in the NaCl calling convention
    #[error("primitive returned status {0}")]
    Status(i32),
}

/// Errors that can occur during key pair generation and shared key derivation
///
/// Length errors are always reported before any cryptographic work runs.
/// No operation returns a partial result alongside an error.
#[derive(Debug, thiserror::Error)]
pub enum BoxError {
    #[error("bad public key size, expected {expected}, got {actual}")]
    BadPublicKeySize { expected: usize, actual: usize },
    #[error("bad secret key size, expected {expected}, got {actual}")]
    BadSecretKeySize { expected: usize, actual: usize },
    #[error("invalid parameters: {0}")]
    InvalidParameters(String),
    #[error("internal error: {0}")]
    InternalError(#[source] BackendError),
    #[error("key generation failed: {0}")]
    KeyGenerationFailed(#[source] BackendError),
}
