//! Error taxonomy shared by every fieldcrypt operation.

use thiserror::Error;

/// Errors produced by field encryption and key handling.
///
/// Variants map to stable machine-readable codes via [`CryptoError::code`]:
/// - [`CryptoError::Key`] → `key_error`
/// - [`CryptoError::Randomness`] → `randomness_error`
/// - [`CryptoError::MalformedInput`] → `malformed_input`
/// - [`CryptoError::Authentication`] → `authentication_failed`
/// - [`CryptoError::Encoding`] → `encoding_error`
/// - [`CryptoError::Seal`] → `seal_failed`
///
/// None of them are retryable: each outcome is fully determined by its inputs
/// or by the environment.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CryptoError {
    /// Key material has the wrong size or format for its role.
    #[error("invalid key: {0}")]
    Key(String),

    /// The OS could not supply secure randomness for a nonce.
    #[error("secure randomness unavailable: {0}")]
    Randomness(String),

    /// Input is too short or badly framed to be a ciphertext blob.
    #[error("malformed input: {0}")]
    MalformedInput(String),

    /// Tag verification failed. Deliberately carries no detail: a wrong key,
    /// corrupted storage and tampering are indistinguishable to the caller.
    #[error("authentication failed")]
    Authentication,

    /// The ciphertext authenticated but the plaintext is not valid UTF-8.
    #[error("decrypted value is not valid UTF-8")]
    Encoding,

    /// The AEAD refused to seal the plaintext (length limit exceeded).
    #[error("aead seal failed")]
    Seal,
}

impl CryptoError {
    /// Returns the stable code that identifies this error category.
    pub fn code(&self) -> &'static str {
        match self {
            CryptoError::Key(_) => "key_error",
            CryptoError::Randomness(_) => "randomness_error",
            CryptoError::MalformedInput(_) => "malformed_input",
            CryptoError::Authentication => "authentication_failed",
            CryptoError::Encoding => "encoding_error",
            CryptoError::Seal => "seal_failed",
        }
    }
}
