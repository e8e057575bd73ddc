//! Nonce generation for the cipher engine.

use aes_gcm_siv::aead::{rand_core::RngCore, OsRng};
use common::CryptoError;

use super::cipher::NONCE_LEN;

/// Source of per-encryption nonces.
///
/// Implementations must be cryptographically random and must report failure
/// instead of degrading to a weaker source.
#[cfg_attr(test, mockall::automock)]
pub trait NonceSource {
    /// Fill `nonce` with fresh random bytes.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::Randomness`] if no secure randomness is available.
    fn fill_nonce(&self, nonce: &mut [u8; NONCE_LEN]) -> Result<(), CryptoError>;
}

/// The OS CSPRNG.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsNonceSource;

impl NonceSource for OsNonceSource {
    fn fill_nonce(&self, nonce: &mut [u8; NONCE_LEN]) -> Result<(), CryptoError> {
        OsRng
            .try_fill_bytes(nonce)
            .map_err(|e| CryptoError::Randomness(e.to_string()))
    }
}
