//! [`EncryptionKey`] and [`IndexKey`]: validated, caller-supplied key material.

use std::fmt;

use common::CryptoError;
use hmac::digest::generic_array::GenericArray;
use hmac::{Hmac, Mac};
use sha2::{Digest, Sha256};
use zeroize::Zeroizing;

pub(crate) type HmacSha256 = Hmac<Sha256>;

/// Byte length of an AES-128 key.
pub const AES_128_KEY_LEN: usize = 16;

/// Byte length of an AES-192 key.
pub const AES_192_KEY_LEN: usize = 24;

/// Byte length of an AES-256 key.
pub const AES_256_KEY_LEN: usize = 32;

/// SHA-256 block size; HMAC keys are padded or hashed to this length.
const HMAC_BLOCK_LEN: usize = 64;

/// Key driving the cipher engine.
///
/// Holds exactly [`AES_128_KEY_LEN`], [`AES_192_KEY_LEN`] or [`AES_256_KEY_LEN`]
/// bytes. The buffer is overwritten with zeroes on drop.
#[derive(Clone)]
pub struct EncryptionKey {
    bytes: Zeroizing<Vec<u8>>,
}

impl EncryptionKey {
    /// Validate and copy `key_bytes`.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::Key`] unless the slice is 16, 24 or 32 bytes long.
    pub fn new(key_bytes: &[u8]) -> Result<Self, CryptoError> {
        match key_bytes.len() {
            AES_128_KEY_LEN | AES_192_KEY_LEN | AES_256_KEY_LEN => Ok(Self {
                bytes: Zeroizing::new(key_bytes.to_vec()),
            }),
            n => Err(CryptoError::Key(format!(
                "encryption key must be {AES_128_KEY_LEN}, {AES_192_KEY_LEN} or {AES_256_KEY_LEN} bytes, got {n}"
            ))),
        }
    }

    pub(crate) fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Key size in bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Always `false`; a constructed key is never empty.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl fmt::Debug for EncryptionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Never print key material, not even in debug builds.
        write!(f, "EncryptionKey({} bytes, [REDACTED])", self.bytes.len())
    }
}

/// Key driving the keyed digest and the blind indexer.
///
/// Stored as the HMAC key block: keys up to 64 bytes are zero-padded, longer
/// keys are replaced by their SHA-256 hash first, exactly as HMAC itself does.
/// The block is overwritten with zeroes on drop, and each digest builds its
/// MAC state from it.
#[derive(Clone)]
pub struct IndexKey {
    block: Zeroizing<[u8; HMAC_BLOCK_LEN]>,
}

impl IndexKey {
    /// Build the HMAC key block from `key_bytes`.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::Key`] if `key_bytes` is empty.
    pub fn new(key_bytes: &[u8]) -> Result<Self, CryptoError> {
        if key_bytes.is_empty() {
            return Err(CryptoError::Key("index key must not be empty".into()));
        }
        let mut block = Zeroizing::new([0u8; HMAC_BLOCK_LEN]);
        if key_bytes.len() > HMAC_BLOCK_LEN {
            let hashed = Sha256::digest(key_bytes);
            block[..hashed.len()].copy_from_slice(&hashed);
        } else {
            block[..key_bytes.len()].copy_from_slice(key_bytes);
        }
        Ok(Self { block })
    }

    pub(crate) fn mac(&self) -> HmacSha256 {
        <HmacSha256 as Mac>::new(GenericArray::from_slice(&self.block[..]))
    }
}

impl fmt::Debug for IndexKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("IndexKey([REDACTED])")
    }
}
