//! AES-GCM-SIV encryption and decryption of individual field values.
//!
//! **Algorithm choice:** AES-GCM-SIV (RFC 8452) is nonce-misuse-resistant, but
//! every call still draws a fresh random nonce: two encryptions of the same
//! plaintext under the same key never produce the same blob.
//!
//! **Blob layout** (compatibility contract, changing it breaks stored data):
//!
//! ```text
//! nonce (NONCE_LEN = 12 bytes) ‖ ciphertext (len(plaintext) bytes) ‖ tag (TAG_LEN = 16 bytes)
//! ```

use std::fmt;

use aes::Aes192;
use aes_gcm_siv::{
    aead::{Aead, KeyInit},
    Aes128GcmSiv, Aes256GcmSiv, AesGcmSiv, Nonce,
};
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use common::CryptoError;
use tracing::debug;

use super::nonce::{NonceSource, OsNonceSource};
use crate::keys::{EncryptionKey, AES_128_KEY_LEN, AES_192_KEY_LEN, AES_256_KEY_LEN};

/// Byte length of an AES-GCM-SIV nonce (12 bytes = 96 bits).
pub const NONCE_LEN: usize = 12;

/// Byte length of the AES-GCM-SIV authentication tag.
pub const TAG_LEN: usize = 16;

/// Prefix that appears at the start of every armored blob.
pub const VERSION_PREFIX: &str = "v1";

/// An encrypted field value: `nonce ‖ ciphertext ‖ tag`.
///
/// Construction from raw bytes is unchecked; framing is validated when the
/// blob is decrypted.
#[derive(Clone, PartialEq, Eq)]
pub struct CiphertextBlob(Vec<u8>);

impl CiphertextBlob {
    /// Wrap bytes read back from storage.
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The nonce prefix, or `None` if the blob is too short to carry one.
    pub fn nonce(&self) -> Option<&[u8]> {
        self.0.get(..NONCE_LEN)
    }

    /// Encode as `v1.<base64url(nonce)>.<base64url(ciphertext+tag)>` for text columns.
    ///
    /// A blob shorter than [`NONCE_LEN`] still encodes, but will not parse back.
    pub fn to_armored(&self) -> String {
        let (nonce, sealed) = self.0.split_at(NONCE_LEN.min(self.0.len()));
        format!(
            "{}.{}.{}",
            VERSION_PREFIX,
            URL_SAFE_NO_PAD.encode(nonce),
            URL_SAFE_NO_PAD.encode(sealed),
        )
    }

    /// Parse an armored string back into a blob.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::MalformedInput`] if the string does not match the
    /// `v1.<nonce>.<ciphertext>` structure or the nonce is not [`NONCE_LEN`] bytes.
    pub fn from_armored(s: &str) -> Result<Self, CryptoError> {
        let parts: Vec<&str> = s.splitn(3, '.').collect();
        if parts.len() != 3 || parts[0] != VERSION_PREFIX {
            return Err(CryptoError::MalformedInput(
                "armored blob must be v1.<nonce>.<ciphertext>".into(),
            ));
        }
        let nonce = URL_SAFE_NO_PAD
            .decode(parts[1])
            .map_err(|_| CryptoError::MalformedInput("armored nonce is not base64url".into()))?;
        if nonce.len() != NONCE_LEN {
            return Err(CryptoError::MalformedInput(format!(
                "armored nonce must be {NONCE_LEN} bytes, got {}",
                nonce.len()
            )));
        }
        let sealed = URL_SAFE_NO_PAD.decode(parts[2]).map_err(|_| {
            CryptoError::MalformedInput("armored ciphertext is not base64url".into())
        })?;

        let mut bytes = nonce;
        bytes.extend_from_slice(&sealed);
        Ok(Self(bytes))
    }
}

impl AsRef<[u8]> for CiphertextBlob {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<CiphertextBlob> for Vec<u8> {
    fn from(blob: CiphertextBlob) -> Self {
        blob.0
    }
}

impl fmt::Debug for CiphertextBlob {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CiphertextBlob({} bytes)", self.0.len())
    }
}

/// Encrypt `plaintext` under `key` with a fresh OS-random nonce.
///
/// # Errors
///
/// Returns [`CryptoError::Key`] if the key size is not supported,
/// [`CryptoError::Randomness`] if the OS CSPRNG fails, and
/// [`CryptoError::Seal`] if the plaintext exceeds the AEAD length limit.
pub fn encrypt(key: &EncryptionKey, plaintext: &[u8]) -> Result<CiphertextBlob, CryptoError> {
    encrypt_with(key, plaintext, &OsNonceSource)
}

/// Encrypt `plaintext` drawing the nonce from `nonces`.
///
/// # Errors
///
/// As [`encrypt`]; randomness failures come from `nonces`.
pub fn encrypt_with<N>(
    key: &EncryptionKey,
    plaintext: &[u8],
    nonces: &N,
) -> Result<CiphertextBlob, CryptoError>
where
    N: NonceSource + ?Sized,
{
    let cipher = FieldCipher::new(key)?;

    let mut nonce_bytes = [0u8; NONCE_LEN];
    nonces.fill_nonce(&mut nonce_bytes)?;
    let nonce = Nonce::from_slice(&nonce_bytes);

    let sealed = cipher.seal(nonce, plaintext)?;

    let mut out = Vec::with_capacity(NONCE_LEN + sealed.len());
    out.extend_from_slice(&nonce_bytes);
    out.extend_from_slice(&sealed);
    Ok(CiphertextBlob(out))
}

/// Authenticate and decrypt a blob produced by [`encrypt`].
///
/// # Errors
///
/// Returns [`CryptoError::MalformedInput`] if `blob` is shorter than
/// [`NONCE_LEN`], and [`CryptoError::Authentication`] for any tag failure
/// (wrong key, truncation, corruption or tampering alike).
pub fn decrypt(key: &EncryptionKey, blob: &[u8]) -> Result<Vec<u8>, CryptoError> {
    let cipher = FieldCipher::new(key)?;

    if blob.len() < NONCE_LEN {
        debug!(blob_len = blob.len(), "rejected ciphertext blob shorter than nonce");
        return Err(CryptoError::MalformedInput(format!(
            "ciphertext blob must be at least {NONCE_LEN} bytes, got {}",
            blob.len()
        )));
    }

    let (nonce_bytes, sealed) = blob.split_at(NONCE_LEN);
    cipher.open(Nonce::from_slice(nonce_bytes), sealed)
}

/// Encrypt a UTF-8 string.
///
/// # Errors
///
/// As [`encrypt`].
pub fn encrypt_string(key: &EncryptionKey, plaintext: &str) -> Result<CiphertextBlob, CryptoError> {
    encrypt(key, plaintext.as_bytes())
}

/// Decrypt a blob whose plaintext is expected to be UTF-8.
///
/// # Errors
///
/// As [`decrypt`], plus [`CryptoError::Encoding`] if the authenticated
/// plaintext is not valid UTF-8.
pub fn decrypt_string(key: &EncryptionKey, blob: &[u8]) -> Result<String, CryptoError> {
    let plain = decrypt(key, blob)?;
    String::from_utf8(plain).map_err(|_| CryptoError::Encoding)
}

/// AES-GCM-SIV over AES-192. RFC 8452 only names the 128 and 256-bit
/// instances; this one uses the same construction with a 24-byte key.
type Aes192GcmSiv = AesGcmSiv<Aes192>;

/// Key-size dispatch over the supported AES-GCM-SIV widths.
enum FieldCipher {
    Aes128(Aes128GcmSiv),
    Aes192(Aes192GcmSiv),
    Aes256(Aes256GcmSiv),
}

impl FieldCipher {
    fn new(key: &EncryptionKey) -> Result<Self, CryptoError> {
        let bytes = key.as_bytes();
        let cipher = match bytes.len() {
            AES_128_KEY_LEN => Aes128GcmSiv::new_from_slice(bytes).map(Self::Aes128),
            AES_192_KEY_LEN => Aes192GcmSiv::new_from_slice(bytes).map(Self::Aes192),
            AES_256_KEY_LEN => Aes256GcmSiv::new_from_slice(bytes).map(Self::Aes256),
            n => {
                return Err(CryptoError::Key(format!(
                    "unsupported encryption key length {n}"
                )))
            }
        };
        cipher.map_err(|_| CryptoError::Key("encryption key rejected by cipher".into()))
    }

    fn seal(&self, nonce: &Nonce, plaintext: &[u8]) -> Result<Vec<u8>, CryptoError> {
        let sealed = match self {
            Self::Aes128(c) => c.encrypt(nonce, plaintext),
            Self::Aes192(c) => c.encrypt(nonce, plaintext),
            Self::Aes256(c) => c.encrypt(nonce, plaintext),
        };
        sealed.map_err(|_| CryptoError::Seal)
    }

    fn open(&self, nonce: &Nonce, sealed: &[u8]) -> Result<Vec<u8>, CryptoError> {
        let opened = match self {
            Self::Aes128(c) => c.decrypt(nonce, sealed),
            Self::Aes192(c) => c.decrypt(nonce, sealed),
            Self::Aes256(c) => c.decrypt(nonce, sealed),
        };
        opened.map_err(|_| {
            debug!("ciphertext blob failed authentication");
            CryptoError::Authentication
        })
    }
}
