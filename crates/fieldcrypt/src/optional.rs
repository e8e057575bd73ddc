//! Adapters over possibly-absent field values.
//!
//! Absence means "no value was ever set". An empty string is treated as
//! unset on the way in, so it encrypts to `None`; on the way out only `None`
//! decrypts to `None`.

use common::{CryptoError, Token, TokenSet};

use crate::crypto::{decrypt_string, digest, encrypt_string, CiphertextBlob};
use crate::index::tokenize;
use crate::keys::{EncryptionKey, IndexKey};

/// Encrypt `value` unless it is absent or empty.
///
/// # Errors
///
/// As [`encrypt_string`].
pub fn encrypt_optional(
    key: &EncryptionKey,
    value: Option<&str>,
) -> Result<Option<CiphertextBlob>, CryptoError> {
    match value {
        None | Some("") => Ok(None),
        Some(v) => encrypt_string(key, v).map(Some),
    }
}

/// Decrypt `blob` unless it is absent.
///
/// # Errors
///
/// As [`decrypt_string`]. A present but empty blob is malformed, not absent.
pub fn decrypt_optional(
    key: &EncryptionKey,
    blob: Option<&[u8]>,
) -> Result<Option<String>, CryptoError> {
    blob.map(|b| decrypt_string(key, b)).transpose()
}

/// Digest `value` unless it is absent or empty.
pub fn digest_optional(key: &IndexKey, value: Option<&str>) -> Option<Token> {
    match value {
        None | Some("") => None,
        Some(v) => Some(digest(key, v)),
    }
}

/// Tokenize `value`; an absent value has no tokens.
pub fn tokenize_optional(key: &IndexKey, field_name: &str, value: Option<&str>) -> TokenSet {
    value
        .map(|v| tokenize(key, field_name, v))
        .unwrap_or_default()
}
