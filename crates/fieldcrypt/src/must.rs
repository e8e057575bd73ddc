//! Fail-fast adapters over the fallible API.
//!
//! Each function calls exactly one fallible operation and panics if it fails.
//! Use them only where the caller has already validated its inputs and any
//! failure means the program or its environment is broken (for example,
//! building keys from a provisioning step that guarantees their size).
//! The panic message and log line carry the error category, never the value.

use common::{CryptoError, Token};
use tracing::error;

use crate::crypto::{self, CiphertextBlob};
use crate::keys::{EncryptionKey, IndexKey};
use crate::optional;

fn or_abort<T>(operation: &'static str, result: Result<T, CryptoError>) -> T {
    match result {
        Ok(value) => value,
        Err(e) => {
            error!(operation, code = e.code(), "unrecoverable field crypto failure");
            panic!("{operation} failed: {e}");
        }
    }
}

pub fn encryption_key(key_bytes: &[u8]) -> EncryptionKey {
    or_abort("encryption_key", EncryptionKey::new(key_bytes))
}

pub fn index_key(key_bytes: &[u8]) -> IndexKey {
    or_abort("index_key", IndexKey::new(key_bytes))
}

pub fn encrypt(key: &EncryptionKey, plaintext: &[u8]) -> CiphertextBlob {
    or_abort("encrypt", crypto::encrypt(key, plaintext))
}

pub fn decrypt(key: &EncryptionKey, blob: &[u8]) -> Vec<u8> {
    or_abort("decrypt", crypto::decrypt(key, blob))
}

pub fn encrypt_string(key: &EncryptionKey, plaintext: &str) -> CiphertextBlob {
    or_abort("encrypt_string", crypto::encrypt_string(key, plaintext))
}

pub fn decrypt_string(key: &EncryptionKey, blob: &[u8]) -> String {
    or_abort("decrypt_string", crypto::decrypt_string(key, blob))
}

pub fn encrypt_optional(key: &EncryptionKey, value: Option<&str>) -> Option<CiphertextBlob> {
    or_abort("encrypt_optional", optional::encrypt_optional(key, value))
}

pub fn decrypt_optional(key: &EncryptionKey, blob: Option<&[u8]>) -> Option<String> {
    or_abort("decrypt_optional", optional::decrypt_optional(key, blob))
}

pub fn from_armored(s: &str) -> CiphertextBlob {
    or_abort("from_armored", CiphertextBlob::from_armored(s))
}

pub fn token_from_hex(s: &str) -> Token {
    or_abort("token_from_hex", Token::from_hex(s))
}
