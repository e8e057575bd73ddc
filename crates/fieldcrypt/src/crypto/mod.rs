//! Field encryption and keyed digest primitives.
//!
//! This module is intentionally free of storage and transport concerns. It
//! provides the low-level operations used by the indexer, the optional-value
//! adapters and [`crate::FieldProtector`].
//!
//! # Ciphertext format
//!
//! ```text
//! nonce (12 bytes) ‖ ciphertext ‖ tag (16 bytes)
//! ```
//!
//! The armored text form `v1.<base64url-no-pad(nonce)>.<base64url-no-pad(ciphertext+tag)>`
//! is available for callers that store blobs in text columns.

pub mod cipher;
pub mod digest;
pub mod nonce;

pub use cipher::{
    decrypt, decrypt_string, encrypt, encrypt_string, encrypt_with, CiphertextBlob, NONCE_LEN,
    TAG_LEN,
};
pub use digest::{digest, digest_hex, normalize};
pub use nonce::{NonceSource, OsNonceSource};
