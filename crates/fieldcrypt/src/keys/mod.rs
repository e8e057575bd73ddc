//! Caller-supplied key material for the two key roles.
//!
//! # Roles
//!
//! - [`EncryptionKey`] drives the cipher engine.
//! - [`IndexKey`] drives the keyed digest and the blind indexer.
//!
//! The two roles are always separate values. Whether they share underlying
//! secret material is decided by whoever provisions them.
//!
//! # Security invariants
//!
//! - Key material is validated at construction; an invalid key never reaches
//!   an encrypt or digest call.
//! - Key bytes are never logged and never appear in `Debug` output.
//! - Keys are immutable once built; rotation means building new keys.

pub mod material;

pub use material::{EncryptionKey, IndexKey, AES_128_KEY_LEN, AES_192_KEY_LEN, AES_256_KEY_LEN};
