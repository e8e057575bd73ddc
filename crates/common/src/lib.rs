//! Shared error taxonomy and token interchange types for the `fieldcrypt` crates.

pub mod error;
pub mod protocol;

pub use error::CryptoError;
pub use protocol::{Token, TokenSet, TOKEN_LEN};
