//! `fieldcrypt`: field-level protection for structured records.
//!
//! Three independent operations over one field value:
//!
//! 1. **Encrypt** for confidentiality at rest ([`crypto::encrypt`], AES-GCM-SIV).
//! 2. **Tokenize** for searchability without decryption ([`index::tokenize`],
//!    HMAC-SHA256 blind index).
//! 3. **Mask** for safe display ([`masking::mask`]).
//!
//! Every operation is stateless: keys are caller-owned and read-only, so any
//! function here may be called concurrently without locking. Key provisioning,
//! rotation and storage of blobs and tokens are left to the caller.
//!
//! Fallible operations return [`CryptoError`]; the [`must`] module wraps each
//! of them for call sites that treat failure as fatal.

pub mod config;
pub mod crypto;
pub mod index;
pub mod keys;
pub mod masking;
pub mod must;
pub mod optional;
pub mod protector;
pub mod telemetry;

pub use common::{CryptoError, Token, TokenSet, TOKEN_LEN};
pub use config::FieldCryptoConfig;
pub use crypto::{CiphertextBlob, NONCE_LEN, TAG_LEN};
pub use keys::{EncryptionKey, IndexKey};
pub use masking::MaskPolicy;
pub use protector::{FieldProtector, ProtectedField};
