//! [`FieldProtector`]: one encryption key and one index key bound together.

use common::{CryptoError, Token, TokenSet};

use crate::crypto::{self, CiphertextBlob};
use crate::index;
use crate::keys::{EncryptionKey, IndexKey};
use crate::masking::MaskPolicy;
use crate::optional;

/// What the persistence layer stores for one sensitive field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProtectedField {
    /// Goes in the record's ciphertext column.
    pub ciphertext: CiphertextBlob,
    /// Goes in the secondary blind index for this field.
    pub tokens: TokenSet,
}

/// Field protection bound to a pair of keys.
///
/// Stateless apart from the keys, which are never mutated: a single instance
/// can be cloned or shared across threads and used concurrently.
#[derive(Debug, Clone)]
pub struct FieldProtector {
    encryption_key: EncryptionKey,
    index_key: IndexKey,
}

impl FieldProtector {
    /// Validate both keys.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::Key`] if either key is unusable for its role.
    pub fn new(encryption_key: &[u8], index_key: &[u8]) -> Result<Self, CryptoError> {
        Ok(Self::from_keys(
            EncryptionKey::new(encryption_key)?,
            IndexKey::new(index_key)?,
        ))
    }

    pub fn from_keys(encryption_key: EncryptionKey, index_key: IndexKey) -> Self {
        Self {
            encryption_key,
            index_key,
        }
    }

    pub fn encryption_key(&self) -> &EncryptionKey {
        &self.encryption_key
    }

    pub fn index_key(&self) -> &IndexKey {
        &self.index_key
    }

    pub fn encrypt(&self, plaintext: &[u8]) -> Result<CiphertextBlob, CryptoError> {
        crypto::encrypt(&self.encryption_key, plaintext)
    }

    pub fn decrypt(&self, blob: &[u8]) -> Result<Vec<u8>, CryptoError> {
        crypto::decrypt(&self.encryption_key, blob)
    }

    pub fn encrypt_string(&self, plaintext: &str) -> Result<CiphertextBlob, CryptoError> {
        crypto::encrypt_string(&self.encryption_key, plaintext)
    }

    pub fn decrypt_string(&self, blob: &[u8]) -> Result<String, CryptoError> {
        crypto::decrypt_string(&self.encryption_key, blob)
    }

    pub fn encrypt_optional(&self, value: Option<&str>) -> Result<Option<CiphertextBlob>, CryptoError> {
        optional::encrypt_optional(&self.encryption_key, value)
    }

    pub fn decrypt_optional(&self, blob: Option<&[u8]>) -> Result<Option<String>, CryptoError> {
        optional::decrypt_optional(&self.encryption_key, blob)
    }

    pub fn digest(&self, text: &str) -> Token {
        crypto::digest(&self.index_key, text)
    }

    pub fn digest_hex(&self, text: &str) -> String {
        crypto::digest_hex(&self.index_key, text)
    }

    pub fn tokenize(&self, field_name: &str, value: &str) -> TokenSet {
        index::tokenize(&self.index_key, field_name, value)
    }

    /// Encrypt `value` for storage and tokenize the same plaintext for the
    /// blind index of `field_name`.
    ///
    /// # Errors
    ///
    /// As [`crypto::encrypt_string`].
    pub fn protect(&self, field_name: &str, value: &str) -> Result<ProtectedField, CryptoError> {
        Ok(ProtectedField {
            ciphertext: self.encrypt_string(value)?,
            tokens: self.tokenize(field_name, value),
        })
    }

    /// [`protect`](Self::protect) for a possibly-unset field; absent and empty
    /// values produce no ciphertext and no tokens.
    ///
    /// # Errors
    ///
    /// As [`crypto::encrypt_string`].
    pub fn protect_optional(
        &self,
        field_name: &str,
        value: Option<&str>,
    ) -> Result<Option<ProtectedField>, CryptoError> {
        match value {
            None | Some("") => Ok(None),
            Some(v) => self.protect(field_name, v).map(Some),
        }
    }

    /// Decrypt a stored string value.
    ///
    /// # Errors
    ///
    /// As [`crypto::decrypt_string`].
    pub fn reveal(&self, blob: &[u8]) -> Result<String, CryptoError> {
        self.decrypt_string(blob)
    }

    /// Decrypt a stored string value and mask it for display.
    ///
    /// # Errors
    ///
    /// As [`crypto::decrypt_string`].
    pub fn reveal_masked(&self, blob: &[u8], policy: &MaskPolicy) -> Result<String, CryptoError> {
        self.decrypt_string(blob).map(|plain| policy.apply(&plain))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn protector() -> FieldProtector {
        FieldProtector::new(&[0x44u8; 32], b"separate-index-secret").unwrap()
    }

    #[test]
    fn construction_validates_both_keys() {
        assert!(matches!(
            FieldProtector::new(&[0u8; 20], b"idx"),
            Err(CryptoError::Key(_))
        ));
        assert!(matches!(
            FieldProtector::new(&[0u8; 32], b""),
            Err(CryptoError::Key(_))
        ));
    }

    #[test]
    fn protect_produces_ciphertext_and_tokens() {
        let p = protector();
        let field = p.protect("email", "Alice.Smith@example.com").unwrap();
        assert_eq!(p.reveal(field.ciphertext.as_bytes()).unwrap(), "Alice.Smith@example.com");
        assert_eq!(field.tokens, p.tokenize("email", "alice smith example com"));
        assert!(field.tokens.matches_all(&p.tokenize("email", "SMITH")));
    }

    #[test]
    fn protect_optional_skips_unset_values() {
        let p = protector();
        assert!(p.protect_optional("phone", None).unwrap().is_none());
        assert!(p.protect_optional("phone", Some("")).unwrap().is_none());
        assert!(p.protect_optional("phone", Some("555 0100")).unwrap().is_some());
    }

    #[test]
    fn reveal_masked_applies_policy() {
        let p = protector();
        let blob = p.encrypt_string("4111111111111111").unwrap();
        let shown = p.reveal_masked(blob.as_bytes(), &MaskPolicy::new(4, 4, '*')).unwrap();
        assert_eq!(shown, "4111********1111");
    }

    #[test]
    fn index_key_is_independent_of_encryption_key() {
        let a = FieldProtector::new(&[1u8; 32], b"same-index").unwrap();
        let b = FieldProtector::new(&[2u8; 32], b"same-index").unwrap();
        assert_eq!(a.digest("bob"), b.digest("bob"));
        assert_eq!(a.digest_hex("bob"), b.digest("BOB ").to_hex());
    }

    #[test]
    fn optional_round_trip_through_protector() {
        let p = protector();
        let blob = p.encrypt_optional(Some("value")).unwrap();
        let out = p
            .decrypt_optional(blob.as_ref().map(CiphertextBlob::as_bytes))
            .unwrap();
        assert_eq!(out.as_deref(), Some("value"));
        assert_eq!(p.decrypt(p.encrypt(b"raw").unwrap().as_bytes()).unwrap(), b"raw");
    }

    #[test]
    fn protected_field_debug_hides_ciphertext_and_tokens() {
        let p = protector();
        let field = p.protect("name", "Alice Bob").unwrap();
        let dbg = format!("{field:?}");
        assert!(dbg.contains("TokenSet(2 tokens)"));
        assert!(dbg.contains("CiphertextBlob("));
        for token in &field.tokens {
            assert!(!dbg.contains(&token.to_hex()));
        }
    }

    #[test]
    fn protector_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<FieldProtector>();
    }
}
