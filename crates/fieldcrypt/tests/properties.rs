//! Property-based tests for field protection.
//!
//! Ciphertexts are non-deterministic, so these check behaviour rather than
//! byte-level equality.

use fieldcrypt::crypto::{decrypt, decrypt_string, digest, encrypt, encrypt_string};
use fieldcrypt::index::tokenize;
use fieldcrypt::{CryptoError, EncryptionKey, IndexKey, MaskPolicy};
use proptest::prelude::*;

fn encryption_key() -> impl Strategy<Value = EncryptionKey> {
    prop_oneof![
        prop::array::uniform16(any::<u8>()).prop_map(|k| EncryptionKey::new(&k).unwrap()),
        prop::array::uniform24(any::<u8>()).prop_map(|k| EncryptionKey::new(&k).unwrap()),
        prop::array::uniform32(any::<u8>()).prop_map(|k| EncryptionKey::new(&k).unwrap()),
    ]
}

proptest! {
    /// Property: decrypt(encrypt(x)) == x
    #[test]
    fn prop_encrypt_decrypt_roundtrip(
        key in encryption_key(),
        data in prop::collection::vec(any::<u8>(), 0..1024),
    ) {
        let blob = encrypt(&key, &data).unwrap();
        prop_assert_eq!(decrypt(&key, blob.as_bytes()).unwrap(), data);
    }

    /// Property: string round-trip preserves arbitrary Unicode
    #[test]
    fn prop_string_roundtrip(key in encryption_key(), text in ".*") {
        let blob = encrypt_string(&key, &text).unwrap();
        prop_assert_eq!(decrypt_string(&key, blob.as_bytes()).unwrap(), text);
    }

    /// Property: any single bit flip is an authentication failure
    #[test]
    fn prop_bit_flip_fails_authentication(
        key in encryption_key(),
        data in prop::collection::vec(any::<u8>(), 0..256),
        position in any::<prop::sample::Index>(),
        bit in 0u8..8,
    ) {
        let mut bytes = encrypt(&key, &data).unwrap().into_bytes();
        let i = position.index(bytes.len());
        bytes[i] ^= 1 << bit;
        prop_assert_eq!(decrypt(&key, &bytes).unwrap_err(), CryptoError::Authentication);
    }

    /// Property: digest ignores case and surrounding whitespace
    #[test]
    fn prop_digest_normalizes(
        secret in prop::collection::vec(any::<u8>(), 1..64),
        word in "[a-zA-Z0-9]{1,24}",
        lead in "[ \t\n]{0,3}",
        trail in "[ \t\n]{0,3}",
    ) {
        let key = IndexKey::new(&secret).unwrap();
        let padded = format!("{lead}{}{trail}", word.to_uppercase());
        prop_assert_eq!(digest(&key, &padded), digest(&key, &word.to_lowercase()));
    }

    /// Property: token sets do not depend on word order
    #[test]
    fn prop_tokenize_order_independent(words in prop::collection::vec("[a-z0-9]{1,8}", 0..8)) {
        let key = IndexKey::new(b"prop-index-key").unwrap();
        let forward = words.join(" ");
        let mut reversed_words = words.clone();
        reversed_words.reverse();
        let reversed = reversed_words.join(" , ");
        prop_assert_eq!(tokenize(&key, "f", &forward), tokenize(&key, "f", &reversed));
    }

    /// Property: masking preserves character count and the kept ends
    #[test]
    fn prop_mask_shape(value in ".{0,40}", prefix in 0usize..6, suffix in 0usize..6) {
        let policy = MaskPolicy::new(prefix, suffix, '*');
        let masked = policy.apply(&value);
        let n = value.chars().count();
        prop_assert_eq!(masked.chars().count(), n);
        if n <= prefix + suffix {
            prop_assert_eq!(masked, value);
        } else {
            let head: String = value.chars().take(prefix).collect();
            let tail: String = value.chars().skip(n - suffix).collect();
            let expected = format!("{head}{}{tail}", "*".repeat(n - prefix - suffix));
            prop_assert_eq!(masked, expected);
        }
    }
}
