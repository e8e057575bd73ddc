//! Keyed HMAC-SHA256 digest of normalised strings.

use common::Token;
use hmac::Mac;

use crate::keys::IndexKey;

/// Trim surrounding whitespace and fold to lowercase.
///
/// Each character is lowercased on its own, with no context rules (a final
/// capital sigma becomes `σ`, not `ς`), so inputs that differ only by case
/// always normalise to the same string.
pub fn normalize(text: &str) -> String {
    text.trim().chars().flat_map(char::to_lowercase).collect()
}

/// Deterministic keyed digest of `text` after [`normalize`].
///
/// Inputs that differ only by case or surrounding whitespace produce
/// byte-identical tokens under the same key.
pub fn digest(key: &IndexKey, text: &str) -> Token {
    let mut mac = key.mac();
    mac.update(normalize(text).as_bytes());
    Token::from_bytes(mac.finalize().into_bytes().into())
}

/// Hex view of [`digest`], for text-based index keys.
pub fn digest_hex(key: &IndexKey, text: &str) -> String {
    digest(key, text).to_hex()
}
