//! Word tokenization of field values into namespaced blind-index tokens.

use std::sync::LazyLock;

use common::TokenSet;
use regex::Regex;
use tracing::trace;

use crate::crypto::{digest, normalize};
use crate::keys::IndexKey;

/// Words shorter than this are never indexed.
pub const MIN_WORD_LEN: usize = 3;

/// Separator between the field namespace and the word in the digest input.
pub const NAMESPACE_SEPARATOR: char = '|';

static NON_ALPHANUMERIC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("[^a-z0-9]+").expect("word separator pattern is valid"));

/// Split `value` into its indexable words.
///
/// The value is lowercased and trimmed, every run of characters outside
/// `[a-z0-9]` becomes a single space, and words shorter than
/// [`MIN_WORD_LEN`] are dropped. Duplicates are kept.
pub fn words(value: &str) -> Vec<String> {
    let lowered = normalize(value);
    NON_ALPHANUMERIC
        .replace_all(&lowered, " ")
        .split_whitespace()
        .filter(|w| w.len() >= MIN_WORD_LEN)
        .map(str::to_owned)
        .collect()
}

/// Blind-index tokens for `value` in the namespace of `field_name`.
///
/// Each word is digested as `field_name|word`, so the same word in two fields
/// produces unlinkable tokens. A value without indexable words yields an
/// empty set.
pub fn tokenize(key: &IndexKey, field_name: &str, value: &str) -> TokenSet {
    let tokens: TokenSet = words(value)
        .iter()
        .map(|word| digest(key, &format!("{field_name}{NAMESPACE_SEPARATOR}{word}")))
        .collect();
    trace!(field = field_name, tokens = tokens.len(), "tokenized field value");
    tokens
}
