//! Token types exchanged with the external index collaborator.
//!
//! Tokens travel as lowercase hex strings whenever they are embedded in text
//! (JSON documents, composite index keys). A [`TokenSet`] serialises as a JSON
//! array of such strings.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::CryptoError;

/// Byte length of a token (HMAC-SHA256 output).
pub const TOKEN_LEN: usize = 32;

// ---------------------------------------------------------------------------
// Token
// ---------------------------------------------------------------------------

/// A deterministic keyed digest of a normalised string.
///
/// Two tokens are equal iff their normalised inputs were equal under the same
/// indexing key.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Token([u8; TOKEN_LEN]);

impl Token {
    /// Wrap raw digest bytes.
    pub fn from_bytes(bytes: [u8; TOKEN_LEN]) -> Self {
        Self(bytes)
    }

    /// Raw digest bytes.
    pub fn as_bytes(&self) -> &[u8; TOKEN_LEN] {
        &self.0
    }

    /// Lowercase hex view, suitable as a text index key.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Parse a token from its hex view.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::MalformedInput`] if `s` is not exactly
    /// `2 * TOKEN_LEN` hex characters.
    pub fn from_hex(s: &str) -> Result<Self, CryptoError> {
        let mut bytes = [0u8; TOKEN_LEN];
        hex::decode_to_slice(s, &mut bytes)
            .map_err(|e| CryptoError::MalformedInput(format!("invalid token hex: {e}")))?;
        Ok(Self(bytes))
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// Number of leading bytes shown by `Debug`.
const DEBUG_PREFIX_LEN: usize = 2;

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Only a short prefix: a full token is an index key and must not reach logs.
        write!(f, "Token({}..)", hex::encode(&self.0[..DEBUG_PREFIX_LEN]))
    }
}

impl AsRef<[u8]> for Token {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl Serialize for Token {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Token {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Token::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

// ---------------------------------------------------------------------------
// Token set
// ---------------------------------------------------------------------------

/// The unique tokens derived from one field value.
///
/// Iteration yields tokens in first-occurrence order, but equality ignores
/// order: the set is stored by the index collaborator as an unordered entry.
#[derive(Clone, Default, Serialize, Deserialize)]
#[serde(from = "Vec<Token>", into = "Vec<Token>")]
pub struct TokenSet {
    tokens: Vec<Token>,
    seen: HashSet<Token>,
}

impl TokenSet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `token`, returning `false` if it was already present.
    pub fn insert(&mut self, token: Token) -> bool {
        if !self.seen.insert(token) {
            return false;
        }
        self.tokens.push(token);
        true
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn contains(&self, token: &Token) -> bool {
        self.seen.contains(token)
    }

    /// Tokens in first-occurrence order.
    pub fn iter(&self) -> std::slice::Iter<'_, Token> {
        self.tokens.iter()
    }

    /// Returns `true` if the two sets share no token.
    pub fn is_disjoint(&self, other: &TokenSet) -> bool {
        self.seen.is_disjoint(&other.seen)
    }

    /// Returns `true` if every token of `query` is present in `self`.
    ///
    /// This is the multi-word lookup an index performs: a record matches when
    /// its stored set contains the intersection of all query tokens. An empty
    /// query matches nothing.
    pub fn matches_all(&self, query: &TokenSet) -> bool {
        !query.is_empty() && query.seen.is_subset(&self.seen)
    }

    /// Hex views of every token, in first-occurrence order.
    pub fn to_hex(&self) -> Vec<String> {
        self.tokens.iter().map(Token::to_hex).collect()
    }

    pub fn into_vec(self) -> Vec<Token> {
        self.tokens
    }
}

impl PartialEq for TokenSet {
    fn eq(&self, other: &Self) -> bool {
        self.seen == other.seen
    }
}

impl Eq for TokenSet {}

impl fmt::Debug for TokenSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TokenSet({} tokens)", self.tokens.len())
    }
}

impl FromIterator<Token> for TokenSet {
    fn from_iter<I: IntoIterator<Item = Token>>(iter: I) -> Self {
        let mut set = TokenSet::new();
        for token in iter {
            set.insert(token);
        }
        set
    }
}

impl From<Vec<Token>> for TokenSet {
    fn from(tokens: Vec<Token>) -> Self {
        tokens.into_iter().collect()
    }
}

impl From<TokenSet> for Vec<Token> {
    fn from(set: TokenSet) -> Self {
        set.tokens
    }
}

impl<'a> IntoIterator for &'a TokenSet {
    type Item = &'a Token;
    type IntoIter = std::slice::Iter<'a, Token>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.iter()
    }
}
