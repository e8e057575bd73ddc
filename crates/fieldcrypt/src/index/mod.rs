//! Blind indexing: searchable tokens for encrypted fields.
//!
//! A field value is split into normalised words and each word is digested
//! under the indexing key, namespaced by field name. The resulting
//! [`TokenSet`](common::TokenSet) is stored by the caller next to the
//! ciphertext; lookups are exact token matches.
//!
//! # Leakage
//!
//! - Equal words in the same field produce equal tokens; that is what makes the
//!   index searchable, and it reveals that two records share a word.
//! - Words shorter than [`MIN_WORD_LEN`] are never indexed.
//! - The normalisation pattern is compiled once per process and never mutated.

pub mod tokenizer;

pub use tokenizer::{tokenize, words, MIN_WORD_LEN, NAMESPACE_SEPARATOR};
