//! # Vocabulary
//!
//! This module provides the trained vocabularies and their persistence.
//!
//! ## Byte-Level Vocabularies
//!
//! Ids ``0..=255`` are always the raw bytes; this is provided by:
//! * [`ByteMapVocab`].
//!
//! Byte-pair training extends this with ordered merge rules:
//! * [`BytePairVocab`] - ``{ (T, T) -> T }`` merges plus ``{ T -> Vec<u8> }`` expansions.
//!
//! ## String-Level Vocabularies
//!
//! The character and word-level variants keep their tokens as strings:
//! * [`StringVocab`] - an insertion-ordered token set.
//! * [`StringMergeRules`] - ordered ``(left, right) -> merged`` rules.
//!
//! ## Persistence
//!
//! See [`io`] for the versioned model record.

pub mod io;

pub mod byte_pair_vocab;
pub mod byte_vocab;
pub mod special_tokens;
pub mod string_vocab;
pub mod vocab_types;

#[doc(inline)]
pub use byte_pair_vocab::BytePairVocab;
#[doc(inline)]
pub use byte_vocab::{BYTE_TOKEN_COUNT, ByteMapVocab};
#[doc(inline)]
pub use special_tokens::{RESERVED_TOKENS, UNK_TOKEN, WORD_START_MARKER};
#[doc(inline)]
pub use string_vocab::{StringMergeRule, StringMergeRules, StringVocab};
#[doc(inline)]
pub use vocab_types::{MergeRule, PairTokenMap, SpanTokenMap};
