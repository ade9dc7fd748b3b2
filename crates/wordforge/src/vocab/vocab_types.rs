//! # Vocabulary Types

use crate::{
    errors::{WFResult, WordforgeError},
    types::{Pair, TokenType, WFHashMap},
};

/// `{ Pair<T> -> T}` map.
///
/// ## Style Hints
/// Instance names should prefer `pair_map`, or `pair_token_map`.
pub type PairTokenMap<T> = WFHashMap<Pair<T>, T>;

/// `{ Vec<u8> -> T }` map.
///
/// ## Style Hints
/// Instance names should prefer `span_map`, or `span_token_map`.
pub type SpanTokenMap<T> = WFHashMap<Vec<u8>, T>;

/// A byte-level merge rule: ``(a, b) -> t``.
pub type MergeRule<T> = (Pair<T>, T);

/// Convert an index into a token id.
///
/// ## Returns
/// The token, or [`WordforgeError::VocabSizeOverflow`] if `T` is too small.
pub fn token_from_usize<T: TokenType>(idx: usize) -> WFResult<T> {
    T::from_usize(idx).ok_or(WordforgeError::VocabSizeOverflow { size: idx + 1 })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_from_usize() {
        assert_eq!(token_from_usize::<u16>(300).unwrap(), 300);
        assert!(matches!(
            token_from_usize::<u8>(256),
            Err(WordforgeError::VocabSizeOverflow { size: 257 })
        ));
    }
}
