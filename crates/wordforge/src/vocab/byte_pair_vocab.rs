//! # Byte-Pair ``{ (T, T) -> T }`` Token Vocabulary

use crate::{
    errors::{WFResult, WordforgeError},
    types::{Pair, TokenType},
    vocab::{
        byte_vocab::{BYTE_TOKEN_COUNT, ByteMapVocab},
        vocab_types::{MergeRule, PairTokenMap, SpanTokenMap, token_from_usize},
    },
};

/// Byte-Pair Vocabulary.
///
/// - ids ``0..=255`` are the raw bytes;
/// - id ``256 + i`` is the target of the i-th merge rule.
///
/// Immutable once built; share it behind an `Arc`.
#[derive(Debug, Clone)]
pub struct BytePairVocab<T: TokenType> {
    byte_vocab: ByteMapVocab<T>,

    /// Merge rules, in merge (priority) order.
    merges: Vec<MergeRule<T>>,

    /// Map of ``{ (T, T) -> T }``.
    pair_map: PairTokenMap<T>,

    /// The byte expansion of each token, indexed by id.
    token_spans: Vec<Vec<u8>>,

    /// Map of ``{ Vec<u8> -> T }``; the lowest id wins for duplicate spans.
    span_map: SpanTokenMap<T>,

    /// The longest token span, in bytes.
    max_span_len: usize,
}

impl<T: TokenType> BytePairVocab<T> {
    /// Build a vocabulary holding only the 256 byte tokens.
    pub fn bytes_only() -> WFResult<Self> {
        Self::from_merges(Vec::new())
    }

    /// Build a vocabulary from an ordered merge list.
    ///
    /// ## Arguments
    /// * `merges` - ``(a, b) -> t`` rules in merge order.
    ///
    /// ## Returns
    /// The vocabulary, or [`WordforgeError::VocabConflict`] if:
    /// - the i-th target is not ``256 + i``;
    /// - a parent is not defined before its merge;
    /// - a pair appears twice.
    pub fn from_merges(merges: Vec<MergeRule<T>>) -> WFResult<Self> {
        let byte_vocab = ByteMapVocab::try_new()?;
        token_from_usize::<T>(BYTE_TOKEN_COUNT + merges.len() - 1)?;

        let mut token_spans: Vec<Vec<u8>> = (0..BYTE_TOKEN_COUNT).map(|b| vec![b as u8]).collect();
        let mut pair_map = PairTokenMap::with_capacity(merges.len());

        for (idx, &(pair, target)) in merges.iter().enumerate() {
            let expected: T = token_from_usize(BYTE_TOKEN_COUNT + idx)?;
            if target != expected {
                return Err(WordforgeError::VocabConflict(format!(
                    "merge {idx}: {pair:?} -> {target:?}; expected target {expected:?}"
                )));
            }

            let mut span = Vec::new();
            for parent in [pair.0, pair.1] {
                match token_spans.get(parent.to_usize().unwrap_or(usize::MAX)) {
                    Some(parent_span) => span.extend_from_slice(parent_span),
                    None => {
                        return Err(WordforgeError::VocabConflict(format!(
                            "merge {idx}: {pair:?} -> {target:?}; parent {parent:?} is not defined"
                        )));
                    }
                }
            }

            if pair_map.insert(pair, target).is_some() {
                return Err(WordforgeError::VocabConflict(format!(
                    "merge {idx}: duplicate pair {pair:?}"
                )));
            }
            token_spans.push(span);
        }

        let mut span_map = SpanTokenMap::with_capacity(token_spans.len());
        for (idx, span) in token_spans.iter().enumerate() {
            if !span_map.contains_key(span) {
                span_map.insert(span.clone(), token_from_usize(idx)?);
            }
        }
        let max_span_len = token_spans.iter().map(Vec::len).max().unwrap_or(1);

        Ok(Self {
            byte_vocab,
            merges,
            pair_map,
            token_spans,
            span_map,
            max_span_len,
        })
    }

    /// Get the byte/token mapping table.
    pub fn byte_vocab(&self) -> &ByteMapVocab<T> {
        &self.byte_vocab
    }

    /// The merge rules, in merge order.
    pub fn merges(&self) -> &[MergeRule<T>] {
        &self.merges
    }

    /// Get the number of tokens in the vocabulary (bytes + merges).
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.token_spans.len()
    }

    /// The largest token id.
    pub fn max_token(&self) -> T {
        self.merges
            .last()
            .map(|&(_, t)| t)
            .unwrap_or_else(|| self.byte_vocab.max_token())
    }

    /// Looks up the merge target of a pair.
    #[inline(always)]
    pub fn lookup_pair(
        &self,
        pair: &Pair<T>,
    ) -> Option<T> {
        self.pair_map.get(pair).copied()
    }

    /// Looks up the token whose expansion is exactly `span`.
    #[inline(always)]
    pub fn lookup_span(
        &self,
        span: &[u8],
    ) -> Option<T> {
        self.span_map.get(span).copied()
    }

    /// The byte expansion of `token`, if it is in the vocabulary.
    #[inline(always)]
    pub fn token_span(
        &self,
        token: T,
    ) -> Option<&[u8]> {
        token
            .to_usize()
            .and_then(|idx| self.token_spans.get(idx))
            .map(Vec::as_slice)
    }

    /// The longest token expansion, in bytes.
    pub fn max_span_len(&self) -> usize {
        self.max_span_len
    }

    /// Iterate over ``(token, span)`` in id order.
    pub fn spans(&self) -> impl Iterator<Item = (T, &[u8])> + '_ {
        self.token_spans
            .iter()
            .enumerate()
            .filter_map(|(idx, span)| T::from_usize(idx).map(|t| (t, span.as_slice())))
    }
}
