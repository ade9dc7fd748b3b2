//! # Token Span Buffer

use crate::{
    types::{Pair, TokenType},
    vocab::ByteMapVocab,
};

/// A mutable span of tokens (a chunk or "word").
///
/// Iteratively rewritten during pair-merge training.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TokenSpanBuf<T: TokenType> {
    tokens: Vec<T>,
}

impl<T: TokenType, S: AsRef<[T]>> From<S> for TokenSpanBuf<T> {
    fn from(tokens: S) -> Self {
        Self::from_tokens(tokens)
    }
}

impl<T: TokenType> TokenSpanBuf<T> {
    const DEC: i32 = -1;
    const INC: i32 = 1;

    /// Create a new span buffer from tokens.
    pub fn from_tokens<S>(tokens: S) -> Self
    where
        S: AsRef<[T]>,
    {
        Self {
            tokens: tokens.as_ref().to_vec(),
        }
    }

    /// Create a new span buf from a byte slice.
    ///
    /// ## Arguments
    /// * `bytes` - the bytes to translate to byte-level tokens.
    /// * `byte_vocab` - the translation for the byte tokens.
    pub fn from_bytes<B: AsRef<[u8]>>(
        bytes: B,
        byte_vocab: &ByteMapVocab<T>,
    ) -> Self {
        let mut tokens = Vec::with_capacity(bytes.as_ref().len());
        byte_vocab.append_tokens(bytes.as_ref(), &mut tokens);
        Self { tokens }
    }

    /// View the tokens as a slice.
    pub fn tokens(&self) -> &[T] {
        &self.tokens
    }

    /// Get the length of the span.
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Is this span empty?
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Get an iterator over [`Pair<T>`] windows of this span.
    pub fn pairs(&self) -> impl Iterator<Item = Pair<T>> + '_ {
        self.tokens.windows(2).map(|w| (w[0], w[1]))
    }

    /// Find the first window equal to `pair`.
    ///
    /// ## Arguments
    /// * `pair` - the pair to find.
    /// * `width` - the number of base units (bytes or chars) a token covers.
    ///
    /// ## Returns
    /// The base-unit offset of the first occurrence, if any.
    ///
    /// Offsets are measured in base units rather than token positions,
    /// so an occurrence keeps its offset while neighbouring pairs merge.
    pub fn first_pair_offset<F>(
        &self,
        pair: Pair<T>,
        width: F,
    ) -> Option<usize>
    where
        F: Fn(T) -> usize,
    {
        let mut offset = 0;
        for w in self.tokens.windows(2) {
            if (w[0], w[1]) == pair {
                return Some(offset);
            }
            offset += width(w[0]);
        }
        None
    }

    /// Merge all non-overlapping occurrences of `pair -> replacement`.
    ///
    /// Occurrences are replaced left to right; ``a a a`` merging ``(a, a)``
    /// becomes ``aa a``.
    ///
    /// ## Arguments
    /// * `pair` - the pair to merge.
    /// * `replacement` - the token to replace `pair` with.
    /// * `on_merge` - a callback function to invoke for each incremental pair delta.
    ///   The function is called with:
    ///   - `pair` - the window that was added or removed.
    ///   - `delta` - the window count delta: `+1` for an added pair, `-1` for a removed pair.
    ///
    /// The deltas net out to the exact change in window counts; an
    /// intermediate ``(replacement, y)`` may be added and then removed.
    pub fn merge_pair_cb<F>(
        &mut self,
        pair: Pair<T>,
        replacement: T,
        on_merge: &mut F,
    ) where
        F: FnMut(Pair<T>, i32),
    {
        let (a, b) = pair;
        let n = self.tokens.len();

        if n < 2 {
            return;
        }

        let mut new_tokens: Vec<T> = Vec::with_capacity(n);

        let mut i = 0;
        while i < n {
            let current = self.tokens[i];

            if i + 1 < n && pair == (current, self.tokens[i + 1]) {
                if let Some(&x) = new_tokens.last() {
                    on_merge((x, a), Self::DEC);
                    on_merge((x, replacement), Self::INC);
                }

                on_merge(pair, Self::DEC);

                if i + 2 < n {
                    let y = self.tokens[i + 2];
                    on_merge((b, y), Self::DEC);
                    on_merge((replacement, y), Self::INC);
                };

                new_tokens.push(replacement);

                i += 2;
            } else {
                new_tokens.push(current);
                i += 1;
            }
        }

        self.tokens = new_tokens;
    }

    /// Merge all non-overlapping occurrences of `pair -> replacement`.
    ///
    /// ## Returns
    /// a delta list of pair count deltas for this span:
    /// * `(Pair, +1)` - for each instance of an added `Pair`.
    /// * `(Pair, -1)` - for each instance of a removed `Pair`.
    pub fn merge_pair(
        &mut self,
        pair: Pair<T>,
        replacement: T,
    ) -> Vec<(Pair<T>, i32)> {
        let mut deltas: Vec<(Pair<T>, i32)> = Vec::with_capacity(6);
        self.merge_pair_cb(pair, replacement, &mut |p, d| deltas.push((p, d)));
        deltas
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::WFHashMap;

    /// Sum the deltas per pair, dropping zeros.
    fn net(deltas: &[((u32, u32), i32)]) -> Vec<((u32, u32), i32)> {
        let mut acc: WFHashMap<(u32, u32), i32> = WFHashMap::default();
        for &(p, d) in deltas {
            *acc.entry(p).or_default() += d;
        }
        let mut acc: Vec<_> = acc.into_iter().filter(|&(_, d)| d != 0).collect();
        acc.sort();
        acc
    }

    /// Window counts before and after must differ by exactly the net deltas.
    fn check_deltas(
        before: &[u32],
        pair: (u32, u32),
        replacement: u32,
    ) {
        let mut span: TokenSpanBuf<u32> = TokenSpanBuf::from_tokens(before);
        let deltas = span.merge_pair(pair, replacement);

        let count = |s: &TokenSpanBuf<u32>| {
            let mut acc: WFHashMap<(u32, u32), i32> = WFHashMap::default();
            for p in s.pairs() {
                *acc.entry(p).or_default() += 1;
            }
            acc
        };
        let old = count(&TokenSpanBuf::from_tokens(before));
        let new = count(&span);

        let mut expected: WFHashMap<(u32, u32), i32> = WFHashMap::default();
        for (p, c) in new.iter() {
            *expected.entry(*p).or_default() += c;
        }
        for (p, c) in old.iter() {
            *expected.entry(*p).or_default() -= c;
        }
        let mut expected: Vec<_> = expected.into_iter().filter(|&(_, d)| d != 0).collect();
        expected.sort();

        assert_eq!(net(&deltas), expected, "{before:?} merging {pair:?}");
    }

    #[test]
    fn test_from_tokens() {
        let span: TokenSpanBuf<u32> = TokenSpanBuf::from_tokens(vec![1, 2, 3]);
        assert_eq!(span.tokens(), &[1, 2, 3]);
        assert_eq!(span.len(), 3);
        assert!(!span.is_empty());

        let span: TokenSpanBuf<u32> = [1, 2, 3].into();
        assert_eq!(span.tokens(), &[1, 2, 3]);
    }

    #[test]
    fn test_span_from_bytes() {
        let byte_vocab: ByteMapVocab<u32> = ByteMapVocab::try_new().unwrap();
        let span = TokenSpanBuf::from_bytes("hello", &byte_vocab);
        assert_eq!(span.tokens(), &[104, 101, 108, 108, 111]);
    }

    #[test]
    fn test_span_pairs() {
        let span: TokenSpanBuf<u32> = TokenSpanBuf::from_tokens(vec![1, 2, 3]);
        assert_eq!(span.pairs().collect::<Vec<_>>(), vec![(1, 2), (2, 3)]);
    }

    #[test]
    fn test_first_pair_offset() {
        let span: TokenSpanBuf<u32> = TokenSpanBuf::from_tokens(vec![9, 1, 2, 1, 2]);
        let width = |t: u32| if t == 9 { 3 } else { 1 };
        assert_eq!(span.first_pair_offset((1, 2), width), Some(3));
        assert_eq!(span.first_pair_offset((2, 1), width), Some(4));
        assert_eq!(span.first_pair_offset((2, 9), width), None);
    }

    #[test]
    fn test_span_merge_pair() {
        let mut span: TokenSpanBuf<u32> = TokenSpanBuf::from_tokens(vec![1, 2, 3, 1, 2, 2, 1]);

        let deltas = span.merge_pair((1, 2), 7);
        assert_eq!(span.tokens(), &[7, 3, 7, 2, 1]);

        assert_eq!(
            net(&deltas),
            vec![
                ((1, 2), -2),
                ((2, 2), -1),
                ((2, 3), -1),
                ((3, 1), -1),
                ((3, 7), 1),
                ((7, 2), 1),
                ((7, 3), 1),
            ]
        );
    }

    #[test]
    fn test_merge_deltas_match_window_counts() {
        check_deltas(&[1, 1, 1], (1, 1), 9);
        check_deltas(&[1, 1, 1, 1], (1, 1), 9);
        check_deltas(&[1, 1, 1, 1, 1], (1, 1), 9);
        check_deltas(&[1, 2, 1, 2, 1, 2], (1, 2), 9);
        check_deltas(&[2, 1, 2, 1, 2], (1, 2), 9);
        check_deltas(&[1, 2, 3, 1, 2, 2, 1], (1, 2), 9);
        check_deltas(&[3, 3], (1, 2), 9);
        check_deltas(&[1], (1, 2), 9);
    }
}
