//! # Shortest Path Encoder
//!
//! Minimum token count segmentation over the vocabulary spans.
//!
//! ``cost[0] = 0``; for each end ``i``, every start ``j`` with
//! ``i - j <= max_span_len`` whose span ``chunk[j..i]`` is a token is
//! a candidate edge ``cost[j] + 1``. Single bytes are always tokens,
//! so every position is reachable.

use std::sync::Arc;

use crate::{
    encoders::TokenEncoder,
    pretokenize::Chunker,
    types::TokenType,
    vocab::BytePairVocab,
};

/// A [`TokenEncoder`] which finds a minimum-length token sequence.
///
/// Among equally short segmentations, the one whose last token is
/// longest is kept; applied at every position.
#[derive(Debug, Clone)]
pub struct ShortestPathEncoder<T: TokenType> {
    vocab: Arc<BytePairVocab<T>>,
    chunker: Chunker,
}

impl<T: TokenType> ShortestPathEncoder<T> {
    /// Create a new encoder.
    ///
    /// ## Arguments
    /// * `vocab` - The trained vocabulary.
    /// * `chunker` - The chunker used in training.
    pub fn new(
        vocab: Arc<BytePairVocab<T>>,
        chunker: Chunker,
    ) -> Self {
        Self { vocab, chunker }
    }

    /// The attached vocabulary.
    pub fn vocab(&self) -> &Arc<BytePairVocab<T>> {
        &self.vocab
    }
}

impl<T: TokenType> TokenEncoder<T> for ShortestPathEncoder<T> {
    fn chunker(&self) -> &Chunker {
        &self.chunker
    }

    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self, chunk, tokens)))]
    fn encode_append_chunk(
        &self,
        chunk: &[u8],
        tokens: &mut Vec<T>,
    ) {
        let n = chunk.len();
        if n == 0 {
            return;
        }
        let max_span = self.vocab.max_span_len().max(1);

        // cost[i]: tokens in the best path to i; back[i]: (start, token) of its last edge.
        let mut cost: Vec<usize> = vec![usize::MAX; n + 1];
        let mut back: Vec<Option<(usize, T)>> = vec![None; n + 1];
        cost[0] = 0;

        for end in 1..=n {
            for start in end.saturating_sub(max_span)..end {
                if cost[start] == usize::MAX {
                    continue;
                }
                let Some(token) = self.vocab.lookup_span(&chunk[start..end]) else {
                    continue;
                };
                // Strictly better only; the smallest start wins ties.
                let candidate = cost[start] + 1;
                if candidate < cost[end] {
                    cost[end] = candidate;
                    back[end] = Some((start, token));
                }
            }
        }

        let start = tokens.len();
        let mut pos = n;
        while pos > 0 {
            match back[pos] {
                Some((prev, token)) => {
                    tokens.push(token);
                    pos = prev;
                }
                None => {
                    // Unreachable with full byte coverage; fall back to bytes.
                    tokens.truncate(start);
                    self.vocab.byte_vocab().append_tokens(chunk, tokens);
                    return;
                }
            }
        }
        tokens[start..].reverse();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        compat::traits::static_is_send_sync_check,
        encoders::{
            MergeScanEncoder,
            testing::{classic_vocab, common_encoder_tests},
        },
    };

    #[test]
    fn test_encoder() {
        let vocab = classic_vocab();
        let encoder = ShortestPathEncoder::new(vocab.clone(), Chunker::whole());
        static_is_send_sync_check(&encoder);
        common_encoder_tests(&vocab, &encoder);
    }

    #[test]
    fn test_minimal_length() {
        let vocab = classic_vocab();
        let encoder = ShortestPathEncoder::new(vocab, Chunker::whole());

        assert_eq!(encoder.encode("aaab"), vec![258]);
        assert_eq!(encoder.encode("aaabdaaabac"), vec![258, 100, 258, 97, 99]);
        assert_eq!(encoder.encode("ba"), vec![98, 97]);
        assert!(encoder.encode("").is_empty());

        // Two tokens either way; the longer last token wins.
        assert_eq!(encoder.encode("aaaa"), vec![97, 257]);
    }

    #[test]
    fn test_never_longer_than_replay() {
        type T = u32;
        let (a, b, c) = (b'a' as T, b'b' as T, b'c' as T);

        // Replay of "abc" merges (b, c) first and is stuck with [a, bc];
        // "abc" itself is reachable through (ab, c).
        let vocab = Arc::new(
            BytePairVocab::<T>::from_merges(vec![((b, c), 256), ((a, b), 257), ((257, c), 258)])
                .unwrap(),
        );

        let replay = MergeScanEncoder::new(vocab.clone(), Chunker::whole());
        let shortest = ShortestPathEncoder::new(vocab, Chunker::whole());

        assert_eq!(replay.encode("abc"), vec![a, 256]);
        assert_eq!(shortest.encode("abc"), vec![258]);

        for text in ["abcabc", "aabbcc", "cab", "bcab"] {
            assert!(shortest.encode(text).len() <= replay.encode(text).len());
        }
    }
}
