//! # Merge Scan Encoder
//!
//! Merge-order replay: repeatedly merges the lowest-id mergeable pair
//! until no rule applies.

use std::sync::Arc;

use crate::{
    encoders::TokenEncoder,
    pretokenize::Chunker,
    types::TokenType,
    vocab::BytePairVocab,
};

/// A [`TokenEncoder`] which replays merges in rule (id) order.
#[derive(Debug, Clone)]
pub struct MergeScanEncoder<T: TokenType> {
    vocab: Arc<BytePairVocab<T>>,
    chunker: Chunker,
}

impl<T: TokenType> MergeScanEncoder<T> {
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

impl<T: TokenType> TokenEncoder<T> for MergeScanEncoder<T> {
    fn chunker(&self) -> &Chunker {
        &self.chunker
    }

    fn encode_append_chunk(
        &self,
        chunk: &[u8],
        tokens: &mut Vec<T>,
    ) {
        // Reuse the output buffer as our working memory.
        let start = tokens.len();
        self.vocab.byte_vocab().append_tokens(chunk, tokens);

        let stop = start + 2;
        while tokens.len() >= stop {
            // The lowest id is the earliest rule; ties go to the leftmost window.
            if let Some((token, idx)) = tokens[start..]
                .windows(2)
                .enumerate()
                .filter_map(|(idx, w)| {
                    self.vocab
                        .lookup_pair(&(w[0], w[1]))
                        .map(|token| (token, idx))
                })
                .min()
            {
                let idx = start + idx;

                // buf[idx..=idx+1] (a, b) -> buf[idx] t
                tokens[idx] = token;
                tokens.remove(idx + 1);
            } else {
                break;
            }
        }
    }
}
