//! # Byte-Pair ``{ T -> Vec<u8> }`` Token Decoder

use std::sync::Arc;

use crate::{
    decoders::TokenDecoder,
    errors::{WFResult, WordforgeError},
    types::TokenType,
    vocab::BytePairVocab,
};

/// A [`TokenDecoder<T>`] over the span table of a [`BytePairVocab`].
#[derive(Debug, Clone)]
pub struct BytePairDecoder<T: TokenType> {
    vocab: Arc<BytePairVocab<T>>,
}

impl<T: TokenType> BytePairDecoder<T> {
    /// Creates a new Decoder.
    ///
    /// ## Arguments
    /// * `vocab` - The vocabulary to decode against.
    pub fn new(vocab: Arc<BytePairVocab<T>>) -> Self {
        Self { vocab }
    }
}

impl<T: TokenType> TokenDecoder<T> for BytePairDecoder<T> {
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self, tokens)))]
    fn try_decode_to_bytes(
        &self,
        tokens: &[T],
    ) -> WFResult<Vec<u8>> {
        let mut buf = Vec::with_capacity(tokens.len() * 2);
        for &token in tokens {
            match self.vocab.token_span(token) {
                Some(span) => buf.extend_from_slice(span),
                None => {
                    return Err(WordforgeError::UnknownTokenId {
                        token: token.to_u64().unwrap_or(u64::MAX),
                    });
                }
            }
        }
        Ok(buf)
    }
}
