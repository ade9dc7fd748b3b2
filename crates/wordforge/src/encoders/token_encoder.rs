//! # Token Encoder Trait

use crate::{pretokenize::Chunker, types::TokenType};

/// A trait for byte-level token encoders.
///
/// Text is split into chunks by the attached [`Chunker`]; each chunk
/// is encoded independently, so no token crosses a chunk boundary.
///
/// Encoding never fails: every byte has a token.
pub trait TokenEncoder<T: TokenType>: Send + Sync {
    /// Return the attached chunker.
    fn chunker(&self) -> &Chunker;

    /// Encode a chunk appending to a target buffer.
    ///
    /// ## Arguments
    /// * `chunk` - The byte chunk to encode.
    /// * `tokens` - The target token buffer to append to.
    fn encode_append_chunk(
        &self,
        chunk: &[u8],
        tokens: &mut Vec<T>,
    );

    /// Encode text appending to a target buffer.
    ///
    /// ## Arguments
    /// * `text` - The string slice to encode.
    /// * `tokens` - The target token buffer to append to.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self, text, tokens)))]
    fn encode_append(
        &self,
        text: &str,
        tokens: &mut Vec<T>,
    ) {
        for chunk in self.chunker().chunks(text) {
            self.encode_append_chunk(chunk.as_bytes(), tokens);
        }
    }

    /// Encode text into tokens.
    ///
    /// ## Arguments
    /// * `text` - The text to encode.
    ///
    /// ## Returns
    /// A vector of tokens.
    fn encode<S: AsRef<str>>(
        &self,
        text: S,
    ) -> Vec<T>
    where
        Self: Sized,
    {
        let text = text.as_ref();
        let mut tokens = Vec::with_capacity(text.len() / 2);
        self.encode_append(text, &mut tokens);
        tokens
    }

    /// Encode a batch of text into tokens.
    ///
    /// ## Arguments
    /// * `batch` - A slice of strings to encode.
    ///
    /// ## Returns
    /// A vector of token vectors, in batch order.
    fn encode_batch<S: AsRef<str> + Sync>(
        &self,
        batch: &[S],
    ) -> Vec<Vec<T>>
    where
        Self: Sized,
    {
        cfg_if::cfg_if! {
            if #[cfg(feature = "rayon")] {
                use rayon::prelude::*;
                batch.par_iter().map(|text| self.encode(text)).collect()
            } else {
                batch.iter().map(|text| self.encode(text)).collect()
            }
        }
    }
}
