//! # Token Decoder Trait

use crate::{compat::strings::string_from_utf8_lossy, errors::WFResult, types::TokenType};

/// Trait for byte-level token decoders.
pub trait TokenDecoder<T: TokenType>: Send + Sync {
    /// Decodes tokens into bytes.
    ///
    /// ## Arguments
    /// * `tokens` - A slice of tokens to decode.
    ///
    /// ## Returns
    /// The concatenated token bytes; or
    /// [`WordforgeError::UnknownTokenId`](crate::WordforgeError::UnknownTokenId)
    /// for the first token not in the vocabulary.
    fn try_decode_to_bytes(
        &self,
        tokens: &[T],
    ) -> WFResult<Vec<u8>>;

    /// Decodes a batch of tokens.
    ///
    /// ## Arguments
    /// * `batch` - A batch of tokens.
    ///
    /// ## Returns
    /// A `WFResult<Vec<Vec<u8>>>`, in batch order.
    fn try_decode_batch_to_bytes(
        &self,
        batch: &[&[T]],
    ) -> WFResult<Vec<Vec<u8>>> {
        batch
            .iter()
            .map(|tokens| self.try_decode_to_bytes(tokens))
            .collect()
    }

    /// Decodes tokens into a string.
    ///
    /// UTF-8 lossy decoding is used to handle invalid UTF-8 sequences.
    ///
    /// ## Arguments
    /// * `tokens` - A slice of tokens to decode.
    ///
    /// ## Returns
    /// A `WFResult<String>`.
    fn try_decode_to_string(
        &self,
        tokens: &[T],
    ) -> WFResult<String> {
        self.try_decode_to_bytes(tokens).map(string_from_utf8_lossy)
    }

    /// Decodes a batch of tokens.
    ///
    /// UTF-8 lossy decoding is used to handle invalid UTF-8 sequences.
    ///
    /// ## Arguments
    /// * `batch` - A batch of tokens.
    ///
    /// ## Returns
    /// A `WFResult<Vec<String>>`, in batch order.
    fn try_decode_batch_to_strings(
        &self,
        batch: &[&[T]],
    ) -> WFResult<Vec<String>> {
        batch
            .iter()
            .map(|tokens| self.try_decode_to_string(tokens))
            .collect()
    }
}
