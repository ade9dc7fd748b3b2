//! # Byte/Token Mapping Table

use core::fmt::Debug;

use crate::{errors::WFResult, types::TokenType, vocab::vocab_types::token_from_usize};

/// The number of raw byte tokens; ids `0..=255` are reserved for them.
pub const BYTE_TOKEN_COUNT: usize = 256;

/// ``0..=255`` Byte/Token Table.
///
/// Raw bytes always occupy the first 256 ids, in byte order;
/// so every byte sequence has a trivial encoding.
#[derive(Clone, PartialEq)]
pub struct ByteMapVocab<T: TokenType> {
    /// Table mapping from byte ordinal (position) to token.
    byte_tokens: [T; BYTE_TOKEN_COUNT],
}

impl<T: TokenType> Debug for ByteMapVocab<T> {
    fn fmt(
        &self,
        f: &mut core::fmt::Formatter<'_>,
    ) -> core::fmt::Result {
        f.debug_struct("ByteMapVocab")
            .field("max_token", &self.max_token())
            .finish()
    }
}

impl<T: TokenType> ByteMapVocab<T> {
    /// Build the byte table.
    ///
    /// ## Returns
    /// The table, or [`crate::WordforgeError::VocabSizeOverflow`]
    /// if `T` cannot hold the byte ids.
    pub fn try_new() -> WFResult<Self> {
        let mut byte_tokens = [T::zero(); BYTE_TOKEN_COUNT];
        for (idx, slot) in byte_tokens.iter_mut().enumerate() {
            *slot = token_from_usize(idx)?;
        }
        Ok(Self { byte_tokens })
    }

    /// Get the ``[T; 256]`` byte-ord => token table.
    pub fn byte_tokens(&self) -> &[T; BYTE_TOKEN_COUNT] {
        &self.byte_tokens
    }

    /// The largest byte token.
    pub fn max_token(&self) -> T {
        self.byte_tokens[BYTE_TOKEN_COUNT - 1]
    }

    /// Get the token corresponding to a given byte.
    #[inline(always)]
    pub fn get_token(
        &self,
        byte: u8,
    ) -> T {
        self.byte_tokens[byte as usize]
    }

    /// Append the translated byte tokens to a target buffer.
    ///
    /// ## Arguments
    /// * `bytes` - The slice of bytes to translate and append.
    /// * `tokens` - The target token buffer.
    #[inline(always)]
    pub fn append_tokens(
        &self,
        bytes: &[u8],
        tokens: &mut Vec<T>,
    ) {
        tokens.extend(bytes.iter().map(|&b| self.get_token(b)));
    }

    /// Get the byte corresponding to a given token, if any.
    #[inline(always)]
    pub fn get_byte(
        &self,
        token: T,
    ) -> Option<u8> {
        token.to_u8()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_byte_vocab() {
        type T = u32;
        let table: ByteMapVocab<T> = ByteMapVocab::try_new().unwrap();

        assert_eq!(table.max_token(), 255);
        assert_eq!(format!("{table:?}"), "ByteMapVocab { max_token: 255 }");

        for idx in 0..BYTE_TOKEN_COUNT {
            let byte = idx as u8;
            let token = idx as T;

            assert_eq!(table.get_token(byte), token);
            assert_eq!(table.byte_tokens()[idx], token);
            assert_eq!(table.get_byte(token), Some(byte));
        }
        assert_eq!(table.get_byte(256), None);

        let mut tokens = vec![7];
        table.append_tokens(b"hi", &mut tokens);
        assert_eq!(tokens, vec![7, 104, 105]);
    }

    #[test]
    fn test_byte_vocab_overflow() {
        // u8 holds every byte id.
        assert!(ByteMapVocab::<u8>::try_new().is_ok());
    }
}
