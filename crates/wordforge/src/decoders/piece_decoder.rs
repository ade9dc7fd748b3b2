//! # String Piece Decoder

use std::sync::Arc;

use crate::{
    errors::{WFResult, WordforgeError},
    vocab::StringVocab,
};

/// Decodes string pieces back to text.
///
/// Pieces are concatenated; the word-start marker, if set, becomes a space.
#[derive(Debug, Clone)]
pub struct PieceDecoder {
    vocab: Arc<StringVocab>,
    marker: Option<char>,
    allow_single_chars: bool,
}

impl PieceDecoder {
    /// Creates a new decoder without a marker.
    ///
    /// ## Arguments
    /// * `vocab` - The vocabulary pieces must belong to.
    pub fn new(vocab: Arc<StringVocab>) -> Self {
        Self {
            vocab,
            marker: None,
            allow_single_chars: false,
        }
    }

    /// Sets the word-start marker.
    pub fn with_marker(
        self,
        marker: Option<char>,
    ) -> Self {
        Self { marker, ..self }
    }

    /// Accept single-char pieces missing from the vocabulary.
    ///
    /// Segmenters which fall back to single chars emit these.
    pub fn with_single_chars(
        self,
        allow_single_chars: bool,
    ) -> Self {
        Self {
            allow_single_chars,
            ..self
        }
    }

    fn is_known(
        &self,
        piece: &str,
    ) -> bool {
        if self.vocab.contains(piece) {
            return true;
        }
        let mut chars = piece.chars();
        self.allow_single_chars && chars.next().is_some() && chars.next().is_none()
    }

    /// Decodes pieces into a string.
    ///
    /// ## Arguments
    /// * `pieces` - The pieces to decode.
    ///
    /// ## Returns
    /// The decoded text; or [`WordforgeError::UnknownToken`] for the
    /// first piece not in the vocabulary.
    pub fn try_decode<S: AsRef<str>>(
        &self,
        pieces: &[S],
    ) -> WFResult<String> {
        let mut text = String::with_capacity(pieces.iter().map(|p| p.as_ref().len()).sum());
        for piece in pieces {
            let piece = piece.as_ref();
            if !self.is_known(piece) {
                return Err(WordforgeError::UnknownToken {
                    token: piece.to_string(),
                });
            }
            text.push_str(piece);
        }

        Ok(match self.marker {
            Some(marker) => text.replace(marker, " "),
            None => text,
        })
    }
}
