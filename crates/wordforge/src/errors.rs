//! # Error Types

/// Errors from wordforge operations.
#[derive(Debug, thiserror::Error)]
pub enum WordforgeError {
    /// Vocab size exceeds the capacity of the target token type.
    #[error("vocab size ({size}) exceeds token type capacity")]
    VocabSizeOverflow {
        /// The vocab size that exceeded the capacity.
        size: usize,
    },

    /// Byte-level vocab size is below the minimum (256, the u8 space).
    #[error("vocab size ({size}) must be >= 256")]
    VocabSizeTooSmall {
        /// The vocab size that was too small.
        size: usize,
    },

    /// Vocabulary data is inconsistent.
    #[error("{0}")]
    VocabConflict(String),

    /// A token id passed to a decoder is not in the vocabulary.
    #[error("unknown token id: {token}")]
    UnknownTokenId {
        /// The offending token id.
        token: u64,
    },

    /// A token string passed to a decoder is not in the vocabulary.
    #[error("unknown token: {token:?}")]
    UnknownToken {
        /// The offending token string.
        token: String,
    },

    /// A chunk pattern failed to compile.
    #[error("invalid chunk pattern: {0}")]
    Pattern(String),

    /// A persisted model record could not be used.
    #[error("unsupported model format: {0}")]
    UnsupportedFormat(String),

    /// I/O error.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error.
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// Parse error (base64, integer, etc.)
    #[error("parse error: {0}")]
    Parse(String),
}

/// Result type for wordforge operations.
pub type WFResult<T> = core::result::Result<T, WordforgeError>;
