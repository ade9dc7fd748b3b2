//! # Reserved Tokens

/// The word-start marker prepended to each word by word-boundary variants.
pub const WORD_START_MARKER: char = '\u{2581}';

/// Unknown token; emitted when no vocabulary entry matches.
pub const UNK_TOKEN: &str = "[UNK]";

/// Sequence start token.
pub const CLS_TOKEN: &str = "[CLS]";

/// Sequence separator / end token.
pub const SEP_TOKEN: &str = "[SEP]";

/// Padding token.
pub const PAD_TOKEN: &str = "[PAD]";

/// Mask token.
pub const MASK_TOKEN: &str = "[MASK]";

/// The full reserved control token set, in vocabulary order.
pub const RESERVED_TOKENS: [&str; 5] = [UNK_TOKEN, CLS_TOKEN, SEP_TOKEN, PAD_TOKEN, MASK_TOKEN];
