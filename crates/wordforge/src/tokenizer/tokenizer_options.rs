//! # Tokenizer Family Configuration

use crate::training::StopSignal;

/// The default minimum merge frequency for [`TokenizerKind::WordPiece`].
pub const DEFAULT_MIN_FREQUENCY: u64 = 2;

/// The tokenizer families; parsed and printed by lowercase name.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    strum::EnumString,
    strum::Display,
    strum::EnumIter,
    serde::Serialize,
    serde::Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum TokenizerKind {
    /// Byte-pair merges; encoding replays merges in rule order.
    Naive,

    /// Byte-pair merges; encoding finds a minimum-length segmentation.
    Dynamic,

    /// Character-level pair merges within words; no word-start marker.
    Char,

    /// Unigram pruning of the all-substrings seed.
    Unigram,

    /// Word-boundary pair merges with a marker, reserved tokens and a
    /// minimum merge frequency.
    WordPiece,
}

impl TokenizerKind {
    /// Does this family encode to byte-level token ids?
    pub fn is_byte_level(&self) -> bool {
        matches!(self, Self::Naive | Self::Dynamic)
    }
}

/// Family-level training configuration.
#[derive(Debug, Clone)]
pub struct TrainConfig {
    /// The tokenizer family.
    pub kind: TokenizerKind,

    /// The target vocab size.
    pub vocab_size: usize,

    /// Optional chunk-splitting pattern; byte-level families only.
    pub pattern: Option<String>,

    /// The minimum merge frequency; [`TokenizerKind::WordPiece`] only.
    pub min_frequency: u64,

    /// Optional interruption signal.
    pub stop: Option<StopSignal>,
}

impl TrainConfig {
    /// Create a new config.
    ///
    /// ## Arguments
    /// * `kind` - The tokenizer family.
    /// * `vocab_size` - The target vocab size.
    pub fn new(
        kind: TokenizerKind,
        vocab_size: usize,
    ) -> Self {
        Self {
            kind,
            vocab_size,
            pattern: None,
            min_frequency: DEFAULT_MIN_FREQUENCY,
            stop: None,
        }
    }

    /// Sets the chunk-splitting pattern.
    pub fn with_pattern<S: Into<String>>(
        self,
        pattern: Option<S>,
    ) -> Self {
        Self {
            pattern: pattern.map(Into::into),
            ..self
        }
    }

    /// Sets the minimum merge frequency.
    pub fn with_min_frequency(
        self,
        min_frequency: u64,
    ) -> Self {
        Self {
            min_frequency,
            ..self
        }
    }

    /// Attach a [`StopSignal`].
    pub fn with_stop_signal(
        self,
        stop: StopSignal,
    ) -> Self {
        Self {
            stop: Some(stop),
            ..self
        }
    }
}
