//! # Tokenizer Implementation

use core::fmt;
use std::{sync::Arc, time::Duration};

use compact_str::CompactString;

use crate::{
    compat::{strings::string_from_utf8_lossy, timers::timeit},
    decoders::{BytePairDecoder, PieceDecoder, TokenDecoder},
    encoders::{MergeScanEncoder, ShortestPathEncoder, TokenEncoder},
    errors::{WFResult, WordforgeError},
    pretokenize::{Chunker, Normalizer},
    segmenters::{GreedySegmenter, MissPolicy, ScanOrder},
    tokenizer::{TokenizerKind, TrainConfig},
    training::{
        BytePairTrainerOptions,
        UnigramTrainerOptions,
        WordPairTrainerOptions,
        WordPairVocab,
    },
    types::WFHashSet,
    vocab::{BytePairVocab, StringMergeRules, StringVocab, WORD_START_MARKER},
};

/// The token id type of byte-level tokenizers.
pub type TokenId = u32;

/// Tokenizer output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Tokens {
    /// Byte-level token ids.
    Ids(Vec<TokenId>),

    /// String pieces.
    Pieces(Vec<String>),
}

impl Tokens {
    /// The number of tokens.
    pub fn len(&self) -> usize {
        match self {
            Self::Ids(ids) => ids.len(),
            Self::Pieces(pieces) => pieces.len(),
        }
    }

    /// Are there no tokens?
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Display for Tokens {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match self {
            Self::Ids(ids) => write!(f, "{ids:?}"),
            Self::Pieces(pieces) => write!(f, "{pieces:?}"),
        }
    }
}

/// Token counts over a segmented text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize)]
pub struct TokenStats {
    /// Total tokens emitted.
    pub total_tokens: usize,

    /// Distinct tokens emitted.
    pub unique_tokens: usize,
}

impl TokenStats {
    /// Count the tokens of ``(word, pieces)`` segmentations.
    ///
    /// Each distinct word is counted once; repeats of a word add nothing.
    pub fn from_words(words: &[(String, Vec<String>)]) -> Self {
        let mut seen: WFHashSet<&str> = WFHashSet::default();
        let mut unique: WFHashSet<&str> = WFHashSet::default();
        let mut total_tokens = 0;
        for (word, pieces) in words {
            if !seen.insert(word.as_str()) {
                continue;
            }
            total_tokens += pieces.len();
            unique.extend(pieces.iter().map(String::as_str));
        }
        Self {
            total_tokens,
            unique_tokens: unique.len(),
        }
    }
}

/// A byte-level tokenizer: vocabulary, encoder and decoder.
#[derive(Debug, Clone)]
pub struct BytePairTokenizer<E: TokenEncoder<TokenId>> {
    vocab: Arc<BytePairVocab<TokenId>>,
    encoder: E,
    decoder: BytePairDecoder<TokenId>,
}

impl<E: TokenEncoder<TokenId>> BytePairTokenizer<E> {
    fn new(
        vocab: Arc<BytePairVocab<TokenId>>,
        encoder: E,
    ) -> Self {
        let decoder = BytePairDecoder::new(vocab.clone());
        Self {
            vocab,
            encoder,
            decoder,
        }
    }

    /// The vocabulary.
    pub fn vocab(&self) -> &Arc<BytePairVocab<TokenId>> {
        &self.vocab
    }

    /// The encoder.
    pub fn encoder(&self) -> &E {
        &self.encoder
    }

    /// The decoder.
    pub fn decoder(&self) -> &BytePairDecoder<TokenId> {
        &self.decoder
    }

    fn tokenize_words(
        &self,
        text: &str,
    ) -> Vec<(String, Vec<String>)> {
        self.encoder
            .chunker()
            .chunks(text)
            .into_iter()
            .map(|chunk| {
                let mut ids = Vec::new();
                self.encoder.encode_append_chunk(chunk.as_bytes(), &mut ids);
                let pieces = ids
                    .into_iter()
                    .filter_map(|id| self.vocab.token_span(id))
                    .map(|span| string_from_utf8_lossy(span.to_vec()))
                    .collect();
                (chunk.to_string(), pieces)
            })
            .collect()
    }
}

/// A string-level tokenizer: segmenter, decoder and the training merges.
#[derive(Debug, Clone)]
pub struct PieceTokenizer {
    segmenter: GreedySegmenter,
    decoder: PieceDecoder,
    merges: StringMergeRules,
}

impl PieceTokenizer {
    fn new(
        kind: TokenizerKind,
        vocab: StringVocab,
        merges: StringMergeRules,
    ) -> Self {
        let vocab = Arc::new(vocab);
        let segmenter = GreedySegmenter::new(vocab.clone());
        let decoder = PieceDecoder::new(vocab);

        let (segmenter, decoder) = match kind {
            TokenizerKind::WordPiece => (
                segmenter
                    .with_miss_policy(MissPolicy::AbandonWord)
                    .with_normalizer(Normalizer::word_piece())
                    .with_marker(Some(WORD_START_MARKER)),
                decoder.with_marker(Some(WORD_START_MARKER)),
            ),
            TokenizerKind::Unigram => (
                segmenter
                    .with_scan_order(ScanOrder::ShortestFirst)
                    .with_miss_policy(MissPolicy::SingleChar),
                decoder.with_single_chars(true),
            ),
            _ => (segmenter.with_miss_policy(MissPolicy::UnknownToken), decoder),
        };

        Self {
            segmenter,
            decoder,
            merges,
        }
    }

    /// The vocabulary.
    pub fn vocab(&self) -> &Arc<StringVocab> {
        self.segmenter.vocab()
    }

    /// The merges recorded in training; empty for unigram.
    pub fn merges(&self) -> &StringMergeRules {
        &self.merges
    }

    /// The segmenter.
    pub fn segmenter(&self) -> &GreedySegmenter {
        &self.segmenter
    }

    /// The decoder.
    pub fn decoder(&self) -> &PieceDecoder {
        &self.decoder
    }
}

/// A trained tokenizer; immutable and shareable across threads.
#[derive(Debug, Clone)]
pub enum Tokenizer {
    /// See [`TokenizerKind::Naive`].
    Naive(BytePairTokenizer<MergeScanEncoder<TokenId>>),

    /// See [`TokenizerKind::Dynamic`].
    Dynamic(BytePairTokenizer<ShortestPathEncoder<TokenId>>),

    /// See [`TokenizerKind::Char`].
    Char(PieceTokenizer),

    /// See [`TokenizerKind::Unigram`].
    Unigram(PieceTokenizer),

    /// See [`TokenizerKind::WordPiece`].
    WordPiece(PieceTokenizer),
}

/// A trained tokenizer and the time training took.
#[derive(Debug, Clone)]
pub struct TrainOutcome {
    /// The trained tokenizer.
    pub tokenizer: Tokenizer,

    /// Wall time of the training run.
    pub elapsed: Duration,
}

impl Tokenizer {
    /// Build a byte-level tokenizer.
    ///
    /// ## Arguments
    /// * `kind` - [`TokenizerKind::Naive`] or [`TokenizerKind::Dynamic`].
    /// * `vocab` - The trained vocabulary.
    /// * `chunker` - The chunker used in training.
    pub fn from_byte_pair(
        kind: TokenizerKind,
        vocab: BytePairVocab<TokenId>,
        chunker: Chunker,
    ) -> WFResult<Self> {
        let vocab = Arc::new(vocab);
        match kind {
            TokenizerKind::Naive => Ok(Self::Naive(BytePairTokenizer::new(
                vocab.clone(),
                MergeScanEncoder::new(vocab, chunker),
            ))),
            TokenizerKind::Dynamic => Ok(Self::Dynamic(BytePairTokenizer::new(
                vocab.clone(),
                ShortestPathEncoder::new(vocab, chunker),
            ))),
            _ => Err(WordforgeError::UnsupportedFormat(format!(
                "{kind} is not a byte-level tokenizer"
            ))),
        }
    }

    /// Build a string-level tokenizer.
    ///
    /// ## Arguments
    /// * `kind` - [`TokenizerKind::Char`], [`TokenizerKind::WordPiece`] or
    ///   [`TokenizerKind::Unigram`].
    /// * `vocab` - The trained vocabulary.
    /// * `merges` - The merges recorded in training.
    pub fn from_pieces(
        kind: TokenizerKind,
        vocab: StringVocab,
        merges: StringMergeRules,
    ) -> WFResult<Self> {
        let model = PieceTokenizer::new(kind, vocab, merges);
        match kind {
            TokenizerKind::Char => Ok(Self::Char(model)),
            TokenizerKind::Unigram => Ok(Self::Unigram(model)),
            TokenizerKind::WordPiece => Ok(Self::WordPiece(model)),
            _ => Err(WordforgeError::UnsupportedFormat(format!(
                "{kind} is not a string-level tokenizer"
            ))),
        }
    }

    /// Train a tokenizer.
    ///
    /// ## Arguments
    /// * `config` - The family and its training parameters.
    /// * `corpus` - The training samples.
    ///
    /// ## Returns
    /// The tokenizer and the training time.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(config, corpus)))]
    pub fn train<S: AsRef<str>>(
        config: &TrainConfig,
        corpus: &[S],
    ) -> WFResult<TrainOutcome> {
        log::info!(
            "Training {} tokenizer: target vocab size {}",
            config.kind,
            config.vocab_size
        );
        let (elapsed, tokenizer) = timeit(|| Self::train_model(config, corpus));
        let tokenizer = tokenizer?;
        log::info!(
            "Trained {} tokenizer in {:.3}s: vocab size {}",
            config.kind,
            elapsed.as_secs_f64(),
            tokenizer.vocab_len()
        );
        Ok(TrainOutcome { tokenizer, elapsed })
    }

    fn train_model<S: AsRef<str>>(
        config: &TrainConfig,
        corpus: &[S],
    ) -> WFResult<Self> {
        match config.kind {
            TokenizerKind::Naive | TokenizerKind::Dynamic => {
                let mut trainer = BytePairTrainerOptions::new(config.vocab_size)
                    .with_pattern(config.pattern.as_deref())
                    .init::<CompactString, u64>()?;
                if let Some(stop) = &config.stop {
                    trainer = trainer.with_stop_signal(stop.clone());
                }
                trainer.update_from_samples(corpus);
                let chunker = trainer.chunker().clone();
                Self::from_byte_pair(config.kind, trainer.train()?, chunker)
            }
            TokenizerKind::Char | TokenizerKind::WordPiece => {
                let options = match config.kind {
                    TokenizerKind::WordPiece => {
                        WordPairTrainerOptions::word_piece(config.vocab_size, config.min_frequency)
                    }
                    _ => WordPairTrainerOptions::char_level(config.vocab_size),
                };
                let mut trainer = options.init::<CompactString, u64>();
                if let Some(stop) = &config.stop {
                    trainer = trainer.with_stop_signal(stop.clone());
                }
                trainer.update_from_samples(corpus);
                let WordPairVocab { vocab, merges } = trainer.train()?;
                Self::from_pieces(config.kind, vocab, merges)
            }
            TokenizerKind::Unigram => {
                let mut trainer =
                    UnigramTrainerOptions::new(config.vocab_size).init::<CompactString, u64>();
                if let Some(stop) = &config.stop {
                    trainer = trainer.with_stop_signal(stop.clone());
                }
                trainer.update_from_samples(corpus);
                Self::from_pieces(config.kind, trainer.train()?, StringMergeRules::default())
            }
        }
    }

    /// The tokenizer family.
    pub fn kind(&self) -> TokenizerKind {
        match self {
            Self::Naive(_) => TokenizerKind::Naive,
            Self::Dynamic(_) => TokenizerKind::Dynamic,
            Self::Char(_) => TokenizerKind::Char,
            Self::Unigram(_) => TokenizerKind::Unigram,
            Self::WordPiece(_) => TokenizerKind::WordPiece,
        }
    }

    /// The chunk pattern of a byte-level tokenizer.
    pub fn pattern(&self) -> Option<&str> {
        match self {
            Self::Naive(model) => model.encoder.chunker().pattern(),
            Self::Dynamic(model) => model.encoder.chunker().pattern(),
            _ => None,
        }
    }

    /// The vocabulary of a byte-level tokenizer.
    pub fn byte_pair_vocab(&self) -> Option<&Arc<BytePairVocab<TokenId>>> {
        match self {
            Self::Naive(model) => Some(model.vocab()),
            Self::Dynamic(model) => Some(model.vocab()),
            _ => None,
        }
    }

    /// The string-level model.
    pub fn pieces(&self) -> Option<&PieceTokenizer> {
        match self {
            Self::Char(model) | Self::Unigram(model) | Self::WordPiece(model) => Some(model),
            _ => None,
        }
    }

    /// The number of tokens in the vocabulary.
    pub fn vocab_len(&self) -> usize {
        match self {
            Self::Naive(model) => model.vocab.len(),
            Self::Dynamic(model) => model.vocab.len(),
            Self::Char(model) | Self::Unigram(model) | Self::WordPiece(model) => {
                model.vocab().len()
            }
        }
    }

    /// The vocabulary as strings, in id order.
    ///
    /// Byte-level token spans are decoded lossily.
    pub fn vocab_strings(&self) -> Vec<String> {
        match self.byte_pair_vocab() {
            Some(vocab) => vocab
                .spans()
                .map(|(_, span)| string_from_utf8_lossy(span.to_vec()))
                .collect(),
            None => self
                .pieces()
                .map(|model| model.vocab().tokens().to_vec())
                .unwrap_or_default(),
        }
    }

    /// Tokenize `text`.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self, text)))]
    pub fn tokenize(
        &self,
        text: &str,
    ) -> Tokens {
        match self {
            Self::Naive(model) => Tokens::Ids(model.encoder.encode(text)),
            Self::Dynamic(model) => Tokens::Ids(model.encoder.encode(text)),
            Self::Char(model) | Self::Unigram(model) | Self::WordPiece(model) => {
                Tokens::Pieces(model.segmenter.segment(text))
            }
        }
    }

    /// Tokenize `text`, keeping each word (or chunk) with its pieces.
    ///
    /// Byte-level pieces are the lossy text of each token.
    pub fn tokenize_words(
        &self,
        text: &str,
    ) -> Vec<(String, Vec<String>)> {
        match self {
            Self::Naive(model) => model.tokenize_words(text),
            Self::Dynamic(model) => model.tokenize_words(text),
            Self::Char(model) | Self::Unigram(model) | Self::WordPiece(model) => {
                model.segmenter.segment_words(text)
            }
        }
    }

    /// Tokenize a batch; results are in batch order.
    pub fn tokenize_batch<S: AsRef<str> + Sync>(
        &self,
        batch: &[S],
    ) -> Vec<Tokens> {
        cfg_if::cfg_if! {
            if #[cfg(feature = "rayon")] {
                use rayon::prelude::*;
                batch.par_iter().map(|text| self.tokenize(text.as_ref())).collect()
            } else {
                batch.iter().map(|text| self.tokenize(text.as_ref())).collect()
            }
        }
    }

    /// Token counts of the segmentation of `text`.
    pub fn token_stats(
        &self,
        text: &str,
    ) -> TokenStats {
        TokenStats::from_words(&self.tokenize_words(text))
    }

    /// Decode tokens back to text.
    ///
    /// ## Returns
    /// The text; or an error for tokens outside the vocabulary, or of the
    /// wrong [`Tokens`] variant.
    pub fn decode(
        &self,
        tokens: &Tokens,
    ) -> WFResult<String> {
        match (self, tokens) {
            (Self::Naive(model), Tokens::Ids(ids)) => model.decoder.try_decode_to_string(ids),
            (Self::Dynamic(model), Tokens::Ids(ids)) => model.decoder.try_decode_to_string(ids),
            (
                Self::Char(model) | Self::Unigram(model) | Self::WordPiece(model),
                Tokens::Pieces(pieces),
            ) => model.decoder.try_decode(pieces),
            (_, Tokens::Ids(ids)) => Err(WordforgeError::UnknownTokenId {
                token: ids.first().map_or(0, |&id| id as u64),
            }),
            (_, Tokens::Pieces(pieces)) => Err(WordforgeError::UnknownToken {
                token: pieces.first().cloned().unwrap_or_default(),
            }),
        }
    }
}
