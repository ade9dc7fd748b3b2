//! # Word-Boundary Pair Trainer
//!
//! Pair merging over characters within word boundaries.
//!
//! Used by both the character-level variant and WordPiece; WordPiece
//! adds a word-start marker, the reserved control tokens, and a minimum
//! merge frequency.

use compact_str::CompactString;

use crate::{
    errors::WFResult,
    pretokenize::Normalizer,
    training::{
        CountType,
        StringChunkType,
        stop_signal::{StopSignal, should_stop},
        utility::{PairStatistics, TokenSpanBuf, WordCounter},
    },
    types::WFHashMap,
    vocab::{
        RESERVED_TOKENS,
        StringMergeRules,
        StringVocab,
        UNK_TOKEN,
        WORD_START_MARKER,
        vocab_types::token_from_usize,
    },
};

/// The interned symbol id type used while training.
type SymbolId = u32;

/// Options for [`WordPairTrainer`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordPairTrainerOptions {
    /// The target vocab size, counting reserved tokens and base chars.
    pub vocab_size: usize,

    /// Merging stops when the best pair occurs fewer times than this.
    pub min_frequency: u64,

    /// The word-start marker prepended to every word, if any.
    pub marker: Option<char>,

    /// Reserved control tokens; these lead the vocabulary.
    pub reserved: Vec<String>,

    /// Text normalization applied before splitting into words.
    pub normalizer: Normalizer,
}

impl WordPairTrainerOptions {
    /// WordPiece options.
    ///
    /// Lowercases and isolates punctuation; prepends [`WORD_START_MARKER`];
    /// reserves ``[UNK] [CLS] [SEP] [PAD] [MASK]``.
    ///
    /// ## Arguments
    /// * `vocab_size` - The target vocabulary size.
    /// * `min_frequency` - The minimum merge frequency.
    pub fn word_piece(
        vocab_size: usize,
        min_frequency: u64,
    ) -> Self {
        Self {
            vocab_size,
            min_frequency,
            marker: Some(WORD_START_MARKER),
            reserved: RESERVED_TOKENS.iter().map(|s| s.to_string()).collect(),
            normalizer: Normalizer::word_piece(),
        }
    }

    /// Character-level options.
    ///
    /// No normalization, no marker; reserves only ``[UNK]``; any pair
    /// occurring at least once may merge.
    ///
    /// ## Arguments
    /// * `vocab_size` - The target vocabulary size.
    pub fn char_level(vocab_size: usize) -> Self {
        Self {
            vocab_size,
            min_frequency: 1,
            marker: None,
            reserved: vec![UNK_TOKEN.to_string()],
            normalizer: Normalizer::identity(),
        }
    }

    /// Sets the vocab size.
    pub fn with_vocab_size(
        self,
        vocab_size: usize,
    ) -> Self {
        Self { vocab_size, ..self }
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

    /// Sets the word-start marker.
    pub fn with_marker(
        self,
        marker: Option<char>,
    ) -> Self {
        Self { marker, ..self }
    }

    /// Sets the normalizer.
    pub fn with_normalizer(
        self,
        normalizer: Normalizer,
    ) -> Self {
        Self { normalizer, ..self }
    }

    /// Initializes a [`WordPairTrainer`] from these options.
    pub fn init<K, C>(self) -> WordPairTrainer<K, C>
    where
        K: StringChunkType,
        C: CountType,
    {
        WordPairTrainer::new(self)
    }
}

/// Word-boundary pair train results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordPairVocab {
    /// Reserved tokens, marker, base chars, then merged tokens.
    pub vocab: StringVocab,

    /// The merge rules, in merge order.
    pub merges: StringMergeRules,
}

/// Interned symbol table; ids are dense in first-appearance order.
#[derive(Default)]
struct SymbolTable {
    symbols: Vec<String>,
    ids: WFHashMap<String, SymbolId>,
}

impl SymbolTable {
    fn intern(
        &mut self,
        symbol: &str,
    ) -> WFResult<SymbolId> {
        if let Some(&id) = self.ids.get(symbol) {
            return Ok(id);
        }
        let id: SymbolId = token_from_usize(self.symbols.len())?;
        self.symbols.push(symbol.to_string());
        self.ids.insert(symbol.to_string(), id);
        Ok(id)
    }

    fn get(
        &self,
        id: SymbolId,
    ) -> &str {
        &self.symbols[id as usize]
    }
}

/// Trainer for word-boundary pair merges.
///
/// # Parameters
/// * `K` - the type used to store words in the word counts.
/// * `C` - the type used to store counts.
pub struct WordPairTrainer<K = CompactString, C = u64>
where
    K: StringChunkType,
    C: CountType,
{
    /// Trainer options.
    pub options: WordPairTrainerOptions,

    word_counts: WordCounter<K, C>,
    stop: Option<StopSignal>,
}

impl<K, C> WordPairTrainer<K, C>
where
    K: StringChunkType,
    C: CountType,
{
    /// Initializes a [`WordPairTrainer`].
    pub fn new(options: WordPairTrainerOptions) -> Self {
        Self {
            options,
            word_counts: WordCounter::new(),
            stop: None,
        }
    }

    /// Attach a [`StopSignal`], checked between merges.
    pub fn with_stop_signal(
        self,
        stop: StopSignal,
    ) -> Self {
        Self {
            stop: Some(stop),
            ..self
        }
    }

    /// Update word counts inplace from a sample (line) iterator.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self, samples)))]
    pub fn update_from_samples<I>(
        &mut self,
        samples: I,
    ) where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        for sample in samples {
            let words = self.options.normalizer.words(sample.as_ref());
            self.word_counts.observe_all(words);
        }
    }

    /// Trains a [`WordPairVocab`].
    ///
    /// Merges until the vocabulary reaches `vocab_size`, no pair remains,
    /// the best pair falls below `min_frequency`, or the stop signal is raised.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self)))]
    pub fn train(self) -> WFResult<WordPairVocab> {
        let options = &self.options;

        let mut vocab: StringVocab = options.reserved.iter().map(String::as_str).collect();
        let mut symbols = SymbolTable::default();
        let mut buf = [0u8; 4];
        if let Some(marker) = options.marker {
            vocab.insert(&*marker.encode_utf8(&mut buf));
        }

        let mut words: Vec<TokenSpanBuf<SymbolId>> = Vec::with_capacity(self.word_counts.len());
        let mut word_counts: Vec<C> = Vec::with_capacity(self.word_counts.len());
        for (word, count) in self.word_counts.iter() {
            let mut ids = Vec::with_capacity(word.len() + 1);
            for c in options.marker.into_iter().chain(word.chars()) {
                let symbol: &str = c.encode_utf8(&mut buf);
                ids.push(symbols.intern(symbol)?);
                vocab.insert(symbol);
            }
            words.push(TokenSpanBuf::from_tokens(ids));
            word_counts.push(count);
        }

        let initial_size = vocab.len();
        let target_merges = options.vocab_size.saturating_sub(initial_size);
        log::info!(
            "Starting word-pair training: {} base tokens; up to {} merges",
            initial_size,
            target_merges
        );

        let mut stats: PairStatistics<SymbolId, C> = PairStatistics::new(words, word_counts);
        let mut merges = StringMergeRules::default();
        let mut last_log_percent = 0;

        while vocab.len() < options.vocab_size {
            if should_stop(&self.stop) {
                log::warn!("Training interrupted after {} merges", merges.len());
                break;
            }

            let Some(job) = stats.pop_best() else {
                log::warn!("No pairs left to merge; vocab size {}", vocab.len());
                break;
            };

            if job.count.to_u64().unwrap_or(u64::MAX) < options.min_frequency {
                log::info!(
                    "Best pair frequency {} is below the minimum {}; stopping",
                    job.count,
                    options.min_frequency
                );
                break;
            }

            let (left, right) = (job.pair.0, job.pair.1);
            let merged = format!("{}{}", symbols.get(left), symbols.get(right));
            let merged_id = symbols.intern(&merged)?;

            stats.merge_pair(job.pair, merged_id);
            merges.push(symbols.get(left), symbols.get(right), &merged);
            vocab.insert(merged.as_str());

            if target_merges > 0 {
                let current_percent = ((vocab.len() - initial_size) * 100) / target_merges;
                if current_percent > last_log_percent {
                    log::info!(
                        "Progress: {}% (vocab {}/{}) - Last merge: {:?} (frequency: {})",
                        current_percent,
                        vocab.len(),
                        options.vocab_size,
                        merged,
                        job.count
                    );
                    last_log_percent = current_percent;
                }
            }
        }

        log::info!(
            "Finished training: {} merges; vocab size {}",
            merges.len(),
            vocab.len()
        );
        Ok(WordPairVocab { vocab, merges })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn train(
        options: WordPairTrainerOptions,
        samples: &[&str],
    ) -> WordPairVocab {
        let mut trainer = options.init::<CompactString, u64>();
        trainer.update_from_samples(samples);
        trainer.train().unwrap()
    }

    #[test]
    fn test_initial_vocab() {
        let result = train(WordPairTrainerOptions::word_piece(0, 2), &["Ba, ab"]);
        assert!(result.merges.is_empty());
        assert_eq!(
            result.vocab.tokens(),
            &["[UNK]", "[CLS]", "[SEP]", "[PAD]", "[MASK]", "▁", "b", "a", ","]
        );
    }

    #[test]
    fn test_word_piece_merges() {
        let result = train(
            WordPairTrainerOptions::word_piece(100, 2),
            &["low lower lowest", "low"],
        );
        let rules: Vec<&str> = result
            .merges
            .rules()
            .iter()
            .map(|r| r.merged.as_str())
            .collect();
        // (▁, l) (▁l, o) (▁lo, w) each occur 4 times; then (▁low, e) twice.
        assert_eq!(rules, vec!["▁l", "▁lo", "▁low", "▁lowe"]);
        assert!(result.vocab.contains("▁lowe"));
    }

    #[test]
    fn test_min_frequency_boundary() {
        // "xy" occurs twice.
        let samples = ["xy", "xy"];

        let below = train(WordPairTrainerOptions::word_piece(100, 3), &samples);
        assert!(below.merges.is_empty());

        let at = train(WordPairTrainerOptions::word_piece(100, 2), &samples);
        assert!(at.vocab.contains("▁xy"));
    }

    #[test]
    fn test_vocab_size_bound() {
        let samples = ["abcdefgh abcdefgh"];
        let initial = train(WordPairTrainerOptions::char_level(0), &samples).vocab.len();
        let result = train(WordPairTrainerOptions::char_level(initial + 3), &samples);
        assert_eq!(result.vocab.len(), initial + 3);
        assert_eq!(result.merges.len(), 3);
    }

    #[test]
    fn test_char_level() {
        let result = train(WordPairTrainerOptions::char_level(100), &["aa aa", "Ab"]);
        assert_eq!(&result.vocab.tokens()[..4], &["[UNK]", "a", "A", "b"]);
        assert_eq!(result.merges.rules()[0].merged, "aa");
        assert!(!result.vocab.contains("▁"));
    }

    #[test]
    fn test_vocab_has_no_duplicates() {
        let result = train(
            WordPairTrainerOptions::char_level(200),
            &["abc bca cab abcabc", "bcbc caca abab"],
        );
        let unique: std::collections::BTreeSet<&str> = result.vocab.iter().collect();
        assert_eq!(unique.len(), result.vocab.len());
        assert!(result.merges.len() >= result.vocab.len() - 4);
    }

    #[test]
    fn test_empty_corpus() {
        let result = train(WordPairTrainerOptions::word_piece(100, 2), &[]);
        assert_eq!(&result.vocab.tokens()[..5], &RESERVED_TOKENS);
        assert_eq!(result.vocab.tokens()[5], "▁");
        assert_eq!(result.vocab.len(), 6);
        assert!(result.merges.is_empty());
    }

    #[test]
    fn test_deterministic() {
        let samples = ["the cat sat on the mat", "the hat, the bat!"];
        let first = train(WordPairTrainerOptions::word_piece(60, 1), &samples);
        let second = train(WordPairTrainerOptions::word_piece(60, 1), &samples);
        assert_eq!(first, second);
    }
}
