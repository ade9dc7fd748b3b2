//! # Unigram Pruning Trainer
//!
//! Seeds the vocabulary with every substring of every distinct word,
//! then removes the substring with the lowest loss until the target
//! size is reached.
//!
//! A substring's loss is ``freq * ln(freq / total_words)``, where
//! ``freq`` sums ``occurrences_in_word * word_count`` over all words.
//! Neither term depends on which other substrings remain, so losses are
//! computed once and pruning pops a min-heap.

use core::cmp::{Ordering, Reverse};

use compact_str::CompactString;
use dary_heap::OctonaryHeap;

use crate::{
    compat::strings::char_boundaries,
    errors::WFResult,
    pretokenize::Normalizer,
    training::{
        CountType,
        StringChunkType,
        stop_signal::{StopSignal, should_stop},
        utility::WordCounter,
    },
    types::WFHashMap,
    vocab::StringVocab,
};

/// Options for [`UnigramTrainer`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnigramTrainerOptions {
    /// The target vocab size.
    pub vocab_size: usize,

    /// Text normalization applied before splitting into words.
    pub normalizer: Normalizer,
}

impl UnigramTrainerOptions {
    /// Create new options; words are split on whitespace only.
    pub fn new(vocab_size: usize) -> Self {
        Self {
            vocab_size,
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

    /// Sets the normalizer.
    pub fn with_normalizer(
        self,
        normalizer: Normalizer,
    ) -> Self {
        Self { normalizer, ..self }
    }

    /// Initializes a [`UnigramTrainer`] from these options.
    pub fn init<K, C>(self) -> UnigramTrainer<K, C>
    where
        K: StringChunkType,
        C: CountType,
    {
        UnigramTrainer::new(self)
    }
}

/// A removal candidate; ordered by ``(loss, canonical index)``.
#[derive(Debug, Clone, Copy)]
struct PruneCandidate {
    loss: f64,
    index: usize,
}

impl PartialEq for PruneCandidate {
    fn eq(
        &self,
        other: &Self,
    ) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for PruneCandidate {}

impl PartialOrd for PruneCandidate {
    fn partial_cmp(
        &self,
        other: &Self,
    ) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for PruneCandidate {
    fn cmp(
        &self,
        other: &Self,
    ) -> Ordering {
        self.loss
            .total_cmp(&other.loss)
            .then(self.index.cmp(&other.index))
    }
}

/// The loss contribution of a substring.
///
/// ## Arguments
/// * `freq` - the weighted substring frequency.
/// * `total_words` - the total word count of the corpus.
pub fn substring_loss(
    freq: f64,
    total_words: f64,
) -> f64 {
    freq * (freq / total_words).ln()
}

/// Trainer for unigram vocabulary pruning.
pub struct UnigramTrainer<K = CompactString, C = u64>
where
    K: StringChunkType,
    C: CountType,
{
    /// Trainer options.
    pub options: UnigramTrainerOptions,

    word_counts: WordCounter<K, C>,
    stop: Option<StopSignal>,
}

impl<K, C> UnigramTrainer<K, C>
where
    K: StringChunkType,
    C: CountType,
{
    /// Initializes a [`UnigramTrainer`].
    pub fn new(options: UnigramTrainerOptions) -> Self {
        Self {
            options,
            word_counts: WordCounter::new(),
            stop: None,
        }
    }

    /// Attach a [`StopSignal`], checked between removals.
    pub fn with_stop_signal(
        self,
        stop: StopSignal,
    ) -> Self {
        Self {
            stop: Some(stop),
            ..self
        }
    }

    /// Update word counts inplace from a sample iterator.
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

    /// Trains a pruned [`StringVocab`].
    ///
    /// Retained substrings keep their canonical order: first word, then
    /// start offset, then end offset.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self)))]
    pub fn train(self) -> WFResult<StringVocab> {
        let mut substrings: Vec<&str> = Vec::new();
        let mut freqs: Vec<f64> = Vec::new();
        let mut index: WFHashMap<&str, usize> = WFHashMap::default();

        for (word, count) in self.word_counts.iter() {
            let count = count.to_f64().unwrap_or(f64::MAX);
            let bounds = char_boundaries(word);
            for (i, &start) in bounds.iter().enumerate() {
                for &end in &bounds[i + 1..] {
                    let sub = &word[start..end];
                    let idx = *index.entry(sub).or_insert_with(|| {
                        substrings.push(sub);
                        freqs.push(0.0);
                        substrings.len() - 1
                    });
                    freqs[idx] += count;
                }
            }
        }

        let total_words = self.word_counts.total().to_f64().unwrap_or(f64::MAX);
        let target = self.options.vocab_size;
        let to_remove = substrings.len().saturating_sub(target);

        log::info!(
            "Starting unigram pruning: {} substrings; {} to remove",
            substrings.len(),
            to_remove
        );

        let mut heap: OctonaryHeap<Reverse<PruneCandidate>> = freqs
            .iter()
            .enumerate()
            .map(|(index, &freq)| {
                Reverse(PruneCandidate {
                    loss: substring_loss(freq, total_words),
                    index,
                })
            })
            .collect();

        let mut retained = vec![true; substrings.len()];
        let mut removed = 0;
        let mut last_log_percent = 0;

        while removed < to_remove {
            if should_stop(&self.stop) {
                log::warn!("Training interrupted after {} removals", removed);
                break;
            }
            let Some(Reverse(candidate)) = heap.pop() else {
                break;
            };
            retained[candidate.index] = false;
            removed += 1;

            let current_percent = (removed * 100) / to_remove;
            if current_percent > last_log_percent {
                log::info!(
                    "Progress: {}% ({}/{} removals) - Last removed: {:?} (loss: {:.3})",
                    current_percent,
                    removed,
                    to_remove,
                    substrings[candidate.index],
                    candidate.loss
                );
                last_log_percent = current_percent;
            }
        }

        let vocab: StringVocab = substrings
            .iter()
            .zip(retained.iter())
            .filter(|&(_, &keep)| keep)
            .map(|(&sub, _)| sub)
            .collect();

        log::info!("Finished training: vocab size {}", vocab.len());
        Ok(vocab)
    }
}
