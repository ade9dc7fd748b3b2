//! # Byte-Pair Vocab Trainer

use compact_str::CompactString;

use crate::{
    errors::{WFResult, WordforgeError},
    pretokenize::{ChunkPattern, Chunker},
    training::{
        CountType,
        StringChunkType,
        stop_signal::{StopSignal, should_stop},
        utility::{PairStatistics, TokenSpanBuf, WordCounter},
    },
    types::TokenType,
    vocab::{BYTE_TOKEN_COUNT, ByteMapVocab, BytePairVocab, MergeRule, vocab_types::token_from_usize},
};

/// Options for [`BytePairTrainer`].
#[derive(Debug, Clone, PartialEq)]
pub struct BytePairTrainerOptions {
    /// The optional regex pattern used for chunk splitting;
    /// merges never cross chunk boundaries.
    pub pattern: Option<ChunkPattern>,

    /// The target vocab size; must be >= 256 (the size of the u8 space).
    pub vocab_size: usize,
}

impl BytePairTrainerOptions {
    /// Create new options, without a chunk pattern.
    ///
    /// ## Arguments
    /// * `vocab_size` - The target vocabulary size.
    pub fn new(vocab_size: usize) -> Self {
        Self {
            pattern: None,
            vocab_size,
        }
    }

    /// Sets the vocab size.
    ///
    /// ## Arguments
    /// * `vocab_size` - The desired vocabulary size; must be >= 256.
    pub fn with_vocab_size(
        self,
        vocab_size: usize,
    ) -> Self {
        Self { vocab_size, ..self }
    }

    /// Sets the regex pattern used for chunk splitting.
    ///
    /// ## Arguments
    /// * `pattern` - The chunk pattern; `None` treats each sample as one chunk.
    pub fn with_pattern<P: Into<ChunkPattern>>(
        self,
        pattern: Option<P>,
    ) -> Self {
        Self {
            pattern: pattern.map(Into::into),
            ..self
        }
    }

    /// Initializes a [`BytePairTrainer`] from these options.
    ///
    /// ## Returns
    /// The trainer; or an error, before any samples are read, if
    /// the vocab size is below 256 or the pattern does not compile.
    pub fn init<K, C>(self) -> WFResult<BytePairTrainer<K, C>>
    where
        K: StringChunkType,
        C: CountType,
    {
        BytePairTrainer::new(self)
    }
}

/// Trainer for learning byte-pair merges.
///
/// # Parameters
/// * `K` - the type used to store chunks in the word counts.
/// * `C` - the type used to store counts.
pub struct BytePairTrainer<K = CompactString, C = u64>
where
    K: StringChunkType,
    C: CountType,
{
    /// Trainer options.
    pub options: BytePairTrainerOptions,

    chunker: Chunker,
    chunk_counts: WordCounter<K, C>,
    stop: Option<StopSignal>,
}

impl<K, C> BytePairTrainer<K, C>
where
    K: StringChunkType,
    C: CountType,
{
    /// Initializes a [`BytePairTrainer`].
    ///
    /// ## Arguments
    /// * `options` - The trainer options.
    pub fn new(options: BytePairTrainerOptions) -> WFResult<Self> {
        if options.vocab_size < BYTE_TOKEN_COUNT {
            return Err(WordforgeError::VocabSizeTooSmall {
                size: options.vocab_size,
            });
        }
        let chunker = Chunker::from_pattern(options.pattern.as_ref())?;

        Ok(Self {
            options,
            chunker,
            chunk_counts: WordCounter::new(),
            stop: None,
        })
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

    /// The chunker used to split samples.
    pub fn chunker(&self) -> &Chunker {
        &self.chunker
    }

    /// Update chunk counts inplace from a sample iterator.
    ///
    /// ## Arguments
    /// * `samples` - An iterator over string-like samples.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self, samples)))]
    pub fn update_from_samples<I>(
        &mut self,
        samples: I,
    ) where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        for sample in samples {
            let chunks = self.chunker.chunks(sample.as_ref());
            self.chunk_counts.observe_all(chunks);
        }
    }

    /// Trains a [`BytePairVocab<T>`].
    ///
    /// Runs ``vocab_size - 256`` merge steps; stops early when no pair
    /// remains or the stop signal is raised.
    ///
    /// ## Returns
    /// The vocabulary achieved.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self)))]
    pub fn train<T: TokenType>(self) -> WFResult<BytePairVocab<T>> {
        let byte_vocab: ByteMapVocab<T> = ByteMapVocab::try_new()?;
        token_from_usize::<T>(self.options.vocab_size - 1)?;

        let num_merges = self.options.vocab_size - BYTE_TOKEN_COUNT;
        log::info!("Starting BPE training: {} merges to compute", num_merges);

        let (words, word_counts): (Vec<TokenSpanBuf<T>>, Vec<C>) = self
            .chunk_counts
            .iter()
            .map(|(chunk, count)| (TokenSpanBuf::from_bytes(chunk, &byte_vocab), count))
            .unzip();

        log::info!("Building pair index over {} unique chunks", words.len());
        let mut stats = PairStatistics::new(words, word_counts);

        let mut merges: Vec<MergeRule<T>> = Vec::with_capacity(num_merges);
        let mut last_log_percent = 0;

        while merges.len() < num_merges {
            if should_stop(&self.stop) {
                log::warn!("Training interrupted after {} merges", merges.len());
                break;
            }

            let Some(job) = stats.pop_best() else {
                log::warn!(
                    "No pairs left to merge; stopping at {} of {} merges",
                    merges.len(),
                    num_merges
                );
                break;
            };

            let new_token: T = token_from_usize(BYTE_TOKEN_COUNT + merges.len())?;
            stats.merge_pair(job.pair, new_token);
            merges.push((job.pair, new_token));

            // Log progress every 1%
            let current_percent = (merges.len() * 100) / num_merges;
            if current_percent > last_log_percent {
                log::info!(
                    "Progress: {}% ({}/{} merges) - Last merge: {:?} -> {:?} (frequency: {})",
                    current_percent,
                    merges.len(),
                    num_merges,
                    job.pair,
                    new_token,
                    job.count
                );
                last_log_percent = current_percent;
            }
        }

        log::info!("Finished training: {} merges completed", merges.len());
        BytePairVocab::from_merges(merges)
    }
}
