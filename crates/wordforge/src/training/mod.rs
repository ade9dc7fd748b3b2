//! # Vocabulary Training
//!
//! Support for training subword vocabularies.
//!
//! Three builders are provided:
//! * [`BytePairTrainer`] - byte-level pair merging, from the 256 byte tokens.
//! * [`WordPairTrainer`] - char-level pair merging within word boundaries;
//!   used by the character-level variant and WordPiece.
//! * [`UnigramTrainer`] - pruning of an over-complete substring set.
//!
//! The merge-based builders share [`utility::PairStatistics`].
//!
//! Training is sequential; each step depends on the statistics left by
//! the previous one. Independent trainers share no state, and a
//! [`StopSignal`] can interrupt a run between steps.
//!
//! ## Training Example
//!
//! ```rust,no_run
//! use wordforge::{
//!     encoders::{MergeScanEncoder, TokenEncoder},
//!     training::BytePairTrainerOptions,
//!     vocab::BytePairVocab,
//! };
//!
//! fn example(samples: &[&str]) -> wordforge::WFResult<Vec<u32>> {
//!     let mut trainer = BytePairTrainerOptions::new(1000)
//!         .with_pattern(Some(r"\w+|\s+|[^\w\s]+"))
//!         .init::<compact_str::CompactString, u64>()?;
//!
//!     trainer.update_from_samples(samples);
//!     let chunker = trainer.chunker().clone();
//!
//!     let vocab: BytePairVocab<u32> = trainer.train()?;
//!     let encoder = MergeScanEncoder::new(vocab.into(), chunker);
//!
//!     Ok(encoder.encode("hello world"))
//! }
//! ```

pub mod utility;

mod byte_pair_trainer;
mod stop_signal;
mod training_types;
mod unigram_trainer;
mod word_pair_trainer;

#[doc(inline)]
pub use byte_pair_trainer::{BytePairTrainer, BytePairTrainerOptions};
#[doc(inline)]
pub use stop_signal::StopSignal;
#[doc(inline)]
pub use training_types::{CountType, StringChunkType};
#[doc(inline)]
pub use unigram_trainer::{UnigramTrainer, UnigramTrainerOptions, substring_loss};
#[doc(inline)]
pub use word_pair_trainer::{WordPairTrainer, WordPairTrainerOptions, WordPairVocab};
