//! # `wordforge` Subword Vocabulary Suite
//!
//! Train subword vocabularies from a corpus, and segment text with them.
//!
//! Families (see [`TokenizerKind`]):
//! * ``naive`` - byte-level pair merging; encoding replays merges in rule order.
//! * ``dynamic`` - byte-level pair merging; encoding finds a minimum-length segmentation.
//! * ``char`` - character-level pair merging within words.
//! * ``wordpiece`` - word-boundary pair merging with a minimum merge frequency.
//! * ``unigram`` - pruning of an over-complete substring set.
//!
//! See:
//! * [`training`] to train vocabularies.
//! * [`encoders`] to encode text into byte-level tokens.
//! * [`segmenters`] to segment text into string pieces.
//! * [`decoders`] to decode tokens into text.
//! * [`vocab`] to manage vocabularies and model files.
//! * [`tokenizer`] for the combined capability set.
//!
//! ## Training A Tokenizer
//!
//! ```rust,no_run
//! use wordforge::{Tokenizer, TokenizerKind, TrainConfig, vocab::io::save_model_path};
//!
//! fn example(corpus: &[String]) -> wordforge::WFResult<()> {
//!     let config = TrainConfig::new(TokenizerKind::WordPiece, 2000).with_min_frequency(3);
//!     let tokenizer = Tokenizer::train(&config, corpus)?.tokenizer;
//!
//!     let tokens = tokenizer.tokenize("Hello, world!");
//!     println!("{tokens}: {}", tokenizer.decode(&tokens)?);
//!
//!     save_model_path(&tokenizer, "wordpiece.json")
//! }
//! ```
//!
//! ## Crate Features
#![doc = document_features::document_features!()]
#![warn(missing_docs, unused)]

pub mod compat;
pub mod decoders;
pub mod encoders;
pub mod errors;
pub mod pretokenize;
pub mod segmenters;
pub mod tokenizer;
pub mod training;
pub mod types;
pub mod vocab;

#[doc(inline)]
pub use errors::{WFResult, WordforgeError};
#[doc(inline)]
pub use tokenizer::{TokenStats, Tokenizer, TokenizerKind, Tokens, TrainConfig, TrainOutcome};
#[doc(inline)]
pub use types::TokenType;
