//! # Tokenizer Families
//!
//! [`Tokenizer`] is the single capability set over every family:
//! train, tokenize (single, per word, batch) and decode.
//!
//! ## Example
//!
//! ```rust,no_run
//! use wordforge::{Tokenizer, TokenizerKind, TrainConfig};
//!
//! fn example(corpus: &[&str]) -> wordforge::WFResult<String> {
//!     let config = TrainConfig::new(TokenizerKind::Dynamic, 512).with_pattern(Some(r"\w+|\W+"));
//!     let outcome = Tokenizer::train(&config, corpus)?;
//!     println!("trained in {:?}", outcome.elapsed);
//!
//!     let tokens = outcome.tokenizer.tokenize("hello world");
//!     outcome.tokenizer.decode(&tokens)
//! }
//! ```

mod tokenizer_impl;
mod tokenizer_options;

#[doc(inline)]
pub use tokenizer_impl::{
    BytePairTokenizer,
    PieceTokenizer,
    TokenId,
    TokenStats,
    Tokenizer,
    Tokens,
    TrainOutcome,
};
#[doc(inline)]
pub use tokenizer_options::{DEFAULT_MIN_FREQUENCY, TokenizerKind, TrainConfig};
