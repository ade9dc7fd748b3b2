//! # Token Decoders
//!
//! * [`TokenDecoder`] / [`BytePairDecoder`] - byte-level ids back to text;
//!   malformed UTF-8 is replaced, not fatal.
//! * [`PieceDecoder`] - string pieces back to text.
//!
//! Both reject tokens absent from the vocabulary.
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use wordforge::{
//!     decoders::{BytePairDecoder, TokenDecoder},
//!     vocab::BytePairVocab,
//! };
//!
//! fn example(
//!     vocab: Arc<BytePairVocab<u32>>,
//!     batch: &[&[u32]],
//! ) -> Vec<String> {
//!     let decoder = BytePairDecoder::new(vocab);
//!     decoder.try_decode_batch_to_strings(batch).unwrap()
//! }
//! ```

mod byte_pair_decoder;
mod piece_decoder;
mod token_decoder;

#[doc(inline)]
pub use byte_pair_decoder::BytePairDecoder;
#[doc(inline)]
pub use piece_decoder::PieceDecoder;
#[doc(inline)]
pub use token_decoder::TokenDecoder;
