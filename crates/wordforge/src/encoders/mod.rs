//! # Token Encoders
//!
//! Byte-level encoders over a trained [`BytePairVocab`](crate::vocab::BytePairVocab):
//!
//! * [`MergeScanEncoder`] - replays merges in rule order.
//! * [`ShortestPathEncoder`] - minimum token count segmentation.
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use wordforge::{
//!     encoders::{ShortestPathEncoder, TokenEncoder},
//!     pretokenize::Chunker,
//!     vocab::BytePairVocab,
//! };
//!
//! fn example(
//!     vocab: Arc<BytePairVocab<u32>>,
//!     batch: &[&str],
//! ) -> Vec<Vec<u32>> {
//!     let encoder = ShortestPathEncoder::new(vocab, Chunker::whole());
//!     encoder.encode_batch(batch)
//! }
//! ```

mod merge_scan_encoder;
mod shortest_path_encoder;
#[cfg(test)]
pub mod testing;
mod token_encoder;

#[doc(inline)]
pub use merge_scan_encoder::MergeScanEncoder;
#[doc(inline)]
pub use shortest_path_encoder::ShortestPathEncoder;
#[doc(inline)]
pub use token_encoder::TokenEncoder;
