//! # Pre-Tokenization
//!
//! Text preparation shared by the trainers and segmenters:
//! * [`Normalizer`] - lowercasing and punctuation handling for word-level variants.
//! * [`ChunkPattern`] / [`Chunker`] - regex pre-segmentation for byte-level variants.

mod chunk_pattern;
mod normalizer;

#[doc(inline)]
pub use chunk_pattern::{ChunkPattern, ChunkRegex, Chunker};
#[doc(inline)]
pub use normalizer::{ISOLATED_PUNCTUATION, Normalizer};
