//! # String Segmenters
//!
//! Word-level segmentation for the character, WordPiece and unigram
//! variants; see [`GreedySegmenter`].

mod greedy_segmenter;

#[doc(inline)]
pub use greedy_segmenter::{GreedySegmenter, MissPolicy, ScanOrder};
