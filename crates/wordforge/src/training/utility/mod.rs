//! # Trainer Implementation Utilities

mod pair_statistics;
#[doc(inline)]
pub use pair_statistics::{MergeJob, Occurrence, PairCountMap, PairIndexMap, PairStatistics};

mod token_span_buffer;
#[doc(inline)]
pub use token_span_buffer::TokenSpanBuf;

mod word_counter;
#[doc(inline)]
pub use word_counter::WordCounter;
