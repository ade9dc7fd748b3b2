//! # Pair Statistics
//!
//! Weighted adjacent-pair counts over a table of unique words,
//! kept consistent across repeated merges.

use core::cmp::{Ordering, Reverse};
use std::collections::BTreeSet;

use dary_heap::OctonaryHeap;

use crate::{
    training::{CountType, utility::TokenSpanBuf},
    types::{Pair, TokenType, WFHashMap},
};

/// A map from [`Pair`] to its weighted occurrence count.
pub type PairCountMap<T, C> = WFHashMap<Pair<T>, C>;

/// A map from [`Pair`] to the indices of words which may contain it.
///
/// Entries may be stale (the word no longer contains the pair);
/// they are pruned lazily.
pub type PairIndexMap<T> = WFHashMap<Pair<T>, BTreeSet<usize>>;

/// A position in the canonical corpus scan.
///
/// Words are scanned in first-appearance order; within a word, by
/// base-unit offset (bytes or chars) of the pair's left token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Occurrence {
    /// The word index.
    pub word: usize,

    /// The base-unit offset within the word.
    pub offset: usize,
}

/// Info about a [`Pair`] that could be merged.
#[derive(Debug, Clone, Copy, Eq)]
pub struct MergeJob<T: TokenType, C: CountType> {
    /// The weighted number of instances of this pair in the corpus.
    pub count: C,

    /// The earliest occurrence of this pair.
    pub first: Occurrence,

    /// The pair to merge.
    pub pair: Pair<T>,
}

impl<T: TokenType, C: CountType> MergeJob<T, C> {
    /// The job key.
    ///
    /// Max-heap by count; ties go to the earliest first occurrence.
    pub fn heap_key(&self) -> (C, Reverse<Occurrence>) {
        (self.count, Reverse(self.first))
    }
}

impl<T: TokenType, C: CountType> PartialEq for MergeJob<T, C> {
    fn eq(
        &self,
        other: &Self,
    ) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<T: TokenType, C: CountType> PartialOrd for MergeJob<T, C> {
    fn partial_cmp(
        &self,
        other: &Self,
    ) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T: TokenType, C: CountType> Ord for MergeJob<T, C> {
    fn cmp(
        &self,
        other: &Self,
    ) -> Ordering {
        self.heap_key()
            .cmp(&other.heap_key())
            .then_with(|| other.pair.cmp(&self.pair))
    }
}

/// The base-unit width of a token; unmerged tokens are width 1.
fn token_width<T: TokenType>(
    widths: &WFHashMap<T, usize>,
    token: T,
) -> usize {
    widths.get(&token).copied().unwrap_or(1)
}

/// Pair statistics over a table of unique words.
///
/// Owns the words while training; counts are weighted by word count.
///
/// Heap entries are refreshed lazily: a popped job whose key no longer
/// matches the live statistics is re-pushed with its current key.
/// This is sound because a pair not containing the newest token can
/// only lose occurrences; pairs which gain occurrences get fresh jobs.
#[derive(Debug, Clone)]
pub struct PairStatistics<T: TokenType, C: CountType> {
    words: Vec<TokenSpanBuf<T>>,
    word_counts: Vec<C>,
    pair_counts: PairCountMap<T, C>,
    pair_index: PairIndexMap<T>,
    widths: WFHashMap<T, usize>,
    heap: OctonaryHeap<MergeJob<T, C>>,
}

impl<T: TokenType, C: CountType> PairStatistics<T, C> {
    /// Build statistics over a word table.
    ///
    /// ## Arguments
    /// * `words` - unique words, in canonical (first-appearance) order.
    /// * `word_counts` - `word_counts[i]` is the count of `words[i]`.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(words, word_counts)))]
    pub fn new(
        words: Vec<TokenSpanBuf<T>>,
        word_counts: Vec<C>,
    ) -> Self {
        debug_assert_eq!(words.len(), word_counts.len());

        let mut pair_counts: PairCountMap<T, C> = PairCountMap::default();
        let mut pair_index: PairIndexMap<T> = PairIndexMap::default();
        let mut firsts: WFHashMap<Pair<T>, Occurrence> = WFHashMap::default();

        for (word, (span, &count)) in words.iter().zip(word_counts.iter()).enumerate() {
            if count == C::zero() {
                continue;
            }
            for (offset, pair) in span.pairs().enumerate() {
                *pair_counts.entry(pair).or_default() += count;
                pair_index.entry(pair).or_default().insert(word);
                firsts.entry(pair).or_insert(Occurrence { word, offset });
            }
        }

        let heap: OctonaryHeap<MergeJob<T, C>> = firsts
            .into_iter()
            .map(|(pair, first)| MergeJob {
                count: pair_counts.get(&pair).copied().unwrap_or_default(),
                first,
                pair,
            })
            .collect();

        Self {
            words,
            word_counts,
            pair_counts,
            pair_index,
            widths: WFHashMap::default(),
            heap,
        }
    }

    /// The words, in their current merged state.
    pub fn words(&self) -> &[TokenSpanBuf<T>] {
        &self.words
    }

    /// The current weighted count of `pair`.
    pub fn pair_count(
        &self,
        pair: &Pair<T>,
    ) -> C {
        self.pair_counts.get(pair).copied().unwrap_or_default()
    }

    /// The number of distinct pairs with a live count.
    pub fn num_pairs(&self) -> usize {
        self.pair_counts.len()
    }

    /// Find the earliest live occurrence of `pair`, pruning stale index entries.
    fn first_occurrence(
        &mut self,
        pair: Pair<T>,
    ) -> Option<Occurrence> {
        let Self {
            words,
            pair_index,
            widths,
            ..
        } = self;
        let widths: &WFHashMap<T, usize> = widths;
        let indices = pair_index.get_mut(&pair)?;

        let mut found = None;
        let mut stale = Vec::new();
        for &word in indices.iter() {
            match words[word].first_pair_offset(pair, |t| token_width(widths, t)) {
                Some(offset) => {
                    found = Some(Occurrence { word, offset });
                    break;
                }
                None => stale.push(word),
            }
        }
        for word in stale {
            indices.remove(&word);
        }
        found
    }

    /// Pop the best merge candidate.
    ///
    /// The best candidate has the highest count; among equal counts,
    /// the earliest first occurrence.
    ///
    /// ## Returns
    /// The job, or `None` if no pair remains.
    pub fn pop_best(&mut self) -> Option<MergeJob<T, C>> {
        while let Some(job) = self.heap.pop() {
            let count = self.pair_count(&job.pair);
            if count == C::zero() {
                continue;
            }
            let Some(first) = self.first_occurrence(job.pair) else {
                continue;
            };
            if count == job.count && first == job.first {
                return Some(job);
            }
            self.heap.push(MergeJob {
                count,
                first,
                pair: job.pair,
            });
        }
        None
    }

    /// Merge every non-overlapping occurrence of `pair` into `replacement`.
    ///
    /// Pair counts are updated incrementally; pairs which gained
    /// occurrences are (re-)queued.
    ///
    /// ## Arguments
    /// * `pair` - the pair to merge.
    /// * `replacement` - the token replacing it; may be new or already in use.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self)))]
    pub fn merge_pair(
        &mut self,
        pair: Pair<T>,
        replacement: T,
    ) {
        let width = token_width(&self.widths, pair.0) + token_width(&self.widths, pair.1);
        self.widths.insert(replacement, width);

        let word_indices = self.pair_index.remove(&pair).unwrap_or_default();

        let mut touched: Vec<Pair<T>> = Vec::new();
        let mut grown: BTreeSet<Pair<T>> = BTreeSet::new();
        {
            let Self {
                words,
                word_counts,
                pair_counts,
                pair_index,
                ..
            } = self;

            for word in word_indices {
                let count = word_counts[word];
                words[word].merge_pair_cb(pair, replacement, &mut |p, delta| {
                    if delta < 0 {
                        *pair_counts.entry(p).or_default() -= count;
                        touched.push(p);
                    } else {
                        *pair_counts.entry(p).or_default() += count;
                        pair_index.entry(p).or_default().insert(word);
                        grown.insert(p);
                    }
                });
            }
        }

        for p in touched {
            if self.pair_count(&p) == C::zero() {
                self.pair_counts.remove(&p);
                self.pair_index.remove(&p);
            }
        }

        for p in grown {
            let count = self.pair_count(&p);
            if count == C::zero() {
                continue;
            }
            if let Some(first) = self.first_occurrence(p) {
                self.heap.push(MergeJob {
                    count,
                    first,
                    pair: p,
                });
            }
        }
    }
}
