//! # Word Counter

use crate::{
    training::{CountType, StringChunkType},
    types::WFHashMap,
};

/// Word (or chunk) frequency table.
///
/// Words are kept in first-appearance order; this order is the
/// canonical corpus scan used for deterministic tie-breaking.
#[derive(Debug, Clone)]
pub struct WordCounter<K, C>
where
    K: StringChunkType,
    C: CountType,
{
    words: Vec<(K, C)>,
    index: WFHashMap<K, usize>,
}

impl<K, C> Default for WordCounter<K, C>
where
    K: StringChunkType,
    C: CountType,
{
    fn default() -> Self {
        Self {
            words: Vec::new(),
            index: WFHashMap::default(),
        }
    }
}

impl<K, C> WordCounter<K, C>
where
    K: StringChunkType,
    C: CountType,
{
    /// Create a new, empty word counter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one occurrence of `word`.
    ///
    /// Empty words are ignored.
    pub fn observe(
        &mut self,
        word: &str,
    ) {
        if word.is_empty() {
            return;
        }
        match self.index.get(word) {
            Some(&idx) => self.words[idx].1 += C::one(),
            None => {
                let key: K = word.into();
                self.index.insert(key.clone(), self.words.len());
                self.words.push((key, C::one()));
            }
        }
    }

    /// Count each word of an iterator.
    pub fn observe_all<I>(
        &mut self,
        words: I,
    ) where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        for word in words {
            self.observe(word.as_ref());
        }
    }

    /// The number of distinct words.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Were no words observed?
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// The sum of all word counts.
    pub fn total(&self) -> C {
        self.words
            .iter()
            .fold(C::zero(), |acc, &(_, count)| acc + count)
    }

    /// Iterate ``(word, count)`` in first-appearance order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, C)> + '_ {
        self.words.iter().map(|(k, c)| (k.as_ref(), *c))
    }

    /// Release the ``(word, count)`` table, in first-appearance order.
    pub fn release(self) -> Vec<(K, C)> {
        self.words
    }
}
