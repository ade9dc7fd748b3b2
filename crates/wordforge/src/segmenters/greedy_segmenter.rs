//! # Greedy Longest-Match Segmenter

use std::sync::Arc;

use crate::{
    compat::strings::char_boundaries,
    pretokenize::Normalizer,
    vocab::{StringVocab, UNK_TOKEN},
};

/// The order in which candidate pieces are scanned at each position.
///
/// Both select the longest piece present in the vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScanOrder {
    /// Scan from the longest candidate down; stop at the first hit.
    #[default]
    LongestFirst,

    /// Scan every candidate from the shortest up; keep the last hit.
    ShortestFirst,
}

/// What to emit when no vocabulary piece starts at a position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MissPolicy {
    /// Emit the unknown token and drop the rest of the word.
    AbandonWord,

    /// Emit the unknown token for the char and continue.
    #[default]
    UnknownToken,

    /// Emit the char itself as a piece and continue.
    SingleChar,
}

/// Greedy left-to-right longest-match segmentation over a [`StringVocab`].
#[derive(Debug, Clone)]
pub struct GreedySegmenter {
    vocab: Arc<StringVocab>,
    order: ScanOrder,
    miss: MissPolicy,
    normalizer: Normalizer,
    marker: Option<char>,
}

impl GreedySegmenter {
    /// Create a segmenter with default options.
    ///
    /// ## Arguments
    /// * `vocab` - The trained vocabulary.
    pub fn new(vocab: Arc<StringVocab>) -> Self {
        Self {
            vocab,
            order: ScanOrder::default(),
            miss: MissPolicy::default(),
            normalizer: Normalizer::identity(),
            marker: None,
        }
    }

    /// Sets the scan order.
    pub fn with_scan_order(
        self,
        order: ScanOrder,
    ) -> Self {
        Self { order, ..self }
    }

    /// Sets the miss policy.
    pub fn with_miss_policy(
        self,
        miss: MissPolicy,
    ) -> Self {
        Self { miss, ..self }
    }

    /// Sets the normalizer; it must match the one used in training.
    pub fn with_normalizer(
        self,
        normalizer: Normalizer,
    ) -> Self {
        Self { normalizer, ..self }
    }

    /// Sets the word-start marker prepended to each word.
    pub fn with_marker(
        self,
        marker: Option<char>,
    ) -> Self {
        Self { marker, ..self }
    }

    /// The attached vocabulary.
    pub fn vocab(&self) -> &Arc<StringVocab> {
        &self.vocab
    }

    /// Normalize `text` and split it into marked words.
    pub fn words(
        &self,
        text: &str,
    ) -> Vec<String> {
        let words = self.normalizer.words(text);
        match self.marker {
            None => words,
            Some(marker) => words
                .into_iter()
                .map(|w| {
                    let mut marked = String::with_capacity(w.len() + marker.len_utf8());
                    marked.push(marker);
                    marked.push_str(&w);
                    marked
                })
                .collect(),
        }
    }

    /// The longest vocabulary piece of `word` starting at `bounds[pos]`.
    ///
    /// ## Returns
    /// The index into `bounds` of the piece end.
    fn longest_match(
        &self,
        word: &str,
        bounds: &[usize],
        pos: usize,
    ) -> Option<usize> {
        let start = bounds[pos];
        let last = bounds.len() - 1;
        let limit = last.min(pos + self.vocab.max_token_chars());

        match self.order {
            ScanOrder::LongestFirst => (pos + 1..=limit)
                .rev()
                .find(|&end| self.vocab.contains(&word[start..bounds[end]])),
            ScanOrder::ShortestFirst => {
                let mut best = None;
                for end in pos + 1..=limit {
                    if self.vocab.contains(&word[start..bounds[end]]) {
                        best = Some(end);
                    }
                }
                best
            }
        }
    }

    /// Segment one (already marked) word, appending pieces to `pieces`.
    ///
    /// ## Arguments
    /// * `word` - The word to segment.
    /// * `pieces` - The target piece buffer.
    pub fn segment_word_append(
        &self,
        word: &str,
        pieces: &mut Vec<String>,
    ) {
        let bounds = char_boundaries(word);
        let last = bounds.len() - 1;

        let mut pos = 0;
        while pos < last {
            if let Some(end) = self.longest_match(word, &bounds, pos) {
                pieces.push(word[bounds[pos]..bounds[end]].to_string());
                pos = end;
                continue;
            }

            match self.miss {
                MissPolicy::AbandonWord => {
                    pieces.push(UNK_TOKEN.to_string());
                    break;
                }
                MissPolicy::UnknownToken => pieces.push(UNK_TOKEN.to_string()),
                MissPolicy::SingleChar => pieces.push(word[bounds[pos]..bounds[pos + 1]].to_string()),
            }
            pos += 1;
        }
    }

    /// Segment one (already marked) word.
    pub fn segment_word(
        &self,
        word: &str,
    ) -> Vec<String> {
        let mut pieces = Vec::new();
        self.segment_word_append(word, &mut pieces);
        pieces
    }

    /// Segment `text` into a flat piece sequence.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self, text)))]
    pub fn segment(
        &self,
        text: &str,
    ) -> Vec<String> {
        let mut pieces = Vec::new();
        for word in self.words(text) {
            self.segment_word_append(&word, &mut pieces);
        }
        pieces
    }

    /// Segment `text`, keeping each word with its pieces.
    pub fn segment_words(
        &self,
        text: &str,
    ) -> Vec<(String, Vec<String>)> {
        self.words(text)
            .into_iter()
            .map(|word| {
                let pieces = self.segment_word(&word);
                (word, pieces)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{compat::traits::static_is_send_sync_check, vocab::WORD_START_MARKER};

    fn vocab(tokens: &[&str]) -> Arc<StringVocab> {
        Arc::new(tokens.iter().copied().collect())
    }

    #[test]
    fn test_longest_match() {
        let seg = GreedySegmenter::new(vocab(&["low", "er", "est", "lowest", "l", "o"]));
        static_is_send_sync_check(&seg);

        assert_eq!(seg.segment("lowest"), vec!["lowest"]);
        assert_eq!(seg.segment("lower"), vec!["low", "er"]);
        assert_eq!(seg.segment("lowest lower"), vec!["lowest", "low", "er"]);
        assert!(seg.segment("").is_empty());
    }

    #[test]
    fn test_scan_orders_agree() {
        let v = vocab(&["a", "ab", "abc", "bc", "c", "cab"]);
        let longest = GreedySegmenter::new(v.clone());
        let shortest = GreedySegmenter::new(v).with_scan_order(ScanOrder::ShortestFirst);

        for text in ["abc", "cabc", "abcab", "bcabc"] {
            assert_eq!(longest.segment(text), shortest.segment(text));
        }
        assert_eq!(shortest.segment("cabc"), vec!["cab", "c"]);
    }

    #[test]
    fn test_abandon_word() {
        let seg = GreedySegmenter::new(vocab(&["▁a", "b", "▁c"]))
            .with_marker(Some(WORD_START_MARKER))
            .with_miss_policy(MissPolicy::AbandonWord);

        assert_eq!(seg.words("ab c"), vec!["▁ab", "▁c"]);

        // "x" misses; the rest of "▁abxb" is dropped, "▁c" still segments.
        assert_eq!(seg.segment("abxb c"), vec!["▁a", "b", UNK_TOKEN, "▁c"]);
    }

    #[test]
    fn test_unknown_token_continues() {
        let seg = GreedySegmenter::new(vocab(&["a", "b", UNK_TOKEN]));
        assert_eq!(seg.segment("axb"), vec!["a", UNK_TOKEN, "b"]);
    }

    #[test]
    fn test_single_char_fallback() {
        let seg = GreedySegmenter::new(vocab(&["ab"]))
            .with_scan_order(ScanOrder::ShortestFirst)
            .with_miss_policy(MissPolicy::SingleChar);

        assert_eq!(seg.segment("abé☃ab"), vec!["ab", "é", "☃", "ab"]);
    }

    #[test]
    fn test_segment_words() {
        let seg = GreedySegmenter::new(vocab(&["▁hel", "lo", "▁", ","]))
            .with_marker(Some(WORD_START_MARKER))
            .with_normalizer(Normalizer::word_piece());

        assert_eq!(
            seg.segment_words("Hello,"),
            vec![
                ("▁hello".to_string(), vec!["▁hel".to_string(), "lo".to_string()]),
                ("▁,".to_string(), vec!["▁".to_string(), ",".to_string()]),
            ]
        );
    }
}
