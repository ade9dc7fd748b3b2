//! # String Token Vocabulary

use crate::types::WFHashMap;

/// Insertion-ordered, duplicate-free set of token strings.
///
/// Used by the character and word-level variants; the index of a
/// token is its position in insertion order.
#[derive(Debug, Clone, Default)]
pub struct StringVocab {
    tokens: Vec<String>,
    index: WFHashMap<String, usize>,
    max_token_chars: usize,
}

impl PartialEq for StringVocab {
    fn eq(
        &self,
        other: &Self,
    ) -> bool {
        self.tokens == other.tokens
    }
}

impl Eq for StringVocab {}

impl<S: Into<String>> FromIterator<S> for StringVocab {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut vocab = Self::default();
        for token in iter {
            vocab.insert(token);
        }
        vocab
    }
}

impl StringVocab {
    /// Create an empty vocabulary.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a token, if not already present.
    ///
    /// ## Returns
    /// The index of the token.
    pub fn insert<S: Into<String>>(
        &mut self,
        token: S,
    ) -> usize {
        let token = token.into();
        if let Some(&idx) = self.index.get(&token) {
            return idx;
        }
        let idx = self.tokens.len();
        self.max_token_chars = self.max_token_chars.max(token.chars().count());
        self.index.insert(token.clone(), idx);
        self.tokens.push(token);
        idx
    }

    /// Does the vocabulary contain `token`?
    #[inline(always)]
    pub fn contains(
        &self,
        token: &str,
    ) -> bool {
        self.index.contains_key(token)
    }

    /// The index of `token`, if present.
    pub fn index_of(
        &self,
        token: &str,
    ) -> Option<usize> {
        self.index.get(token).copied()
    }

    /// The token at `idx`, if present.
    pub fn get(
        &self,
        idx: usize,
    ) -> Option<&str> {
        self.tokens.get(idx).map(String::as_str)
    }

    /// The number of tokens.
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Is the vocabulary empty?
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// The longest token, in chars.
    pub fn max_token_chars(&self) -> usize {
        self.max_token_chars
    }

    /// The tokens, in insertion order.
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    /// Iterate over the tokens, in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &str> + '_ {
        self.tokens.iter().map(String::as_str)
    }
}

/// A string-level merge rule: ``(left, right) -> merged``.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StringMergeRule {
    /// The left token of the pair.
    pub left: String,

    /// The right token of the pair.
    pub right: String,

    /// The token replacing the pair.
    pub merged: String,
}

/// Ordered string merge rules; order is merge priority.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StringMergeRules {
    rules: Vec<StringMergeRule>,
}

impl FromIterator<StringMergeRule> for StringMergeRules {
    fn from_iter<I: IntoIterator<Item = StringMergeRule>>(iter: I) -> Self {
        Self {
            rules: iter.into_iter().collect(),
        }
    }
}

impl StringMergeRules {
    /// Append a rule.
    pub fn push(
        &mut self,
        left: &str,
        right: &str,
        merged: &str,
    ) {
        self.rules.push(StringMergeRule {
            left: left.to_string(),
            right: right.to_string(),
            merged: merged.to_string(),
        });
    }

    /// The rules, in merge order.
    pub fn rules(&self) -> &[StringMergeRule] {
        &self.rules
    }

    /// The number of rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Are there no rules?
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_vocab() {
        let mut vocab = StringVocab::new();
        assert!(vocab.is_empty());

        assert_eq!(vocab.insert("a"), 0);
        assert_eq!(vocab.insert("b☃"), 1);
        assert_eq!(vocab.insert("a"), 0);

        assert_eq!(vocab.len(), 2);
        assert!(vocab.contains("b☃"));
        assert!(!vocab.contains("c"));
        assert_eq!(vocab.index_of("b☃"), Some(1));
        assert_eq!(vocab.get(0), Some("a"));
        assert_eq!(vocab.get(2), None);
        assert_eq!(vocab.max_token_chars(), 2);
        assert_eq!(vocab.iter().collect::<Vec<_>>(), vec!["a", "b☃"]);
    }

    #[test]
    fn test_from_iter_dedups() {
        let vocab: StringVocab = ["x", "yz", "x"].into_iter().collect();
        assert_eq!(vocab.tokens(), &["x".to_string(), "yz".to_string()]);
        assert_eq!(vocab, ["x", "yz"].into_iter().collect());
    }

    #[test]
    fn test_merge_rules() {
        let mut rules = StringMergeRules::default();
        assert!(rules.is_empty());
        rules.push("a", "b", "ab");
        rules.push("ab", "c", "abc");
        assert_eq!(rules.len(), 2);
        assert_eq!(rules.rules()[1].merged, "abc");
    }
}
