//! # Text Normalization

use serde::{Deserialize, Serialize};

/// Punctuation which is isolated into standalone words.
pub const ISOLATED_PUNCTUATION: [char; 6] = ['.', ',', '!', '?', ';', ':'];

/// Word-level text normalization options.
///
/// Applied in order: lowercase, strip punctuation, isolate punctuation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Normalizer {
    /// Lowercase the text.
    pub lowercase: bool,

    /// Surround each of [`ISOLATED_PUNCTUATION`] with spaces.
    pub isolate_punctuation: bool,

    /// Delete every char which is neither a word char nor whitespace.
    pub strip_punctuation: bool,
}

impl Normalizer {
    /// The no-op normalizer; words are split on whitespace only.
    pub fn identity() -> Self {
        Self::default()
    }

    /// Lowercase and isolate punctuation.
    pub fn word_piece() -> Self {
        Self {
            lowercase: true,
            isolate_punctuation: true,
            strip_punctuation: false,
        }
    }

    /// Sets lowercasing.
    pub fn with_lowercase(
        self,
        lowercase: bool,
    ) -> Self {
        Self { lowercase, ..self }
    }

    /// Sets punctuation isolation.
    pub fn with_isolate_punctuation(
        self,
        isolate_punctuation: bool,
    ) -> Self {
        Self {
            isolate_punctuation,
            ..self
        }
    }

    /// Sets punctuation stripping.
    pub fn with_strip_punctuation(
        self,
        strip_punctuation: bool,
    ) -> Self {
        Self {
            strip_punctuation,
            ..self
        }
    }

    /// Normalize `text`.
    pub fn normalize(
        &self,
        text: &str,
    ) -> String {
        let lowered;
        let text = if self.lowercase {
            lowered = text.to_lowercase();
            lowered.as_str()
        } else {
            text
        };

        let mut out = String::with_capacity(text.len() + 8);
        for c in text.chars() {
            if self.strip_punctuation && !(c.is_alphanumeric() || c == '_' || c.is_whitespace()) {
                continue;
            }
            if self.isolate_punctuation && ISOLATED_PUNCTUATION.contains(&c) {
                out.push(' ');
                out.push(c);
                out.push(' ');
            } else {
                out.push(c);
            }
        }
        out
    }

    /// Normalize `text` and split it on whitespace.
    pub fn words(
        &self,
        text: &str,
    ) -> Vec<String> {
        self.normalize(text)
            .split_whitespace()
            .map(str::to_string)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity() {
        let n = Normalizer::identity();
        assert_eq!(n.normalize("Hello, World!"), "Hello, World!");
        assert_eq!(n.words(" Hello,  World! "), vec!["Hello,", "World!"]);
    }

    #[test]
    fn test_word_piece() {
        let n = Normalizer::word_piece();
        assert_eq!(
            n.words("Hello, World! Fine?"),
            vec!["hello", ",", "world", "!", "fine", "?"]
        );
        // Other punctuation stays attached.
        assert_eq!(n.words("it's"), vec!["it's"]);
    }

    #[test]
    fn test_strip_punctuation() {
        let n = Normalizer::identity()
            .with_lowercase(true)
            .with_strip_punctuation(true);
        assert_eq!(n.words("Hello, wörld_1 -- ok!"), vec!["hello", "wörld_1", "ok"]);

        let n = n.with_isolate_punctuation(true);
        assert_eq!(n.words("a.b"), vec!["ab"]);
    }
}
