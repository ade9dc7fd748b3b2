//! # Chunk Patterns
//!
//! Mixes `regex` and `fancy_regex`; patterns which need look-around
//! fall back to `fancy_regex`.

use core::fmt::Debug;
use std::sync::Arc;

use crate::errors::{WFResult, WordforgeError};

/// A chunk-splitting regex pattern.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ChunkPattern {
    /// This is a pattern for the `regex` crate.
    Basic(String),

    /// This is a pattern for the `fancy_regex` crate.
    Fancy(String),

    /// This pattern will try the `regex` crate first,
    /// and fallback to `fancy_regex` if it fails.
    Adaptive(String),
}

impl<S: AsRef<str>> From<S> for ChunkPattern {
    fn from(pattern: S) -> Self {
        Self::Adaptive(pattern.as_ref().to_string())
    }
}

impl ChunkPattern {
    /// Get the underlying regex pattern.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Basic(pattern) | Self::Fancy(pattern) | Self::Adaptive(pattern) => pattern,
        }
    }

    /// Compile the pattern into a [`ChunkRegex`].
    ///
    /// ## Returns
    /// The compiled regex, or [`WordforgeError::Pattern`].
    pub fn compile(&self) -> WFResult<ChunkRegex> {
        let fancy = |pattern: &str| {
            fancy_regex::Regex::new(pattern)
                .map(ChunkRegex::Fancy)
                .map_err(|e| WordforgeError::Pattern(e.to_string()))
        };
        match self {
            Self::Basic(pattern) => regex::Regex::new(pattern)
                .map(ChunkRegex::Basic)
                .map_err(|e| WordforgeError::Pattern(e.to_string())),
            Self::Fancy(pattern) => fancy(pattern),
            Self::Adaptive(pattern) => regex::Regex::new(pattern)
                .map(ChunkRegex::Basic)
                .or_else(|_| fancy(pattern)),
        }
    }
}

/// A compiled chunk pattern.
#[derive(Debug, Clone)]
pub enum ChunkRegex {
    /// Wrapper for `regex::Regex`.
    Basic(regex::Regex),

    /// Wrapper for `fancy_regex::Regex`.
    Fancy(fancy_regex::Regex),
}

impl ChunkRegex {
    /// Get the underlying regex pattern.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Basic(regex) => regex.as_str(),
            Self::Fancy(regex) => regex.as_str(),
        }
    }

    /// Byte ranges of the non-empty matches of this pattern.
    fn match_ranges(
        &self,
        text: &str,
    ) -> Vec<(usize, usize)> {
        match self {
            Self::Basic(regex) => regex
                .find_iter(text)
                .map(|m| (m.start(), m.end()))
                .filter(|(s, e)| s < e)
                .collect(),
            Self::Fancy(regex) => {
                let mut ranges = Vec::new();
                for m in regex.find_iter(text) {
                    match m {
                        Ok(m) if m.start() < m.end() => ranges.push((m.start(), m.end())),
                        Ok(_) => {}
                        Err(err) => {
                            // The unmatched tail is kept as a gap chunk.
                            log::warn!("chunk pattern matching stopped early: {err}");
                            break;
                        }
                    }
                }
                ranges
            }
        }
    }

    /// Split `text` into chunks.
    ///
    /// Every match is a chunk; so is every non-empty unmatched gap between
    /// matches. Concatenating the chunks reproduces `text` exactly.
    pub fn chunks<'h>(
        &self,
        text: &'h str,
    ) -> Vec<&'h str> {
        let mut chunks = Vec::new();
        let mut last = 0;
        for (start, end) in self.match_ranges(text) {
            if start > last {
                chunks.push(&text[last..start]);
            }
            chunks.push(&text[start..end]);
            last = end;
        }
        if last < text.len() {
            chunks.push(&text[last..]);
        }
        chunks
    }
}

/// Splits text into the chunks which merges may never cross.
#[derive(Debug, Clone, Default)]
pub struct Chunker {
    regex: Option<Arc<ChunkRegex>>,
}

impl Chunker {
    /// A chunker which treats the whole text as one chunk.
    pub fn whole() -> Self {
        Self::default()
    }

    /// Build a chunker from an optional pattern.
    pub fn from_pattern(pattern: Option<&ChunkPattern>) -> WFResult<Self> {
        Ok(Self {
            regex: pattern.map(|p| p.compile()).transpose()?.map(Arc::new),
        })
    }

    /// The pattern source, if any.
    pub fn pattern(&self) -> Option<&str> {
        self.regex.as_ref().map(|r| r.as_str())
    }

    /// Split `text` into chunks; empty text has no chunks.
    pub fn chunks<'h>(
        &self,
        text: &'h str,
    ) -> Vec<&'h str> {
        match &self.regex {
            Some(regex) => regex.chunks(text),
            None if text.is_empty() => Vec::new(),
            None => vec![text],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_adaptive_pattern() {
        let pattern: ChunkPattern = r"\w+".into();
        assert_eq!(pattern.as_str(), r"\w+");
        assert!(matches!(pattern.compile().unwrap(), ChunkRegex::Basic(_)));

        // Look-ahead needs fancy_regex.
        let pattern: ChunkPattern = r"\s+(?!\S)".into();
        assert!(matches!(pattern.compile().unwrap(), ChunkRegex::Fancy(_)));
    }

    #[test]
    fn test_bad_pattern() {
        let pattern: ChunkPattern = "(".into();
        assert!(matches!(pattern.compile(), Err(WordforgeError::Pattern(_))));
    }

    #[test]
    fn test_chunks_keep_gaps() {
        let regex = ChunkPattern::from(r"[a-z]+").compile().unwrap();
        let text = "hi, you there!";
        let chunks = regex.chunks(text);
        assert_eq!(chunks, vec!["hi", ", ", "you", " ", "there", "!"]);
        assert_eq!(chunks.concat(), text);
    }

    #[test]
    fn test_fancy_chunks() {
        let regex = ChunkPattern::Fancy(r"\w+(?=\s)".to_string())
            .compile()
            .unwrap();
        assert_eq!(regex.chunks("ab cd"), vec!["ab", " cd"]);
    }

    #[test]
    fn test_chunker() {
        let whole = Chunker::whole();
        assert_eq!(whole.pattern(), None);
        assert_eq!(whole.chunks("a b"), vec!["a b"]);
        assert!(whole.chunks("").is_empty());

        let pattern: ChunkPattern = r"\S+".into();
        let chunker = Chunker::from_pattern(Some(&pattern)).unwrap();
        assert_eq!(chunker.pattern(), Some(r"\S+"));
        assert_eq!(chunker.chunks("a  b"), vec!["a", "  ", "b"]);
    }
}
