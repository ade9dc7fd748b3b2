//! # Versioned Model Record
//!
//! Byte-level models:
//! ```json
//! { "format": 1, "kind": "naive", "pattern": "\\w+",
//!   "tokens": [{"id": 0, "bytes": "AA=="}, ...],
//!   "merges": [{"pair": [97, 97], "id": 256}, ...] }
//! ```
//!
//! String-level models:
//! ```json
//! { "format": 1, "kind": "wordpiece",
//!   "vocab": ["[UNK]", ...],
//!   "merges": [{"pair": ["▁", "l"], "token": "▁l"}, ...] }
//! ```

use base64::{Engine, prelude::BASE64_STANDARD};
use serde::{Deserialize, Serialize};

use crate::{
    errors::{WFResult, WordforgeError},
    pretokenize::{ChunkPattern, Chunker},
    tokenizer::{TokenId, Tokenizer, TokenizerKind},
    vocab::{BytePairVocab, MergeRule, StringMergeRules, StringVocab},
};

/// The current record format version.
pub const MODEL_FORMAT_VERSION: u32 = 1;

/// One byte-level token and its byte expansion (base64).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ByteTokenRecord {
    /// The token id.
    pub id: TokenId,

    /// The base64 encoded bytes.
    pub bytes: String,
}

/// One byte-level merge: ``pair -> id``.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdMergeRecord {
    /// The merged pair.
    pub pair: [TokenId; 2],

    /// The merge target.
    pub id: TokenId,
}

/// One string-level merge: ``pair -> token``.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StringMergeRecord {
    /// The merged pair.
    pub pair: [String; 2],

    /// The merged token.
    pub token: String,
}

/// The family-specific part of a [`ModelRecord`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ModelBody {
    /// Byte-level id table and merges.
    Bytes {
        /// Every token, in id order.
        tokens: Vec<ByteTokenRecord>,

        /// Merges, in merge order.
        merges: Vec<IdMergeRecord>,
    },

    /// String vocabulary and merges.
    Strings {
        /// Every token, in vocabulary order.
        vocab: Vec<String>,

        /// Merges, in merge order.
        #[serde(default)]
        merges: Vec<StringMergeRecord>,
    },
}

/// A persisted tokenizer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelRecord {
    /// The record format version.
    pub format: u32,

    /// The tokenizer family.
    pub kind: TokenizerKind,

    /// The chunk pattern, for byte-level families.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,

    /// The family-specific tables.
    #[serde(flatten)]
    pub body: ModelBody,
}

impl From<&Tokenizer> for ModelRecord {
    fn from(tokenizer: &Tokenizer) -> Self {
        let body = match (tokenizer.byte_pair_vocab(), tokenizer.pieces()) {
            (Some(vocab), _) => ModelBody::Bytes {
                tokens: vocab
                    .spans()
                    .map(|(id, span)| ByteTokenRecord {
                        id,
                        bytes: BASE64_STANDARD.encode(span),
                    })
                    .collect(),
                merges: vocab
                    .merges()
                    .iter()
                    .map(|&((a, b), id)| IdMergeRecord { pair: [a, b], id })
                    .collect(),
            },
            (None, Some(model)) => ModelBody::Strings {
                vocab: model.vocab().tokens().to_vec(),
                merges: model
                    .merges()
                    .rules()
                    .iter()
                    .map(|rule| StringMergeRecord {
                        pair: [rule.left.clone(), rule.right.clone()],
                        token: rule.merged.clone(),
                    })
                    .collect(),
            },
            (None, None) => ModelBody::Strings {
                vocab: Vec::new(),
                merges: Vec::new(),
            },
        };

        Self {
            format: MODEL_FORMAT_VERSION,
            kind: tokenizer.kind(),
            pattern: tokenizer.pattern().map(str::to_string),
            body,
        }
    }
}

impl TryFrom<ModelRecord> for Tokenizer {
    type Error = WordforgeError;

    fn try_from(record: ModelRecord) -> WFResult<Self> {
        if record.format != MODEL_FORMAT_VERSION {
            return Err(WordforgeError::UnsupportedFormat(format!(
                "format version {}; expected {}",
                record.format, MODEL_FORMAT_VERSION
            )));
        }

        match (record.kind.is_byte_level(), record.body) {
            (true, ModelBody::Bytes { tokens, merges }) => {
                let vocab = byte_pair_vocab_from_records(&tokens, &merges)?;
                let pattern = record.pattern.map(ChunkPattern::from);
                let chunker = Chunker::from_pattern(pattern.as_ref())?;
                Tokenizer::from_byte_pair(record.kind, vocab, chunker)
            }
            (false, ModelBody::Strings { vocab, merges }) => {
                let (vocab, merges) = string_vocab_from_records(vocab, merges)?;
                Tokenizer::from_pieces(record.kind, vocab, merges)
            }
            _ => Err(WordforgeError::UnsupportedFormat(format!(
                "{} record has the wrong table layout",
                record.kind
            ))),
        }
    }
}

/// Rebuild a [`BytePairVocab`] from its merges, and check the id table.
fn byte_pair_vocab_from_records(
    tokens: &[ByteTokenRecord],
    merges: &[IdMergeRecord],
) -> WFResult<BytePairVocab<TokenId>> {
    let rules: Vec<MergeRule<TokenId>> = merges
        .iter()
        .map(|m| ((m.pair[0], m.pair[1]), m.id))
        .collect();
    let vocab = BytePairVocab::from_merges(rules)?;

    if tokens.len() != vocab.len() {
        return Err(WordforgeError::VocabConflict(format!(
            "token table has {} entries; merges define {}",
            tokens.len(),
            vocab.len()
        )));
    }
    for record in tokens {
        let bytes = BASE64_STANDARD
            .decode(&record.bytes)
            .map_err(|e| WordforgeError::Parse(e.to_string()))?;
        if vocab.token_span(record.id) != Some(bytes.as_slice()) {
            return Err(WordforgeError::VocabConflict(format!(
                "token {} bytes {:?} disagree with the merges",
                record.id, record.bytes
            )));
        }
    }
    Ok(vocab)
}

/// Rebuild a [`StringVocab`] and its merges; merged tokens must be
/// the concatenation of their pair and present in the vocabulary.
fn string_vocab_from_records(
    tokens: Vec<String>,
    merges: Vec<StringMergeRecord>,
) -> WFResult<(StringVocab, StringMergeRules)> {
    let expected = tokens.len();
    let vocab: StringVocab = tokens.into_iter().collect();
    if vocab.len() != expected {
        return Err(WordforgeError::VocabConflict(format!(
            "vocab has {} duplicate tokens",
            expected - vocab.len()
        )));
    }

    let mut rules = StringMergeRules::default();
    for StringMergeRecord {
        pair: [left, right],
        token,
    } in merges
    {
        let consistent = token.len() == left.len() + right.len()
            && token.starts_with(left.as_str())
            && token.ends_with(right.as_str());
        if !consistent || !vocab.contains(&token) {
            return Err(WordforgeError::VocabConflict(format!(
                "merge ({left:?}, {right:?}) -> {token:?} is inconsistent with the vocab"
            )));
        }
        rules.push(&left, &right, &token);
    }
    Ok((vocab, rules))
}
