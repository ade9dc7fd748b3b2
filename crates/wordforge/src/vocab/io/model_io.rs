//! # Model Files

use std::{
    fs::File,
    io::{BufReader, BufWriter, Read, Write},
    path::Path,
};

use serde::{Serialize, Serializer};

use crate::{
    errors::{WFResult, WordforgeError},
    tokenizer::Tokenizer,
    vocab::{WORD_START_MARKER, io::ModelRecord},
};

/// Serialize a tokenizer to a pretty JSON [`ModelRecord`].
pub fn serialize(tokenizer: &Tokenizer) -> WFResult<Vec<u8>> {
    Ok(serde_json::to_vec_pretty(&ModelRecord::from(tokenizer))?)
}

/// Deserialize a tokenizer from a JSON [`ModelRecord`].
///
/// The result shares no state with the tokenizer that was saved.
pub fn deserialize(blob: &[u8]) -> WFResult<Tokenizer> {
    let record: ModelRecord = serde_json::from_slice(blob)?;
    Tokenizer::try_from(record)
}

/// Write a tokenizer model to a [`Write`] writer.
///
/// ## Arguments
/// * `tokenizer` - the tokenizer to save.
/// * `writer` - the writer to target.
pub fn write_model<W: Write>(
    tokenizer: &Tokenizer,
    writer: &mut W,
) -> WFResult<()> {
    writer.write_all(&serialize(tokenizer)?)?;
    writer.flush()?;
    Ok(())
}

/// Read a tokenizer model from a [`Read`] reader.
pub fn read_model<R: Read>(mut reader: R) -> WFResult<Tokenizer> {
    let mut blob = Vec::new();
    reader.read_to_end(&mut blob)?;
    deserialize(&blob)
}

/// Save a tokenizer model file.
///
/// ## Arguments
/// * `tokenizer` - the tokenizer to save.
/// * `path` - the path to save the model to.
pub fn save_model_path<P: AsRef<Path>>(
    tokenizer: &Tokenizer,
    path: P,
) -> WFResult<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    write_model(tokenizer, &mut writer)
}

/// Load a tokenizer model file.
pub fn load_model_path<P: AsRef<Path>>(path: P) -> WFResult<Tokenizer> {
    read_model(BufReader::new(File::open(path)?))
}

/// Write the bare vocabulary list: a JSON array of token strings.
///
/// The word-start marker is stripped from every token.
pub fn write_vocab_list<W: Write>(
    tokenizer: &Tokenizer,
    writer: &mut W,
) -> WFResult<()> {
    let vocab: Vec<String> = tokenizer
        .vocab_strings()
        .into_iter()
        .map(|token| token.replace(WORD_START_MARKER, ""))
        .collect();
    serde_json::to_writer_pretty(&mut *writer, &vocab)?;
    writer.flush()?;
    Ok(())
}

/// Save the bare vocabulary list file; see [`write_vocab_list`].
pub fn save_vocab_list_path<P: AsRef<Path>>(
    tokenizer: &Tokenizer,
    path: P,
) -> WFResult<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    write_vocab_list(tokenizer, &mut writer)
}

/// A ``token -> index`` JSON object, in vocabulary order.
struct VocabIndex<'a>(&'a [String]);

impl Serialize for VocabIndex<'_> {
    fn serialize<S: Serializer>(
        &self,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.0.iter().enumerate().map(|(idx, token)| (token, idx)))
    }
}

/// Write the vocabulary index: a JSON object mapping each token to its index.
///
/// Tokens keep the word-start marker. String-level tokenizers only; the
/// lossy text of byte-level tokens is not unique.
pub fn write_vocab_index<W: Write>(
    tokenizer: &Tokenizer,
    writer: &mut W,
) -> WFResult<()> {
    let Some(model) = tokenizer.pieces() else {
        return Err(WordforgeError::UnsupportedFormat(format!(
            "{} tokenizer has no string vocabulary index",
            tokenizer.kind()
        )));
    };
    serde_json::to_writer_pretty(&mut *writer, &VocabIndex(model.vocab().tokens()))?;
    writer.flush()?;
    Ok(())
}

/// Save the vocabulary index file; see [`write_vocab_index`].
pub fn save_vocab_index_path<P: AsRef<Path>>(
    tokenizer: &Tokenizer,
    path: P,
) -> WFResult<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    write_vocab_index(tokenizer, &mut writer)
}
