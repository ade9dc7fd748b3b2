//! # String Utilities

use std::borrow::Cow;

/// Owned lossy UTF-8 conversion.
///
/// Malformed sequences become `U+FFFD`; valid input is moved, not copied.
pub fn string_from_utf8_lossy(v: Vec<u8>) -> String {
    match String::from_utf8(v) {
        Ok(s) => s,
        Err(err) => match String::from_utf8_lossy(err.as_bytes()) {
            Cow::Owned(s) => s,
            Cow::Borrowed(s) => s.to_string(),
        },
    }
}

/// Byte offsets of every char boundary in `text`, including `text.len()`.
pub fn char_boundaries(text: &str) -> Vec<usize> {
    let mut bounds: Vec<usize> = text.char_indices().map(|(idx, _)| idx).collect();
    bounds.push(text.len());
    bounds
}
