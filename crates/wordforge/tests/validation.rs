#![allow(missing_docs)]

use wordforge::{Tokenizer, TokenizerKind, Tokens, TrainConfig};

const SAMPLES: &[&str] = &[
    "hello world",
    "The quick brown fox jumps over the lazy dog.",
    "It's a beautiful day, and I'll be taking my 3 dogs for a walk.",
    "Don't forget: the temperature is 72 degrees!",
    "  multiple   spaces  ",
    "line1\nline2\r\nline3",
    "123 + 456 = 789",
    "caf\u{00e9} na\u{00ef}ve \u{4f60}\u{597d}",
    "Geburtstag 2024: Alles Gute!",
    "$$$!!!...---",
    " ",
    "a",
    "\t\ttabs\tand\tspaces ",
    "emoji: \u{1f600}\u{1f680}\u{1f4a1}",
    "mixed: hello\u{00a0}world\u{2003}wide",
];

const PATTERN: &str = r"'s|'t|'ll| ?\p{L}+| ?\p{N}+| ?[^\s\p{L}\p{N}]+|\s+";

fn roundtrip_validation(
    kind: TokenizerKind,
    pattern: Option<&str>,
) {
    let config = TrainConfig::new(kind, 400).with_pattern(pattern);
    let tokenizer = Tokenizer::train(&config, SAMPLES).unwrap().tokenizer;

    for text in SAMPLES {
        let tokens = tokenizer.tokenize(text);
        assert!(matches!(tokens, Tokens::Ids(_)));
        let decoded = tokenizer.decode(&tokens).unwrap();
        assert_eq!(&decoded, text, "Roundtrip mismatch for {kind}: {text:?}");
    }

    // Text outside the training corpus still round trips.
    for text in ["Zwölf Boxkämpfer jagen Viktor", "\u{1f980} \u{00ff}\u{0100}"] {
        let tokens = tokenizer.tokenize(text);
        assert_eq!(tokenizer.decode(&tokens).unwrap(), text);
    }
}

#[test]
fn test_naive_roundtrip() {
    roundtrip_validation(TokenizerKind::Naive, None);
}

#[test]
fn test_naive_pattern_roundtrip() {
    roundtrip_validation(TokenizerKind::Naive, Some(PATTERN));
}

#[test]
fn test_dynamic_roundtrip() {
    roundtrip_validation(TokenizerKind::Dynamic, None);
}

#[test]
fn test_dynamic_pattern_roundtrip() {
    roundtrip_validation(TokenizerKind::Dynamic, Some(PATTERN));
}

#[test]
fn test_dynamic_never_longer_than_naive() {
    let naive = Tokenizer::train(&TrainConfig::new(TokenizerKind::Naive, 400), SAMPLES)
        .unwrap()
        .tokenizer;
    let dynamic = Tokenizer::train(&TrainConfig::new(TokenizerKind::Dynamic, 400), SAMPLES)
        .unwrap()
        .tokenizer;
    assert_eq!(naive.vocab_strings(), dynamic.vocab_strings());

    for text in SAMPLES {
        assert!(dynamic.tokenize(text).len() <= naive.tokenize(text).len());
    }
}
