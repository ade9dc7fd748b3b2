#![allow(missing_docs)]

use strum::IntoEnumIterator;
use wordforge::{
    Tokenizer,
    TokenizerKind,
    Tokens,
    TrainConfig,
    vocab::{
        StringMergeRules,
        StringVocab,
        UNK_TOKEN,
        io::{load_model_path, save_model_path, save_vocab_list_path},
    },
};

const CORPUS: &[&str] = &[
    "The lower the lowest, the newer the newest.",
    "Low winds blow; new snow.",
    "Widest widths and wider windows!",
];

fn trained(kind: TokenizerKind) -> Tokenizer {
    let config = TrainConfig::new(kind, 300).with_min_frequency(2);
    Tokenizer::train(&config, CORPUS).unwrap().tokenizer
}

#[test]
fn test_unigram_prefers_longest_match() {
    let vocab: StringVocab = ["low", "er", "est", "lowest"].into_iter().collect();
    let tokenizer =
        Tokenizer::from_pieces(TokenizerKind::Unigram, vocab, StringMergeRules::default())
            .unwrap();

    assert_eq!(tokenizer.tokenize("lowest"), Tokens::Pieces(vec!["lowest".into()]));
    assert_eq!(
        tokenizer.tokenize("lower lowest"),
        Tokens::Pieces(vec!["low".into(), "er".into(), "lowest".into()])
    );

    // Pruned chars still come out, one per token.
    assert_eq!(
        tokenizer.tokenize("slow"),
        Tokens::Pieces(vec!["s".into(), "low".into()])
    );
}

#[test]
fn test_coverage() {
    for kind in TokenizerKind::iter() {
        let tokenizer = trained(kind);
        for text in ["x", "lowest", "q7 ☃ zz", "a b c"] {
            let words = tokenizer.tokenize_words(text);
            assert!(!words.is_empty(), "{kind}: {text:?}");
            for (word, pieces) in &words {
                assert!(!pieces.is_empty(), "{kind}: {word:?} in {text:?}");
            }
        }
    }
}

#[test]
fn test_word_piece_abandons_word_on_miss() {
    let tokenizer = trained(TokenizerKind::WordPiece);

    // "q" was never seen: everything after it in the word is dropped.
    let Tokens::Pieces(pieces) = tokenizer.tokenize("lowqest low") else {
        panic!("expected pieces");
    };
    let unk = pieces.iter().position(|p| p == UNK_TOKEN).unwrap();
    assert_eq!(pieces[..unk].concat(), "▁low");
    assert_eq!(pieces[unk + 1..].concat(), "▁low");
}

#[test]
fn test_char_level_continues_past_miss() {
    let tokenizer = trained(TokenizerKind::Char);
    let Tokens::Pieces(pieces) = tokenizer.tokenize("lowqest") else {
        panic!("expected pieces");
    };
    let unk = pieces.iter().position(|p| p == UNK_TOKEN).unwrap();
    assert_eq!(pieces[..unk].concat(), "low");
    assert_eq!(pieces[unk + 1..].concat(), "est");
}

#[test]
fn test_batch_order() {
    let batch: Vec<String> = (0..200)
        .map(|i| format!("{} the {} newest", "low ".repeat(i % 7), i))
        .collect();

    for kind in TokenizerKind::iter() {
        let tokenizer = trained(kind);
        let results = tokenizer.tokenize_batch(&batch);
        assert_eq!(results.len(), batch.len());
        for (text, tokens) in batch.iter().zip(results.iter()) {
            assert_eq!(tokens, &tokenizer.tokenize(text), "{kind}: {text:?}");
        }
    }
}

#[test]
fn test_persistence_round_trip() {
    let dir = tempdir::TempDir::new("families_test").unwrap();

    for kind in TokenizerKind::iter() {
        let tokenizer = trained(kind);
        let model_path = dir.path().join(format!("{kind}.model.json"));
        save_model_path(&tokenizer, &model_path).unwrap();

        let loaded = load_model_path(&model_path).unwrap();
        assert_eq!(loaded.kind(), kind);
        assert_eq!(loaded.vocab_strings(), tokenizer.vocab_strings());

        let batch = ["the lowest windows", "zebra"];
        assert_eq!(loaded.tokenize_batch(&batch), tokenizer.tokenize_batch(&batch));

        let list_path = dir.path().join(format!("{kind}.vocab.json"));
        save_vocab_list_path(&tokenizer, &list_path).unwrap();
        let list: Vec<String> =
            serde_json::from_slice(&std::fs::read(&list_path).unwrap()).unwrap();
        assert_eq!(list.len(), tokenizer.vocab_len());
    }
}
