#![allow(missing_docs)]

use std::{sync::Arc, thread};

use wordforge::{
    Tokenizer,
    TokenizerKind,
    TrainConfig,
    WordforgeError,
    training::{
        BytePairTrainer,
        BytePairTrainerOptions,
        StopSignal,
        UnigramTrainer,
        UnigramTrainerOptions,
        WordPairTrainer,
        WordPairTrainerOptions,
    },
    vocab::{BytePairVocab, MergeRule, StringVocab},
};

const CORPUS: &[&str] = &[
    "the quick brown fox jumps over the lazy dog",
    "a journey of a thousand miles begins with a single step",
    "the lower the lowest; the newer the newest",
    "she sells sea shells by the sea shore",
];

fn byte_pair_merges(
    vocab_size: usize,
    samples: &[&str],
) -> Vec<MergeRule<u32>> {
    let mut trainer: BytePairTrainer = BytePairTrainerOptions::new(vocab_size).init().unwrap();
    trainer.update_from_samples(samples);
    let vocab: BytePairVocab<u32> = trainer.train().unwrap();
    vocab.merges().to_vec()
}

fn word_piece_vocab(
    vocab_size: usize,
    min_frequency: u64,
    samples: &[&str],
) -> StringVocab {
    let mut trainer: WordPairTrainer =
        WordPairTrainerOptions::word_piece(vocab_size, min_frequency).init();
    trainer.update_from_samples(samples);
    trainer.train().unwrap().vocab
}

fn unigram_vocab(
    vocab_size: usize,
    samples: &[&str],
) -> StringVocab {
    let mut trainer: UnigramTrainer = UnigramTrainerOptions::new(vocab_size).init();
    trainer.update_from_samples(samples);
    trainer.train().unwrap()
}

#[test]
fn test_classic_merge_sequence() {
    let (a, b) = (b'a' as u32, b'b' as u32);

    // (a, a) occurs 4 times; then (aa, a) and (a, b) tie at 2,
    // and (aa, a) occurs first.
    assert_eq!(
        byte_pair_merges(259, &["aaabdaaabac"]),
        vec![((a, a), 256), ((256, a), 257), ((257, b), 258)]
    );
}

#[test]
fn test_byte_pair_growth_is_a_prefix() {
    let full = byte_pair_merges(320, CORPUS);
    assert!(full.len() <= 320 - 256);

    for target in [256, 257, 270, 300] {
        let merges = byte_pair_merges(target, CORPUS);
        assert_eq!(merges.len(), target - 256);
        assert_eq!(&merges[..], &full[..merges.len()]);
    }
}

#[test]
fn test_word_piece_growth_is_a_prefix() {
    let full = word_piece_vocab(120, 2, CORPUS);
    assert!(full.len() <= 120);

    for target in [40, 60, 80] {
        let vocab = word_piece_vocab(target, 2, CORPUS);
        assert!(vocab.len() <= target);
        assert_eq!(vocab.tokens(), &full.tokens()[..vocab.len()]);
    }
}

#[test]
fn test_unigram_shrinks_to_target() {
    let full = unigram_vocab(usize::MAX, CORPUS);
    for target in [200, 100, 10] {
        let vocab = unigram_vocab(target, CORPUS);
        assert_eq!(vocab.len(), target);

        // Retained substrings keep the seed order.
        let mut seed = full.iter();
        for token in vocab.iter() {
            assert!(seed.any(|s| s == token));
        }
    }
}

#[test]
fn test_word_piece_min_frequency_boundary() {
    let config = TrainConfig::new(TokenizerKind::WordPiece, 100).with_min_frequency(3);

    // (▁, a) and (a, b) occur exactly twice: below the floor.
    let below = Tokenizer::train(&config, &["ab ab"]).unwrap().tokenizer;
    assert_eq!(
        below.vocab_strings(),
        vec!["[UNK]", "[CLS]", "[SEP]", "[PAD]", "[MASK]", "▁", "a", "b"]
    );

    // Three times: at the floor.
    let at = Tokenizer::train(&config, &["ab ab ab"]).unwrap().tokenizer;
    let vocab = at.vocab_strings();
    assert_eq!(&vocab[8..], &["▁a", "▁ab"]);
}

#[test]
fn test_determinism() {
    for kind in [
        TokenizerKind::Naive,
        TokenizerKind::Char,
        TokenizerKind::WordPiece,
        TokenizerKind::Unigram,
    ] {
        let config = TrainConfig::new(kind, 300);
        let runs: Vec<Vec<String>> = (0..3)
            .map(|_| {
                Tokenizer::train(&config, CORPUS)
                    .unwrap()
                    .tokenizer
                    .vocab_strings()
            })
            .collect();
        assert_eq!(runs[0], runs[1]);
        assert_eq!(runs[1], runs[2]);
    }
}

#[test]
fn test_independent_runs_in_parallel() {
    let corpus: Arc<Vec<String>> = Arc::new(CORPUS.iter().map(|s| s.to_string()).collect());
    let expected = Tokenizer::train(&TrainConfig::new(TokenizerKind::Naive, 300), corpus.as_slice())
        .unwrap()
        .tokenizer
        .vocab_strings();

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let corpus = corpus.clone();
            thread::spawn(move || {
                Tokenizer::train(&TrainConfig::new(TokenizerKind::Naive, 300), corpus.as_slice())
                    .unwrap()
                    .tokenizer
                    .vocab_strings()
            })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), expected);
    }
}

#[test]
fn test_empty_corpus() {
    let empty: &[&str] = &[];

    let naive = Tokenizer::train(&TrainConfig::new(TokenizerKind::Naive, 300), empty)
        .unwrap()
        .tokenizer;
    assert_eq!(naive.vocab_len(), 256);

    let word_piece = Tokenizer::train(&TrainConfig::new(TokenizerKind::WordPiece, 300), empty)
        .unwrap()
        .tokenizer;
    assert_eq!(word_piece.vocab_len(), 6);

    let unigram = Tokenizer::train(&TrainConfig::new(TokenizerKind::Unigram, 300), empty)
        .unwrap()
        .tokenizer;
    assert_eq!(unigram.vocab_len(), 0);
}

#[test]
fn test_byte_level_target_below_256() {
    for kind in [TokenizerKind::Naive, TokenizerKind::Dynamic] {
        let config = TrainConfig::new(kind, 100);
        assert!(matches!(
            Tokenizer::train(&config, CORPUS),
            Err(WordforgeError::VocabSizeTooSmall { size: 100 })
        ));
    }
}

#[test]
fn test_stopped_training_returns_partial_vocab() {
    let stop = StopSignal::new();
    stop.stop();

    let config = TrainConfig::new(TokenizerKind::Naive, 400).with_stop_signal(stop.clone());
    let tokenizer = Tokenizer::train(&config, CORPUS).unwrap().tokenizer;
    assert_eq!(tokenizer.vocab_len(), 256);

    let config = TrainConfig::new(TokenizerKind::Unigram, 10).with_stop_signal(stop);
    let tokenizer = Tokenizer::train(&config, CORPUS).unwrap().tokenizer;
    assert_eq!(tokenizer.vocab_len(), unigram_vocab(usize::MAX, CORPUS).len());
}

#[test]
fn test_merges_cross_line_breaks_within_a_sample() {
    let config = TrainConfig::new(TokenizerKind::Naive, 260);

    let whole = Tokenizer::train(&config, &["ab\nab\nab\n"]).unwrap().tokenizer;
    assert_eq!(
        &whole.vocab_strings()[256..],
        &["ab", "ab\n", "ab\nab\n", "ab\nab\nab\n"]
    );

    // Samples are chunks; merges never cross them.
    let lines = Tokenizer::train(&config, &["ab", "ab", "ab"]).unwrap().tokenizer;
    assert_eq!(&lines.vocab_strings()[256..], &["ab"]);
}
