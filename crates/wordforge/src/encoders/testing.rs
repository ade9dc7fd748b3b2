//! # Encoder Test Utilities

use std::sync::Arc;

use crate::{
    compat::traits::static_is_send_sync_check,
    decoders::{BytePairDecoder, TokenDecoder},
    encoders::TokenEncoder,
    vocab::BytePairVocab,
};

/// The merges learned from ``"aaabdaaabac"``: ``aa``, ``aaa``, ``aaab``.
pub fn classic_vocab() -> Arc<BytePairVocab<u32>> {
    let a = b'a' as u32;
    let b = b'b' as u32;
    Arc::new(
        BytePairVocab::from_merges(vec![((a, a), 256), ((256, a), 257), ((257, b), 258)])
            .unwrap(),
    )
}

/// Common [`TokenEncoder`] tests; every sample must round trip.
pub fn common_encoder_tests<E: TokenEncoder<u32> + Clone>(
    vocab: &Arc<BytePairVocab<u32>>,
    encoder: &E,
) {
    static_is_send_sync_check(encoder);

    // Verify:
    // - clone
    // - Arc compat.
    let encoder: Arc<E> = encoder.clone().into();

    let samples = vec![
        "hello world",
        "aaabdaaabac aaab",
        "it's not the heat, it's the salt",
        "snow ☃ and 雪",
        "",
    ];

    let decoder = BytePairDecoder::new(vocab.clone());
    static_is_send_sync_check(&decoder);

    let token_batch = encoder.encode_batch(&samples);
    assert_eq!(token_batch.len(), samples.len());

    for (sample, tokens) in samples.iter().zip(token_batch.iter()) {
        assert_eq!(tokens, &encoder.encode(sample));
        assert!(tokens.len() <= sample.len());
        assert_eq!(&decoder.try_decode_to_string(tokens).unwrap(), sample);
    }
}
