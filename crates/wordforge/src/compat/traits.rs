//! # Trait Checks

/// Compile-time check that a value may be shared across worker threads.
///
/// Trained vocabularies, encoders and decoders are read concurrently
/// by batch tokenization; tests call this on each of them.
pub fn static_is_send_sync_check<S: Send + Sync>(_: &S) {}
