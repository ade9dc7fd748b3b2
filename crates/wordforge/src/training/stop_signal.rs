//! # Training Interruption

use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

/// A clonable flag used to interrupt a training run.
///
/// Trainers check the flag between steps; an interrupted run
/// returns the vocabulary achieved so far.
#[derive(Debug, Clone, Default)]
pub struct StopSignal {
    flag: Arc<AtomicBool>,
}

impl StopSignal {
    /// Create a new, un-raised signal.
    pub fn new() -> Self {
        Self::default()
    }

    /// Raise the signal; visible to every clone.
    pub fn stop(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    /// Has the signal been raised?
    pub fn is_stopped(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }
}

/// Is the (optional) signal raised?
pub(crate) fn should_stop(signal: &Option<StopSignal>) -> bool {
    signal.as_ref().is_some_and(StopSignal::is_stopped)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stop_signal_clones_share_state() {
        let signal = StopSignal::new();
        let other = signal.clone();
        assert!(!other.is_stopped());
        assert!(!should_stop(&Some(other.clone())));
        assert!(!should_stop(&None));

        signal.stop();
        assert!(other.is_stopped());
        assert!(should_stop(&Some(other)));
    }
}
