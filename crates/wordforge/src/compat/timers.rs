//! # Time Utilities

use std::time::{Duration, Instant};

/// Time an operation; return (duration, result).
pub fn timeit<F, R>(f: F) -> (Duration, R)
where
    F: FnOnce() -> R,
{
    let t0 = Instant::now();
    let ret = f();
    (t0.elapsed(), ret)
}
