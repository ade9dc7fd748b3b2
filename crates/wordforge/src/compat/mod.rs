//! # Cross-Rust Version Compatibility

pub mod strings;
pub mod timers;
pub mod traits;
