//! Small shared types used across the warden crates.

/// Async future aliases.
pub mod future;
/// Human-readable duration breakdown.
pub mod time;

pub use future::BoxFutureSend;
pub use time::Time;
