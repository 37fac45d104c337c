//! Shared primitives used by every other module.

/// Frame, rate and canvas primitives.
pub mod core;
/// Crate error type.
pub mod error;
pub(crate) mod math;
