//! Backend-agnostic plot surface.

/// Axes, artists and view limits.
pub mod axes;
