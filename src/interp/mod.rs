//! Expansion of a sparse table into one row per animation frame.

/// Frame interpolation.
pub mod frames;
