//! Rasterization of a plot surface into RGBA frames.

/// Backend trait and frame type.
pub mod backend;
/// `vello_cpu` implementation.
pub mod cpu;
/// Font loading and text layout.
pub mod text;
/// Tick placement and labels.
pub mod ticks;
