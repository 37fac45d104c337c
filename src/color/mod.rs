//! Series colors: single color parsing and palette/colormap resolution.

/// Palettes, colormaps and [`palette::ColorSpec`] resolution.
pub mod palette;
/// Single color parsing.
pub mod parse;
