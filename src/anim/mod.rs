//! Animation driver: plays a chart from frame 0 to the end into a sink.

/// Frame loop and exports.
pub mod driver;

pub use driver::{Animation, RenderStats};
