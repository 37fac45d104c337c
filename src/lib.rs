//! Chartreel renders animated line and scatter charts from tabular data.
//!
//! A sparse, irregularly indexed [`Table`] is expanded into one row per animation frame, then a
//! [`Chart`] steps through those frames, growing its series, rescaling its axes and updating a
//! period label. The [`Animation`] driver rasterizes each step on the CPU and streams it into a
//! [`FrameSink`]:
//!
//! - `save("out.gif")` / `save("out.mp4")` for files
//! - [`Animation::to_html5_video`] for an embeddable `<video>` element
//! - [`Animation::render_frame`] for a single still
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

/// Animation driver.
pub mod anim;
/// Chart construction, configuration and per-frame stepping.
pub mod chart;
/// Color parsing and palettes.
pub mod color;
/// Frame sinks and video/GIF encoders.
pub mod encode;
/// Frame interpolation.
pub mod interp;
/// Plot surface.
pub mod plot;
/// Rasterization.
pub mod render;
/// Input tables.
pub mod table;

pub use crate::foundation::core::{Canvas, Fps, FrameIndex, Point, Rect};
pub use crate::foundation::error::{ChartError, ChartResult};

pub use crate::anim::{Animation, RenderStats};
pub use crate::chart::Chart;
pub use crate::chart::config::{
    ChartConfig, ChartKind, LabelPlacement, MarkerSize, PeriodLabel, PeriodLabelStyle,
};
pub use crate::color::palette::{ColorSpec, resolve_colors};
pub use crate::color::parse::{Color, parse_color};
pub use crate::encode::ffmpeg::{FfmpegSink, FfmpegSinkOpts, VideoCodec, is_ffmpeg_on_path};
pub use crate::encode::gif::{GifSink, GifSinkOpts};
pub use crate::encode::html::Html5Video;
pub use crate::encode::sink::{FrameSink, InMemorySink, SinkConfig};
pub use crate::encode::{sink_for_path, write_png};
pub use crate::interp::frames::{InterpolateOpts, InterpolatedTable, interpolate_frames};
pub use crate::plot::axes::{AxisKind, Axes};
pub use crate::render::backend::{BackendKind, FrameRGBA, RenderBackend, RenderSettings};
pub use crate::render::cpu::CpuBackend;
pub use crate::table::model::{
    Column, ColumnData, IndexKind, IndexValue, PeriodIndex, Table, TableBuilder,
};
pub use crate::table::select::data_columns;
