//! Encoding sinks.
//!
//! Sinks consume rendered frames in strictly increasing order and are driven by
//! [`crate::anim::Animation::render_into`].

use std::path::Path;

use crate::foundation::error::{ChartError, ChartResult};
use crate::foundation::math::flatten_premul_over_bg;
use crate::render::backend::FrameRGBA;

/// `ffmpeg`-based sinks (video output via system `ffmpeg`).
pub mod ffmpeg;
/// Animated GIF sink.
pub mod gif;
/// Embeddable HTML5 video.
pub mod html;
/// Generic frame sink trait and built-in sinks.
pub mod sink;

/// Pick the sink for `path` by extension: `gif` goes to [`gif::GifSink`], the rest to ffmpeg.
pub fn sink_for_path(path: &Path) -> Box<dyn sink::FrameSink> {
    let is_gif = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("gif"));
    if is_gif {
        Box::new(gif::GifSink::new(gif::GifSinkOpts::new(path)))
    } else {
        Box::new(ffmpeg::FfmpegSink::new(ffmpeg::FfmpegSinkOpts::new(path)))
    }
}

/// Write `frame` to `path` as an opaque PNG over a white background.
pub fn write_png(path: &Path, frame: &FrameRGBA) -> ChartResult<()> {
    ffmpeg::ensure_parent_dir(path)?;
    let data = if frame.premultiplied {
        let mut out = vec![0u8; frame.data.len()];
        flatten_premul_over_bg(&mut out, &frame.data, [255, 255, 255, 255]);
        out
    } else {
        frame.data.clone()
    };
    image::save_buffer_with_format(
        path,
        &data,
        frame.width,
        frame.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .map_err(|e| ChartError::encode(format!("write png '{}': {e}", path.display())))
}

#[cfg(test)]
#[path = "../../tests/unit/encode/mod.rs"]
mod tests;
