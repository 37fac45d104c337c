use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use image::codecs::gif::{GifEncoder, Repeat};

use crate::encode::ffmpeg::ensure_parent_dir;
use crate::encode::sink::{FrameSink, SinkConfig, check_frame};
use crate::foundation::core::{Fps, FrameIndex};
use crate::foundation::error::{ChartError, ChartResult};
use crate::foundation::math::flatten_premul_over_bg;
use crate::render::backend::FrameRGBA;

/// Options for [`GifSink`].
#[derive(Clone, Debug)]
pub struct GifSinkOpts {
    /// Output file path.
    pub out_path: PathBuf,
    /// Background the frames are flattened over (GIF has no partial alpha).
    pub bg_rgba: [u8; 4],
    /// Loop forever instead of playing once.
    pub looping: bool,
}

impl GifSinkOpts {
    /// Looping GIF on a white background.
    pub fn new(out_path: impl Into<PathBuf>) -> Self {
        Self {
            out_path: out_path.into(),
            bg_rgba: [255, 255, 255, 255],
            looping: true,
        }
    }
}

/// Sink that writes an animated GIF with the `image` crate's encoder.
///
/// Each frame is shown for `1000 * den / num` milliseconds.
pub struct GifSink {
    opts: GifSinkOpts,
    encoder: Option<GifEncoder<BufWriter<File>>>,
    cfg: Option<SinkConfig>,
    delay: Option<image::Delay>,
    last_idx: Option<FrameIndex>,
}

impl GifSink {
    /// Create a sink writing to `opts.out_path`.
    pub fn new(opts: GifSinkOpts) -> Self {
        Self {
            opts,
            encoder: None,
            cfg: None,
            delay: None,
            last_idx: None,
        }
    }
}

impl FrameSink for GifSink {
    fn begin(&mut self, cfg: SinkConfig) -> ChartResult<()> {
        if cfg.width == 0 || cfg.height == 0 {
            return Err(ChartError::encode("gif sink width/height must be non-zero"));
        }
        if cfg.width > u32::from(u16::MAX) || cfg.height > u32::from(u16::MAX) {
            return Err(ChartError::encode(format!(
                "gif frames are limited to 65535x65535, got {}x{}",
                cfg.width, cfg.height
            )));
        }
        if cfg.fps.num == 0 || cfg.fps.den == 0 {
            return Err(ChartError::encode("fps must be non-zero"));
        }

        ensure_parent_dir(&self.opts.out_path)?;
        let file = File::create(&self.opts.out_path).map_err(|e| {
            ChartError::encode(format!(
                "create '{}': {e}",
                self.opts.out_path.display()
            ))
        })?;
        let mut encoder = GifEncoder::new(BufWriter::new(file));
        let repeat = if self.opts.looping {
            Repeat::Infinite
        } else {
            Repeat::Finite(0)
        };
        encoder
            .set_repeat(repeat)
            .map_err(|e| ChartError::encode(format!("gif header: {e}")))?;

        tracing::debug!(
            out = %self.opts.out_path.display(),
            width = cfg.width,
            height = cfg.height,
            "gif started"
        );
        self.delay = Some(frame_delay(cfg.fps));
        self.encoder = Some(encoder);
        self.cfg = Some(cfg);
        self.last_idx = None;
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRGBA) -> ChartResult<()> {
        let (Some(cfg), Some(delay), Some(encoder)) =
            (self.cfg.as_ref(), self.delay, self.encoder.as_mut())
        else {
            return Err(ChartError::encode("gif sink not started"));
        };
        if let Some(last) = self.last_idx
            && idx <= last
        {
            return Err(ChartError::encode(
                "gif sink received out-of-order frame index",
            ));
        }
        self.last_idx = Some(idx);
        check_frame(cfg, frame)?;

        let mut opaque = vec![0u8; frame.data.len()];
        if frame.premultiplied {
            flatten_premul_over_bg(&mut opaque, &frame.data, self.opts.bg_rgba);
        } else {
            opaque.copy_from_slice(&frame.data);
        }
        let buffer = image::RgbaImage::from_raw(cfg.width, cfg.height, opaque)
            .ok_or_else(|| ChartError::encode("gif frame buffer has the wrong length"))?;
        encoder
            .encode_frame(image::Frame::from_parts(buffer, 0, 0, delay))
            .map_err(|e| ChartError::encode(format!("gif frame {}: {e}", idx.0)))
    }

    fn end(&mut self) -> ChartResult<()> {
        let encoder = self
            .encoder
            .take()
            .ok_or_else(|| ChartError::encode("gif sink not started"))?;
        // Dropping the encoder writes the GIF trailer and flushes the file.
        drop(encoder);
        tracing::debug!(out = %self.opts.out_path.display(), "gif finished");
        self.cfg = None;
        self.delay = None;
        Ok(())
    }
}

/// Per-frame delay of `fps`; very long periods saturate instead of overflowing.
fn frame_delay(fps: Fps) -> image::Delay {
    let secs = f64::from(fps.den) / f64::from(fps.num.max(1));
    image::Delay::from_saturating_duration(std::time::Duration::from_secs_f64(secs))
}

#[cfg(test)]
#[path = "../../tests/unit/encode/gif.rs"]
mod tests;
