use crate::foundation::core::{Fps, FrameIndex};
use crate::foundation::error::{ChartError, ChartResult};
use crate::render::backend::FrameRGBA;

/// Configuration provided to a [`FrameSink`] before the first frame of an export run.
#[derive(Debug, Clone, PartialEq)]
pub struct SinkConfig {
    /// Output width in pixels.
    pub width: u32,
    /// Output height in pixels.
    pub height: u32,
    /// Output frames-per-second.
    pub fps: Fps,
    /// Number of frames that will be pushed.
    pub frame_count: u64,
}

/// Sink contract for consuming rendered chart frames.
///
/// Ordering contract: `push_frame` is called in strictly increasing `FrameIndex` order.
pub trait FrameSink: Send {
    /// Called once before any frames are pushed.
    fn begin(&mut self, cfg: SinkConfig) -> ChartResult<()>;
    /// Push one frame in strictly increasing frame order.
    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRGBA) -> ChartResult<()>;
    /// Called once after the last frame is pushed.
    fn end(&mut self) -> ChartResult<()>;
}

/// In-memory sink for tests and debugging.
#[derive(Debug, Default)]
pub struct InMemorySink {
    cfg: Option<SinkConfig>,
    /// Frames in order.
    pub(crate) frames: Vec<(FrameIndex, FrameRGBA)>,
    finished: bool,
}

impl InMemorySink {
    /// Create a new in-memory sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the sink configuration captured in `begin`, if any.
    pub fn config(&self) -> Option<SinkConfig> {
        self.cfg.clone()
    }

    /// Borrow the captured frames.
    pub fn frames(&self) -> &[(FrameIndex, FrameRGBA)] {
        &self.frames
    }

    /// Whether `end` was called after the last `begin`.
    pub fn is_finished(&self) -> bool {
        self.finished
    }
}

impl FrameSink for InMemorySink {
    fn begin(&mut self, cfg: SinkConfig) -> ChartResult<()> {
        self.cfg = Some(cfg);
        self.frames.clear();
        self.finished = false;
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRGBA) -> ChartResult<()> {
        if self.cfg.is_none() {
            return Err(ChartError::encode("in-memory sink not started"));
        }
        if let Some((last, _)) = self.frames.last()
            && idx <= *last
        {
            return Err(ChartError::encode(
                "in-memory sink received out-of-order frame index",
            ));
        }
        self.frames.push((idx, frame.clone()));
        Ok(())
    }

    fn end(&mut self) -> ChartResult<()> {
        self.finished = true;
        Ok(())
    }
}

/// Check a frame against the size announced in `begin`.
pub(crate) fn check_frame(cfg: &SinkConfig, frame: &FrameRGBA) -> ChartResult<()> {
    if frame.width != cfg.width || frame.height != cfg.height {
        return Err(ChartError::encode(format!(
            "frame size mismatch: got {}x{}, expected {}x{}",
            frame.width, frame.height, cfg.width, cfg.height
        )));
    }
    if frame.data.len() != (cfg.width as usize) * (cfg.height as usize) * 4 {
        return Err(ChartError::encode(
            "frame.data size mismatch with width*height*4",
        ));
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/encode/sink.rs"]
mod tests;
