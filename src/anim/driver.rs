use std::path::{Path, PathBuf};

use crate::chart::Chart;
use crate::chart::config::ChartConfig;
use crate::encode::ffmpeg::{FfmpegSink, FfmpegSinkOpts};
use crate::encode::html::Html5Video;
use crate::encode::sink::{FrameSink, SinkConfig};
use crate::encode::sink_for_path;
use crate::foundation::core::{Canvas, Fps, FrameIndex};
use crate::foundation::error::{ChartError, ChartResult};
use crate::render::backend::{BackendKind, FrameRGBA, RenderBackend, RenderSettings, create_backend};
use crate::render::text::load_font;
use crate::table::model::Table;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
/// Counters for one export run.
pub struct RenderStats {
    /// Frames pushed to the sink.
    pub frames_rendered: u64,
    /// Playback length in milliseconds.
    pub duration_ms: f64,
}

/// Drives a [`Chart`] through all of its frames and hands the rasters to a sink.
///
/// Every run (`save`, `to_html5_video`, `render_into`, `render_frame`) starts again from frame 0.
pub struct Animation {
    chart: Chart,
    backend: Box<dyn RenderBackend>,
    fps: Fps,
}

impl Animation {
    /// Build the chart and a CPU backend sized from `config`.
    #[tracing::instrument(skip(table, config))]
    pub fn new(table: &Table, config: ChartConfig) -> ChartResult<Self> {
        let chart = Chart::new(table, config)?;
        let config = chart.config();
        let settings = RenderSettings {
            canvas: config.canvas()?,
            dpi: config.resolution,
            font: load_font(config.font_path.as_deref())?,
        };
        let backend = create_backend(BackendKind::Cpu, &settings)?;
        Self::with_backend(chart, backend)
    }

    /// Drive `chart` with a caller-provided backend.
    pub fn with_backend(chart: Chart, backend: Box<dyn RenderBackend>) -> ChartResult<Self> {
        let fps = chart.config().fps()?;
        Ok(Self {
            chart,
            backend,
            fps,
        })
    }

    /// The chart being animated.
    pub fn chart(&self) -> &Chart {
        &self.chart
    }

    /// Number of frames in one run.
    pub fn frame_count(&self) -> usize {
        self.chart.frame_count()
    }

    /// Milliseconds between frames.
    pub fn interval_ms(&self) -> f64 {
        self.chart.config().interval_ms()
    }

    /// Playback frame rate.
    pub fn fps(&self) -> Fps {
        self.fps
    }

    /// Output size in pixels.
    pub fn canvas(&self) -> Canvas {
        self.backend.canvas()
    }

    /// Render every frame in order into `sink`.
    #[tracing::instrument(skip(self, sink), fields(frames = self.frame_count()))]
    pub fn render_into(&mut self, sink: &mut dyn FrameSink) -> ChartResult<RenderStats> {
        let canvas = self.canvas();
        let frame_count = self.frame_count();
        sink.begin(SinkConfig {
            width: canvas.width,
            height: canvas.height,
            fps: self.fps,
            frame_count: frame_count as u64,
        })?;

        self.chart.init();
        let mut stats = RenderStats::default();
        for i in 0..frame_count {
            self.chart.step(i)?;
            let frame = self.backend.render_axes(self.chart.axes())?;
            sink.push_frame(FrameIndex(i as u64), &frame)?;
            stats.frames_rendered += 1;
        }
        sink.end()?;

        stats.duration_ms = stats.frames_rendered as f64 * self.fps.frame_interval_ms();
        tracing::debug!(
            frames = stats.frames_rendered,
            duration_ms = stats.duration_ms,
            "export run finished"
        );
        Ok(stats)
    }

    /// Encode the animation to `path`; a `.gif` extension selects the GIF encoder, anything else
    /// goes through ffmpeg.
    pub fn save(&mut self, path: impl AsRef<Path>) -> ChartResult<RenderStats> {
        let path = path.as_ref();
        let mut sink = sink_for_path(path);
        self.render_into(sink.as_mut())
    }

    /// Encode an H.264 MP4 in memory, ready to embed in HTML.
    pub fn to_html5_video(&mut self) -> ChartResult<Html5Video> {
        let tmp = TempFileGuard(Some(std::env::temp_dir().join(format!(
            "chartreel_{}_{}.mp4",
            std::process::id(),
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.as_nanos())
                .unwrap_or(0)
        ))));
        let path = tmp.path()?.to_path_buf();

        let mut sink = FfmpegSink::new(FfmpegSinkOpts::new(&path));
        self.render_into(&mut sink)?;
        let mp4 = std::fs::read(&path)
            .map_err(|e| ChartError::encode(format!("read '{}': {e}", path.display())))?;

        let canvas = self.canvas();
        Ok(Html5Video {
            mp4,
            width: canvas.width,
            height: canvas.height,
        })
    }

    /// Rasterize frame `i` as it appears during playback (frames `0..=i` are stepped first).
    pub fn render_frame(&mut self, i: usize) -> ChartResult<FrameRGBA> {
        if i >= self.frame_count() {
            return Err(ChartError::render(format!(
                "frame {i} is out of range (0..{})",
                self.frame_count()
            )));
        }
        self.chart.init();
        for k in 0..=i {
            self.chart.step(k)?;
        }
        self.backend.render_axes(self.chart.axes())
    }
}

impl std::fmt::Debug for Animation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Animation")
            .field("chart", &self.chart)
            .field("canvas", &self.backend.canvas())
            .field("fps", &self.fps)
            .finish()
    }
}

struct TempFileGuard(Option<PathBuf>);

impl TempFileGuard {
    fn path(&self) -> ChartResult<&Path> {
        self.0
            .as_deref()
            .ok_or_else(|| ChartError::encode("temporary file path is missing"))
    }
}

impl Drop for TempFileGuard {
    fn drop(&mut self) {
        if let Some(path) = self.0.take() {
            let _ = std::fs::remove_file(path);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/anim/driver.rs"]
mod tests;
