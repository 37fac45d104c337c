use crate::foundation::core::Canvas;
use crate::foundation::error::ChartResult;
use crate::plot::axes::Axes;

/// A rendered frame as RGBA8 pixels.
///
/// Frames are **premultiplied alpha**; the `premultiplied` flag makes this explicit at API
/// boundaries.
#[derive(Clone, Debug)]
pub struct FrameRGBA {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// RGBA8 bytes, tightly packed, row-major.
    pub data: Vec<u8>,
    /// Whether the `data` is premultiplied alpha.
    pub premultiplied: bool,
}

impl FrameRGBA {
    /// Straight-alpha RGBA8 pixel at `(x, y)`, if in bounds.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        let p = self.data.get(i..i + 4)?;
        if !self.premultiplied || p[3] == 0 || p[3] == 255 {
            return Some([p[0], p[1], p[2], p[3]]);
        }
        let un = |c: u8| ((u16::from(c) * 255 + u16::from(p[3]) / 2) / u16::from(p[3])).min(255) as u8;
        Some([un(p[0]), un(p[1]), un(p[2]), p[3]])
    }
}

/// Rasterizes a plot surface into a frame.
pub trait RenderBackend {
    /// Draw `axes` onto a fresh canvas.
    fn render_axes(&mut self, axes: &Axes) -> ChartResult<FrameRGBA>;

    /// Output dimensions.
    fn canvas(&self) -> Canvas;
}

/// Available backend kinds.
///
/// - `Cpu` is always available.
#[derive(Clone, Copy, Debug, Default)]
pub enum BackendKind {
    /// CPU raster backend powered by `vello_cpu`.
    #[default]
    Cpu,
}

/// Backend-agnostic settings.
#[derive(Clone, Debug)]
pub struct RenderSettings {
    /// Output dimensions.
    pub canvas: Canvas,
    /// Dots per inch; converts point sizes to pixels.
    pub dpi: f64,
    /// Font file contents. `None` skips all text.
    pub font: Option<Vec<u8>>,
}

/// Create a rendering backend implementation.
pub fn create_backend(
    kind: BackendKind,
    settings: &RenderSettings,
) -> ChartResult<Box<dyn RenderBackend>> {
    match kind {
        BackendKind::Cpu => Ok(Box::new(crate::render::cpu::CpuBackend::new(
            settings.clone(),
        )?)),
    }
}
