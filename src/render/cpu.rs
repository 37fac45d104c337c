use kurbo::{BezPath, Circle, Shape};

use crate::color::parse::Color;
use crate::foundation::core::{Canvas, Point, Rect};
use crate::foundation::error::{ChartError, ChartResult};
use crate::plot::axes::{AxisKind, Axes, HAlign, TextStyle, VAlign};
use crate::render::backend::{FrameRGBA, RenderBackend, RenderSettings};
use crate::render::text::{TextBrushRgba8, TextLayoutEngine};
use crate::render::ticks::{Tick, axis_ticks, nonsingular};

const FIGURE_BG: [u8; 4] = [255, 255, 255, 255];
// Matplotlib's ".9" grey.
const AXES_FACE: [u8; 4] = [230, 230, 230, 255];
const GRID: [u8; 4] = [255, 255, 255, 255];
const TICK_LABEL: [u8; 4] = [0, 0, 0, 255];

const X_TICKS: usize = 6;
const Y_TICKS: usize = 5;

// Sizes in points.
const MARGIN_PT: f64 = 8.0;
const TICK_PAD_PT: f64 = 2.0;
const GRID_WIDTH_PT: f64 = 0.8;
const TITLE_SIZE_PT: f64 = 12.0;
const TITLE_PAD_PT: f64 = 6.0;

struct PreparedText {
    layout: parley::Layout<TextBrushRgba8>,
    width: f64,
    height: f64,
}

/// CPU backend powered by `vello_cpu` for vector/text rasterization.
pub struct CpuBackend {
    settings: RenderSettings,
    width: u16,
    height: u16,
    ctx: Option<vello_cpu::RenderContext>,
    text_engine: Option<TextLayoutEngine>,
}

impl CpuBackend {
    /// Create a backend for `settings`. Font bytes that fail to register are an error.
    pub fn new(settings: RenderSettings) -> ChartResult<Self> {
        let to_u16 = |v: u32, what: &str| {
            u16::try_from(v)
                .ok()
                .filter(|&v| v > 0)
                .ok_or_else(|| ChartError::render(format!("canvas {what} {v} is out of range")))
        };
        let width = to_u16(settings.canvas.width, "width")?;
        let height = to_u16(settings.canvas.height, "height")?;
        if !(settings.dpi.is_finite() && settings.dpi > 0.0) {
            return Err(ChartError::render("dpi must be finite and > 0"));
        }
        let text_engine = settings
            .font
            .clone()
            .map(TextLayoutEngine::new)
            .transpose()?;
        Ok(Self {
            settings,
            width,
            height,
            ctx: None,
            text_engine,
        })
    }

    fn pt(&self, v: f64) -> f64 {
        v * self.settings.dpi / 72.0
    }

    fn with_ctx_mut<R>(
        &mut self,
        f: impl FnOnce(&mut Self, &mut vello_cpu::RenderContext) -> ChartResult<R>,
    ) -> ChartResult<R> {
        let (width, height) = (self.width, self.height);
        let mut ctx = match self.ctx.take() {
            Some(ctx) if ctx.width() == width && ctx.height() == height => ctx,
            _ => vello_cpu::RenderContext::new(width, height),
        };
        ctx.reset();
        let out = f(self, &mut ctx)?;
        self.ctx = Some(ctx);
        Ok(out)
    }

    fn prepare(&mut self, text: &str, size_pt: f64, color: [u8; 4]) -> ChartResult<Option<PreparedText>> {
        let size_px = self.pt(size_pt) as f32;
        let Some(engine) = self.text_engine.as_mut() else {
            return Ok(None);
        };
        if text.is_empty() {
            return Ok(None);
        }
        let layout = engine.layout_line(text, size_px, TextBrushRgba8::from(color))?;
        Ok(Some(PreparedText {
            width: f64::from(layout.width()),
            height: f64::from(layout.height()),
            layout,
        }))
    }

    fn prepare_ticks(&mut self, ticks: &[Tick], size_pt: f64) -> ChartResult<Vec<Option<PreparedText>>> {
        ticks
            .iter()
            .map(|t| self.prepare(&t.label, size_pt, TICK_LABEL))
            .collect()
    }

    fn draw_text(&self, ctx: &mut vello_cpu::RenderContext, text: &PreparedText, origin: Point) {
        let Some(engine) = self.text_engine.as_ref() else {
            return;
        };
        ctx.set_transform(vello_cpu::kurbo::Affine::translate((origin.x, origin.y)));
        for line in text.layout.lines() {
            for item in line.items() {
                let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                    continue;
                };
                let brush = run.style().brush;
                ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
                    brush.r, brush.g, brush.b, brush.a,
                ));
                let glyphs = run.glyphs().map(|g| vello_cpu::Glyph {
                    id: g.id,
                    x: g.x,
                    y: g.y,
                });
                ctx.glyph_run(engine.font())
                    .font_size(run.run().font_size())
                    .fill_glyphs(glyphs);
            }
        }
        ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
    }
}

/// Pixel rectangle of the axes plus the data-to-pixel mapping.
#[derive(Clone, Copy, Debug)]
struct PlotArea {
    rect: Rect,
    x: (f64, f64),
    y: (f64, f64),
}

impl PlotArea {
    fn px(&self, x: f64, y: f64) -> Point {
        let (x0, x1) = self.x;
        let (y0, y1) = self.y;
        Point::new(
            self.rect.x0 + (x - x0) / (x1 - x0) * self.rect.width(),
            self.rect.y1 - (y - y0) / (y1 - y0) * self.rect.height(),
        )
    }

    fn fraction(&self, fx: f64, fy: f64) -> Point {
        Point::new(
            self.rect.x0 + fx * self.rect.width(),
            self.rect.y1 - fy * self.rect.height(),
        )
    }
}

/// Top-left corner of a `w x h` box anchored at `at`.
fn aligned_origin(at: Point, w: f64, h: f64, style: &TextStyle) -> Point {
    let x = match style.ha {
        HAlign::Left => at.x,
        HAlign::Center => at.x - w / 2.0,
        HAlign::Right => at.x - w,
    };
    let y = match style.va {
        VAlign::Bottom => at.y - h,
        VAlign::Center => at.y - h / 2.0,
        VAlign::Top => at.y,
    };
    Point::new(x, y)
}

fn paint(c: [u8; 4]) -> vello_cpu::peniko::Color {
    vello_cpu::peniko::Color::from_rgba8(c[0], c[1], c[2], c[3])
}

fn paint_color(c: Color) -> vello_cpu::peniko::Color {
    paint(c.to_rgba8())
}

fn rect_to_cpu(r: Rect) -> vello_cpu::kurbo::Rect {
    vello_cpu::kurbo::Rect::new(r.x0, r.y0, r.x1, r.y1)
}

fn bezpath_to_cpu(path: &BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(vello_cpu::kurbo::Point::new(p.x, p.y)),
            PathEl::LineTo(p) => out.line_to(vello_cpu::kurbo::Point::new(p.x, p.y)),
            PathEl::QuadTo(p1, p2) => out.quad_to(
                vello_cpu::kurbo::Point::new(p1.x, p1.y),
                vello_cpu::kurbo::Point::new(p2.x, p2.y),
            ),
            PathEl::CurveTo(p1, p2, p3) => out.curve_to(
                vello_cpu::kurbo::Point::new(p1.x, p1.y),
                vello_cpu::kurbo::Point::new(p2.x, p2.y),
                vello_cpu::kurbo::Point::new(p3.x, p3.y),
            ),
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

/// Polyline through `points`, broken at missing values.
fn polyline(area: &PlotArea, points: &[(f64, Option<f64>)]) -> BezPath {
    let mut path = BezPath::new();
    let mut pen_down = false;
    for &(x, y) in points {
        match y {
            Some(y) => {
                let p = area.px(x, y);
                if pen_down {
                    path.line_to(p);
                } else {
                    path.move_to(p);
                    pen_down = true;
                }
            }
            None => pen_down = false,
        }
    }
    path
}

impl RenderBackend for CpuBackend {
    #[tracing::instrument(skip_all, fields(lines = axes.lines().len(), markers = axes.collections().len()))]
    fn render_axes(&mut self, axes: &Axes) -> ChartResult<FrameRGBA> {
        let (w, h) = (f64::from(self.width), f64::from(self.height));

        let (x0, x1) = axes.xlim();
        let (y0, y1) = axes.ylim();
        let x = nonsingular(x0, x1);
        let y = nonsingular(y0, y1);
        let x_ticks = axis_ticks(axes.x_kind(), x.0, x.1, X_TICKS);
        let y_ticks = axis_ticks(&AxisKind::Numeric, y.0, y.1, Y_TICKS);

        let tick_size = axes.tick_label_size();
        let x_labels = self.prepare_ticks(&x_ticks, tick_size)?;
        let y_labels = self.prepare_ticks(&y_ticks, tick_size)?;
        let title = match axes.title() {
            Some(t) => self.prepare(t, TITLE_SIZE_PT, TICK_LABEL)?,
            None => None,
        };
        let texts = axes
            .texts()
            .iter()
            .map(|t| self.prepare(&t.content, t.style.size, t.style.color.to_rgba8()))
            .collect::<ChartResult<Vec<_>>>()?;

        let margin = self.pt(MARGIN_PT);
        let pad = self.pt(TICK_PAD_PT);
        let y_label_w = y_labels.iter().flatten().map(|t| t.width).fold(0.0, f64::max);
        let x_label_h = x_labels.iter().flatten().map(|t| t.height).fold(0.0, f64::max);
        let title_h = title.as_ref().map_or(0.0, |t| t.height + self.pt(TITLE_PAD_PT));

        let rect = Rect::new(
            margin + y_label_w + pad,
            margin + title_h,
            w - margin,
            h - margin - x_label_h - pad,
        );
        if rect.width() < 1.0 || rect.height() < 1.0 {
            return Err(ChartError::render(format!(
                "canvas {}x{} leaves no room for the axes",
                self.width, self.height
            )));
        }
        let area = PlotArea { rect, x, y };
        let grid_w = self.pt(GRID_WIDTH_PT);

        let frame = self.with_ctx_mut(|this, ctx| {
            ctx.set_paint(paint(FIGURE_BG));
            ctx.fill_rect(&vello_cpu::kurbo::Rect::new(0.0, 0.0, w, h));

            ctx.set_paint(paint(AXES_FACE));
            ctx.fill_rect(&rect_to_cpu(rect));

            // Vertical grid below the data.
            ctx.set_paint(paint(GRID));
            for t in &x_ticks {
                let px = area.px(t.value, y.0).x;
                if px < rect.x0 || px > rect.x1 {
                    continue;
                }
                ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
                    px - grid_w / 2.0,
                    rect.y0,
                    px + grid_w / 2.0,
                    rect.y1,
                ));
            }

            let clip = bezpath_to_cpu(&rect.to_path(0.1));
            ctx.push_clip_layer(&clip);
            for line in axes.lines() {
                let path = polyline(&area, &line.points);
                if path.elements().len() < 2 {
                    continue;
                }
                ctx.set_stroke(
                    vello_cpu::kurbo::Stroke::new(this.pt(line.width))
                        .with_join(vello_cpu::kurbo::Join::Round),
                );
                ctx.set_paint(paint_color(line.color));
                ctx.stroke_path(&bezpath_to_cpu(&path));
            }
            for coll in axes.collections() {
                let radius = this.pt(coll.size.max(0.0).sqrt() / 2.0);
                if radius <= 0.0 {
                    continue;
                }
                ctx.set_paint(paint_color(coll.color));
                let mut markers = BezPath::new();
                for &(px, py) in &coll.points {
                    let Some(py) = py else {
                        continue;
                    };
                    markers.extend(Circle::new(area.px(px, py), radius).path_elements(0.1));
                }
                if !markers.elements().is_empty() {
                    ctx.fill_path(&bezpath_to_cpu(&markers));
                }
            }
            ctx.pop_layer();

            for (tick, label) in y_ticks.iter().zip(&y_labels) {
                let Some(label) = label else { continue };
                let py = area.px(x.0, tick.value).y;
                if py < rect.y0 - 0.5 || py > rect.y1 + 0.5 {
                    continue;
                }
                let at = Point::new(rect.x0 - pad, py - label.height / 2.0);
                this.draw_text(ctx, label, Point::new(at.x - label.width, at.y));
            }
            for (tick, label) in x_ticks.iter().zip(&x_labels) {
                let Some(label) = label else { continue };
                let px = area.px(tick.value, y.0).x;
                if px < rect.x0 - 0.5 || px > rect.x1 + 0.5 {
                    continue;
                }
                this.draw_text(ctx, label, Point::new(px - label.width / 2.0, rect.y1 + pad));
            }
            if let Some(title) = &title {
                let origin = Point::new(
                    rect.x0 + (rect.width() - title.width) / 2.0,
                    rect.y0 - this.pt(TITLE_PAD_PT) - title.height,
                );
                this.draw_text(ctx, title, origin);
            }
            for (artist, prepared) in axes.texts().iter().zip(&texts) {
                let Some(prepared) = prepared else { continue };
                let at = area.fraction(artist.x, artist.y);
                let origin = aligned_origin(at, prepared.width, prepared.height, &artist.style);
                this.draw_text(ctx, prepared, origin);
            }

            ctx.flush();
            let mut pixmap = vello_cpu::Pixmap::new(this.width, this.height);
            ctx.render_to_pixmap(&mut pixmap);
            Ok(FrameRGBA {
                width: u32::from(this.width),
                height: u32::from(this.height),
                data: pixmap.data_as_u8_slice().to_vec(),
                premultiplied: true,
            })
        })?;
        Ok(frame)
    }

    fn canvas(&self) -> Canvas {
        self.settings.canvas
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
