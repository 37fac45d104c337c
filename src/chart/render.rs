use crate::chart::config::{ChartKind, MarkerSize};
use crate::color::parse::Color;
use crate::foundation::error::{ChartError, ChartResult};
use crate::interp::frames::InterpolatedTable;
use crate::plot::axes::{Axes, Line, PointCollection};

/// Derived data shared by every renderer variant, fixed for the chart's lifetime.
#[derive(Clone, Debug)]
pub struct ChartContext {
    table: InterpolatedTable,
    colors: Vec<Color>,
}

impl ChartContext {
    /// Bundle the interpolated table with its series colors.
    pub fn new(table: InterpolatedTable, colors: Vec<Color>) -> ChartResult<Self> {
        if colors.is_empty() {
            return Err(ChartError::config("at least one series color is required"));
        }
        Ok(Self { table, colors })
    }

    /// The frame table.
    pub fn table(&self) -> &InterpolatedTable {
        &self.table
    }

    /// Number of plotted series (data columns).
    pub fn series_count(&self) -> usize {
        self.table.data_columns().len()
    }

    /// Color of series `col`. Short palettes cycle.
    pub fn color(&self, col: usize) -> Color {
        self.colors[col % self.colors.len()]
    }

    /// One color per series, in series order.
    pub fn series_colors(&self) -> Vec<Color> {
        (0..self.series_count()).map(|c| self.color(c)).collect()
    }
}

/// Append-only `(x, y)` sequences, one per series, indexed by series position.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SeriesArena {
    series: Vec<Vec<(f64, Option<f64>)>>,
}

impl SeriesArena {
    /// Empty arena for `n` series.
    pub fn new(n: usize) -> Self {
        Self {
            series: vec![Vec::new(); n],
        }
    }

    /// Append frame `i` of every series.
    pub fn push_frame(&mut self, table: &InterpolatedTable, i: usize) {
        let x = table.x_coord(i);
        for (col, s) in self.series.iter_mut().enumerate() {
            s.push((x, table.value(col, i)));
        }
    }

    /// Points accumulated for series `col`.
    pub fn get(&self, col: usize) -> &[(f64, Option<f64>)] {
        self.series.get(col).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Drop every accumulated point, keeping the series slots.
    pub fn clear(&mut self) {
        for s in &mut self.series {
            s.clear();
        }
    }
}

/// Growing lines.
#[derive(Clone, Debug)]
pub struct LineRenderer {
    line_width: f64,
    arena: SeriesArena,
}

#[derive(Clone, Debug, PartialEq)]
enum SizeSource {
    Constant(f64),
    Column(usize),
}

/// Accumulating markers.
#[derive(Clone, Debug)]
pub struct ScatterRenderer {
    size: SizeSource,
    arena: SeriesArena,
}

impl ScatterRenderer {
    fn marker_size(&self, ctx: &ChartContext, i: usize) -> f64 {
        match self.size {
            SizeSource::Constant(s) => s,
            SizeSource::Column(col) => ctx.table().value(col, i).unwrap_or(0.0).max(0.0),
        }
    }
}

/// Per-frame drawing strategy of a chart.
#[derive(Clone, Debug)]
pub enum Renderer {
    /// Line chart.
    Line(LineRenderer),
    /// Scatter chart.
    Scatter(ScatterRenderer),
}

impl Renderer {
    /// Build the renderer for `kind`.
    ///
    /// A scatter size column must be one of the plotted data columns.
    pub fn new(kind: &ChartKind, ctx: &ChartContext) -> ChartResult<Self> {
        let arena = SeriesArena::new(ctx.series_count());
        Ok(match kind {
            ChartKind::Line { line_width } => Self::Line(LineRenderer {
                line_width: *line_width,
                arena,
            }),
            ChartKind::Scatter { size } => {
                let size = match size {
                    MarkerSize::Constant(s) => SizeSource::Constant(*s),
                    MarkerSize::Column(name) => SizeSource::Column(
                        ctx.table().column_position(name).ok_or_else(|| {
                            ChartError::config(format!(
                                "scatter size column '{name}' is not among the plotted data columns {:?}",
                                ctx.table().data_columns()
                            ))
                        })?,
                    ),
                };
                Self::Scatter(ScatterRenderer { size, arena })
            }
        })
    }

    /// Reset accumulated state and draw an empty artist per series.
    pub fn init_frame(&mut self, ctx: &ChartContext, axes: &mut Axes) {
        let names = ctx.table().data_columns();
        match self {
            Self::Line(r) => {
                r.arena.clear();
                axes.clear_lines();
                for (col, name) in names.iter().enumerate() {
                    axes.plot(Line {
                        label: name.clone(),
                        points: Vec::new(),
                        color: ctx.color(col),
                        width: r.line_width,
                    });
                }
            }
            Self::Scatter(r) => {
                r.arena.clear();
                axes.clear_collections();
                for (col, name) in names.iter().enumerate() {
                    axes.scatter(PointCollection {
                        label: name.clone(),
                        points: Vec::new(),
                        size: 0.0,
                        color: ctx.color(col),
                    });
                }
            }
        }
    }

    /// Accumulate frame `i` and redraw every series.
    pub fn render_frame(&mut self, ctx: &ChartContext, axes: &mut Axes, i: usize) -> ChartResult<()> {
        if i >= ctx.table().len() {
            return Err(ChartError::render(format!(
                "frame {i} is out of range (0..{})",
                ctx.table().len()
            )));
        }
        let names = ctx.table().data_columns();
        match self {
            Self::Line(r) => {
                r.arena.push_frame(ctx.table(), i);
                axes.clear_lines();
                for (col, name) in names.iter().enumerate() {
                    axes.plot(Line {
                        label: name.clone(),
                        points: r.arena.get(col).to_vec(),
                        color: ctx.color(col),
                        width: r.line_width,
                    });
                }
            }
            Self::Scatter(r) => {
                r.arena.push_frame(ctx.table(), i);
                let size = r.marker_size(ctx, i);
                axes.clear_collections();
                for (col, name) in names.iter().enumerate() {
                    axes.scatter(PointCollection {
                        label: name.clone(),
                        points: r.arena.get(col).to_vec(),
                        size,
                        color: ctx.color(col),
                    });
                }
            }
        }
        Ok(())
    }

    /// Accumulated points of every series.
    pub fn arena(&self) -> &SeriesArena {
        match self {
            Self::Line(r) => &r.arena,
            Self::Scatter(r) => &r.arena,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/chart/render.rs"]
mod tests;
