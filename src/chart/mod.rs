//! Animated chart state: derived data plus the per-frame step.

/// Chart configuration documents.
pub mod config;
/// Period label formatting and placement.
pub mod period;
/// Line and scatter frame renderers.
pub mod render;
/// Axis limits per frame.
pub mod scaler;

use crate::chart::config::ChartConfig;
use crate::chart::period::PeriodAnnotator;
use crate::chart::render::{ChartContext, Renderer};
use crate::chart::scaler::view_at;
use crate::color::palette::resolve_colors;
use crate::color::parse::Color;
use crate::foundation::error::{ChartError, ChartResult};
use crate::interp::frames::{InterpolateOpts, InterpolatedTable, interpolate_frames};
use crate::plot::axes::{AxisKind, Axes};
use crate::table::model::{IndexKind, Table};
use crate::table::select::data_columns;

/// An animated line or scatter chart over one table.
///
/// Construction validates everything that can fail before drawing: options, columns, colors,
/// the scatter size column and the period format. Frames are then stepped in strictly increasing
/// order, each step mutating the chart's [`Axes`].
#[derive(Clone, Debug)]
pub struct Chart {
    config: ChartConfig,
    ctx: ChartContext,
    renderer: Renderer,
    period: PeriodAnnotator,
    axes: Axes,
    last_frame: Option<usize>,
    initialized: bool,
}

impl Chart {
    /// Build a chart from `table` and `config`.
    #[tracing::instrument(skip(table, config), fields(rows = table.len()))]
    pub fn new(table: &Table, config: ChartConfig) -> ChartResult<Self> {
        config.validate()?;

        let columns = data_columns(table, config.columns.as_deref())?;
        let frames = interpolate_frames(
            table,
            &columns,
            InterpolateOpts {
                steps_per_period: config.steps_per_period,
                interpolate_period: config.interpolate_period,
            },
        )?;
        let colors = resolve_colors(&config.color_spec, columns.len())?;
        let kind = frames.index_kind();
        let ctx = ChartContext::new(frames, colors)?;
        let renderer = Renderer::new(&config.kind, &ctx)?;
        let period = PeriodAnnotator::new(kind, config.period_fmt.as_deref(), &config.period_label)?;

        tracing::debug!(
            series = ctx.series_count(),
            frames = ctx.table().len(),
            "chart constructed"
        );
        Ok(Self {
            config,
            ctx,
            renderer,
            period,
            axes: Axes::new(),
            last_frame: None,
            initialized: false,
        })
    }

    /// Options the chart was built with.
    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    /// The frame table.
    pub fn table(&self) -> &InterpolatedTable {
        self.ctx.table()
    }

    /// Plotted column names.
    pub fn data_columns(&self) -> &[String] {
        self.ctx.table().data_columns()
    }

    /// One color per plotted column.
    pub fn colors(&self) -> Vec<Color> {
        self.ctx.series_colors()
    }

    /// Number of animation frames.
    pub fn frame_count(&self) -> usize {
        self.ctx.table().len()
    }

    /// Current plot surface.
    pub fn axes(&self) -> &Axes {
        &self.axes
    }

    /// Last frame stepped since the most recent [`Chart::init`].
    pub fn last_frame(&self) -> Option<usize> {
        self.last_frame
    }

    /// Start a fresh run: clear all artists, apply decorations and draw empty series.
    pub fn init(&mut self) {
        self.axes.reset();
        self.axes.set_title(self.config.title.clone());
        self.axes.set_tick_label_size(self.config.tick_label_size);
        self.axes.set_x_kind(match self.ctx.table().index_kind() {
            IndexKind::Numeric => AxisKind::Numeric,
            IndexKind::DateTime => AxisKind::DateTime,
            IndexKind::Ordinal => AxisKind::Ordinal(self.ctx.table().period_labels().unwrap_or_default()),
        });
        self.period.reset();
        self.renderer.init_frame(&self.ctx, &mut self.axes);
        self.last_frame = None;
        self.initialized = true;
    }

    /// Advance to frame `i`: rescale the axes, redraw the series, update the period label.
    ///
    /// Frames must be strictly increasing within a run. The first step of a run initializes it.
    pub fn step(&mut self, i: usize) -> ChartResult<()> {
        if !self.initialized {
            self.init();
        }
        if let Some(last) = self.last_frame
            && i <= last
        {
            return Err(ChartError::render(format!(
                "frames must be stepped in increasing order: got {i} after {last}"
            )));
        }
        if i >= self.frame_count() {
            return Err(ChartError::render(format!(
                "frame {i} is out of range (0..{})",
                self.frame_count()
            )));
        }

        view_at(self.ctx.table(), i).apply(&mut self.axes);
        self.renderer.render_frame(&self.ctx, &mut self.axes, i)?;
        self.period.annotate(&mut self.axes, self.ctx.table(), i)?;
        self.last_frame = Some(i);
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/chart/chart.rs"]
mod tests;
