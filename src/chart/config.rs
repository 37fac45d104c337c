use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::color::palette::ColorSpec;
use crate::color::parse::Color;
use crate::foundation::core::{Canvas, Fps};
use crate::foundation::error::{ChartError, ChartResult};
use crate::plot::axes::{HAlign, TextStyle, VAlign};

/// Options of an animated chart.
///
/// Every field has a default, so `{}` is a valid configuration document.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ChartConfig {
    /// Interpolate the index between periods instead of holding it.
    pub interpolate_period: bool,
    /// Frames per source row.
    pub steps_per_period: usize,
    /// Milliseconds per source row.
    pub period_length: u32,
    /// strftime pattern (date/time index) or `{x}` template (other indices) for the period label.
    pub period_fmt: Option<String>,
    /// Figure `[width, height]` in inches.
    pub figure_size: [f64; 2],
    /// Axes title.
    pub title: Option<String>,
    /// Series colors.
    pub color_spec: ColorSpec,
    /// Tick label font size in points.
    pub tick_label_size: f64,
    /// Period label toggle or style.
    pub period_label: PeriodLabel,
    /// Dots per inch.
    pub resolution: f64,
    /// Font used for all text. Falls back to a system font search.
    pub font_path: Option<PathBuf>,
    /// Line or scatter chart.
    pub kind: ChartKind,
    /// Plot only these columns, in this order.
    pub columns: Option<Vec<String>>,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            interpolate_period: false,
            steps_per_period: 10,
            period_length: 500,
            period_fmt: None,
            figure_size: [6.5, 3.5],
            title: None,
            color_spec: ColorSpec::default(),
            tick_label_size: 7.0,
            period_label: PeriodLabel::Enabled(true),
            resolution: 144.0,
            font_path: None,
            kind: ChartKind::default(),
            columns: None,
        }
    }
}

impl ChartConfig {
    /// Parse a configuration from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> ChartResult<Self> {
        serde_json::from_reader(r).map_err(|e| ChartError::serde(format!("parse chart config JSON: {e}")))
    }

    /// Parse a configuration from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> ChartResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            ChartError::serde(format!("open chart config JSON '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Check option ranges and the period label style.
    pub fn validate(&self) -> ChartResult<()> {
        if self.steps_per_period == 0 {
            return Err(ChartError::config("steps_per_period must be >= 1"));
        }
        if self.period_length == 0 {
            return Err(ChartError::config("period_length must be > 0 ms"));
        }
        if !(self.tick_label_size.is_finite() && self.tick_label_size > 0.0) {
            return Err(ChartError::config("tick_label_size must be finite and > 0"));
        }
        match &self.kind {
            ChartKind::Line { line_width } if !(line_width.is_finite() && *line_width > 0.0) => {
                return Err(ChartError::config("line_width must be finite and > 0"));
            }
            ChartKind::Scatter {
                size: MarkerSize::Constant(s),
            } if !(s.is_finite() && *s >= 0.0) => {
                return Err(ChartError::config("scatter size must be finite and >= 0"));
            }
            _ => {}
        }
        self.canvas()?;
        self.fps()?;
        self.period_label.placement()?;
        Ok(())
    }

    /// Output canvas for `figure_size` at `resolution`.
    pub fn canvas(&self) -> ChartResult<Canvas> {
        let [w, h] = self.figure_size;
        if !(self.resolution.is_finite() && self.resolution > 0.0) {
            return Err(ChartError::config("resolution must be finite and > 0"));
        }
        Canvas::from_figure(w, h, self.resolution)
    }

    /// Frame rate: `1000 / period_length * steps_per_period`.
    pub fn fps(&self) -> ChartResult<Fps> {
        let steps = u32::try_from(self.steps_per_period)
            .map_err(|_| ChartError::config("steps_per_period does not fit in u32"))?;
        Fps::from_period(steps, self.period_length)
    }

    /// Milliseconds between frames.
    pub fn interval_ms(&self) -> f64 {
        f64::from(self.period_length) / self.steps_per_period.max(1) as f64
    }
}

/// Chart variant and its variant-specific options.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ChartKind {
    /// Growing lines.
    Line {
        /// Stroke width in points.
        #[serde(default = "default_line_width")]
        line_width: f64,
    },
    /// Accumulating markers.
    Scatter {
        /// Marker area in square points.
        #[serde(default)]
        size: MarkerSize,
    },
}

fn default_line_width() -> f64 {
    2.0
}

impl Default for ChartKind {
    fn default() -> Self {
        Self::Line {
            line_width: default_line_width(),
        }
    }
}

/// Scatter marker area.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MarkerSize {
    /// Same area for every marker, in square points.
    Constant(f64),
    /// The current frame's value of this data column, applied to every marker.
    Column(String),
}

impl Default for MarkerSize {
    fn default() -> Self {
        Self::Constant(36.0)
    }
}

/// Period label toggle (`true` uses the bottom-right default) or explicit style.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PeriodLabel {
    /// `false` hides the label; `true` uses [`PeriodLabelStyle::bottom_right`].
    Enabled(bool),
    /// Explicit placement; `x` and `y` are required.
    Style(PeriodLabelStyle),
}

impl Default for PeriodLabel {
    fn default() -> Self {
        Self::Enabled(true)
    }
}

/// Raw period label style as written in a configuration document.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PeriodLabelStyle {
    /// Horizontal axes fraction.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    /// Vertical axes fraction.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    /// Font size in points.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<f64>,
    /// Horizontal anchor.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ha: Option<HAlign>,
    /// Vertical anchor.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub va: Option<VAlign>,
    /// Text color.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<Color>,
}

impl PeriodLabelStyle {
    /// Size 12, right-aligned at `(0.9, 0.1)`.
    pub fn bottom_right() -> Self {
        Self {
            x: Some(0.9),
            y: Some(0.1),
            size: Some(12.0),
            ha: Some(HAlign::Right),
            va: None,
            color: None,
        }
    }
}

/// A resolved label position and style.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LabelPlacement {
    /// Horizontal axes fraction.
    pub x: f64,
    /// Vertical axes fraction.
    pub y: f64,
    /// Text style.
    pub style: TextStyle,
}

impl PeriodLabel {
    /// Resolve into a placement; `None` when the label is disabled.
    pub fn placement(&self) -> ChartResult<Option<LabelPlacement>> {
        let style = match self {
            Self::Enabled(false) => return Ok(None),
            Self::Enabled(true) => PeriodLabelStyle::bottom_right(),
            Self::Style(s) => s.clone(),
        };
        let (Some(x), Some(y)) = (style.x, style.y) else {
            return Err(ChartError::config(
                "period_label style must have keys for \"x\" and \"y\"",
            ));
        };
        let defaults = TextStyle::default();
        let size = style.size.unwrap_or(defaults.size);
        if !(size.is_finite() && size > 0.0) {
            return Err(ChartError::config("period_label size must be finite and > 0"));
        }
        Ok(Some(LabelPlacement {
            x,
            y,
            style: TextStyle {
                size,
                ha: style.ha.unwrap_or(defaults.ha),
                va: style.va.unwrap_or(defaults.va),
                color: style.color.unwrap_or(defaults.color),
            },
        }))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/chart/config.rs"]
mod tests;
