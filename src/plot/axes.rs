use serde::{Deserialize, Serialize};

use crate::color::parse::Color;
use crate::foundation::error::{ChartError, ChartResult};

/// How x coordinates map to tick labels.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum AxisKind {
    /// Plain numbers.
    #[default]
    Numeric,
    /// Seconds since the Unix epoch, labelled as dates.
    DateTime,
    /// Period numbers, labelled with the period's original label.
    Ordinal(Vec<String>),
}

/// Horizontal text anchor.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HAlign {
    /// Text starts at the anchor.
    #[default]
    Left,
    /// Text is centered on the anchor.
    Center,
    /// Text ends at the anchor.
    Right,
}

/// Vertical text anchor.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VAlign {
    /// Anchor is the bottom of the text box.
    #[default]
    Bottom,
    /// Anchor is the vertical center of the text box.
    Center,
    /// Anchor is the top of the text box.
    Top,
}

/// Visual style of a text artist.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextStyle {
    /// Font size in points.
    pub size: f64,
    /// Horizontal anchor.
    pub ha: HAlign,
    /// Vertical anchor.
    pub va: VAlign,
    /// Fill color.
    pub color: Color,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            size: 10.0,
            ha: HAlign::Left,
            va: VAlign::Bottom,
            color: Color::rgb8(0, 0, 0),
        }
    }
}

/// A text artist placed in axes-fraction coordinates (`(0, 0)` bottom-left, `(1, 1)` top-right).
#[derive(Clone, Debug, PartialEq)]
pub struct Text {
    /// Current content.
    pub content: String,
    /// Horizontal axes fraction.
    pub x: f64,
    /// Vertical axes fraction.
    pub y: f64,
    /// Style.
    pub style: TextStyle,
}

/// Handle to a text artist on an [`Axes`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TextId(usize);

/// A polyline in data coordinates. `None` values break the line.
#[derive(Clone, Debug, PartialEq)]
pub struct Line {
    /// Series name.
    pub label: String,
    /// Vertices.
    pub points: Vec<(f64, Option<f64>)>,
    /// Stroke color.
    pub color: Color,
    /// Stroke width in points.
    pub width: f64,
}

/// Circular markers in data coordinates.
#[derive(Clone, Debug, PartialEq)]
pub struct PointCollection {
    /// Series name.
    pub label: String,
    /// Marker centers. Points with a missing value are not drawn.
    pub points: Vec<(f64, Option<f64>)>,
    /// Marker area in square points.
    pub size: f64,
    /// Fill color.
    pub color: Color,
}

/// The plot surface a chart mutates frame by frame.
///
/// Backends read it to rasterize a frame; it holds no pixel state itself.
#[derive(Clone, Debug, PartialEq)]
pub struct Axes {
    title: Option<String>,
    x_kind: AxisKind,
    xlim: (f64, f64),
    ylim: (f64, f64),
    tick_label_size: f64,
    lines: Vec<Line>,
    collections: Vec<PointCollection>,
    texts: Vec<Text>,
}

impl Default for Axes {
    fn default() -> Self {
        Self::new()
    }
}

impl Axes {
    /// Empty axes with unit view limits.
    pub fn new() -> Self {
        Self {
            title: None,
            x_kind: AxisKind::Numeric,
            xlim: (0.0, 1.0),
            ylim: (0.0, 1.0),
            tick_label_size: 10.0,
            lines: Vec::new(),
            collections: Vec::new(),
            texts: Vec::new(),
        }
    }

    /// Title drawn above the axes.
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Set or clear the title.
    pub fn set_title(&mut self, title: Option<String>) {
        self.title = title;
    }

    /// Kind of the x axis.
    pub fn x_kind(&self) -> &AxisKind {
        &self.x_kind
    }

    /// Set the kind of the x axis.
    pub fn set_x_kind(&mut self, kind: AxisKind) {
        self.x_kind = kind;
    }

    /// Tick label font size in points.
    pub fn tick_label_size(&self) -> f64 {
        self.tick_label_size
    }

    /// Set the tick label font size in points.
    pub fn set_tick_label_size(&mut self, size: f64) {
        self.tick_label_size = size;
    }

    /// Current x view limits.
    pub fn xlim(&self) -> (f64, f64) {
        self.xlim
    }

    /// Current y view limits.
    pub fn ylim(&self) -> (f64, f64) {
        self.ylim
    }

    /// Set x view limits. Non-finite bounds are ignored.
    pub fn set_xlim(&mut self, lo: f64, hi: f64) {
        if lo.is_finite() && hi.is_finite() {
            self.xlim = (lo, hi);
        }
    }

    /// Set y view limits. Non-finite bounds are ignored.
    pub fn set_ylim(&mut self, lo: f64, hi: f64) {
        if lo.is_finite() && hi.is_finite() {
            self.ylim = (lo, hi);
        }
    }

    /// Add a line.
    pub fn plot(&mut self, line: Line) {
        self.lines.push(line);
    }

    /// Add a marker collection.
    pub fn scatter(&mut self, points: PointCollection) {
        self.collections.push(points);
    }

    /// Lines in draw order.
    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    /// Marker collections in draw order.
    pub fn collections(&self) -> &[PointCollection] {
        &self.collections
    }

    /// Remove every line.
    pub fn clear_lines(&mut self) {
        self.lines.clear();
    }

    /// Remove every marker collection.
    pub fn clear_collections(&mut self) {
        self.collections.clear();
    }

    /// Add a text artist and return its handle.
    pub fn text(&mut self, content: impl Into<String>, x: f64, y: f64, style: TextStyle) -> TextId {
        self.texts.push(Text {
            content: content.into(),
            x,
            y,
            style,
        });
        TextId(self.texts.len() - 1)
    }

    /// Replace the content of an existing text artist.
    pub fn set_text(&mut self, id: TextId, content: impl Into<String>) -> ChartResult<()> {
        let text = self
            .texts
            .get_mut(id.0)
            .ok_or_else(|| ChartError::render(format!("unknown text artist #{}", id.0)))?;
        text.content = content.into();
        Ok(())
    }

    /// Text artists in draw order.
    pub fn texts(&self) -> &[Text] {
        &self.texts
    }

    /// Drop all artists and reset the view; keeps title, axis kind and tick size.
    pub fn reset(&mut self) {
        self.lines.clear();
        self.collections.clear();
        self.texts.clear();
        self.xlim = (0.0, 1.0);
        self.ylim = (0.0, 1.0);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/plot/axes.rs"]
mod tests;
