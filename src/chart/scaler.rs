use crate::interp::frames::InterpolatedTable;
use crate::plot::axes::Axes;
use crate::table::model::IndexKind;

/// View limits covering every frame up to and including the current one.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct View {
    /// `(min, max + pad)` of the x coordinates seen so far.
    pub x: (f64, f64),
    /// `(min, max)` of the data values seen so far; `None` while every value is missing.
    pub y: Option<(f64, f64)>,
}

impl View {
    /// Apply the view to `axes`. A missing y range keeps the previous y limits.
    pub fn apply(&self, axes: &mut Axes) {
        axes.set_xlim(self.x.0, self.x.1);
        if let Some((lo, hi)) = self.y {
            axes.set_ylim(lo, hi);
        }
    }
}

/// Padding added to the upper x bound so the view never collapses to a point.
///
/// Numeric and ordinal pads are a hundredth of the full index span, so the first frames keep
/// tick steps readable at the scale of the whole animation.
pub(crate) fn x_pad(kind: IndexKind, full_span: f64) -> f64 {
    match kind {
        IndexKind::DateTime => 1.0,
        IndexKind::Numeric | IndexKind::Ordinal if full_span > 0.0 && full_span.is_finite() => {
            0.01 * full_span
        }
        IndexKind::Numeric | IndexKind::Ordinal => 1.0,
    }
}

fn x_range(table: &InterpolatedTable, rows: usize) -> (f64, f64) {
    (0..rows)
        .map(|j| table.x_coord(j))
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), x| {
            (lo.min(x), hi.max(x))
        })
}

/// Minimum bounding view of frames `0..=i`.
///
/// `i` past the end is clamped to the last frame.
pub fn view_at(table: &InterpolatedTable, i: usize) -> View {
    let end = i.min(table.len().saturating_sub(1));

    let (x_lo, x_hi) = x_range(table, end + 1);
    let (full_lo, full_hi) = x_range(table, table.len());

    let mut y: Option<(f64, f64)> = None;
    for col in 0..table.data_columns().len() {
        for v in table.column_values(col)[..=end].iter().flatten() {
            y = Some(match y {
                None => (*v, *v),
                Some((lo, hi)) => (lo.min(*v), hi.max(*v)),
            });
        }
    }

    View {
        x: (x_lo, x_hi + x_pad(table.index_kind(), full_hi - full_lo)),
        y,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/chart/scaler.rs"]
mod tests;
