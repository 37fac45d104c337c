use chrono::{NaiveDateTime, TimeDelta};
use serde_json::{Value, json};

use crate::foundation::error::{ChartError, ChartResult};
use crate::table::model::{IndexKind, IndexValue, PeriodIndex, Table};

/// Options for [`interpolate_frames`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InterpolateOpts {
    /// Frames generated per original row (>= 1).
    pub steps_per_period: usize,
    /// Interpolate the index itself (numeric/date-time) instead of forward-filling it.
    pub interpolate_period: bool,
}

/// A table expanded to one row per animation frame.
///
/// Row `k` of the source table sits at frame `k * steps_per_period`. The last source row is
/// followed by `steps_per_period - 1` frames repeating its index and values, so the table has
/// exactly `steps_per_period * source_rows` frames.
#[derive(Clone, Debug, PartialEq)]
pub struct InterpolatedTable {
    index: PeriodIndex,
    columns: Vec<String>,
    data: Vec<Vec<Option<f64>>>,
    steps_per_period: usize,
    source_rows: usize,
}

impl InterpolatedTable {
    /// Number of frames.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Always `false` for tables built by [`interpolate_frames`].
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Frames per source row.
    pub fn steps_per_period(&self) -> usize {
        self.steps_per_period
    }

    /// Row count of the source table.
    pub fn source_rows(&self) -> usize {
        self.source_rows
    }

    /// Expanded index.
    pub fn index(&self) -> &PeriodIndex {
        &self.index
    }

    /// Index kind of the source table.
    pub fn index_kind(&self) -> IndexKind {
        self.index.kind()
    }

    /// Index value of frame `i`.
    pub fn index_value(&self, i: usize) -> Option<IndexValue> {
        self.index.get(i)
    }

    /// Data column names, in plotting order.
    pub fn data_columns(&self) -> &[String] {
        &self.columns
    }

    /// Position of a data column.
    pub fn column_position(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// All frame values of the data column at `col`.
    pub fn column_values(&self, col: usize) -> &[Option<f64>] {
        &self.data[col]
    }

    /// Value of data column `col` at frame `i`; `None` when missing.
    pub fn value(&self, col: usize, i: usize) -> Option<f64> {
        self.data.get(col).and_then(|c| c.get(i)).copied().flatten()
    }

    /// Horizontal plot coordinate of frame `i`.
    ///
    /// Numeric indices map to themselves, timestamps to seconds since the Unix epoch and
    /// ordinal indices to the fractional period number `i / steps_per_period`.
    pub fn x_coord(&self, i: usize) -> f64 {
        match &self.index {
            PeriodIndex::Numeric(v) => v[i],
            PeriodIndex::DateTime(v) => datetime_to_secs(v[i]),
            PeriodIndex::Ordinal(_) => i as f64 / self.steps_per_period as f64,
        }
    }

    /// Labels of the source rows for ordinal indices, one per period.
    pub fn period_labels(&self) -> Option<Vec<String>> {
        let PeriodIndex::Ordinal(v) = &self.index else {
            return None;
        };
        Some(
            (0..self.source_rows)
                .map(|k| v[k * self.steps_per_period].clone())
                .collect(),
        )
    }

    /// JSON dump: `{"index": [...], "columns": [{"name", "values"}]}`.
    pub fn to_json(&self) -> Value {
        let index: Vec<Value> = (0..self.len())
            .map(|i| match &self.index {
                PeriodIndex::Numeric(v) => json!(v[i]),
                PeriodIndex::DateTime(v) => json!(v[i].format("%Y-%m-%dT%H:%M:%S%.f").to_string()),
                PeriodIndex::Ordinal(v) => json!(v[i]),
            })
            .collect();
        let columns: Vec<Value> = self
            .columns
            .iter()
            .zip(&self.data)
            .map(|(name, values)| json!({ "name": name, "values": values }))
            .collect();
        json!({ "index": index, "columns": columns })
    }
}

/// Seconds since the Unix epoch, with microsecond resolution.
pub(crate) fn datetime_to_secs(t: NaiveDateTime) -> f64 {
    t.and_utc().timestamp_micros() as f64 / 1e6
}

/// Expand `table` so that every animation frame has one row.
///
/// The index is linearly interpolated (numeric), evenly spaced (date/time) or forward-filled
/// (ordinal, or when `interpolate_period` is off). Data columns are interpolated between known
/// values; values before the first known cell stay missing and values after the last known cell
/// repeat it.
#[tracing::instrument(skip(table, data_columns), fields(rows = table.len()))]
pub fn interpolate_frames(
    table: &Table,
    data_columns: &[String],
    opts: InterpolateOpts,
) -> ChartResult<InterpolatedTable> {
    let steps = opts.steps_per_period;
    if steps == 0 {
        return Err(ChartError::config("steps_per_period must be >= 1"));
    }
    let n = table.len();
    let total = steps
        .checked_mul(n)
        .ok_or_else(|| ChartError::data("interpolated table is too large"))?;

    let index = expand_index(table.index(), steps, opts.interpolate_period)?;
    debug_assert_eq!(index.len(), total);

    let time_weighted = opts.interpolate_period && matches!(index, PeriodIndex::DateTime(_));
    let xs: Vec<f64> = match &index {
        PeriodIndex::DateTime(v) if time_weighted => v.iter().map(|t| datetime_to_secs(*t)).collect(),
        _ => (0..total).map(|j| j as f64).collect(),
    };

    let mut data = Vec::with_capacity(data_columns.len());
    for name in data_columns {
        let col = table
            .column(name)
            .ok_or_else(|| ChartError::data(format!("could not find '{name}' in the table")))?;
        let mut values = vec![None; total];
        for k in 0..n {
            values[k * steps] = col.data.value_f64(k);
        }
        fill_gaps(&xs, &mut values);
        data.push(values);
    }

    tracing::debug!(frames = total, columns = data.len(), "interpolated table");
    Ok(InterpolatedTable {
        index,
        columns: data_columns.to_vec(),
        data,
        steps_per_period: steps,
        source_rows: n,
    })
}

fn expand_index(index: &PeriodIndex, steps: usize, interpolate: bool) -> ChartResult<PeriodIndex> {
    let n = index.len();
    let total = steps * n;
    let grid_last = steps * (n - 1);

    Ok(match index {
        PeriodIndex::Numeric(v) if interpolate => {
            ensure_non_decreasing(v.windows(2).all(|w| w[0] <= w[1]))?;
            let mut out = Vec::with_capacity(total);
            for j in 0..total {
                let k = j / steps;
                let r = j % steps;
                if j >= grid_last {
                    out.push(v[n - 1]);
                } else if r == 0 {
                    out.push(v[k]);
                } else {
                    let t = r as f64 / steps as f64;
                    out.push(v[k] + (v[k + 1] - v[k]) * t);
                }
            }
            PeriodIndex::Numeric(out)
        }
        PeriodIndex::DateTime(v) if interpolate => {
            ensure_non_decreasing(v.windows(2).all(|w| w[0] <= w[1]))?;
            let first = v[0];
            let last = v[n - 1];
            let span_us = (last - first)
                .num_microseconds()
                .ok_or_else(|| ChartError::data("datetime index span is too large"))?;
            let mut out = Vec::with_capacity(total);
            for j in 0..=grid_last {
                if grid_last == 0 {
                    out.push(first);
                    continue;
                }
                let off = i128::from(span_us) * j as i128 / grid_last as i128;
                out.push(first + TimeDelta::microseconds(off as i64));
            }
            out.resize(total, last);
            PeriodIndex::DateTime(out)
        }
        PeriodIndex::Numeric(v) => PeriodIndex::Numeric(forward_fill(v, steps)),
        PeriodIndex::DateTime(v) => PeriodIndex::DateTime(forward_fill(v, steps)),
        PeriodIndex::Ordinal(v) => {
            if interpolate {
                tracing::debug!("ordinal index cannot be interpolated; forward-filling");
            }
            PeriodIndex::Ordinal(forward_fill(v, steps))
        }
    })
}

fn ensure_non_decreasing(ok: bool) -> ChartResult<()> {
    if ok {
        Ok(())
    } else {
        Err(ChartError::data(
            "index must be monotonically non-decreasing to interpolate the period",
        ))
    }
}

fn forward_fill<T: Clone>(v: &[T], steps: usize) -> Vec<T> {
    (0..v.len() * steps).map(|j| v[j / steps].clone()).collect()
}

/// Fill `None` gaps between known values by linear interpolation over `xs`.
///
/// Leading gaps are left untouched; trailing gaps hold the last known value.
pub(crate) fn fill_gaps(xs: &[f64], ys: &mut [Option<f64>]) {
    let mut last_known: Option<usize> = None;
    for j in 0..ys.len() {
        let Some(y1) = ys[j] else {
            continue;
        };
        if let Some(a) = last_known
            && j > a + 1
        {
            let y0 = ys[a].unwrap_or(y1);
            let (x0, x1) = (xs[a], xs[j]);
            let denom = x1 - x0;
            for k in (a + 1)..j {
                ys[k] = Some(if denom > 0.0 {
                    y0 + (xs[k] - x0) * (y1 - y0) / denom
                } else {
                    (y0 + y1) / 2.0
                });
            }
        }
        last_known = Some(j);
    }

    if let Some(a) = last_known {
        let hold = ys[a];
        for y in &mut ys[a + 1..] {
            *y = hold;
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/interp/frames.rs"]
mod tests;
