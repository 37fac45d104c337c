use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};

use crate::plot::axes::AxisKind;

/// A tick position in data coordinates and its label.
#[derive(Clone, Debug, PartialEq)]
pub struct Tick {
    /// Data coordinate.
    pub value: f64,
    /// Label text.
    pub label: String,
}

/// Widen a degenerate `(lo, hi)` range so it can be mapped to pixels.
pub fn nonsingular(lo: f64, hi: f64) -> (f64, f64) {
    let (lo, hi) = if lo <= hi { (lo, hi) } else { (hi, lo) };
    let scale = lo.abs().max(hi.abs()).max(1.0);
    if hi - lo > 1e-12 * scale {
        return (lo, hi);
    }
    let delta = if lo == 0.0 { 0.5 } else { lo.abs() * 0.05 };
    (lo - delta, hi + delta)
}

/// Ticks for an axis of `kind` spanning `lo..=hi`, about `target` of them.
pub fn axis_ticks(kind: &AxisKind, lo: f64, hi: f64, target: usize) -> Vec<Tick> {
    match kind {
        AxisKind::Numeric => numeric_ticks(lo, hi, target),
        AxisKind::DateTime => date_ticks(lo, hi, target),
        AxisKind::Ordinal(labels) => ordinal_ticks(labels, lo, hi, target),
    }
}

fn numeric_ticks(lo: f64, hi: f64, target: usize) -> Vec<Tick> {
    let values = nice_ticks(lo, hi, target);
    let step = match values.as_slice() {
        [a, b, ..] => b - a,
        _ => (hi - lo).abs(),
    };
    let decimals = if step > 0.0 && step < 1.0 {
        (-step.log10() - 1e-9).ceil() as usize
    } else {
        0
    };
    values
        .into_iter()
        .map(|v| Tick {
            value: v,
            // Avoid "-0".
            label: format!("{:.*}", decimals, if v == 0.0 { 0.0 } else { v }),
        })
        .collect()
}

/// Round tick positions on a 1-2-5 grid within `min..=max`.
pub fn nice_ticks(min: f64, max: f64, target: usize) -> Vec<f64> {
    if !min.is_finite() || !max.is_finite() || target < 2 {
        return vec![];
    }
    let span = (max - min).abs();
    if span <= 0.0 {
        return vec![min];
    }
    let step = nice_step(span / target as f64);
    let start = (min / step).ceil() * step;
    let end = (max / step).floor() * step;
    let mut out = Vec::new();
    for k in 0..(target * 4) {
        let v = start + step * k as f64;
        if v > end + step * 0.5 {
            break;
        }
        out.push(v);
    }
    out
}

/// 1-2-5 step scaled by a power of ten.
pub fn nice_step(raw: f64) -> f64 {
    let power = raw.abs().log10().floor();
    let base = 10f64.powf(power);
    let n = raw / base;
    let nice = if n <= 1.0 {
        1.0
    } else if n <= 2.0 {
        2.0
    } else if n <= 5.0 {
        5.0
    } else {
        10.0
    };
    nice * base
}

const FIXED_STEPS_S: [i64; 21] = [
    1, 2, 5, 10, 15, 30, 60, 120, 300, 600, 900, 1800, 3600, 7200, 10_800, 21_600, 43_200,
    86_400, 172_800, 604_800, 1_209_600,
];
const DAY_S: f64 = 86_400.0;

fn date_ticks(lo: f64, hi: f64, target: usize) -> Vec<Tick> {
    if !lo.is_finite() || !hi.is_finite() || target == 0 {
        return vec![];
    }
    let span = (hi - lo).abs().max(1.0);
    let raw = span / target as f64;

    if let Some(&step) = FIXED_STEPS_S.iter().find(|&&s| s as f64 >= raw) {
        let fmt = if step < 60 {
            "%H:%M:%S"
        } else if step < 86_400 && span <= DAY_S {
            "%H:%M"
        } else if step < 86_400 {
            "%m-%d %H:%M"
        } else {
            "%Y-%m-%d"
        };
        let step = step as f64;
        let start = (lo / step).ceil() * step;
        return (0..)
            .map(|k| start + step * f64::from(k))
            .take_while(|v| *v <= hi)
            .take(target * 4)
            .filter_map(|v| date_tick(v, fmt))
            .collect();
    }

    let months_raw = raw / (DAY_S * 30.44);
    let (month_step, fmt) = match [1u32, 2, 3, 6].into_iter().find(|&m| f64::from(m) >= months_raw) {
        Some(m) => (m, "%Y-%m"),
        None => {
            let years = nice_step(months_raw / 12.0).max(1.0).round() as u32;
            (years * 12, "%Y")
        }
    };
    calendar_ticks(lo, hi, month_step, fmt, target * 4)
}

fn calendar_ticks(lo: f64, hi: f64, month_step: u32, fmt: &str, limit: usize) -> Vec<Tick> {
    let Some(first) = to_datetime(lo) else {
        return vec![];
    };
    // Align to a multiple of the step: whole years for yearly steps, months within a year else.
    let mut months = first.year() * 12 + first.month0() as i32;
    if first.day() != 1 || first.time() != chrono::NaiveTime::MIN {
        months += 1;
    }
    let step = month_step as i32;
    months = months.div_euclid(step) * step + if months.rem_euclid(step) == 0 { 0 } else { step };

    let mut out = Vec::new();
    while out.len() < limit {
        let Some(date) = NaiveDate::from_ymd_opt(months.div_euclid(12), months.rem_euclid(12) as u32 + 1, 1)
        else {
            break;
        };
        let v = date.and_time(chrono::NaiveTime::MIN).and_utc().timestamp() as f64;
        if v > hi {
            break;
        }
        out.extend(date_tick(v, fmt));
        months += step;
    }
    out
}

fn to_datetime(secs: f64) -> Option<NaiveDateTime> {
    let whole = secs.floor();
    let nanos = ((secs - whole) * 1e9).round().min(999_999_999.0) as u32;
    DateTime::from_timestamp(whole as i64, nanos).map(|t| t.naive_utc())
}

fn date_tick(v: f64, fmt: &str) -> Option<Tick> {
    to_datetime(v).map(|t| Tick {
        value: v,
        label: t.format(fmt).to_string(),
    })
}

fn ordinal_ticks(labels: &[String], lo: f64, hi: f64, target: usize) -> Vec<Tick> {
    if labels.is_empty() || !lo.is_finite() || !hi.is_finite() {
        return vec![];
    }
    let first = lo.ceil().max(0.0) as usize;
    let last = (hi.floor().max(0.0) as usize).min(labels.len() - 1);
    if first > last {
        return vec![];
    }
    let count = last - first + 1;
    let stride = count.div_ceil(target.max(1)).max(1);
    (first..=last)
        .step_by(stride)
        .map(|k| Tick {
            value: k as f64,
            label: labels[k].clone(),
        })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/render/ticks.rs"]
mod tests;
