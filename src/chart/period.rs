use chrono::NaiveDateTime;
use chrono::format::{Item, StrftimeItems};

use crate::chart::config::{LabelPlacement, PeriodLabel};
use crate::foundation::error::{ChartError, ChartResult};
use crate::interp::frames::InterpolatedTable;
use crate::plot::axes::{Axes, TextId};
use crate::table::model::{IndexKind, IndexValue};

#[derive(Clone, Debug, PartialEq)]
enum Field {
    /// `{x}`
    Plain,
    /// `{x:.Nf}` / `{x:,.Nf}`
    Fixed { precision: usize, thousands: bool },
    /// `{x:d}`
    Integer,
}

#[derive(Clone, Debug, PartialEq)]
enum Segment {
    Literal(String),
    Field(Field),
}

#[derive(Clone, Debug, PartialEq)]
enum Pattern {
    Plain,
    Strftime(String),
    Template(Vec<Segment>),
}

/// Turns an index value into label text: strftime for date/time indices, a `{x}` template
/// otherwise, or the value's display form when no pattern is given.
#[derive(Clone, Debug, PartialEq)]
pub struct PeriodFormatter(Pattern);

impl PeriodFormatter {
    /// Validate `fmt` against the index kind.
    pub fn new(kind: IndexKind, fmt: Option<&str>) -> ChartResult<Self> {
        let Some(fmt) = fmt else {
            return Ok(Self(Pattern::Plain));
        };
        match kind {
            IndexKind::DateTime => {
                if StrftimeItems::new(fmt).any(|item| matches!(item, Item::Error)) {
                    return Err(ChartError::config(format!(
                        "period_fmt \"{fmt}\" is not a valid strftime pattern"
                    )));
                }
                // Offset and zone fields parse fine but cannot render a naive timestamp.
                if write_strftime(&NaiveDateTime::default(), fmt).is_none() {
                    return Err(ChartError::config(format!(
                        "period_fmt \"{fmt}\" needs a time zone, but index timestamps have none"
                    )));
                }
                Ok(Self(Pattern::Strftime(fmt.to_owned())))
            }
            IndexKind::Numeric => Ok(Self(Pattern::Template(parse_template(fmt)?))),
            IndexKind::Ordinal => {
                let segments = parse_template(fmt)?;
                if segments
                    .iter()
                    .any(|s| matches!(s, Segment::Field(f) if *f != Field::Plain))
                {
                    return Err(ChartError::config(format!(
                        "period_fmt \"{fmt}\" applies a numeric format to an ordinal index"
                    )));
                }
                Ok(Self(Pattern::Template(segments)))
            }
        }
    }

    /// Label text for `value`.
    pub fn format(&self, value: &IndexValue) -> String {
        match (&self.0, value) {
            (Pattern::Strftime(fmt), IndexValue::DateTime(t)) => {
                write_strftime(t, fmt).unwrap_or_else(|| t.to_string())
            }
            (Pattern::Template(segments), value) => {
                let mut out = String::new();
                for seg in segments {
                    match seg {
                        Segment::Literal(s) => out.push_str(s),
                        Segment::Field(f) => out.push_str(&format_field(f, value)),
                    }
                }
                out
            }
            (_, value) => value.to_string(),
        }
    }
}

fn write_strftime(t: &NaiveDateTime, fmt: &str) -> Option<String> {
    use std::fmt::Write as _;

    let mut out = String::new();
    write!(out, "{}", t.format(fmt)).ok()?;
    Some(out)
}

fn format_field(field: &Field, value: &IndexValue) -> String {
    let IndexValue::Numeric(x) = value else {
        return value.to_string();
    };
    match field {
        Field::Plain => x.to_string(),
        Field::Integer => format!("{}", x.trunc() as i64),
        Field::Fixed {
            precision,
            thousands,
        } => {
            let precision = *precision;
            let s = format!("{x:.precision$}");
            if *thousands {
                group_thousands(&s)
            } else {
                s
            }
        }
    }
}

fn group_thousands(s: &str) -> String {
    let (sign, rest) = match s.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", s),
    };
    let (int, frac) = match rest.find('.') {
        Some(dot) => rest.split_at(dot),
        None => (rest, ""),
    };
    let mut grouped = String::with_capacity(int.len() + int.len() / 3);
    for (i, ch) in int.chars().enumerate() {
        if i > 0 && (int.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    format!("{sign}{grouped}{frac}")
}

fn parse_template(fmt: &str) -> ChartResult<Vec<Segment>> {
    let bad = |why: &str| ChartError::config(format!("period_fmt \"{fmt}\": {why}"));

    let mut out = Vec::new();
    let mut lit = String::new();
    let mut chars = fmt.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '{' if chars.peek() == Some(&'{') => {
                chars.next();
                lit.push('{');
            }
            '}' if chars.peek() == Some(&'}') => {
                chars.next();
                lit.push('}');
            }
            '}' => return Err(bad("single '}' must be escaped as '}}'")),
            '{' => {
                let mut field = String::new();
                loop {
                    match chars.next() {
                        Some('}') => break,
                        Some(ch) => field.push(ch),
                        None => return Err(bad("unclosed '{'")),
                    }
                }
                if !lit.is_empty() {
                    out.push(Segment::Literal(std::mem::take(&mut lit)));
                }
                out.push(Segment::Field(parse_field(&field).map_err(|e| bad(&e))?));
            }
            c => lit.push(c),
        }
    }
    if !lit.is_empty() {
        out.push(Segment::Literal(lit));
    }
    Ok(out)
}

fn parse_field(field: &str) -> Result<Field, String> {
    let (name, spec) = match field.split_once(':') {
        Some((name, spec)) => (name, Some(spec)),
        None => (field, None),
    };
    if name != "x" {
        return Err(format!("unknown field \"{name}\", only {{x}} is available"));
    }
    let Some(spec) = spec else {
        return Ok(Field::Plain);
    };
    if spec == "d" {
        return Ok(Field::Integer);
    }
    let (thousands, spec) = match spec.strip_prefix(',') {
        Some(rest) => (true, rest),
        None => (false, spec),
    };
    let precision = spec
        .strip_prefix('.')
        .and_then(|s| s.strip_suffix('f'))
        .and_then(|n| n.parse::<usize>().ok())
        .ok_or_else(|| format!("unsupported format spec \":{spec}\""))?;
    Ok(Field::Fixed {
        precision,
        thousands,
    })
}

/// Keeps a single period label on the axes in sync with the current frame.
#[derive(Clone, Debug)]
pub struct PeriodAnnotator {
    formatter: PeriodFormatter,
    placement: Option<LabelPlacement>,
    text: Option<TextId>,
}

impl PeriodAnnotator {
    /// Validate the label style and format pattern for an index of `kind`.
    pub fn new(kind: IndexKind, period_fmt: Option<&str>, label: &PeriodLabel) -> ChartResult<Self> {
        Ok(Self {
            formatter: PeriodFormatter::new(kind, period_fmt)?,
            placement: label.placement()?,
            text: None,
        })
    }

    /// Whether a label is drawn at all.
    pub fn enabled(&self) -> bool {
        self.placement.is_some()
    }

    /// Label text for frame `i`.
    pub fn label_for(&self, table: &InterpolatedTable, i: usize) -> Option<String> {
        table.index_value(i).map(|v| self.formatter.format(&v))
    }

    /// Create the label on the first call, then only update its text.
    pub fn annotate(&mut self, axes: &mut Axes, table: &InterpolatedTable, i: usize) -> ChartResult<()> {
        let Some(placement) = self.placement else {
            return Ok(());
        };
        let s = self
            .label_for(table, i)
            .ok_or_else(|| ChartError::render(format!("frame {i} is out of range")))?;
        match self.text {
            Some(id) => axes.set_text(id, s),
            None => {
                self.text = Some(axes.text(s, placement.x, placement.y, placement.style));
                Ok(())
            }
        }
    }

    /// Forget the label handle; the next [`Self::annotate`] creates a new one.
    pub fn reset(&mut self) {
        self.text = None;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/chart/period.rs"]
mod tests;
