use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use chrono::{NaiveDate, NaiveDateTime};
use serde::Deserialize;
use serde_json::Value;

use crate::foundation::error::{ChartError, ChartResult};
use crate::table::model::{Column, ColumnData, IndexKind, PeriodIndex, Table};

/// JSON form of a [`Table`].
///
/// ```json
/// {
///   "index": { "name": "year", "kind": "numeric", "values": [2000, 2001] },
///   "columns": [ { "name": "a", "values": [1.0, null] } ]
/// }
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TableDef {
    /// Row index.
    pub index: IndexDef,
    /// Columns in display order.
    #[serde(default)]
    pub columns: Vec<ColumnDef>,
}

/// JSON form of the row index.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IndexDef {
    /// Optional display name.
    #[serde(default)]
    pub name: Option<String>,
    /// How to read `values`.
    pub kind: IndexKind,
    /// Raw index values.
    pub values: Vec<Value>,
}

/// JSON form of one column. The column type is inferred from the values.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ColumnDef {
    /// Column name.
    pub name: String,
    /// Raw values; `null` is missing.
    pub values: Vec<Value>,
}

impl Table {
    /// Parse a table from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> ChartResult<Self> {
        let def: TableDef = serde_json::from_reader(r)
            .map_err(|e| ChartError::serde(format!("parse table JSON: {e}")))?;
        Self::from_def(def)
    }

    /// Parse a table from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> ChartResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            ChartError::serde(format!("open table JSON '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Convert a parsed [`TableDef`] into a validated table.
    pub fn from_def(def: TableDef) -> ChartResult<Self> {
        let index = index_from_def(&def.index)?;
        let columns = def
            .columns
            .into_iter()
            .map(|c| {
                let data = infer_column(&c.name, &c.values)?;
                Ok(Column { name: c.name, data })
            })
            .collect::<ChartResult<Vec<_>>>()?;

        let table = Table::new(index, columns)?;
        Ok(match def.index.name {
            Some(name) => table.with_index_name(name),
            None => table,
        })
    }
}

fn index_from_def(def: &IndexDef) -> ChartResult<PeriodIndex> {
    match def.kind {
        IndexKind::Numeric => def
            .values
            .iter()
            .enumerate()
            .map(|(i, v)| {
                v.as_f64().ok_or_else(|| {
                    ChartError::data(format!("numeric index value #{i} is not a number: {v}"))
                })
            })
            .collect::<ChartResult<Vec<_>>>()
            .map(PeriodIndex::Numeric),
        IndexKind::DateTime => def
            .values
            .iter()
            .enumerate()
            .map(|(i, v)| {
                v.as_str().and_then(parse_datetime).ok_or_else(|| {
                    ChartError::data(format!(
                        "datetime index value #{i} is not a recognized timestamp: {v}"
                    ))
                })
            })
            .collect::<ChartResult<Vec<_>>>()
            .map(PeriodIndex::DateTime),
        IndexKind::Ordinal => Ok(PeriodIndex::Ordinal(
            def.values.iter().map(value_to_label).collect(),
        )),
    }
}

/// Parse `YYYY-MM-DD`, `YYYY-MM-DDTHH:MM:SS` or `YYYY-MM-DD HH:MM:SS` (optional fractional
/// seconds).
pub(crate) fn parse_datetime(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(t) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(t);
        }
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

fn value_to_label(v: &Value) -> String {
    match v {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn infer_column(name: &str, values: &[Value]) -> ChartResult<ColumnData> {
    let mut all_int = true;
    for v in values {
        match v {
            Value::Null => {}
            Value::Number(n) => all_int &= n.is_i64(),
            Value::String(_) | Value::Bool(_) => {
                return Ok(ColumnData::Text(
                    values
                        .iter()
                        .map(|v| (!v.is_null()).then(|| value_to_label(v)))
                        .collect(),
                ));
            }
            Value::Array(_) | Value::Object(_) => {
                return Err(ChartError::data(format!(
                    "column '{name}' holds a nested value: {v}"
                )));
            }
        }
    }

    Ok(if all_int {
        ColumnData::Int(values.iter().map(Value::as_i64).collect())
    } else {
        ColumnData::Float(values.iter().map(Value::as_f64).collect())
    })
}

#[cfg(test)]
#[path = "../../tests/unit/table/json.rs"]
mod tests;
