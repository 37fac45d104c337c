use std::fmt;

use chrono::NaiveDateTime;

use crate::foundation::error::{ChartError, ChartResult};

/// Type of a table index.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndexKind {
    /// Plain numbers (years, sample positions, ...).
    Numeric,
    /// Calendar timestamps.
    #[serde(rename = "datetime")]
    DateTime,
    /// Ordered labels that cannot be interpolated.
    Ordinal,
}

/// A single index value.
#[derive(Clone, Debug, PartialEq)]
pub enum IndexValue {
    /// Numeric index value.
    Numeric(f64),
    /// Timestamp index value.
    DateTime(NaiveDateTime),
    /// Ordinal label.
    Ordinal(String),
}

impl fmt::Display for IndexValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Numeric(v) => write!(f, "{v}"),
            Self::DateTime(t) => write!(f, "{t}"),
            Self::Ordinal(s) => f.write_str(s),
        }
    }
}

/// Row index of a table. Every row has exactly one index value.
#[derive(Clone, Debug, PartialEq)]
pub enum PeriodIndex {
    /// Numeric index.
    Numeric(Vec<f64>),
    /// Timestamp index.
    DateTime(Vec<NaiveDateTime>),
    /// Ordinal index.
    Ordinal(Vec<String>),
}

impl PeriodIndex {
    /// Number of rows.
    pub fn len(&self) -> usize {
        match self {
            Self::Numeric(v) => v.len(),
            Self::DateTime(v) => v.len(),
            Self::Ordinal(v) => v.len(),
        }
    }

    /// Return `true` when the index has no rows.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Kind of index.
    pub fn kind(&self) -> IndexKind {
        match self {
            Self::Numeric(_) => IndexKind::Numeric,
            Self::DateTime(_) => IndexKind::DateTime,
            Self::Ordinal(_) => IndexKind::Ordinal,
        }
    }

    /// Value at row `i`, if in range.
    pub fn get(&self, i: usize) -> Option<IndexValue> {
        match self {
            Self::Numeric(v) => v.get(i).copied().map(IndexValue::Numeric),
            Self::DateTime(v) => v.get(i).copied().map(IndexValue::DateTime),
            Self::Ordinal(v) => v.get(i).cloned().map(IndexValue::Ordinal),
        }
    }
}

/// Values of one column.
#[derive(Clone, Debug, PartialEq)]
pub enum ColumnData {
    /// Floating point values; `None` and NaN are missing.
    Float(Vec<Option<f64>>),
    /// Integer values; `None` is missing.
    Int(Vec<Option<i64>>),
    /// Non-numeric values, never plotted.
    Text(Vec<Option<String>>),
}

impl ColumnData {
    /// Number of rows.
    pub fn len(&self) -> usize {
        match self {
            Self::Float(v) => v.len(),
            Self::Int(v) => v.len(),
            Self::Text(v) => v.len(),
        }
    }

    /// Return `true` when the column has no rows.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Return `true` for integer and floating point columns.
    pub fn is_numeric(&self) -> bool {
        matches!(self, Self::Float(_) | Self::Int(_))
    }

    /// Numeric value at row `i`; `None` for missing cells, NaN and text columns.
    pub fn value_f64(&self, i: usize) -> Option<f64> {
        match self {
            Self::Float(v) => v.get(i).copied().flatten().filter(|x| !x.is_nan()),
            Self::Int(v) => v.get(i).copied().flatten().map(|x| x as f64),
            Self::Text(_) => None,
        }
    }
}

/// Named column.
#[derive(Clone, Debug, PartialEq)]
pub struct Column {
    /// Column name, unique within a table.
    pub name: String,
    /// Column values, one per row.
    pub data: ColumnData,
}

/// In-memory input table: an index plus named columns of equal length.
#[derive(Clone, Debug, PartialEq)]
pub struct Table {
    index_name: Option<String>,
    index: PeriodIndex,
    columns: Vec<Column>,
}

impl Table {
    /// Build and validate a table.
    pub fn new(index: PeriodIndex, columns: Vec<Column>) -> ChartResult<Self> {
        if index.is_empty() {
            return Err(ChartError::data("table must have at least one row"));
        }
        for (i, col) in columns.iter().enumerate() {
            if col.data.len() != index.len() {
                return Err(ChartError::data(format!(
                    "column '{}' has {} values but the index has {} rows",
                    col.name,
                    col.data.len(),
                    index.len()
                )));
            }
            if columns[..i].iter().any(|c| c.name == col.name) {
                return Err(ChartError::data(format!(
                    "duplicate column name '{}'",
                    col.name
                )));
            }
        }
        Ok(Self {
            index_name: None,
            index,
            columns,
        })
    }

    /// Start a [`TableBuilder`] over `index`.
    pub fn builder(index: PeriodIndex) -> TableBuilder {
        TableBuilder::new(index)
    }

    /// Attach a display name to the index.
    pub fn with_index_name(mut self, name: impl Into<String>) -> Self {
        self.index_name = Some(name.into());
        self
    }

    /// Index display name, if any.
    pub fn index_name(&self) -> Option<&str> {
        self.index_name.as_deref()
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Always `false`: empty tables are rejected at construction.
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Row index.
    pub fn index(&self) -> &PeriodIndex {
        &self.index
    }

    /// All columns in table order.
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Look up a column by name.
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Column names in table order.
    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.name.as_str())
    }
}

/// Builder for [`Table`].
pub struct TableBuilder {
    index: PeriodIndex,
    index_name: Option<String>,
    columns: Vec<Column>,
}

impl TableBuilder {
    /// Create a builder for a table over `index`.
    pub fn new(index: PeriodIndex) -> Self {
        Self {
            index,
            index_name: None,
            columns: Vec::new(),
        }
    }

    /// Name the index.
    pub fn index_name(mut self, name: impl Into<String>) -> Self {
        self.index_name = Some(name.into());
        self
    }

    /// Append a floating point column without missing values.
    pub fn float(self, name: impl Into<String>, values: impl IntoIterator<Item = f64>) -> Self {
        self.column(
            name,
            ColumnData::Float(values.into_iter().map(Some).collect()),
        )
    }

    /// Append an integer column without missing values.
    pub fn int(self, name: impl Into<String>, values: impl IntoIterator<Item = i64>) -> Self {
        self.column(name, ColumnData::Int(values.into_iter().map(Some).collect()))
    }

    /// Append a text column.
    pub fn text<S: Into<String>>(
        self,
        name: impl Into<String>,
        values: impl IntoIterator<Item = S>,
    ) -> Self {
        self.column(
            name,
            ColumnData::Text(values.into_iter().map(|s| Some(s.into())).collect()),
        )
    }

    /// Append an arbitrary column.
    pub fn column(mut self, name: impl Into<String>, data: ColumnData) -> Self {
        self.columns.push(Column {
            name: name.into(),
            data,
        });
        self
    }

    /// Build and validate the table.
    pub fn build(self) -> ChartResult<Table> {
        let table = Table::new(self.index, self.columns)?;
        Ok(match self.index_name {
            Some(name) => table.with_index_name(name),
            None => table,
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/table/model.rs"]
mod tests;
