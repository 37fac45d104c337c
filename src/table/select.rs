use crate::foundation::error::{ChartError, ChartResult};
use crate::table::model::Table;

/// Names of the columns that hold plottable numeric data, in table order.
///
/// With `requested`, only those columns are considered (in the requested order) and every name
/// must exist in the table. Non-numeric columns are skipped silently.
pub fn data_columns(table: &Table, requested: Option<&[String]>) -> ChartResult<Vec<String>> {
    let candidates: Vec<&str> = match requested {
        Some(names) => names.iter().map(String::as_str).collect(),
        None => table.column_names().collect(),
    };

    let mut out = Vec::with_capacity(candidates.len());
    for name in candidates {
        let col = table.column(name).ok_or_else(|| {
            ChartError::data(format!(
                "could not find '{name}' in the columns of the provided table"
            ))
        })?;
        if col.data.is_numeric() && !out.iter().any(|n: &String| n == name) {
            out.push(name.to_owned());
        }
    }

    if out.is_empty() {
        return Err(ChartError::data(
            "no numeric data columns found for plotting",
        ));
    }
    Ok(out)
}

#[cfg(test)]
#[path = "../../tests/unit/table/select.rs"]
mod tests;
