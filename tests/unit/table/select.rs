use super::*;
use crate::table::model::{ColumnData, PeriodIndex};

fn mixed() -> Table {
    Table::builder(PeriodIndex::Numeric(vec![0.0, 1.0]))
        .text("name", ["a", "b"])
        .float("x", [1.0, 2.0])
        .column("y", ColumnData::Int(vec![Some(1), None]))
        .text("note", ["", ""])
        .build()
        .unwrap()
}

#[test]
fn keeps_numeric_columns_in_table_order() {
    assert_eq!(data_columns(&mixed(), None).unwrap(), vec!["x", "y"]);
}

#[test]
fn requested_subset_is_filtered_and_ordered() {
    let req = vec!["y".to_owned(), "name".to_owned(), "x".to_owned()];
    assert_eq!(data_columns(&mixed(), Some(&req)).unwrap(), vec!["y", "x"]);
}

#[test]
fn missing_requested_column_fails() {
    let req = vec!["nope".to_owned()];
    let err = data_columns(&mixed(), Some(&req)).unwrap_err();
    assert!(matches!(err, ChartError::Data(_)));
    assert!(err.to_string().contains("'nope'"));
}

#[test]
fn no_numeric_columns_fails() {
    let t = Table::builder(PeriodIndex::Numeric(vec![0.0]))
        .text("name", ["a"])
        .build()
        .unwrap();
    let err = data_columns(&t, None).unwrap_err();
    assert!(err.to_string().contains("no numeric data columns"));
}
