use super::*;
use std::io::Cursor;

#[test]
fn parses_datetime_index_and_infers_column_types() {
    let json = r#"
{
  "index": { "name": "date", "kind": "datetime", "values": ["2020-01-01", "2020-01-02T12:00:00"] },
  "columns": [
    { "name": "temp", "values": [1.5, null] },
    { "name": "count", "values": [1, 2] },
    { "name": "city", "values": ["A", "B"] }
  ]
}
"#;
    let t = Table::from_reader(Cursor::new(json)).unwrap();
    assert_eq!(t.index_name(), Some("date"));
    assert_eq!(t.index().kind(), IndexKind::DateTime);
    assert_eq!(
        t.column("temp").unwrap().data,
        ColumnData::Float(vec![Some(1.5), None])
    );
    assert_eq!(
        t.column("count").unwrap().data,
        ColumnData::Int(vec![Some(1), Some(2)])
    );
    assert!(!t.column("city").unwrap().data.is_numeric());
}

#[test]
fn mixed_int_and_float_becomes_float() {
    let json = r#"{ "index": { "kind": "numeric", "values": [1, 2] },
                    "columns": [ { "name": "v", "values": [1, 2.5] } ] }"#;
    let t = Table::from_reader(Cursor::new(json)).unwrap();
    assert_eq!(
        t.column("v").unwrap().data,
        ColumnData::Float(vec![Some(1.0), Some(2.5)])
    );
}

#[test]
fn ordinal_index_stringifies_values() {
    let json = r#"{ "index": { "kind": "ordinal", "values": ["Q1", 2] },
                    "columns": [ { "name": "v", "values": [1, 2] } ] }"#;
    let t = Table::from_reader(Cursor::new(json)).unwrap();
    assert_eq!(
        t.index(),
        &PeriodIndex::Ordinal(vec!["Q1".to_owned(), "2".to_owned()])
    );
}

#[test]
fn bad_timestamp_is_a_data_error() {
    let json = r#"{ "index": { "kind": "datetime", "values": ["yesterday"] }, "columns": [] }"#;
    let err = Table::from_reader(Cursor::new(json)).unwrap_err();
    assert!(matches!(err, ChartError::Data(_)));
}

#[test]
fn malformed_json_is_a_serde_error() {
    let err = Table::from_reader(Cursor::new("{")).unwrap_err();
    assert!(matches!(err, ChartError::Serde(_)));
}

#[test]
fn parse_datetime_formats() {
    assert!(parse_datetime("2020-01-01").is_some());
    assert!(parse_datetime("2020-01-01 10:30:00").is_some());
    assert!(parse_datetime("2020-01-01T10:30").is_some());
    assert!(parse_datetime("01/01/2020").is_none());
}
