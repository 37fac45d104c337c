use approx::assert_relative_eq;
use chrono::NaiveDate;

use super::*;
use crate::table::model::ColumnData;

fn ts(y: i32, m: u32, d: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap()
}

fn opts(steps: usize, interpolate_period: bool) -> InterpolateOpts {
    InterpolateOpts {
        steps_per_period: steps,
        interpolate_period,
    }
}

fn yearly() -> Table {
    Table::builder(PeriodIndex::Numeric(vec![2000.0, 2001.0, 2002.0]))
        .float("v", [1.0, 2.0, 4.0])
        .build()
        .unwrap()
}

#[test]
fn yearly_two_steps_matches_edge_fill_policy() {
    let out = interpolate_frames(&yearly(), &["v".to_owned()], opts(2, true)).unwrap();
    assert_eq!(out.len(), 6);
    assert_eq!(
        out.index(),
        &PeriodIndex::Numeric(vec![2000.0, 2000.5, 2001.0, 2001.5, 2002.0, 2002.0])
    );
    let values: Vec<f64> = out.column_values(0).iter().map(|v| v.unwrap()).collect();
    assert_eq!(values, vec![1.0, 1.5, 2.0, 3.0, 4.0, 4.0]);
}

#[test]
fn row_count_is_steps_times_rows() {
    for steps in 1..6 {
        for rows in 1..5 {
            let table = Table::builder(PeriodIndex::Numeric((0..rows).map(f64::from).collect()))
                .float("v", (0..rows).map(|r| f64::from(r) * 3.0))
                .build()
                .unwrap();
            for interpolate in [true, false] {
                let out =
                    interpolate_frames(&table, &["v".to_owned()], opts(steps, interpolate)).unwrap();
                assert_eq!(out.len(), steps * rows as usize);
            }
        }
    }
}

#[test]
fn first_and_last_index_values_are_preserved() {
    let table = Table::builder(PeriodIndex::DateTime(vec![
        ts(2020, 1, 1),
        ts(2020, 1, 2),
        ts(2020, 1, 10),
    ]))
    .float("v", [0.0, 1.0, 2.0])
    .build()
    .unwrap();

    for interpolate in [true, false] {
        let out = interpolate_frames(&table, &["v".to_owned()], opts(4, interpolate)).unwrap();
        assert_eq!(out.index_value(0), Some(IndexValue::DateTime(ts(2020, 1, 1))));
        assert_eq!(
            out.index_value(out.len() - 1),
            Some(IndexValue::DateTime(ts(2020, 1, 10)))
        );
    }
}

#[test]
fn datetime_index_is_evenly_spaced_over_the_grid() {
    let table = Table::builder(PeriodIndex::DateTime(vec![
        ts(2020, 1, 1),
        ts(2020, 1, 2),
        ts(2020, 1, 5),
    ]))
    .float("v", [0.0, 10.0, 20.0])
    .build()
    .unwrap();
    let out = interpolate_frames(&table, &["v".to_owned()], opts(2, true)).unwrap();

    let PeriodIndex::DateTime(idx) = out.index() else {
        panic!("expected datetime index");
    };
    // Four days over four grid steps: one day apart, regardless of the source spacing.
    assert_eq!(idx[..5], [ts(2020, 1, 1), ts(2020, 1, 2), ts(2020, 1, 3), ts(2020, 1, 4), ts(2020, 1, 5)]);
    assert_eq!(idx[5], ts(2020, 1, 5));

    let values: Vec<f64> = out.column_values(0).iter().map(|v| v.unwrap()).collect();
    assert_eq!(values, vec![0.0, 5.0, 10.0, 15.0, 20.0, 20.0]);
}

#[test]
fn forward_fill_keeps_index_stepped_and_data_linear() {
    let out = interpolate_frames(&yearly(), &["v".to_owned()], opts(2, false)).unwrap();
    assert_eq!(
        out.index(),
        &PeriodIndex::Numeric(vec![2000.0, 2000.0, 2001.0, 2001.0, 2002.0, 2002.0])
    );
    let values: Vec<f64> = out.column_values(0).iter().map(|v| v.unwrap()).collect();
    assert_eq!(values, vec![1.0, 1.5, 2.0, 3.0, 4.0, 4.0]);
}

#[test]
fn ordinal_index_is_forward_filled_even_when_interpolating() {
    let table = Table::builder(PeriodIndex::Ordinal(vec!["a".into(), "b".into()]))
        .float("v", [0.0, 3.0])
        .build()
        .unwrap();
    let out = interpolate_frames(&table, &["v".to_owned()], opts(3, true)).unwrap();
    assert_eq!(
        out.index(),
        &PeriodIndex::Ordinal(vec![
            "a".into(),
            "a".into(),
            "a".into(),
            "b".into(),
            "b".into(),
            "b".into()
        ])
    );
    assert_relative_eq!(out.x_coord(4), 4.0 / 3.0);
    assert_eq!(out.period_labels(), Some(vec!["a".to_owned(), "b".to_owned()]));
}

#[test]
fn missing_cells_are_filled_but_leading_gaps_are_not() {
    let table = Table::builder(PeriodIndex::Numeric(vec![0.0, 1.0, 2.0, 3.0]))
        .column(
            "v",
            ColumnData::Float(vec![None, Some(2.0), None, Some(6.0)]),
        )
        .build()
        .unwrap();
    let out = interpolate_frames(&table, &["v".to_owned()], opts(2, true)).unwrap();
    assert_eq!(
        out.column_values(0),
        &[
            None,
            None,
            Some(2.0),
            Some(3.0),
            Some(4.0),
            Some(5.0),
            Some(6.0),
            Some(6.0)
        ]
    );
}

#[test]
fn decreasing_index_cannot_be_interpolated() {
    let table = Table::builder(PeriodIndex::Numeric(vec![2.0, 1.0]))
        .float("v", [1.0, 2.0])
        .build()
        .unwrap();
    let err = interpolate_frames(&table, &["v".to_owned()], opts(2, true)).unwrap_err();
    assert!(matches!(err, ChartError::Data(_)));
    assert!(interpolate_frames(&table, &["v".to_owned()], opts(2, false)).is_ok());
}

#[test]
fn zero_steps_is_a_config_error() {
    let err = interpolate_frames(&yearly(), &["v".to_owned()], opts(0, true)).unwrap_err();
    assert!(matches!(err, ChartError::Config(_)));
}

#[test]
fn single_row_table_repeats_its_row() {
    let table = Table::builder(PeriodIndex::DateTime(vec![ts(2021, 6, 1)]))
        .float("v", [7.0])
        .build()
        .unwrap();
    let out = interpolate_frames(&table, &["v".to_owned()], opts(3, true)).unwrap();
    assert_eq!(out.len(), 3);
    assert_eq!(out.value(0, 2), Some(7.0));
    assert_eq!(out.index_value(2), Some(IndexValue::DateTime(ts(2021, 6, 1))));
}

#[test]
fn time_weighted_gap_fill_uses_x_distance() {
    let xs = [0.0, 1.0, 4.0];
    let mut ys = [Some(0.0), None, Some(8.0)];
    fill_gaps(&xs, &mut ys);
    assert_eq!(ys[1], Some(2.0));
}

#[test]
fn json_dump_lists_index_and_columns() {
    let out = interpolate_frames(&yearly(), &["v".to_owned()], opts(1, true)).unwrap();
    let v = out.to_json();
    assert_eq!(v["index"], serde_json::json!([2000.0, 2001.0, 2002.0]));
    assert_eq!(v["columns"][0]["name"], "v");
    assert_eq!(v["columns"][0]["values"], serde_json::json!([1.0, 2.0, 4.0]));
}
