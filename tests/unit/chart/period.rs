use super::*;
use crate::chart::config::PeriodLabelStyle;
use crate::interp::frames::{InterpolateOpts, interpolate_frames};
use crate::table::model::{PeriodIndex, Table};
use chrono::NaiveDate;

fn num(x: f64) -> IndexValue {
    IndexValue::Numeric(x)
}

#[test]
fn templates_substitute_the_index_value() {
    let f = PeriodFormatter::new(IndexKind::Numeric, Some("Year {x:.0f}")).unwrap();
    assert_eq!(f.format(&num(2000.4)), "Year 2000");

    let f = PeriodFormatter::new(IndexKind::Numeric, Some("{x:,.2f} units")).unwrap();
    assert_eq!(f.format(&num(1234567.891)), "1,234,567.89 units");
    assert_eq!(f.format(&num(-999.0)), "-999.00 units");

    let f = PeriodFormatter::new(IndexKind::Numeric, Some("{{{x:d}}}")).unwrap();
    assert_eq!(f.format(&num(7.9)), "{7}");

    let f = PeriodFormatter::new(IndexKind::Numeric, Some("t={x}")).unwrap();
    assert_eq!(f.format(&num(2.5)), "t=2.5");
}

#[test]
fn bad_templates_are_config_errors() {
    for fmt in ["{y}", "{x:>8}", "{x", "x}", "{x:.f}"] {
        let err = PeriodFormatter::new(IndexKind::Numeric, Some(fmt)).unwrap_err();
        assert!(matches!(err, ChartError::Config(_)), "{fmt}");
    }
    assert!(PeriodFormatter::new(IndexKind::Ordinal, Some("{x:.1f}")).is_err());
    assert!(PeriodFormatter::new(IndexKind::Ordinal, Some("Q: {x}")).is_ok());
}

#[test]
fn strftime_patterns_are_validated_and_applied() {
    let t = NaiveDate::from_ymd_opt(2021, 3, 4)
        .unwrap()
        .and_hms_opt(5, 6, 7)
        .unwrap();
    let f = PeriodFormatter::new(IndexKind::DateTime, Some("%Y-%m")).unwrap();
    assert_eq!(f.format(&IndexValue::DateTime(t)), "2021-03");

    assert!(PeriodFormatter::new(IndexKind::DateTime, Some("%Y-%")).is_err());
}

#[test]
fn zone_fields_are_rejected_for_naive_timestamps() {
    for fmt in ["%Y %z", "%Z", "%:z"] {
        let err = PeriodFormatter::new(IndexKind::DateTime, Some(fmt)).unwrap_err();
        assert!(matches!(err, ChartError::Config(_)), "{fmt}");
    }
    let f = PeriodFormatter::new(IndexKind::DateTime, Some("%d %b %Y %H:%M")).unwrap();
    let t = NaiveDate::from_ymd_opt(1999, 12, 31)
        .unwrap()
        .and_hms_opt(23, 59, 0)
        .unwrap();
    assert_eq!(f.format(&IndexValue::DateTime(t)), "31 Dec 1999 23:59");
}

#[test]
fn no_pattern_uses_display_form() {
    let f = PeriodFormatter::new(IndexKind::Ordinal, None).unwrap();
    assert_eq!(f.format(&IndexValue::Ordinal("Q1".into())), "Q1");
    let f = PeriodFormatter::new(IndexKind::DateTime, None).unwrap();
    let t = NaiveDate::from_ymd_opt(2021, 1, 1)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap();
    assert_eq!(f.format(&IndexValue::DateTime(t)), "2021-01-01 00:00:00");
}

#[test]
fn annotator_creates_one_text_and_updates_it() {
    let table = Table::builder(PeriodIndex::Numeric(vec![1.0, 2.0, 3.0]))
        .float("a", [1.0, 2.0, 3.0])
        .build()
        .unwrap();
    let t = interpolate_frames(
        &table,
        &["a".to_owned()],
        InterpolateOpts {
            steps_per_period: 2,
            interpolate_period: true,
        },
    )
    .unwrap();

    let mut ann = PeriodAnnotator::new(IndexKind::Numeric, Some("{x:.1f}"), &PeriodLabel::default()).unwrap();
    let mut axes = Axes::new();
    for i in 0..t.len() {
        ann.annotate(&mut axes, &t, i).unwrap();
        assert_eq!(axes.texts().len(), 1);
        assert_eq!(axes.texts()[0].content, ann.label_for(&t, i).unwrap());
    }
    assert_eq!(axes.texts()[0].content, "3.0");
    assert_eq!((axes.texts()[0].x, axes.texts()[0].y), (0.9, 0.1));
}

#[test]
fn disabled_label_draws_nothing() {
    let table = Table::builder(PeriodIndex::Numeric(vec![1.0]))
        .float("a", [1.0])
        .build()
        .unwrap();
    let t = interpolate_frames(
        &table,
        &["a".to_owned()],
        InterpolateOpts {
            steps_per_period: 1,
            interpolate_period: false,
        },
    )
    .unwrap();
    let mut ann = PeriodAnnotator::new(IndexKind::Numeric, None, &PeriodLabel::Enabled(false)).unwrap();
    assert!(!ann.enabled());
    let mut axes = Axes::new();
    ann.annotate(&mut axes, &t, 0).unwrap();
    assert!(axes.texts().is_empty());
}

#[test]
fn label_style_without_position_fails_construction() {
    let label = PeriodLabel::Style(PeriodLabelStyle {
        y: Some(0.5),
        ..PeriodLabelStyle::default()
    });
    assert!(PeriodAnnotator::new(IndexKind::Numeric, None, &label).is_err());
}
