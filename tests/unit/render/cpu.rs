use super::*;
use crate::plot::axes::{Line, PointCollection};

fn backend(width: u32, height: u32) -> CpuBackend {
    CpuBackend::new(RenderSettings {
        canvas: Canvas { width, height },
        dpi: 72.0,
        font: None,
    })
    .unwrap()
}

fn axes() -> Axes {
    let mut ax = Axes::new();
    ax.set_xlim(0.0, 10.0);
    ax.set_ylim(0.0, 1.0);
    ax
}

#[test]
fn draws_figure_background_and_axes_face() {
    let frame = backend(200, 100).render_axes(&axes()).unwrap();
    assert_eq!((frame.width, frame.height), (200, 100));
    assert_eq!(frame.data.len(), 200 * 100 * 4);
    assert_eq!(frame.pixel(1, 1), Some(FIGURE_BG));
    assert_eq!(frame.pixel(100, 20), Some(AXES_FACE));
}

#[test]
fn strokes_lines_in_series_color() {
    let mut ax = axes();
    ax.plot(Line {
        label: "a".into(),
        points: vec![(0.0, Some(0.5)), (10.0, Some(0.5))],
        color: Color::rgb8(255, 0, 0),
        width: 4.0,
    });
    let frame = backend(200, 100).render_axes(&ax).unwrap();
    assert_eq!(frame.pixel(100, 49), Some([255, 0, 0, 255]));
    assert_eq!(frame.pixel(100, 20), Some(AXES_FACE));
}

#[test]
fn fills_markers_by_area() {
    let mut ax = axes();
    ax.scatter(PointCollection {
        label: "a".into(),
        points: vec![(5.0, Some(0.5)), (1.0, None)],
        size: 400.0,
        color: Color::rgb8(0, 0, 255),
    });
    let frame = backend(200, 100).render_axes(&ax).unwrap();
    assert_eq!(frame.pixel(101, 49), Some([0, 0, 255, 255]));
    assert_eq!(frame.pixel(101, 30), Some(AXES_FACE));
}

#[test]
fn data_outside_the_view_is_clipped() {
    let mut ax = axes();
    ax.plot(Line {
        label: "a".into(),
        points: vec![(0.0, Some(5.0)), (10.0, Some(5.0))],
        color: Color::rgb8(255, 0, 0),
        width: 200.0,
    });
    let frame = backend(200, 100).render_axes(&ax).unwrap();
    assert_eq!(frame.pixel(1, 1), Some(FIGURE_BG));
}

#[test]
fn tiny_canvas_is_a_render_error() {
    let err = backend(10, 10).render_axes(&axes()).unwrap_err();
    assert!(matches!(err, ChartError::Render(_)));
}

#[test]
fn polylines_break_at_missing_values() {
    let area = PlotArea {
        rect: Rect::new(0.0, 0.0, 10.0, 10.0),
        x: (0.0, 10.0),
        y: (0.0, 10.0),
    };
    let path = polyline(&area, &[(0.0, Some(0.0)), (1.0, None), (2.0, Some(2.0)), (3.0, Some(3.0))]);
    let moves = path
        .elements()
        .iter()
        .filter(|e| matches!(e, kurbo::PathEl::MoveTo(_)))
        .count();
    assert_eq!(moves, 2);
}

#[test]
fn text_anchor_alignment() {
    let style = TextStyle {
        ha: HAlign::Right,
        va: VAlign::Bottom,
        ..TextStyle::default()
    };
    let p = aligned_origin(Point::new(100.0, 50.0), 20.0, 10.0, &style);
    assert_eq!((p.x, p.y), (80.0, 40.0));
}
