use super::*;
use crate::encode::sink::InMemorySink;
use crate::render::cpu::CpuBackend;
use crate::table::model::PeriodIndex;

fn animation(config: ChartConfig) -> Animation {
    let table = Table::builder(PeriodIndex::Numeric(vec![2000.0, 2001.0, 2002.0]))
        .float("a", [1.0, 2.0, 4.0])
        .float("b", [3.0, 1.0, 2.0])
        .build()
        .unwrap();
    let chart = Chart::new(&table, config).unwrap();
    let backend = CpuBackend::new(RenderSettings {
        canvas: Canvas {
            width: 200,
            height: 100,
        },
        dpi: 72.0,
        font: None,
    })
    .unwrap();
    Animation::with_backend(chart, Box::new(backend)).unwrap()
}

fn config() -> ChartConfig {
    ChartConfig {
        steps_per_period: 4,
        period_length: 200,
        ..ChartConfig::default()
    }
}

#[test]
fn chart_errors_surface_before_font_errors() {
    let table = Table::builder(PeriodIndex::Numeric(vec![1.0, 2.0]))
        .text("name", ["a", "b"])
        .build()
        .unwrap();
    let config = ChartConfig {
        font_path: Some(PathBuf::from("/definitely/not/here.ttf")),
        ..config()
    };
    assert!(matches!(
        Animation::new(&table, config.clone()),
        Err(ChartError::Data(_))
    ));

    let table = Table::builder(PeriodIndex::Numeric(vec![1.0, 2.0]))
        .float("a", [1.0, 2.0])
        .build()
        .unwrap();
    assert!(matches!(
        Animation::new(&table, config),
        Err(ChartError::Config(_))
    ));
}

#[test]
fn timing_follows_period_length_and_steps() {
    let anim = animation(config());
    assert_eq!(anim.frame_count(), 12);
    assert_eq!(anim.interval_ms(), 50.0);
    assert_eq!(anim.fps(), Fps::new(20, 1).unwrap());
}

#[test]
fn render_into_pushes_every_frame_in_order() {
    let mut anim = animation(config());
    let mut sink = InMemorySink::new();
    let stats = anim.render_into(&mut sink).unwrap();

    assert_eq!(stats.frames_rendered, 12);
    assert!((stats.duration_ms - 600.0).abs() < 1e-9);
    assert!(sink.is_finished());
    let cfg = sink.config().unwrap();
    assert_eq!((cfg.width, cfg.height, cfg.frame_count), (200, 100, 12));
    let indices: Vec<u64> = sink.frames().iter().map(|(i, _)| i.0).collect();
    assert_eq!(indices, (0..12).collect::<Vec<_>>());
}

#[test]
fn runs_restart_from_the_first_frame() {
    let mut anim = animation(config());
    let mut first = InMemorySink::new();
    anim.render_into(&mut first).unwrap();
    let mut second = InMemorySink::new();
    anim.render_into(&mut second).unwrap();
    assert_eq!(first.frames().len(), second.frames().len());
    assert_eq!(first.frames()[0].1.data, second.frames()[0].1.data);
    assert_eq!(first.frames()[11].1.data, second.frames()[11].1.data);
}

#[test]
fn single_frame_matches_playback() {
    let mut anim = animation(config());
    let mut sink = InMemorySink::new();
    anim.render_into(&mut sink).unwrap();

    let frame = anim.render_frame(5).unwrap();
    assert_eq!(frame.data, sink.frames()[5].1.data);
    assert_eq!(anim.chart().last_frame(), Some(5));
    assert!(matches!(anim.render_frame(12), Err(ChartError::Render(_))));
}

#[test]
fn gif_save_writes_a_file() {
    let out = PathBuf::from("target/chartreel_unit/anim/driver.gif");
    let mut anim = animation(config());
    let stats = anim.save(&out).unwrap();
    assert_eq!(stats.frames_rendered, 12);
    assert!(std::fs::metadata(&out).unwrap().len() > 0);
}

#[test]
fn html5_video_needs_ffmpeg() {
    let mut anim = animation(config());
    if !crate::encode::ffmpeg::is_ffmpeg_on_path() {
        assert!(matches!(anim.to_html5_video(), Err(ChartError::Encode(_))));
        return;
    }
    let video = anim.to_html5_video().unwrap();
    assert_eq!((video.width, video.height), (200, 100));
    assert!(!video.mp4.is_empty());
    assert!(video.to_html().contains("data:video/mp4;base64,"));
}
