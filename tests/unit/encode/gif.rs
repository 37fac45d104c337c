use super::*;
use crate::foundation::core::Fps;
use image::AnimationDecoder as _;

fn cfg(frame_count: u64) -> SinkConfig {
    SinkConfig {
        width: 8,
        height: 4,
        fps: Fps::new(20, 1).unwrap(),
        frame_count,
    }
}

fn solid(premul: [u8; 4]) -> FrameRGBA {
    FrameRGBA {
        width: 8,
        height: 4,
        data: premul.repeat(8 * 4),
        premultiplied: true,
    }
}

fn decode(path: &std::path::Path) -> Vec<image::Frame> {
    let reader = std::io::BufReader::new(File::open(path).unwrap());
    let decoder = image::codecs::gif::GifDecoder::new(reader).unwrap();
    decoder.into_frames().collect_frames().unwrap()
}

#[test]
fn writes_every_frame_with_the_frame_delay() {
    let out = PathBuf::from("target/chartreel_unit/gif_sink/frames.gif");
    let mut sink = GifSink::new(GifSinkOpts::new(&out));
    sink.begin(cfg(3)).unwrap();
    sink.push_frame(FrameIndex(0), &solid([255, 0, 0, 255])).unwrap();
    sink.push_frame(FrameIndex(1), &solid([0, 255, 0, 255])).unwrap();
    sink.push_frame(FrameIndex(2), &solid([0, 0, 255, 255])).unwrap();
    sink.end().unwrap();

    let frames = decode(&out);
    assert_eq!(frames.len(), 3);
    let (num, den) = frames[0].delay().numer_denom_ms();
    assert_eq!(f64::from(num) / f64::from(den), 50.0);
    let px = frames[1].buffer().get_pixel(3, 2).0;
    assert!(px[1] > 200 && px[0] < 50 && px[2] < 50, "{px:?}");
}

#[test]
fn transparent_pixels_become_the_background() {
    let out = PathBuf::from("target/chartreel_unit/gif_sink/transparent.gif");
    let mut sink = GifSink::new(GifSinkOpts::new(&out));
    sink.begin(cfg(1)).unwrap();
    sink.push_frame(FrameIndex(0), &solid([0, 0, 0, 0])).unwrap();
    sink.end().unwrap();

    let frames = decode(&out);
    let px = frames[0].buffer().get_pixel(0, 0).0;
    assert!(px[0] > 240 && px[1] > 240 && px[2] > 240, "{px:?}");
}

#[test]
fn rejects_out_of_order_and_mismatched_frames() {
    let out = PathBuf::from("target/chartreel_unit/gif_sink/bad.gif");
    let mut sink = GifSink::new(GifSinkOpts::new(&out));
    assert!(sink.push_frame(FrameIndex(0), &solid([0, 0, 0, 255])).is_err());

    sink.begin(cfg(2)).unwrap();
    sink.push_frame(FrameIndex(1), &solid([0, 0, 0, 255])).unwrap();
    assert!(matches!(
        sink.push_frame(FrameIndex(1), &solid([0, 0, 0, 255])),
        Err(ChartError::Encode(_))
    ));
    let wrong = FrameRGBA {
        width: 2,
        height: 2,
        data: vec![0; 16],
        premultiplied: true,
    };
    assert!(sink.push_frame(FrameIndex(2), &wrong).is_err());
    sink.end().unwrap();
    assert!(sink.end().is_err());
}

#[test]
fn slow_frame_rates_do_not_overflow_the_delay() {
    let (num, den) = frame_delay(Fps::new(1, 4_294_968).unwrap()).numer_denom_ms();
    assert!(f64::from(num) / f64::from(den) > 4.0e9);

    let (num, den) = frame_delay(Fps::new(70, 3).unwrap()).numer_denom_ms();
    assert!((f64::from(num) / f64::from(den) - 300.0 / 7.0).abs() < 1e-3);

    let out = PathBuf::from("target/chartreel_unit/gif_sink/slow.gif");
    let mut sink = GifSink::new(GifSinkOpts::new(&out));
    let slow = SinkConfig {
        fps: Fps::new(1, 4_294_968).unwrap(),
        ..cfg(1)
    };
    sink.begin(slow).unwrap();
    sink.push_frame(FrameIndex(0), &solid([0, 0, 0, 255])).unwrap();
    sink.end().unwrap();
}
