use super::*;

#[test]
fn png_is_flattened_over_white() {
    let frame = FrameRGBA {
        width: 2,
        height: 1,
        data: vec![0, 0, 0, 0, 128, 0, 0, 128],
        premultiplied: true,
    };
    let out = Path::new("target/chartreel_unit/encode/flat.png");
    write_png(out, &frame).unwrap();

    let img = image::open(out).unwrap().to_rgba8();
    assert_eq!(img.dimensions(), (2, 1));
    assert_eq!(img.get_pixel(0, 0).0, [255, 255, 255, 255]);
    let px = img.get_pixel(1, 0).0;
    assert_eq!(px[3], 255);
    assert!(px[0] == 255 && (126..=128).contains(&px[1]), "{px:?}");
}

#[test]
fn gif_extension_is_case_insensitive() {
    // Only the GIF sink can begin without ffmpeg; an odd size is fine for it.
    let mut sink = sink_for_path(Path::new("target/chartreel_unit/encode/pick.GIF"));
    let cfg = sink::SinkConfig {
        width: 3,
        height: 3,
        fps: crate::foundation::core::Fps::new(10, 1).unwrap(),
        frame_count: 0,
    };
    sink.begin(cfg).unwrap();
    sink.end().unwrap();
}
